//! The cover renderer: one pass over an abstract surface.
//!
//! [`CoverRenderer::render`] paints a complete spread from a
//! [`CoverState`] snapshot: full-canvas background, optional trim guides,
//! then the back cover, spine, and front cover, each through a translated
//! [`PanelSurface`] so panel code works in local coordinates. The routine is
//! pure with respect to the state (read-only) and stateless between calls;
//! the same code serves preview and export, differing only in density.

use std::f32::consts::PI;

use log::{debug, warn};
use rand::Rng;

use crate::error::CoverError;
use crate::layout::{Density, SpreadLayout};
use crate::state::{BackgroundStyle, CoverState};
use crate::style::{Color, ColorScheme, Decoration, FontSpec, StyleCatalog, Template};
use crate::surface::{DrawSurface, PanelSurface, TextAlign, TextStyle};

/// Trim guides are 1px red lines at 30% alpha.
const GUIDE_COLOR: Color = Color::rgba(255, 0, 0, 77);

/// Number of accent specks in the textured background.
const TEXTURE_SPECK_COUNT: usize = 100;

// ============================================================================
// Text wrapping
// ============================================================================

/// Greedily packs words onto lines no wider than `max_width`.
///
/// A line breaks before the first word that would overflow, so a single word
/// wider than `max_width` still lands on its own line rather than being
/// split. Words are never dropped or reordered; an empty (or all-whitespace)
/// input produces no lines.
pub fn wrap_lines(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wraps `text` against the surface's own metrics and draws each line.
fn draw_wrapped(
    surface: &mut impl DrawSurface,
    text: &str,
    x: f32,
    y: f32,
    max_width: f32,
    line_height: f32,
    style: TextStyle<'_>,
) {
    if style.size < 1.0 {
        return;
    }
    let lines = wrap_lines(text, max_width, |s| {
        surface.measure_text(s, style.font, style.size)
    });
    for (i, line) in lines.iter().enumerate() {
        surface.draw_text(line, x, y + i as f32 * line_height, style);
    }
}

// ============================================================================
// CoverRenderer
// ============================================================================

/// Renders [`CoverState`] snapshots against an immutable [`StyleCatalog`].
pub struct CoverRenderer<'a> {
    catalog: &'a StyleCatalog,
}

impl<'a> CoverRenderer<'a> {
    pub fn new(catalog: &'a StyleCatalog) -> Self {
        Self { catalog }
    }

    /// Paints one complete cover spread onto `surface`.
    ///
    /// The surface must already be sized to the layout computed from the
    /// state and density; a mismatch is an error rather than a silently
    /// cropped or blank render. An unknown color scheme is rejected for the
    /// same reason. An unknown template only skips the front panel.
    pub fn render<S: DrawSurface>(
        &self,
        state: &CoverState,
        density: Density,
        surface: &mut S,
    ) -> Result<(), CoverError> {
        let layout = SpreadLayout::compute(state.trim_size, state.spine_width_in, density);
        let actual = surface.dimensions();
        if actual != layout.total {
            return Err(CoverError::SurfaceSize { expected: layout.total, actual });
        }
        let colors = self
            .catalog
            .color_scheme(&state.color_scheme)
            .ok_or_else(|| CoverError::UnknownColorScheme(state.color_scheme.clone()))?;

        debug!(
            "rendering {} spread at {} dpi: {}",
            state.trim_size,
            density.dpi(),
            layout.total
        );

        paint_background(surface, state.background, colors);

        if state.show_guides {
            draw_guides(surface, &layout);
        }

        let mut back = PanelSurface::new(surface, layout.back_rect());
        render_back_cover(&mut back, state, colors);

        let mut spine = PanelSurface::new(surface, layout.spine_rect());
        render_spine(&mut spine, state, colors);

        let mut front = PanelSurface::new(surface, layout.front_rect());
        match self.catalog.template(&state.template) {
            Some(template) => render_front_cover(&mut front, state, template, colors),
            // Soft-fail: keep the shared background visible and leave the
            // other panels untouched.
            None => warn!("unknown template {:?}; skipping front cover", state.template),
        }

        Ok(())
    }
}

// ============================================================================
// Background
// ============================================================================

fn paint_background(surface: &mut impl DrawSurface, style: BackgroundStyle, colors: &ColorScheme) {
    let dims = surface.dimensions();
    let (w, h) = (dims.width as f32, dims.height as f32);

    match style {
        BackgroundStyle::Solid => surface.fill_rect(0.0, 0.0, w, h, colors.primary),
        BackgroundStyle::Gradient => surface.fill_linear_gradient(colors.primary, colors.secondary),
        BackgroundStyle::Texture => {
            surface.fill_rect(0.0, 0.0, w, h, colors.primary);
            let speck = colors.accent.with_alpha(0.1);
            let mut rng = rand::thread_rng();
            for _ in 0..TEXTURE_SPECK_COUNT {
                let x = rng.gen_range(0.0..w);
                let y = rng.gen_range(0.0..h);
                let size = rng.gen_range(2.0..12.0);
                surface.fill_rect(x, y, size, size, speck);
            }
        }
        BackgroundStyle::Geometric => {
            surface.fill_rect(0.0, 0.0, w, h, colors.primary);
            let shape = colors.secondary.with_alpha(0.3);
            // 4x2 grid of triangles, each centered in its cell.
            for i in 0..8 {
                let cx = (i % 4) as f32 * (w / 4.0) + w / 8.0;
                let cy = (i / 4) as f32 * (h / 2.0) + h / 4.0;
                let half = 50.0;
                surface.fill_polygon(
                    &[(cx, cy - half), (cx - half, cy + half), (cx + half, cy + half)],
                    shape,
                );
            }
        }
    }
}

// ============================================================================
// Guides
// ============================================================================

/// Draws the bleed edges and the trim boundary of every panel.
fn draw_guides(surface: &mut impl DrawSurface, layout: &SpreadLayout) {
    let (w, h) = (layout.total.width as f32, layout.total.height as f32);

    // Canvas edges.
    surface.stroke_line(0.0, 0.0, 0.0, h, GUIDE_COLOR);
    surface.stroke_line(w, 0.0, w, h, GUIDE_COLOR);
    surface.stroke_line(0.0, 0.0, w, 0.0, GUIDE_COLOR);
    surface.stroke_line(0.0, h, w, h, GUIDE_COLOR);

    // Trim boundaries: start of each panel, end of the front cover.
    for x in [
        layout.back_x,
        layout.spine_x,
        layout.front_x,
        layout.front_rect().right(),
    ] {
        surface.stroke_line(x as f32, 0.0, x as f32, h, GUIDE_COLOR);
    }
}

// ============================================================================
// Panels
// ============================================================================

fn render_back_cover(surface: &mut impl DrawSurface, state: &CoverState, colors: &ColorScheme) {
    let dims = surface.dimensions();
    let (w, h) = (dims.width as f32, dims.height as f32);

    surface.fill_rect(0.0, 0.0, w, h, colors.primary.with_alpha(0.9));

    let body = FontSpec::sans();
    let margin = w * 0.1;
    draw_wrapped(
        surface,
        &state.back_cover_text,
        margin,
        h * 0.2,
        w - 2.0 * margin,
        (w * 0.05).floor(),
        TextStyle {
            font: &body,
            size: (w * 0.035).floor(),
            color: colors.text,
            align: TextAlign::Left,
        },
    );

    let author_font = FontSpec::bold_sans();
    let author_size = (w * 0.04).floor();
    if author_size >= 1.0 {
        surface.draw_text(
            &state.author,
            w / 2.0,
            h * 0.9,
            TextStyle {
                font: &author_font,
                size: author_size,
                color: colors.text,
                align: TextAlign::Center,
            },
        );
    }
}

fn render_spine(surface: &mut impl DrawSurface, state: &CoverState, colors: &ColorScheme) {
    let dims = surface.dimensions();
    let (w, h) = (dims.width as f32, dims.height as f32);

    surface.fill_rect(0.0, 0.0, w, h, colors.secondary);

    let (cx, cy) = (w / 2.0, h / 2.0);

    // Lettering runs along the spine in a rotated frame; offsets across the
    // spine thickness are fractions of the spine width. A sub-pixel spine
    // keeps its layout slot but carries no text.
    let title_font = FontSpec::bold_sans();
    let title_size = (w * 0.8).floor();
    if title_size >= 1.0 && !state.title.is_empty() {
        let style = TextStyle {
            font: &title_font,
            size: title_size,
            color: colors.text,
            align: TextAlign::Center,
        };
        let lines = wrap_lines(&state.title, h * 0.8, |s| {
            surface.measure_text(s, style.font, style.size)
        });
        for (i, line) in lines.iter().enumerate() {
            let v = -w * 0.2 + i as f32 * w * 0.9;
            surface.draw_text_rotated(line, cx, cy, 0.0, v, style);
        }
    }

    let author_font = FontSpec::sans();
    let author_size = (w * 0.6).floor();
    if author_size >= 1.0 && !state.author.is_empty() {
        surface.draw_text_rotated(
            &state.author,
            cx,
            cy,
            0.0,
            w * 0.4,
            TextStyle {
                font: &author_font,
                size: author_size,
                color: colors.text,
                align: TextAlign::Center,
            },
        );
    }
}

fn render_front_cover(
    surface: &mut impl DrawSurface,
    state: &CoverState,
    template: &Template,
    colors: &ColorScheme,
) {
    let dims = surface.dimensions();
    let (w, h) = (dims.width as f32, dims.height as f32);

    // Decoration first so the text layers on top of it.
    draw_decoration(surface, template.decoration, colors, w, h);

    draw_wrapped(
        surface,
        &state.title,
        w / 2.0,
        h * 0.4,
        w * 0.8,
        (w * 0.1).floor(),
        TextStyle {
            font: &template.title_font,
            size: (w * template.title_size_factor).floor(),
            color: colors.text,
            align: TextAlign::Center,
        },
    );

    let author_size = (w * template.author_size_factor).floor();
    if author_size >= 1.0 {
        surface.draw_text(
            &state.author,
            w / 2.0,
            h * 0.8,
            TextStyle {
                font: &template.author_font,
                size: author_size,
                color: colors.text,
                align: TextAlign::Center,
            },
        );
    }
}

fn draw_decoration(
    surface: &mut impl DrawSurface,
    decoration: Decoration,
    colors: &ColorScheme,
    w: f32,
    h: f32,
) {
    match decoration {
        Decoration::Line => {
            surface.fill_rect(w * 0.2, h * 0.5, w * 0.6, 4.0, colors.accent);
        }
        Decoration::Border => {
            surface.stroke_rect(w * 0.1, h * 0.1, w * 0.8, h * 0.8, 6.0, colors.accent);
        }
        Decoration::AccentShape => {
            surface.fill_polygon(
                &[
                    (w * 0.1, h * 0.6),
                    (w * 0.9, h * 0.6),
                    (w * 0.8, h * 0.65),
                    (w * 0.2, h * 0.65),
                ],
                colors.accent,
            );
        }
        Decoration::Flourish => {
            surface.stroke_arc(w / 2.0, h * 0.2, w * 0.15, 0.0, PI, 3.0, colors.accent);
        }
        Decoration::Grid => {
            let line = colors.accent.with_alpha(0.3);
            let mut x = 0.0;
            while x < w {
                surface.stroke_line(x, 0.0, x, h, line);
                x += 50.0;
            }
            let mut y = 0.0;
            while y < h {
                surface.stroke_line(0.0, y, w, y, line);
                y += 50.0;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
