//! Abstract 2D drawing surface.
//!
//! The renderer never touches pixels directly; it speaks the small primitive
//! set defined by [`DrawSurface`]. Any backend that implements the trait can
//! serve as a render target, which is how one render routine covers both the
//! interactive preview and the offscreen high-resolution export.
//!
//! [`RasterSurface`] is the shipped backend. [`PanelSurface`] is an adapter
//! that translates a panel's local origin so each panel renderer can draw
//! from (0, 0).

mod raster;

#[cfg(test)]
pub(crate) mod trace;

pub use raster::{FontLibrary, RasterSurface};

use crate::layout::{RectPx, SizePx};
use crate::style::{Color, FontSpec};

/// Horizontal anchoring of a drawn text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left edge of the run.
    Left,
    /// `x` is the horizontal center of the run.
    Center,
}

/// Everything needed to draw one run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub font: &'a FontSpec,
    /// Glyph size in pixels.
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
}

/// A 2D drawing target.
///
/// Coordinates are in pixels with the origin at the top-left and y growing
/// downward. All paints alpha-blend over existing content. Backends clip
/// out-of-bounds drawing rather than failing.
pub trait DrawSurface {
    /// Pixel dimensions of the surface.
    fn dimensions(&self) -> SizePx;

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Fills the whole surface with a linear gradient running along its
    /// top-left to bottom-right diagonal.
    fn fill_linear_gradient(&mut self, from: Color, to: Color);

    /// Strokes a rectangle outline, `thickness` pixels wide, centered on the
    /// rectangle's edges.
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color);

    /// Strokes a 1px line segment.
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color);

    /// Fills a simple polygon. The outline closes implicitly; the final
    /// point must not repeat the first.
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color);

    /// Strokes a circular arc from `start` to `end` (radians, measured
    /// clockwise from the positive x-axis).
    fn stroke_arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
        thickness: f32,
        color: Color,
    );

    /// Measures the advance width of `text` at the given font and size.
    fn measure_text(&self, text: &str, font: &FontSpec, size: f32) -> f32;

    /// Draws one run of text with `y` at the baseline.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle<'_>);

    /// Draws one run of text in a frame rotated 90 degrees clockwise about
    /// `(cx, cy)`, so the run reads top to bottom. `(u, v)` position the run
    /// within the rotated frame exactly as `(x, y)` do for [`draw_text`]:
    /// `u` is the horizontal anchor along the rotated baseline, `v` the
    /// baseline offset from the rotation center.
    ///
    /// [`draw_text`]: DrawSurface::draw_text
    fn draw_text_rotated(
        &mut self,
        text: &str,
        cx: f32,
        cy: f32,
        u: f32,
        v: f32,
        style: TextStyle<'_>,
    );
}

// ============================================================================
// PanelSurface
// ============================================================================

/// A translated view onto another surface.
///
/// Panel renderers receive one of these with (0, 0) at the panel's top-left
/// corner, so back cover, spine, and front cover are each written in local
/// coordinates and stay independently re-orientable.
pub struct PanelSurface<'a, S: DrawSurface> {
    inner: &'a mut S,
    origin_x: f32,
    origin_y: f32,
    size: SizePx,
}

impl<'a, S: DrawSurface> PanelSurface<'a, S> {
    /// Creates a view covering `panel` on `inner`.
    pub fn new(inner: &'a mut S, panel: RectPx) -> Self {
        Self {
            inner,
            origin_x: panel.x as f32,
            origin_y: panel.y as f32,
            size: panel.size(),
        }
    }
}

impl<S: DrawSurface> DrawSurface for PanelSurface<'_, S> {
    fn dimensions(&self) -> SizePx {
        self.size
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.inner
            .fill_rect(self.origin_x + x, self.origin_y + y, w, h, color);
    }

    fn fill_linear_gradient(&mut self, from: Color, to: Color) {
        // Gradient fills are surface-wide by contract; panels never use them.
        self.inner.fill_linear_gradient(from, to);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color) {
        self.inner
            .stroke_rect(self.origin_x + x, self.origin_y + y, w, h, thickness, color);
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        self.inner.stroke_line(
            self.origin_x + x0,
            self.origin_y + y0,
            self.origin_x + x1,
            self.origin_y + y1,
            color,
        );
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        let translated: Vec<(f32, f32)> = points
            .iter()
            .map(|&(x, y)| (self.origin_x + x, self.origin_y + y))
            .collect();
        self.inner.fill_polygon(&translated, color);
    }

    fn stroke_arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
        thickness: f32,
        color: Color,
    ) {
        self.inner.stroke_arc(
            self.origin_x + cx,
            self.origin_y + cy,
            radius,
            start,
            end,
            thickness,
            color,
        );
    }

    fn measure_text(&self, text: &str, font: &FontSpec, size: f32) -> f32 {
        self.inner.measure_text(text, font, size)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle<'_>) {
        self.inner
            .draw_text(text, self.origin_x + x, self.origin_y + y, style);
    }

    fn draw_text_rotated(
        &mut self,
        text: &str,
        cx: f32,
        cy: f32,
        u: f32,
        v: f32,
        style: TextStyle<'_>,
    ) {
        self.inner
            .draw_text_rotated(text, self.origin_x + cx, self.origin_y + cy, u, v, style);
    }
}

#[cfg(test)]
mod tests {
    use super::trace::{Op, TraceSurface};
    use super::*;

    #[test]
    fn panel_surface_translates_coordinates() {
        let mut base = TraceSurface::new(SizePx::new(1300, 900));
        let panel = RectPx::new(675, 0, 600, 900);

        let mut view = PanelSurface::new(&mut base, panel);
        assert_eq!(view.dimensions(), SizePx::new(600, 900));

        view.fill_rect(10.0, 20.0, 100.0, 50.0, Color::rgb(1, 2, 3));
        view.stroke_line(0.0, 0.0, 600.0, 0.0, Color::rgb(9, 9, 9));

        assert_eq!(
            base.ops[0],
            Op::FillRect {
                x: 685.0,
                y: 20.0,
                w: 100.0,
                h: 50.0,
                color: Color::rgb(1, 2, 3),
            }
        );
        assert_eq!(
            base.ops[1],
            Op::Line {
                x0: 675.0,
                y0: 0.0,
                x1: 1275.0,
                y1: 0.0,
                color: Color::rgb(9, 9, 9),
            }
        );
    }

    #[test]
    fn panel_surface_measures_like_its_backing() {
        let mut base = TraceSurface::new(SizePx::new(100, 100));
        let width = base.measure_text("hello", &FontSpec::sans(), 10.0);

        let view = PanelSurface::new(&mut base, RectPx::new(50, 0, 50, 100));
        assert_eq!(view.measure_text("hello", &FontSpec::sans(), 10.0), width);
    }
}
