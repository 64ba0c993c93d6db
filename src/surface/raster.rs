//! Raster drawing surface backed by an RGBA image buffer.
//!
//! All primitives alpha-blend over existing pixels via
//! [`imageproc::drawing::Blend`]. Text goes through `ab_glyph` faces held in
//! a [`FontLibrary`]; a surface built without fonts still renders every
//! geometric primitive and skips glyph output with a warning, so a missing
//! font degrades the render instead of halting it.

use std::collections::HashMap;
use std::io::Cursor;

use ab_glyph::{Font as _, FontVec, PxScale, ScaleFont as _};
use image::{ImageFormat, Rgba, RgbaImage, imageops};
use imageproc::drawing::{self, Blend, Canvas as _};
use imageproc::point::Point;
use imageproc::rect::Rect;
use log::warn;
use palette::{Mix, Srgb};

use crate::error::CoverError;
use crate::layout::SizePx;
use crate::style::{Color, FontSpec, FontWeight};
use crate::surface::{DrawSurface, TextAlign, TextStyle};

// ============================================================================
// FontLibrary
// ============================================================================

/// A set of loaded typefaces keyed by [`FontSpec`].
///
/// The library always holds a default face; [`select`](Self::select) falls
/// back to progressively looser matches (drop the slant, then the weight,
/// then the family) so every spec resolves to something drawable.
pub struct FontLibrary {
    default: FontVec,
    faces: HashMap<FontSpec, FontVec>,
}

impl FontLibrary {
    /// Creates a library from the raw bytes of the default face.
    pub fn new(default_face: Vec<u8>) -> Result<Self, CoverError> {
        Ok(Self {
            default: FontVec::try_from_vec(default_face)?,
            faces: HashMap::new(),
        })
    }

    /// Registers a face for a specific spec.
    pub fn with_face(mut self, spec: FontSpec, bytes: Vec<u8>) -> Result<Self, CoverError> {
        self.faces.insert(spec, FontVec::try_from_vec(bytes)?);
        Ok(self)
    }

    /// Resolves a spec to the nearest loaded face.
    pub fn select(&self, spec: &FontSpec) -> &FontVec {
        if let Some(face) = self.faces.get(spec) {
            return face;
        }
        let upright = FontSpec { italic: false, ..*spec };
        if let Some(face) = self.faces.get(&upright) {
            return face;
        }
        let regular = FontSpec::new(spec.family, FontWeight::Normal, false);
        if let Some(face) = self.faces.get(&regular) {
            return face;
        }
        &self.default
    }
}

// ============================================================================
// RasterSurface
// ============================================================================

/// Advance-per-glyph ratio used when measuring without a font library.
/// Keeps wrapping behavior sensible on fontless (test) surfaces.
const FALLBACK_ADVANCE: f32 = 0.5;

/// A [`DrawSurface`] over an in-memory RGBA buffer.
///
/// The preview path and the export path each build their own instance; the
/// export surface simply has more pixels.
pub struct RasterSurface<'f> {
    canvas: Blend<RgbaImage>,
    fonts: Option<&'f FontLibrary>,
}

impl RasterSurface<'static> {
    /// Creates a transparent surface with no fonts attached.
    pub fn new(size: SizePx) -> Self {
        Self {
            canvas: Blend(RgbaImage::new(size.width, size.height)),
            fonts: None,
        }
    }
}

impl<'f> RasterSurface<'f> {
    /// Creates a transparent surface that draws text with `fonts`.
    pub fn with_fonts(size: SizePx, fonts: &'f FontLibrary) -> Self {
        Self {
            canvas: Blend(RgbaImage::new(size.width, size.height)),
            fonts: Some(fonts),
        }
    }

    /// The rendered pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.canvas.0
    }

    /// Consumes the surface and returns the pixel buffer.
    pub fn into_image(self) -> RgbaImage {
        self.canvas.0
    }

    /// Encodes the current pixels as a PNG byte stream.
    pub fn encode_png(&self) -> Result<Vec<u8>, CoverError> {
        let mut buf = Cursor::new(Vec::new());
        self.canvas.0.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    fn blend_image(&mut self, src: &RgbaImage, left: i32, top: i32) {
        let SizePx { width, height } = self.dimensions();
        for (sx, sy, &px) in src.enumerate_pixels() {
            let dx = left + sx as i32;
            let dy = top + sy as i32;
            if dx < 0 || dy < 0 || dx >= width as i32 || dy >= height as i32 {
                continue;
            }
            self.canvas.draw_pixel(dx as u32, dy as u32, px);
        }
    }
}

impl DrawSurface for RasterSurface<'_> {
    fn dimensions(&self) -> SizePx {
        let (w, h) = self.canvas.0.dimensions();
        SizePx::new(w, h)
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let (w, h) = (w.round() as i64, h.round() as i64);
        if w <= 0 || h <= 0 {
            return;
        }
        let rect = Rect::at(x.round() as i32, y.round() as i32).of_size(w as u32, h as u32);
        drawing::draw_filled_rect_mut(&mut self.canvas, rect, color.into());
    }

    fn fill_linear_gradient(&mut self, from: Color, to: Color) {
        let (w, h) = self.canvas.0.dimensions();
        let denom = (w * w + h * h) as f32;
        if denom == 0.0 {
            return;
        }
        let from_lin = Srgb::new(
            from.r as f32 / 255.0,
            from.g as f32 / 255.0,
            from.b as f32 / 255.0,
        )
        .into_linear();
        let to_lin = Srgb::new(
            to.r as f32 / 255.0,
            to.g as f32 / 255.0,
            to.b as f32 / 255.0,
        )
        .into_linear();

        for (x, y, px) in self.canvas.0.enumerate_pixels_mut() {
            // Projection of (x, y) onto the full diagonal, in 0..=1.
            let t = (x as f32 * w as f32 + y as f32 * h as f32) / denom;
            let mixed: Srgb<f32> = Srgb::from_linear(from_lin.mix(to_lin, t));
            let a = from.a as f32 + (to.a as f32 - from.a as f32) * t;
            *px = Rgba([
                (mixed.red * 255.0).round() as u8,
                (mixed.green * 255.0).round() as u8,
                (mixed.blue * 255.0).round() as u8,
                a.round() as u8,
            ]);
        }
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color) {
        let t = thickness.max(1.0);
        let half = t / 2.0;
        // Stroke centered on the path, drawn as four bands. Top and bottom
        // span the corners; the sides fill the remainder so overlapping
        // blends never double up on semi-transparent strokes.
        self.fill_rect(x - half, y - half, w + t, t, color);
        self.fill_rect(x - half, y + h - half, w + t, t, color);
        self.fill_rect(x - half, y + half, t, h - t, color);
        self.fill_rect(x + w - half, y + half, t, h - t, color);
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        drawing::draw_line_segment_mut(&mut self.canvas, (x0, y0), (x1, y1), color.into());
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        let mut poly: Vec<Point<i32>> = Vec::with_capacity(points.len());
        for &(x, y) in points {
            let p = Point::new(x.round() as i32, y.round() as i32);
            if poly.last() != Some(&p) {
                poly.push(p);
            }
        }
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        if poly.len() < 3 {
            return;
        }
        drawing::draw_polygon_mut(&mut self.canvas, &poly, color.into());
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
        if radius <= 0.0 {
            return;
        }
        let sweep = (end - start).abs();
        // One sample per ~2px of arc length keeps segments invisible.
        let steps = ((sweep * radius / 2.0).ceil() as usize).clamp(8, 720);
        let pen_radius = (thickness / 2.0).round() as i32;

        let mut prev: Option<(f32, f32)> = None;
        for i in 0..=steps {
            let angle = start + (end - start) * i as f32 / steps as f32;
            let px = cx + radius * angle.cos();
            let py = cy + radius * angle.sin();
            if let Some((qx, qy)) = prev {
                drawing::draw_line_segment_mut(&mut self.canvas, (qx, qy), (px, py), color.into());
            }
            if pen_radius >= 1 {
                drawing::draw_filled_circle_mut(
                    &mut self.canvas,
                    (px.round() as i32, py.round() as i32),
                    pen_radius,
                    color.into(),
                );
            }
            prev = Some((px, py));
        }
    }

    fn measure_text(&self, text: &str, font: &FontSpec, size: f32) -> f32 {
        match self.fonts {
            Some(library) => {
                let face = library.select(font);
                let (w, _) = drawing::text_size(PxScale::from(size), face, text);
                w as f32
            }
            None => text.chars().count() as f32 * size * FALLBACK_ADVANCE,
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle<'_>) {
        if text.is_empty() || style.size < 1.0 {
            return;
        }
        let Some(library) = self.fonts else {
            warn!("no font library attached; skipping text draw");
            return;
        };
        let face = library.select(style.font);
        let scale = PxScale::from(style.size);
        let ascent = face.as_scaled(scale).ascent();
        let (run_w, _) = drawing::text_size(scale, face, text);

        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - run_w as f32 / 2.0,
        };
        drawing::draw_text_mut(
            &mut self.canvas,
            style.color.into(),
            left.round() as i32,
            (y - ascent).round() as i32,
            scale,
            face,
            text,
        );
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
        if text.is_empty() || style.size < 1.0 {
            return;
        }
        let Some(library) = self.fonts else {
            warn!("no font library attached; skipping rotated text draw");
            return;
        };
        let face = library.select(style.font);
        let scale = PxScale::from(style.size);
        let ascent = face.as_scaled(scale).ascent();
        let (run_w, run_h) = drawing::text_size(scale, face, text);
        if run_w == 0 || run_h == 0 {
            return;
        }
        let mut run = Blend(RgbaImage::new(run_w as u32, run_h as u32));
        drawing::draw_text_mut(&mut run, style.color.into(), 0, 0, scale, face, text);
        let run = run.0;

        let (run_w, run_h) = (run.width() as f32, run.height() as f32);
        // Center of the run in the rotated frame: u anchors the baseline
        // horizontally, v is the baseline offset from the rotation center.
        let u_center = match style.align {
            TextAlign::Left => u + run_w / 2.0,
            TextAlign::Center => u,
        };
        let v_center = v - ascent + run_h / 2.0;

        // 90 degrees clockwise maps rotated-frame (u, v) to canvas (-v, u).
        let center_x = cx - v_center;
        let center_y = cy + u_center;

        let rotated = imageops::rotate90(&run);
        let left = (center_x - rotated.width() as f32 / 2.0).round() as i32;
        let top = (center_y - rotated.height() as f32 / 2.0).round() as i32;
        self.blend_image(&rotated, left, top);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(w: u32, h: u32) -> RasterSurface<'static> {
        RasterSurface::new(SizePx::new(w, h))
    }

    #[test]
    fn fill_rect_writes_opaque_pixels() {
        let mut s = surface(10, 10);
        s.fill_rect(2.0, 2.0, 4.0, 4.0, Color::rgb(255, 0, 0));

        assert_eq!(s.image().get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(s.image().get_pixel(0, 0).0, [0, 0, 0, 0]);
        // right/bottom edges are exclusive
        assert_eq!(s.image().get_pixel(6, 6).0, [0, 0, 0, 0]);
    }

    #[test]
    fn fill_rect_blends_alpha_over_existing_content() {
        let mut s = surface(4, 4);
        s.fill_rect(0.0, 0.0, 4.0, 4.0, Color::rgb(255, 0, 0));
        s.fill_rect(0.0, 0.0, 4.0, 4.0, Color::rgb(0, 0, 255).with_alpha(0.5));

        let px = s.image().get_pixel(1, 1);
        assert!(px[0] > 0, "red should remain under a half-alpha blue");
        assert!(px[2] > 0, "blue should have been blended in");
    }

    #[test]
    fn fill_rect_clips_and_tolerates_degenerate_sizes() {
        let mut s = surface(4, 4);
        s.fill_rect(-2.0, -2.0, 100.0, 100.0, Color::rgb(1, 2, 3));
        assert_eq!(s.image().get_pixel(3, 3).0, [1, 2, 3, 255]);

        let mut empty = surface(4, 4);
        empty.fill_rect(0.0, 0.0, 0.0, 10.0, Color::rgb(1, 2, 3));
        empty.fill_rect(0.0, 0.0, -5.0, 10.0, Color::rgb(1, 2, 3));
        assert_eq!(empty.image().get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn gradient_hits_endpoint_colors_at_the_corners() {
        let mut s = surface(64, 64);
        s.fill_linear_gradient(Color::rgb(255, 0, 0), Color::rgb(0, 0, 255));

        let top_left = s.image().get_pixel(0, 0);
        let bottom_right = s.image().get_pixel(63, 63);
        assert_eq!(top_left.0, [255, 0, 0, 255]);
        assert!(bottom_right[2] > 200, "far corner should be nearly blue");
        assert!(bottom_right[0] < 60, "far corner should have little red");

        // off-diagonal corners sit mid-ramp
        let top_right = s.image().get_pixel(63, 0);
        assert!(top_right[0] > 0 && top_right[2] > 0);
    }

    #[test]
    fn stroke_rect_leaves_interior_untouched() {
        let mut s = surface(20, 20);
        s.stroke_rect(2.0, 2.0, 16.0, 16.0, 2.0, Color::rgb(0, 255, 0));

        assert_eq!(s.image().get_pixel(10, 2).0, [0, 255, 0, 255]);
        assert_eq!(s.image().get_pixel(10, 10).0, [0, 0, 0, 0]);
    }

    #[test]
    fn polygon_fill_covers_centroid() {
        let mut s = surface(20, 20);
        s.fill_polygon(
            &[(10.0, 2.0), (2.0, 18.0), (18.0, 18.0)],
            Color::rgb(0, 0, 255),
        );
        assert_eq!(s.image().get_pixel(10, 12).0, [0, 0, 255, 255]);
        assert_eq!(s.image().get_pixel(1, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn degenerate_polygon_is_ignored() {
        let mut s = surface(8, 8);
        s.fill_polygon(&[(1.0, 1.0), (1.0, 1.0)], Color::rgb(255, 255, 255));
        s.fill_polygon(&[], Color::rgb(255, 255, 255));
        assert_eq!(s.image().get_pixel(1, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn arc_marks_pixels_near_the_circle() {
        let mut s = surface(40, 40);
        s.stroke_arc(
            20.0,
            20.0,
            10.0,
            0.0,
            std::f32::consts::PI,
            3.0,
            Color::rgb(255, 255, 0),
        );
        // bottom of the semicircle (angles 0..pi sweep through +y)
        assert_eq!(s.image().get_pixel(20, 30).0, [255, 255, 0, 255]);
        // center stays clear
        assert_eq!(s.image().get_pixel(20, 20).0, [0, 0, 0, 0]);
    }

    #[test]
    fn fontless_measure_is_proportional() {
        let s = surface(10, 10);
        let narrow = s.measure_text("ab", &FontSpec::sans(), 10.0);
        let wide = s.measure_text("abcd", &FontSpec::sans(), 10.0);
        assert_eq!(wide, narrow * 2.0);
    }

    #[test]
    fn fontless_text_draw_is_a_no_op() {
        let mut s = surface(20, 20);
        let style = TextStyle {
            font: &FontSpec::sans(),
            size: 12.0,
            color: Color::rgb(255, 255, 255),
            align: TextAlign::Left,
        };
        s.draw_text("hello", 0.0, 10.0, style);
        s.draw_text_rotated("hello", 10.0, 10.0, 0.0, 0.0, style);
        assert!(s.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn encode_png_roundtrips_dimensions() {
        let mut s = surface(30, 20);
        s.fill_rect(0.0, 0.0, 30.0, 20.0, Color::rgb(10, 20, 30));
        let png = s.encode_png().unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 20));
    }
}
