//! Recording surface for renderer tests.
//!
//! Captures every primitive as an [`Op`] instead of touching pixels, and
//! measures text with a fixed advance so wrapping decisions are
//! deterministic. This keeps renderer tests independent of any font file
//! and lets them assert on the drawn-content stream directly.

use crate::layout::SizePx;
use crate::style::{Color, FontSpec};
use crate::surface::{DrawSurface, TextAlign, TextStyle};

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Color },
    Gradient { from: Color, to: Color },
    StrokeRect { x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color },
    Line { x0: f32, y0: f32, x1: f32, y1: f32, color: Color },
    Polygon { points: Vec<(f32, f32)>, color: Color },
    Arc { cx: f32, cy: f32, radius: f32, thickness: f32, color: Color },
    Text { text: String, x: f32, y: f32, font: FontSpec, size: f32, color: Color, align: TextAlign },
    RotatedText { text: String, cx: f32, cy: f32, u: f32, v: f32, font: FontSpec, size: f32, color: Color },
}

/// A [`DrawSurface`] that records operations.
pub struct TraceSurface {
    size: SizePx,
    pub ops: Vec<Op>,
    /// Advance width per glyph as a fraction of the font size.
    pub advance_ratio: f32,
}

impl TraceSurface {
    pub fn new(size: SizePx) -> Self {
        Self { size, ops: Vec::new(), advance_ratio: 0.5 }
    }

    /// All recorded text runs, rotated or not, in draw order.
    pub fn text_runs(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } | Op::RotatedText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for TraceSurface {
    fn dimensions(&self) -> SizePx {
        self.size
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ops.push(Op::FillRect { x, y, w, h, color });
    }

    fn fill_linear_gradient(&mut self, from: Color, to: Color) {
        self.ops.push(Op::Gradient { from, to });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color) {
        self.ops.push(Op::StrokeRect { x, y, w, h, thickness, color });
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        self.ops.push(Op::Line { x0, y0, x1, y1, color });
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        self.ops.push(Op::Polygon { points: points.to_vec(), color });
    }

    fn stroke_arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        _start: f32,
        _end: f32,
        thickness: f32,
        color: Color,
    ) {
        self.ops.push(Op::Arc { cx, cy, radius, thickness, color });
    }

    fn measure_text(&self, text: &str, _font: &FontSpec, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance_ratio
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle<'_>) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            y,
            font: *style.font,
            size: style.size,
            color: style.color,
            align: style.align,
        });
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
        self.ops.push(Op::RotatedText {
            text: text.to_string(),
            cx,
            cy,
            u,
            v,
            font: *style.font,
            size: style.size,
            color: style.color,
        });
    }
}
