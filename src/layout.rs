//! Pixel geometry for the three-panel cover spread.
//!
//! A printed cover is laid out left to right as back cover, spine, front
//! cover, with a bleed margin on the outer edges. [`SpreadLayout::compute`]
//! turns a trim size, a spine width in inches, and a pixel density into the
//! canvas dimensions and the x-origin of each panel. The same computation
//! serves the low-density preview and the high-density export, which is what
//! guarantees the export is a faithful scale-up of the preview.

use std::fmt;

use crate::state::TrimSize;

/// Bleed allowance on each side of the spread, in inches.
pub const BLEED_MARGIN_IN: f32 = 0.125;

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the canvas
    pub x: u32,
    /// Y offset from the top edge of the canvas
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns the rectangle's size.
    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for SizePx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel density in dots per inch.
///
/// Density scales only the physical quantities of the layout (bleed margin
/// and spine width). A trim size's base panel pixels are fixed and do not
/// scale with density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Density(pub u32);

impl Density {
    /// Low density used for interactive preview rendering.
    pub const PREVIEW: Density = Density(100);

    /// Dots per inch.
    pub fn dpi(self) -> u32 {
        self.0
    }

    /// Converts a physical length in inches to rounded pixels.
    pub fn px(self, inches: f32) -> u32 {
        let px = inches * self.0 as f32;
        if px <= 0.0 { 0 } else { px.round() as u32 }
    }
}

/// Derived pixel layout of a full cover spread at one density.
///
/// Computed fresh on every render; never stored in the style state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadLayout {
    /// Full canvas dimensions.
    pub total: SizePx,
    /// Dimensions of each cover panel (back and front are identical).
    pub panel: SizePx,
    /// Bleed margin on each outer edge, in pixels.
    pub margin_px: u32,
    /// Spine width in pixels. Zero is valid (a zero-width spine panel).
    pub spine_px: u32,
    /// X-origin of the back cover panel.
    pub back_x: u32,
    /// X-origin of the spine panel.
    pub spine_x: u32,
    /// X-origin of the front cover panel.
    pub front_x: u32,
}

impl SpreadLayout {
    /// Computes the spread layout for a trim size, spine width, and density.
    ///
    /// The margin covers the bleed allowance on both faces of each outer
    /// edge, so it comes to a quarter inch per side. Negative or non-finite
    /// spine widths collapse to a zero-width spine rather than failing.
    pub fn compute(trim: TrimSize, spine_width_in: f32, density: Density) -> Self {
        let panel = trim.base_size();
        let margin_px = density.px(2.0 * BLEED_MARGIN_IN);
        let spine_in = if spine_width_in.is_finite() { spine_width_in.max(0.0) } else { 0.0 };
        let spine_px = density.px(spine_in);

        let back_x = margin_px;
        let spine_x = margin_px + panel.width;
        let front_x = margin_px + panel.width + spine_px;

        Self {
            total: SizePx::new(margin_px * 2 + panel.width * 2 + spine_px, panel.height),
            panel,
            margin_px,
            spine_px,
            back_x,
            spine_x,
            front_x,
        }
    }

    /// The back cover panel rectangle.
    pub fn back_rect(&self) -> RectPx {
        RectPx::new(self.back_x, 0, self.panel.width, self.panel.height)
    }

    /// The spine panel rectangle. Zero width when the spine collapses.
    pub fn spine_rect(&self) -> RectPx {
        RectPx::new(self.spine_x, 0, self.spine_px, self.panel.height)
    }

    /// The front cover panel rectangle.
    pub fn front_rect(&self) -> RectPx {
        RectPx::new(self.front_x, 0, self.panel.width, self.panel.height)
    }
}
