//! Error types for cover rendering and export.

use crate::layout::SizePx;
use thiserror::Error;

/// Errors produced while validating state, rendering, or exporting a cover.
///
/// Render-time failures are deliberately rare: the renderer degrades
/// gracefully (unknown templates skip the front panel, missing fonts skip
/// glyph output) and only refuses to run when it would otherwise paint from
/// undefined data.
#[derive(Debug, Error)]
pub enum CoverError {
    /// A trim-size label did not match any of the supported formats.
    #[error("unknown trim size {0:?}")]
    UnknownTrimSize(String),

    /// A background-style label did not match any known variant.
    #[error("unknown background style {0:?}")]
    UnknownBackgroundStyle(String),

    /// A color-scheme key did not resolve in the style catalog.
    #[error("unknown color scheme {0:?}")]
    UnknownColorScheme(String),

    /// A template key did not resolve in the style catalog.
    ///
    /// Only raised at the state-mutation boundary; the renderer itself
    /// soft-fails on unknown templates by skipping the front panel.
    #[error("unknown template {0:?}")]
    UnknownTemplate(String),

    /// The target surface does not match the computed spread layout.
    #[error("surface is {actual}, layout needs {expected}")]
    SurfaceSize { expected: SizePx, actual: SizePx },

    /// Font data could not be parsed.
    #[error("invalid font data")]
    Font(#[from] ab_glyph::InvalidFont),

    /// The rendered image could not be encoded as PNG.
    #[error("png encoding failed")]
    Png(#[from] image::ImageError),

    /// A state snapshot could not be serialized or deserialized.
    #[error("state snapshot error")]
    Snapshot(#[from] serde_json::Error),
}
