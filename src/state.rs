//! The declarative cover style state.
//!
//! [`CoverState`] is the single record the renderer consumes: text fields,
//! physical size, spine width, template and color-scheme keys, background
//! style, and guide visibility. It is created once with defaults, mutated in
//! place by a controller on user edits, and only ever read by the renderer.
//!
//! The whole record serializes to camelCase JSON so a frontend can round-trip
//! it as a snapshot:
//!
//! ```json
//! {
//!   "title": "My Book",
//!   "author": "J. Doe",
//!   "backCoverText": "",
//!   "trimSize": "6x9",
//!   "spineWidthIn": 0.5,
//!   "template": "modern",
//!   "colorScheme": "blue",
//!   "background": "solid",
//!   "showGuides": true
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoverError;
use crate::layout::{Density, SizePx};

// ============================================================================
// TrimSize
// ============================================================================

/// Supported physical book formats.
///
/// Each trim size carries a fixed base pixel size for its panels and the
/// density used for print-quality export. The base pixels are independent of
/// render density; density scales only margin and spine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrimSize {
    #[serde(rename = "6x9")]
    SixByNine,
    #[serde(rename = "5.5x8.5")]
    FiveHalfByEightHalf,
    #[serde(rename = "8.5x11")]
    EightHalfByEleven,
    #[serde(rename = "7x10")]
    SevenByTen,
}

impl TrimSize {
    /// All supported trim sizes, in the order they are offered to users.
    pub const ALL: [TrimSize; 4] = [
        TrimSize::SixByNine,
        TrimSize::FiveHalfByEightHalf,
        TrimSize::EightHalfByEleven,
        TrimSize::SevenByTen,
    ];

    /// The user-facing label, e.g. `"6x9"`.
    pub fn label(self) -> &'static str {
        match self {
            TrimSize::SixByNine => "6x9",
            TrimSize::FiveHalfByEightHalf => "5.5x8.5",
            TrimSize::EightHalfByEleven => "8.5x11",
            TrimSize::SevenByTen => "7x10",
        }
    }

    /// Base panel dimensions in pixels.
    pub fn base_size(self) -> SizePx {
        match self {
            TrimSize::SixByNine => SizePx::new(600, 900),
            TrimSize::FiveHalfByEightHalf => SizePx::new(550, 850),
            TrimSize::EightHalfByEleven => SizePx::new(850, 1100),
            TrimSize::SevenByTen => SizePx::new(700, 1000),
        }
    }

    /// Density used when exporting this format for print.
    pub fn export_density(self) -> Density {
        Density(300)
    }
}

impl fmt::Display for TrimSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TrimSize {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrimSize::ALL
            .into_iter()
            .find(|trim| trim.label() == s)
            .ok_or_else(|| CoverError::UnknownTrimSize(s.to_string()))
    }
}

// ============================================================================
// BackgroundStyle
// ============================================================================

/// How the full canvas is painted before any panel content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    /// Flat fill of the scheme's primary color.
    #[default]
    Solid,
    /// Linear gradient, primary to secondary, along the full diagonal.
    Gradient,
    /// Primary fill speckled with small low-opacity accent squares.
    Texture,
    /// Primary fill with a 4x2 grid of semi-transparent triangles.
    Geometric,
}

impl BackgroundStyle {
    pub fn label(self) -> &'static str {
        match self {
            BackgroundStyle::Solid => "solid",
            BackgroundStyle::Gradient => "gradient",
            BackgroundStyle::Texture => "texture",
            BackgroundStyle::Geometric => "geometric",
        }
    }
}

impl FromStr for BackgroundStyle {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(BackgroundStyle::Solid),
            "gradient" => Ok(BackgroundStyle::Gradient),
            "texture" => Ok(BackgroundStyle::Texture),
            "geometric" => Ok(BackgroundStyle::Geometric),
            other => Err(CoverError::UnknownBackgroundStyle(other.to_string())),
        }
    }
}

// ============================================================================
// CoverState
// ============================================================================

/// The complete style state for one cover spread.
///
/// Template and color scheme are kept as catalog keys rather than closed
/// enums: the style catalog is data, and an unknown key is handled at the
/// boundary (setters and the renderer) instead of being unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverState {
    /// Book title, shown on the front cover and spine.
    pub title: String,
    /// Author name, shown on all three panels.
    pub author: String,
    /// Body text of the back cover.
    pub back_cover_text: String,
    /// Physical book format.
    pub trim_size: TrimSize,
    /// Spine width in inches. Non-positive values collapse the spine.
    pub spine_width_in: f32,
    /// Front-cover template key, resolved against the style catalog.
    pub template: String,
    /// Color-scheme key, resolved against the style catalog.
    pub color_scheme: String,
    /// Background treatment for the whole canvas.
    pub background: BackgroundStyle,
    /// Whether to draw trim/bleed guide lines.
    pub show_guides: bool,
}

impl Default for CoverState {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            back_cover_text: String::new(),
            trim_size: TrimSize::SixByNine,
            spine_width_in: 0.5,
            template: "modern".to_string(),
            color_scheme: "blue".to_string(),
            background: BackgroundStyle::Solid,
            show_guides: true,
        }
    }
}

impl CoverState {
    /// Creates the startup state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spine width from raw user input.
    ///
    /// Values that fail to parse coerce to zero rather than propagating an
    /// error; a malformed spine field should never break the render loop.
    pub fn set_spine_width_input(&mut self, input: &str) {
        self.spine_width_in = input.trim().parse().unwrap_or(0.0);
    }

    /// Serializes the state to a JSON snapshot.
    pub fn to_json(&self) -> Result<String, CoverError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the state to a pretty-printed JSON snapshot.
    pub fn to_json_pretty(&self) -> Result<String, CoverError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a state snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, CoverError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_size_parse_roundtrip() {
        for trim in TrimSize::ALL {
            assert_eq!(trim.label().parse::<TrimSize>().unwrap(), trim);
        }
    }

    #[test]
    fn unknown_trim_size_is_rejected() {
        let err = "4x6".parse::<TrimSize>().unwrap_err();
        assert!(matches!(err, CoverError::UnknownTrimSize(ref s) if s == "4x6"));
    }

    #[test]
    fn unknown_background_style_is_rejected() {
        let err = "plaid".parse::<BackgroundStyle>().unwrap_err();
        assert!(matches!(err, CoverError::UnknownBackgroundStyle(_)));
    }

    #[test]
    fn spine_width_input_coerces_to_zero() {
        let mut state = CoverState::new();
        state.set_spine_width_input("0.75");
        assert_eq!(state.spine_width_in, 0.75);

        state.set_spine_width_input("wide");
        assert_eq!(state.spine_width_in, 0.0);

        state.set_spine_width_input("");
        assert_eq!(state.spine_width_in, 0.0);
    }

    #[test]
    fn snapshot_roundtrip() {
        let mut state = CoverState::new();
        state.title = "My Book".to_string();
        state.trim_size = TrimSize::SevenByTen;
        state.background = BackgroundStyle::Geometric;
        state.show_guides = false;

        let json = state.to_json().unwrap();
        let restored = CoverState::from_json(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn snapshot_json_format() {
        let state = CoverState::new();
        let json = state.to_json().unwrap();

        // camelCase keys and wire-format labels
        assert!(json.contains("\"backCoverText\""));
        assert!(json.contains("\"trimSize\":\"6x9\""));
        assert!(json.contains("\"background\":\"solid\""));
        assert!(json.contains("\"showGuides\":true"));
    }

    #[test]
    fn snapshot_with_unknown_trim_size_fails() {
        let json = r#"{
            "title": "", "author": "", "backCoverText": "",
            "trimSize": "4x6", "spineWidthIn": 0.5,
            "template": "modern", "colorScheme": "blue",
            "background": "solid", "showGuides": true
        }"#;
        assert!(matches!(
            CoverState::from_json(json),
            Err(CoverError::Snapshot(_))
        ));
    }
}
