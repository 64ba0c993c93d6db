//! coverpress: three-panel book cover rendering library
//!
//! This crate lays out and renders complete print-ready book cover spreads:
//! back cover, spine, and front cover on one canvas, with bleed margins,
//! template-driven typography, and color schemes. The same render routine
//! drives a low-density interactive preview and a high-density PNG export.
//!
//! # Example
//!
//! ```
//! use coverpress::{BackgroundStyle, CoverStudio, TrimSize};
//!
//! let mut studio = CoverStudio::new();
//! studio.set_title("My Book");
//! studio.set_author("J. Doe");
//! studio.set_trim_size(TrimSize::SixByNine);
//! studio.set_spine_width_input("0.5");
//! studio.set_template("classic").unwrap();
//! studio.set_background(BackgroundStyle::Gradient);
//!
//! // Rendering without a font library draws all geometry and skips glyphs.
//! let preview = studio.render_preview(None).unwrap();
//! assert_eq!(preview.image().width(), 1300);
//!
//! let exported = studio.export(None).unwrap();
//! assert_eq!(exported.file_name, "my_book_complete_cover.png");
//! ```
//!
//! # State snapshots
//!
//! The full style state round-trips through camelCase JSON, so a frontend
//! can persist and restore a session:
//!
//! ```
//! use coverpress::CoverStudio;
//!
//! let mut studio = CoverStudio::new();
//! studio.set_color_scheme("gold").unwrap();
//! let snapshot = studio.snapshot_json().unwrap();
//!
//! let mut restored = CoverStudio::new();
//! restored.apply_snapshot(&snapshot).unwrap();
//! assert_eq!(restored.state(), studio.state());
//! ```

mod error;
mod export;
mod layout;
mod render;
mod state;
mod studio;
mod style;
mod surface;

pub use error::CoverError;
pub use export::{ExportedCover, export_cover, export_file_name};
pub use layout::{BLEED_MARGIN_IN, Density, RectPx, SizePx, SpreadLayout};
pub use render::{CoverRenderer, wrap_lines};
pub use state::{BackgroundStyle, CoverState, TrimSize};
pub use studio::{CoverStudio, DEFAULT_RENDER_DELAY, RenderDebouncer};
pub use style::{
    Color, ColorScheme, Decoration, FontFamily, FontSpec, FontWeight, StyleCatalog, Template,
};
pub use surface::{
    DrawSurface, FontLibrary, PanelSurface, RasterSurface, TextAlign, TextStyle,
};
