//! Print-quality PNG export.
//!
//! Export renders the same state as the preview, on a fresh
//! [`RasterSurface`] at the trim size's export density, and encodes the
//! result as a PNG together with a download-safe file name derived from the
//! title.

use log::info;

use crate::error::CoverError;
use crate::layout::SpreadLayout;
use crate::render::CoverRenderer;
use crate::state::CoverState;
use crate::style::StyleCatalog;
use crate::surface::{FontLibrary, RasterSurface};

/// Placeholder stem when the title is empty.
const DEFAULT_FILE_STEM: &str = "book-cover";

/// A finished export: encoded image plus its suggested file name.
#[derive(Debug, Clone)]
pub struct ExportedCover {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// Renders `state` at print density and encodes it as a PNG.
///
/// Passing no font library still produces a complete cover minus lettering,
/// which is useful for geometry checks and headless environments.
pub fn export_cover(
    state: &CoverState,
    catalog: &StyleCatalog,
    fonts: Option<&FontLibrary>,
) -> Result<ExportedCover, CoverError> {
    let density = state.trim_size.export_density();
    let size = SpreadLayout::compute(state.trim_size, state.spine_width_in, density).total;
    let mut surface = match fonts {
        Some(library) => RasterSurface::with_fonts(size, library),
        None => RasterSurface::new(size),
    };

    CoverRenderer::new(catalog).render(state, density, &mut surface)?;

    let file_name = export_file_name(&state.title);
    let png = surface.encode_png()?;
    info!(
        "exported {} at {} dpi as {file_name} ({} bytes)",
        state.trim_size,
        density.dpi(),
        png.len()
    );

    Ok(ExportedCover { file_name, png })
}

/// Derives the suggested download name from a title.
///
/// Every non-alphanumeric character becomes an underscore and the result is
/// lowercased. An empty title substitutes a fixed stem first, so the stem's
/// hyphen is sanitized along with everything else.
pub fn export_file_name(title: &str) -> String {
    let stem = if title.is_empty() { DEFAULT_FILE_STEM } else { title };
    let sanitized: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{sanitized}_complete_cover.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Density;
    use crate::state::TrimSize;

    #[test]
    fn file_name_is_sanitized_and_lowercased() {
        assert_eq!(export_file_name("My Book"), "my_book_complete_cover.png");
        assert_eq!(export_file_name("My Book!"), "my_book__complete_cover.png");
        assert_eq!(export_file_name("C++ 101"), "c___101_complete_cover.png");
    }

    #[test]
    fn empty_title_uses_fallback_stem() {
        assert_eq!(export_file_name(""), "book_cover_complete_cover.png");
    }

    #[test]
    fn export_produces_print_density_png() {
        let mut state = CoverState::new();
        state.title = "My Book".to_string();
        state.author = "J. Doe".to_string();
        state.show_guides = false;

        let exported = export_cover(&state, &StyleCatalog::builtin(), None).unwrap();
        assert_eq!(exported.file_name, "my_book_complete_cover.png");

        // 75 + 600 + 150 + 600 + 75 wide at 300 dpi
        let decoded = image::load_from_memory(&exported.png).unwrap();
        assert_eq!(decoded.width(), 1500);
        assert_eq!(decoded.height(), 900);
    }

    #[test]
    fn export_rejects_unknown_color_scheme() {
        let mut state = CoverState::new();
        state.color_scheme = "ultraviolet".to_string();
        let err = export_cover(&state, &StyleCatalog::builtin(), None).unwrap_err();
        assert!(matches!(err, CoverError::UnknownColorScheme(_)));
    }

    #[test]
    fn export_density_is_higher_than_preview() {
        for trim in TrimSize::ALL {
            assert!(trim.export_density() > Density::PREVIEW);
        }
    }
}
