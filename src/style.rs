//! Immutable style tables: templates, color schemes, fonts, colors.
//!
//! The [`StyleCatalog`] is constructed once at process start and passed by
//! reference into the renderer; nothing here is ever mutated after
//! construction. Lookups are by key, and iteration preserves declaration
//! order so a UI can populate its dropdowns directly from the catalog.

// ============================================================================
// Color
// ============================================================================

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from a packed `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Returns this color with its alpha scaled by `alpha` in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(c: Color) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

// ============================================================================
// Fonts
// ============================================================================

/// Typeface families used by the cover templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Neutral sans-serif; also the body face for back cover and spine.
    Sans,
    /// Book serif.
    Serif,
    /// Heavy display face for loud titles.
    Display,
    /// Fixed-width face for technical covers.
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// An abstract font request.
///
/// Templates describe type in terms of family, weight, and slant; a
/// [`FontLibrary`](crate::surface::FontLibrary) resolves the spec to the
/// nearest loaded face at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub italic: bool,
}

impl FontSpec {
    pub const fn new(family: FontFamily, weight: FontWeight, italic: bool) -> Self {
        Self { family, weight, italic }
    }

    pub const fn sans() -> Self {
        Self::new(FontFamily::Sans, FontWeight::Normal, false)
    }

    pub const fn bold_sans() -> Self {
        Self::new(FontFamily::Sans, FontWeight::Bold, false)
    }

    pub const fn serif() -> Self {
        Self::new(FontFamily::Serif, FontWeight::Normal, false)
    }

    pub const fn italic_serif() -> Self {
        Self::new(FontFamily::Serif, FontWeight::Normal, true)
    }

    pub const fn bold_display() -> Self {
        Self::new(FontFamily::Display, FontWeight::Bold, false)
    }

    pub const fn mono() -> Self {
        Self::new(FontFamily::Mono, FontWeight::Normal, false)
    }
}

// ============================================================================
// Templates
// ============================================================================

/// Decorative element drawn behind the front-cover text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Short horizontal accent bar at mid height.
    Line,
    /// Inset rectangle outline at a 10% margin.
    Border,
    /// Filled trapezoid band near 60% height.
    AccentShape,
    /// Semi-circular arc above the title.
    Flourish,
    /// Full low-opacity grid at 50px spacing.
    Grid,
}

/// A named bundle of front-cover typography and decoration choices.
///
/// Size factors are fractions of the front panel's pixel width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    /// Catalog key, e.g. `"modern"`.
    pub name: &'static str,
    /// Display title for UI listings.
    pub title: &'static str,
    pub title_font: FontSpec,
    pub title_size_factor: f32,
    pub author_font: FontSpec,
    pub author_size_factor: f32,
    pub decoration: Decoration,
}

/// Four-color palette shared by all panels of a cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Catalog key, e.g. `"blue"`.
    pub name: &'static str,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
}

// ============================================================================
// StyleCatalog
// ============================================================================

/// The immutable lookup tables the renderer draws from.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    templates: Vec<Template>,
    schemes: Vec<ColorScheme>,
}

impl StyleCatalog {
    /// Builds the built-in catalog: 5 templates and 7 color schemes.
    pub fn builtin() -> Self {
        Self {
            templates: vec![
                Template {
                    name: "modern",
                    title: "Modern Minimalist",
                    title_font: FontSpec::bold_sans(),
                    title_size_factor: 0.08,
                    author_font: FontSpec::sans(),
                    author_size_factor: 0.04,
                    decoration: Decoration::Line,
                },
                Template {
                    name: "classic",
                    title: "Classic Literature",
                    title_font: FontSpec::serif(),
                    title_size_factor: 0.06,
                    author_font: FontSpec::italic_serif(),
                    author_size_factor: 0.035,
                    decoration: Decoration::Border,
                },
                Template {
                    name: "bold",
                    title: "Bold & Vibrant",
                    title_font: FontSpec::bold_display(),
                    title_size_factor: 0.1,
                    author_font: FontSpec::bold_sans(),
                    author_size_factor: 0.04,
                    decoration: Decoration::AccentShape,
                },
                Template {
                    name: "elegant",
                    title: "Elegant Script",
                    title_font: FontSpec::serif(),
                    title_size_factor: 0.07,
                    author_font: FontSpec::italic_serif(),
                    author_size_factor: 0.035,
                    decoration: Decoration::Flourish,
                },
                Template {
                    name: "technical",
                    title: "Technical/Academic",
                    title_font: FontSpec::mono(),
                    title_size_factor: 0.06,
                    author_font: FontSpec::mono(),
                    author_size_factor: 0.035,
                    decoration: Decoration::Grid,
                },
            ],
            schemes: vec![
                scheme("blue", 0x1e3a8a, 0x3b82f6, 0x93c5fd),
                scheme("green", 0x14532d, 0x16a34a, 0x86efac),
                scheme("red", 0x991b1b, 0xdc2626, 0xfca5a5),
                scheme("purple", 0x581c87, 0x9333ea, 0xc4b5fd),
                scheme("gold", 0x92400e, 0xf59e0b, 0xfde68a),
                scheme("monochrome", 0x111827, 0x4b5563, 0xd1d5db),
                scheme("earth", 0x78350f, 0xa16207, 0xfde047),
            ],
        }
    }

    /// Looks up a template by its catalog key.
    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Looks up a color scheme by its catalog key.
    pub fn color_scheme(&self, name: &str) -> Option<&ColorScheme> {
        self.schemes.iter().find(|s| s.name == name)
    }

    /// Iterates templates in declaration order.
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Iterates color schemes in declaration order.
    pub fn color_schemes(&self) -> impl Iterator<Item = &ColorScheme> {
        self.schemes.iter()
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn scheme(name: &'static str, primary: u32, secondary: u32, accent: u32) -> ColorScheme {
    ColorScheme {
        name,
        primary: Color::hex(primary),
        secondary: Color::hex(secondary),
        accent: Color::hex(accent),
        text: Color::hex(0xffffff),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_unpacks_channels() {
        let c = Color::hex(0x1e3a8a);
        assert_eq!((c.r, c.g, c.b, c.a), (30, 58, 138, 255));
    }

    #[test]
    fn with_alpha_scales_and_clamps() {
        assert_eq!(Color::rgb(255, 0, 0).with_alpha(0.3).a, 77);
        assert_eq!(Color::rgb(255, 0, 0).with_alpha(1.5).a, 255);
        assert_eq!(Color::rgb(255, 0, 0).with_alpha(-1.0).a, 0);
        // scaling applies to the existing alpha
        assert_eq!(Color::rgba(0, 0, 0, 100).with_alpha(0.5).a, 50);
    }

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = StyleCatalog::builtin();
        assert_eq!(catalog.templates().count(), 5);
        assert_eq!(catalog.color_schemes().count(), 7);
    }

    #[test]
    fn template_lookup() {
        let catalog = StyleCatalog::builtin();
        let bold = catalog.template("bold").unwrap();
        assert_eq!(bold.decoration, Decoration::AccentShape);
        assert_eq!(bold.title_size_factor, 0.1);
        assert!(catalog.template("brutalist").is_none());
    }

    #[test]
    fn color_scheme_lookup() {
        let catalog = StyleCatalog::builtin();
        let blue = catalog.color_scheme("blue").unwrap();
        assert_eq!(blue.primary, Color::hex(0x1e3a8a));
        assert_eq!(blue.text, Color::rgb(255, 255, 255));
        assert!(catalog.color_scheme("teal").is_none());
    }

    #[test]
    fn templates_keep_declaration_order() {
        let catalog = StyleCatalog::builtin();
        let names: Vec<_> = catalog.templates().map(|t| t.name).collect();
        assert_eq!(names, ["modern", "classic", "bold", "elegant", "technical"]);
    }
}
