//! Font loading with fallback.
//!
//! A [`FontBook`] is loaded once and shared read-only between renders. Missing
//! font files never fail a render: the book falls back to whatever the system
//! provides, and every book also carries a DejaVu Sans face compiled into the
//! crate, so chart text is drawn even on hosts with no fonts installed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use usvg::fontdb;

/// Font files tried in order before falling back to system fonts.
pub const DEFAULT_FONT_CANDIDATES: [&str; 2] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
];

/// Families preferred, in order, when picking among system fonts
const PREFERRED_SYSTEM_FAMILIES: [&str; 4] =
    ["DejaVu Sans", "Liberation Sans", "FreeSans", "Noto Sans"];

/// Family of the face compiled into the crate
pub const EMBEDDED_FAMILY: &str = "DejaVu Sans";

/// DejaVu Sans, always loaded as the last-resort face
static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

static SHARED: Lazy<FontBook> = Lazy::new(|| FontBook::load(&DEFAULT_FONT_CANDIDATES));

/// Where the text face of a [`FontBook`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// An explicit font file
    File(PathBuf),
    /// Installed system fonts
    System,
    /// The face compiled into the crate
    Embedded,
}

/// Immutable font database plus the family used for chart text.
#[derive(Debug, Clone)]
pub struct FontBook {
    database: Arc<fontdb::Database>,
    family: String,
    source: FontSource,
}

impl FontBook {
    /// Load the first usable font file among `candidates`.
    ///
    /// System fonts are loaded as well so that glyphs missing from the chosen
    /// face can still be drawn. Falls back to [`FontBook::system`] when no
    /// candidate yields a face.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for candidate in candidates {
            let path = candidate.as_ref();
            if !path.exists() {
                continue;
            }

            let mut database = fontdb::Database::new();
            if let Err(e) = database.load_font_file(path) {
                log::warn!("Failed to load font {}: {}", path.display(), e);
                continue;
            }

            let Some(family) = first_family(&database) else {
                log::warn!("Font file {} contains no usable faces", path.display());
                continue;
            };

            database.load_system_fonts();
            load_embedded(&mut database);
            database.set_sans_serif_family(family.clone());
            log::debug!("Using font family '{}' from {}", family, path.display());

            return Self {
                database: Arc::new(database),
                family,
                source: FontSource::File(path.to_path_buf()),
            };
        }

        log::warn!("No chart font file found, falling back to system fonts");
        Self::system()
    }

    /// Use installed system fonts, with the embedded face as fallback.
    pub fn system() -> Self {
        let mut database = fontdb::Database::new();
        database.load_system_fonts();
        let system_faces = database.len();
        load_embedded(&mut database);

        let preferred = PREFERRED_SYSTEM_FAMILIES
            .iter()
            .find(|name| has_family(&database, name))
            .map(|name| name.to_string());

        let (family, source) = match preferred {
            Some(family) => (family, FontSource::System),
            None if system_faces > 0 => match first_family(&database) {
                Some(family) => (family, FontSource::System),
                None => (EMBEDDED_FAMILY.to_string(), FontSource::Embedded),
            },
            None => {
                log::warn!("No system fonts available, using embedded {EMBEDDED_FAMILY}");
                (EMBEDDED_FAMILY.to_string(), FontSource::Embedded)
            }
        };
        database.set_sans_serif_family(family.clone());

        Self {
            database: Arc::new(database),
            family,
            source,
        }
    }

    /// Only the embedded face, ignoring files and system fonts.
    pub fn embedded() -> Self {
        let mut database = fontdb::Database::new();
        load_embedded(&mut database);
        database.set_sans_serif_family(EMBEDDED_FAMILY);

        Self {
            database: Arc::new(database),
            family: EMBEDDED_FAMILY.to_string(),
            source: FontSource::Embedded,
        }
    }

    /// Process-wide book built from [`DEFAULT_FONT_CANDIDATES`] on first use.
    pub fn shared() -> &'static FontBook {
        &SHARED
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Number of faces available for text layout
    pub fn face_count(&self) -> usize {
        self.database.len()
    }

    /// usvg options sharing this book's database.
    pub fn svg_options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: Arc::clone(&self.database),
            font_family: self.family.clone(),
            text_rendering: usvg::TextRendering::GeometricPrecision,
            shape_rendering: usvg::ShapeRendering::GeometricPrecision,
            ..Default::default()
        }
    }
}

impl Default for FontBook {
    fn default() -> Self {
        FontBook::shared().clone()
    }
}

fn load_embedded(database: &mut fontdb::Database) {
    database.load_font_data(EMBEDDED_FONT.to_vec());
}

fn first_family(database: &fontdb::Database) -> Option<String> {
    database
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
}

fn has_family(database: &fontdb::Database, name: &str) -> bool {
    database
        .faces()
        .any(|face| face.families.iter().any(|(family, _)| family == name))
}
