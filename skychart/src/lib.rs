//! Polar star chart rendering.
//!
//! The chart is a circle representing the sky above an observer: the zenith
//! sits at the centre, the horizon is the rim, north is up and azimuth grows
//! clockwise. Visible stars from [`ephemeris`] are projected onto it, drawn as
//! labelled dots, and the whole canvas is encoded as PNG.
//!
//! Rendering composes an SVG document and rasterises it with resvg onto a
//! background-filled pixmap, so text layout and anti-aliasing come from
//! usvg/tiny-skia. Rendering never fails because of fonts or missing star
//! positions; those degrade to a plainer chart.

pub mod encode;
pub mod fonts;
pub mod geometry;
pub mod projection;
pub mod render;
pub mod svg;

use thiserror::Error;

pub use encode::{encode_png, PNG_CONTENT_TYPE};
pub use fonts::FontBook;
pub use geometry::{ChartGeometry, ChartPalette};
pub use projection::{PixelPoint, PolarProjection, ProjectedStar};
pub use render::{footer_text, truncate_chars, ChartRequest, StarChartRenderer};

/// Errors raised while drawing or encoding a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The composed SVG could not be parsed.
    #[error("SVG composition error: {0}")]
    Svg(String),

    /// The raster canvas could not be allocated.
    #[error("Cannot allocate {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Standard Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;
