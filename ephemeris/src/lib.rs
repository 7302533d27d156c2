//! Horizontal coordinates for a fixed bright-star catalog.
//!
//! Given an observer (date, time, latitude, longitude) this crate resolves
//! which catalog stars are above the horizon and where: altitude above the
//! horizon and azimuth measured clockwise from north.
//!
//! The model is sidereal-time based: J2000 catalog positions are precessed to
//! the mean equator of date, the hour angle is taken from Greenwich mean
//! sidereal time plus the observer's east longitude, and the usual spherical
//! triangle gives altitude and azimuth. Nutation, aberration and refraction
//! are not modelled, which keeps the error under about one arcminute.
//!
//! ```rust
//! use ephemeris::{resolve_visible, Ephemeris, ObserverContext, BRIGHT_STARS};
//!
//! let observer = ObserverContext::parse("2023-07-14", "21:30", 32.0853, 34.7818).unwrap();
//! let resolution = resolve_visible(&Ephemeris::new(), &BRIGHT_STARS, &observer);
//! for star in resolution.stars() {
//!     println!("{} alt {:.1} az {:.1}", star.name, star.altitude_deg, star.azimuth_deg);
//! }
//! ```

pub mod catalog;
pub mod celestial;
pub mod observer;
pub mod resolver;
pub mod timescale;

use thiserror::Error;

pub use catalog::{StarCatalogEntry, BRIGHT_STARS};
pub use celestial::{Ephemeris, HorizontalPosition};
pub use observer::ObserverContext;
pub use resolver::{resolve_visible, PositionSource, Resolution, VisibleStar};

/// Errors raised while turning an observer and a catalog entry into a position.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    /// Date or time string did not match `YYYY-MM-DD` / `HH:MM`.
    #[error("Invalid date/time '{input}': {reason}")]
    InvalidDateTime { input: String, reason: String },

    /// Latitude or longitude is NaN or infinite.
    #[error("Non-finite observer coordinate: lat={latitude_deg}, lon={longitude_deg}")]
    NonFiniteCoordinate {
        latitude_deg: f64,
        longitude_deg: f64,
    },

    /// Latitude outside [-90, 90] degrees.
    #[error("Latitude {0} is outside [-90, 90] degrees")]
    LatitudeOutOfRange(f64),

    /// Position model could not produce a result for a star.
    #[error("Position unavailable for {star}: {reason}")]
    PositionUnavailable { star: String, reason: String },
}

/// Standard Result type for ephemeris operations.
pub type Result<T> = std::result::Result<T, EphemerisError>;
