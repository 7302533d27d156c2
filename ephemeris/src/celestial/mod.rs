//! Celestial position model: equatorial catalog coordinates to altitude/azimuth.

pub mod precession;

use crate::catalog::StarCatalogEntry;
use crate::observer::ObserverContext;
use crate::timescale::{julian_date, local_sidereal_time, normalize_degrees};
use crate::{EphemerisError, Result};

/// Position of a body in the observer's horizon frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPosition {
    /// Altitude above the horizon in degrees, [-90, 90]
    pub altitude_deg: f64,
    /// Azimuth in degrees from north, clockwise through east, [0, 360)
    pub azimuth_deg: f64,
}

impl HorizontalPosition {
    /// True when the body is strictly above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude_deg > 0.0
    }
}

/// Sidereal-time position model for fixed stars.
#[derive(Debug, Clone, Copy)]
pub struct Ephemeris {
    apply_precession: bool,
}

impl Ephemeris {
    /// Create a model that precesses J2000 coordinates to the date.
    pub fn new() -> Self {
        Self {
            apply_precession: true,
        }
    }

    /// Create a model that uses catalog coordinates as-is.
    pub fn without_precession() -> Self {
        Self {
            apply_precession: false,
        }
    }

    /// Whether catalog coordinates are precessed to the date
    pub fn applies_precession(&self) -> bool {
        self.apply_precession
    }

    /// Altitude and azimuth of a catalog star for an observer.
    ///
    /// # Errors
    /// Fails for non-finite observer coordinates, a latitude outside
    /// [-90, 90], or when the computation yields a non-finite position.
    pub fn horizontal(
        &self,
        star: &StarCatalogEntry,
        observer: &ObserverContext,
    ) -> Result<HorizontalPosition> {
        observer.check_coordinates()?;

        let jd = julian_date(observer.datetime);
        let (ra_deg, dec_deg) = if self.apply_precession {
            precession::precess_from_j2000(star.ra_deg, star.dec_deg, jd)
        } else {
            (star.ra_deg, star.dec_deg)
        };

        let lst = local_sidereal_time(jd, observer.longitude_deg);
        let position = equatorial_to_horizontal(lst - ra_deg, dec_deg, observer.latitude_deg);

        if !position.altitude_deg.is_finite() || !position.azimuth_deg.is_finite() {
            return Err(EphemerisError::PositionUnavailable {
                star: star.name.to_string(),
                reason: "non-finite horizontal coordinates".to_string(),
            });
        }

        Ok(position)
    }
}

impl Default for Ephemeris {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert hour angle, declination and latitude (degrees) to altitude/azimuth.
///
/// Azimuth is measured from north through east.
pub fn equatorial_to_horizontal(
    hour_angle_deg: f64,
    dec_deg: f64,
    latitude_deg: f64,
) -> HorizontalPosition {
    let h = hour_angle_deg.to_radians();
    let dec = dec_deg.to_radians();
    let lat = latitude_deg.to_radians();

    let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * h.cos();
    let altitude = sin_alt.clamp(-1.0, 1.0).asin();

    let y = -dec.cos() * h.sin();
    let x = dec.sin() * lat.cos() - dec.cos() * lat.sin() * h.cos();
    let azimuth = y.atan2(x);

    HorizontalPosition {
        altitude_deg: altitude.to_degrees(),
        azimuth_deg: normalize_degrees(azimuth.to_degrees()),
    }
}
