//! Observer context: where and when the sky is viewed from.

use time::macros::format_description;
use time::PrimitiveDateTime;

use crate::{EphemerisError, Result};

/// A single observation: timestamp plus geographic position.
///
/// The timestamp carries no zone and is used as-is as the instant of
/// observation. Coordinates are signed degrees (north and east positive) and
/// are not range-checked on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverContext {
    /// Instant of observation
    pub datetime: PrimitiveDateTime,
    /// Geodetic latitude in degrees
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive
    pub longitude_deg: f64,
}

impl ObserverContext {
    pub fn new(datetime: PrimitiveDateTime, latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            datetime,
            latitude_deg,
            longitude_deg,
        }
    }

    /// Build a context from `YYYY-MM-DD` and `HH:MM` strings.
    ///
    /// # Errors
    /// Returns [`EphemerisError::InvalidDateTime`] when either string does not
    /// parse or names an impossible date.
    pub fn parse(
        date: &str,
        time_of_day: &str,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<Self> {
        // YYYY-MM-DD HH:MM, single-digit fields accepted
        let format = format_description!(
            "[year]-[month padding:none]-[day padding:none] [hour padding:none]:[minute padding:none]"
        );
        let input = format!("{date} {time_of_day}");
        let datetime = PrimitiveDateTime::parse(&input, format).map_err(|e| {
            EphemerisError::InvalidDateTime {
                input: input.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::new(datetime, latitude_deg, longitude_deg))
    }

    /// Check that the coordinates can be fed to the position model.
    ///
    /// Longitude outside [-180, 180] is accepted since it wraps naturally.
    pub fn check_coordinates(&self) -> Result<()> {
        if !self.latitude_deg.is_finite() || !self.longitude_deg.is_finite() {
            return Err(EphemerisError::NonFiniteCoordinate {
                latitude_deg: self.latitude_deg,
                longitude_deg: self.longitude_deg,
            });
        }
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(EphemerisError::LatitudeOutOfRange(self.latitude_deg));
        }
        Ok(())
    }
}
