//! Resolve which catalog stars are visible to an observer.
//!
//! A failing position computation does not abort the caller: the result is
//! tagged [`Resolution::Degraded`] and carries no stars, so a chart can still
//! be drawn while the failure stays visible in logs.

use crate::catalog::StarCatalogEntry;
use crate::celestial::{Ephemeris, HorizontalPosition};
use crate::observer::ObserverContext;
use crate::{EphemerisError, Result};

/// Anything that can place a catalog star in an observer's horizon frame.
pub trait PositionSource {
    fn horizontal(
        &self,
        star: &StarCatalogEntry,
        observer: &ObserverContext,
    ) -> Result<HorizontalPosition>;
}

impl PositionSource for Ephemeris {
    fn horizontal(
        &self,
        star: &StarCatalogEntry,
        observer: &ObserverContext,
    ) -> Result<HorizontalPosition> {
        Ephemeris::horizontal(self, star, observer)
    }
}

/// A star above the horizon for a particular observation.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleStar {
    pub name: String,
    /// Altitude in degrees, always > 0
    pub altitude_deg: f64,
    /// Azimuth in degrees from north, clockwise
    pub azimuth_deg: f64,
}

/// Outcome of resolving the catalog for one observation.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Positions computed; may legitimately be empty.
    Resolved(Vec<VisibleStar>),
    /// Position computation failed; treated as an empty sky.
    Degraded(EphemerisError),
}

impl Resolution {
    /// Visible stars, empty when degraded.
    pub fn stars(&self) -> &[VisibleStar] {
        match self {
            Resolution::Resolved(stars) => stars,
            Resolution::Degraded(_) => &[],
        }
    }

    pub fn into_stars(self) -> Vec<VisibleStar> {
        match self {
            Resolution::Resolved(stars) => stars,
            Resolution::Degraded(_) => Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Resolution::Degraded(_))
    }

    /// The failure behind a degraded resolution
    pub fn failure(&self) -> Option<&EphemerisError> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::Degraded(err) => Some(err),
        }
    }
}

/// Compute every catalog star's position and keep those above the horizon.
///
/// Stars come back in catalog order. The first failing star degrades the whole
/// resolution, which is logged at `warn` level.
pub fn resolve_visible<S>(
    source: &S,
    catalog: &[StarCatalogEntry],
    observer: &ObserverContext,
) -> Resolution
where
    S: PositionSource + ?Sized,
{
    match try_resolve(source, catalog, observer) {
        Ok(stars) => {
            log::debug!(
                "{} of {} catalog stars above the horizon at {} (lat {:.4}, lon {:.4})",
                stars.len(),
                catalog.len(),
                observer.datetime,
                observer.latitude_deg,
                observer.longitude_deg
            );
            Resolution::Resolved(stars)
        }
        Err(err) => {
            log::warn!("Star positions unavailable, rendering empty sky: {err}");
            Resolution::Degraded(err)
        }
    }
}

fn try_resolve<S>(
    source: &S,
    catalog: &[StarCatalogEntry],
    observer: &ObserverContext,
) -> Result<Vec<VisibleStar>>
where
    S: PositionSource + ?Sized,
{
    let mut visible = Vec::new();
    for star in catalog {
        let position = source.horizontal(star, observer)?;
        if position.is_above_horizon() {
            visible.push(VisibleStar {
                name: star.name.to_string(),
                altitude_deg: position.altitude_deg,
                azimuth_deg: position.azimuth_deg,
            });
        }
    }
    Ok(visible)
}
