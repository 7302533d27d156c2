//! Altitude/azimuth to chart pixel coordinates.
//!
//! Altitude maps linearly to distance from the centre (zenith at the centre,
//! horizon on the rim) and azimuth maps to the angle from straight up,
//! clockwise:
//!
//! ```text
//! r = R * (1 - altitude / 90)
//! x = cx + r * sin(azimuth)
//! y = cy - r * cos(azimuth)
//! ```

use ephemeris::VisibleStar;

use crate::geometry::ChartGeometry;

/// A point on the canvas in pixel units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// A visible star placed on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedStar {
    pub name: String,
    pub position: PixelPoint,
}

/// Zenith-centred polar projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarProjection {
    center_x: f64,
    center_y: f64,
    radius: f64,
}

impl PolarProjection {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    pub fn from_geometry(geometry: &ChartGeometry) -> Self {
        Self::new(geometry.center_x, geometry.center_y, geometry.radius)
    }

    /// Pixel radius for an altitude in degrees.
    pub fn radius_for_altitude(&self, altitude_deg: f64) -> f64 {
        self.radius * (1.0 - altitude_deg / 90.0)
    }

    /// Canvas position for altitude/azimuth in degrees.
    pub fn project(&self, altitude_deg: f64, azimuth_deg: f64) -> PixelPoint {
        let r = self.radius_for_altitude(altitude_deg);
        let theta = azimuth_deg.to_radians();
        PixelPoint {
            x: self.center_x + r * theta.sin(),
            y: self.center_y - r * theta.cos(),
        }
    }

    /// Point at a fixed pixel distance from the centre along an azimuth.
    pub fn at_distance(&self, distance: f64, azimuth_deg: f64) -> PixelPoint {
        let theta = azimuth_deg.to_radians();
        PixelPoint {
            x: self.center_x + distance * theta.sin(),
            y: self.center_y - distance * theta.cos(),
        }
    }

    pub fn project_star(&self, star: &VisibleStar) -> ProjectedStar {
        ProjectedStar {
            name: star.name.clone(),
            position: self.project(star.altitude_deg, star.azimuth_deg),
        }
    }

    pub fn project_all(&self, stars: &[VisibleStar]) -> Vec<ProjectedStar> {
        stars.iter().map(|s| self.project_star(s)).collect()
    }

    pub fn center(&self) -> PixelPoint {
        PixelPoint {
            x: self.center_x,
            y: self.center_y,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}
