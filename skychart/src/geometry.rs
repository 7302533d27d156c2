//! Chart layout and palette.

use image::Rgb;

/// Altitudes (degrees) at which concentric guide rings are drawn.
pub const ALTITUDE_RINGS_DEG: [f64; 5] = [15.0, 30.0, 45.0, 60.0, 75.0];

/// Cardinal labels and their azimuths in degrees.
pub const CARDINALS: [(&str, f64); 4] = [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)];

/// Distance of cardinal labels outside the horizon ring, in pixels
pub const CARDINAL_OFFSET_PX: f64 = 28.0;

/// Radius of a star dot in pixels
pub const STAR_DOT_RADIUS_PX: f64 = 4.0;

/// Offset of a star's name from its dot, in pixels: +x right, -y up, so the
/// name sits right of and slightly above the dot
pub const STAR_LABEL_OFFSET_PX: (f64, f64) = (10.0, -2.0);

/// Canvas size plus the placement of the horizon circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Horizontal position of the zenith
    pub center_x: f64,
    /// Vertical position of the zenith
    pub center_y: f64,
    /// Horizon ring radius in pixels
    pub radius: f64,
    /// Vertical position of the title baseline centre
    pub title_y: f64,
    /// Vertical position of the caption centre
    pub caption_y: f64,
    /// Vertical position of the footer centre
    pub footer_y: f64,
}

impl ChartGeometry {
    /// Portrait 1200x1600 chart with the circle pushed 80 px below centre.
    ///
    /// The radius leaves room for the east and west labels inside the canvas.
    pub fn portrait() -> Self {
        let width = 1200;
        let height = 1600;
        Self {
            width,
            height,
            center_x: f64::from(width) / 2.0,
            center_y: f64::from(height) / 2.0 + 80.0,
            radius: 540.0,
            title_y: 80.0,
            caption_y: 140.0,
            footer_y: f64::from(height) - 80.0,
        }
    }

    /// Horizon plus cardinal label margin must fit horizontally.
    pub fn fits_cardinal_labels(&self) -> bool {
        let reach = self.radius + CARDINAL_OFFSET_PX;
        self.center_x - reach >= 0.0 && self.center_x + reach <= f64::from(self.width)
    }
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self::portrait()
    }
}

/// Colours for every chart element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPalette {
    pub background: Rgb<u8>,
    pub title: Rgb<u8>,
    pub caption: Rgb<u8>,
    pub horizon_ring: Rgb<u8>,
    pub altitude_ring: Rgb<u8>,
    pub cardinal: Rgb<u8>,
    pub star_dot: Rgb<u8>,
    pub star_label: Rgb<u8>,
    pub footer: Rgb<u8>,
}

impl ChartPalette {
    /// Dark night-sky palette
    pub fn night() -> Self {
        Self {
            background: Rgb([6, 10, 20]),
            title: Rgb([230, 240, 255]),
            caption: Rgb([190, 200, 230]),
            horizon_ring: Rgb([26, 40, 80]),
            altitude_ring: Rgb([20, 30, 60]),
            cardinal: Rgb([160, 180, 220]),
            star_dot: Rgb([200, 220, 255]),
            star_label: Rgb([150, 170, 220]),
            footer: Rgb([150, 170, 210]),
        }
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self::night()
    }
}

/// Font sizes in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeScale {
    pub title: f64,
    pub caption: f64,
    pub label: f64,
}

impl Default for TypeScale {
    fn default() -> Self {
        Self {
            title: 48.0,
            caption: 26.0,
            label: 22.0,
        }
    }
}
