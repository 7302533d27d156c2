//! Embedded bright-star catalog.

/// A fixed star with J2000 equatorial coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarCatalogEntry {
    /// Common name
    pub name: &'static str,
    /// Right ascension in degrees
    pub ra_deg: f64,
    /// Declination in degrees
    pub dec_deg: f64,
}

impl StarCatalogEntry {
    /// Create a catalog entry from right ascension and declination in degrees.
    pub const fn new(name: &'static str, ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            name,
            ra_deg,
            dec_deg,
        }
    }

    /// Right ascension in hours (15 degrees per hour)
    pub fn ra_hours(&self) -> f64 {
        self.ra_deg / 15.0
    }
}

/// The eighteen brightest stars used for the sky chart.
///
/// Coordinates are J2000 and never change at runtime.
pub const BRIGHT_STARS: [StarCatalogEntry; 18] = [
    StarCatalogEntry::new("Sirius", 101.2875, -16.7161),
    StarCatalogEntry::new("Canopus", 95.9879, -52.6957),
    StarCatalogEntry::new("Arcturus", 213.9153, 19.1825),
    StarCatalogEntry::new("Vega", 279.2347, 38.7837),
    StarCatalogEntry::new("Capella", 79.1723, 45.9979),
    StarCatalogEntry::new("Rigel", 78.6345, -8.2016),
    StarCatalogEntry::new("Procyon", 114.8255, 5.2249),
    StarCatalogEntry::new("Betelgeuse", 88.7929, 7.4071),
    StarCatalogEntry::new("Achernar", 24.4286, -57.2367),
    StarCatalogEntry::new("Altair", 297.6958, 8.8683),
    StarCatalogEntry::new("Aldebaran", 68.9802, 16.5093),
    StarCatalogEntry::new("Antares", 247.3519, -26.4320),
    StarCatalogEntry::new("Spica", 201.2983, -11.1613),
    StarCatalogEntry::new("Pollux", 116.3289, 28.0262),
    StarCatalogEntry::new("Fomalhaut", 344.4128, -29.6222),
    StarCatalogEntry::new("Deneb", 310.3579, 45.2803),
    StarCatalogEntry::new("Regulus", 152.0929, 11.9672),
    StarCatalogEntry::new("Hadar", 210.9558, -60.3730),
];

/// Look up a catalog star by name, ignoring case.
pub fn find(name: &str) -> Option<&'static StarCatalogEntry> {
    BRIGHT_STARS
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
}
