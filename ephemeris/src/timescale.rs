//! Julian dates and Greenwich sidereal time.
//!
//! Timestamps are taken literally as UTC and UTC is used in place of UT1.
//! The difference is below 0.9 s, about 14 arcseconds of sidereal rotation.

use time::PrimitiveDateTime;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT)
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Date for a timestamp interpreted as UTC.
pub fn julian_date(datetime: PrimitiveDateTime) -> f64 {
    let utc = datetime.assume_utc();
    let seconds = utc.unix_timestamp() as f64 + f64::from(utc.nanosecond()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Wrap an angle into [0, 360) degrees.
pub fn normalize_degrees(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Greenwich mean sidereal time in degrees, [0, 360).
///
/// IAU 1982 expression in the form given by Meeus (Astronomical Algorithms, 12.4).
pub fn greenwich_mean_sidereal_time(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(theta)
}

/// Local mean sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_time(jd: f64, longitude_deg: f64) -> f64 {
    normalize_degrees(greenwich_mean_sidereal_time(jd) + longitude_deg)
}
