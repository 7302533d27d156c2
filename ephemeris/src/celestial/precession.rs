//! IAU 1976 precession from the J2000 mean equator to the mean equator of date.

use nalgebra::{Rotation3, Vector3};

use crate::timescale::{julian_centuries, normalize_degrees};

const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// Precession angles (zeta, z, theta) in degrees for a Julian Date.
///
/// Meeus, Astronomical Algorithms, 21.3 with the starting epoch at J2000.
pub fn precession_angles(jd: f64) -> (f64, f64, f64) {
    let t = julian_centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;

    let zeta = 2306.2181 * t + 0.30188 * t2 + 0.017998 * t3;
    let z = 2306.2181 * t + 1.09468 * t2 + 0.018203 * t3;
    let theta = 2004.3109 * t - 0.42665 * t2 - 0.041833 * t3;

    (
        zeta / ARCSEC_PER_DEGREE,
        z / ARCSEC_PER_DEGREE,
        theta / ARCSEC_PER_DEGREE,
    )
}

/// Rotation taking J2000 mean-equator unit vectors to the mean equator of date.
pub fn precession_matrix(jd: f64) -> Rotation3<f64> {
    let (zeta, z, theta) = precession_angles(jd);

    let r_zeta = Rotation3::from_axis_angle(&Vector3::z_axis(), zeta.to_radians());
    let r_theta = Rotation3::from_axis_angle(&Vector3::y_axis(), -theta.to_radians());
    let r_z = Rotation3::from_axis_angle(&Vector3::z_axis(), z.to_radians());

    r_z * r_theta * r_zeta
}

/// Unit vector for right ascension / declination in degrees.
pub fn unit_vector(ra_deg: f64, dec_deg: f64) -> Vector3<f64> {
    let (ra, dec) = (ra_deg.to_radians(), dec_deg.to_radians());
    Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
}

/// Right ascension / declination in degrees for a unit vector.
pub fn from_unit_vector(v: &Vector3<f64>) -> (f64, f64) {
    let dec = v.z.clamp(-1.0, 1.0).asin();
    let ra = v.y.atan2(v.x);
    (normalize_degrees(ra.to_degrees()), dec.to_degrees())
}

/// Precess J2000 right ascension / declination (degrees) to the equator of date.
pub fn precess_from_j2000(ra_deg: f64, dec_deg: f64, jd: f64) -> (f64, f64) {
    let v = precession_matrix(jd) * unit_vector(ra_deg, dec_deg);
    from_unit_vector(&v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timescale::J2000_JD;
    use approx::assert_relative_eq;
    use nalgebra::Matrix3;

    #[test]
    fn test_identity_at_epoch() {
        let m = precession_matrix(J2000_JD);
        assert_relative_eq!(*m.matrix(), Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_meeus_theta_persei() {
        // Meeus example 21.b, target epoch 2028 Nov 13.19
        let (ra, dec) = precess_from_j2000(41.054_063, 49.227_750, 2_462_088.69);
        assert_relative_eq!(ra, 41.547_214, epsilon = 1e-4);
        assert_relative_eq!(dec, 49.348_483, epsilon = 1e-4);
    }

    #[test]
    fn test_unit_vector_round_trip_near_pole() {
        let (ra, dec) = from_unit_vector(&unit_vector(300.0, 89.9));
        assert_relative_eq!(ra, 300.0, epsilon = 1e-9);
        assert_relative_eq!(dec, 89.9, epsilon = 1e-9);
    }

    #[test]
    fn test_precession_rate_per_century() {
        // Precession in right ascension, zeta + z, is ~4614 arcsec per century
        let (zeta, z, _) = precession_angles(J2000_JD + 36_525.0);
        assert_relative_eq!(zeta + z, 1.281_63, epsilon = 1e-4);
    }
}
