//! Haversine great-circle distance.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two `(latitude, longitude)`
/// points given in degrees.
///
/// # Examples
///
/// ```
/// use u_irp::distance::haversine_km;
///
/// // One degree of latitude is roughly 111.2 km.
/// let d = haversine_km(10.0, 106.0, 11.0, 106.0);
/// assert!((d - 111.19).abs() < 0.01);
/// assert_eq!(haversine_km(10.0, 106.0, 10.0, 106.0), 0.0);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        assert_eq!(haversine_km(21.0, 105.8, 21.0, 105.8), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = haversine_km(10.76, 106.66, 21.03, 105.85);
        let b = haversine_km(21.03, 105.85, 10.76, 106.66);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_hanoi_to_saigon() {
        // Roughly 1,140 km as the crow flies.
        let d = haversine_km(21.0285, 105.8542, 10.8231, 106.6297);
        assert!(d > 1100.0 && d < 1180.0, "got {}", d);
    }

    #[test]
    fn test_quarter_meridian() {
        let d = haversine_km(0.0, 0.0, 90.0, 0.0);
        let expected = std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_KM;
        assert!((d - expected).abs() < 1e-6);
    }
}
