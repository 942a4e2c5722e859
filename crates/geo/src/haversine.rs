//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. Delivery pricing works on
//! the distance rounded to two decimal places, see [`distance_km`].

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers,
/// rounded to 2 decimal places.
///
/// This is the distance used for ranking stores and selecting shipping tiers.
/// Rounding is half-up on the third decimal digit.
///
/// # Example
/// ```
/// use shopfusion_geo::{distance_km, Coordinate};
///
/// let pusat = Coordinate::new(-6.1944, 106.8229);
/// let barat = Coordinate::new(-6.1888, 106.7378);
///
/// assert_eq!(distance_km(&pusat, &barat), distance_km(&barat, &pusat));
/// ```
#[inline]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    round_km(haversine_distance(from, to))
}

/// Calculates the unrounded great-circle distance between two coordinates in
/// kilometers.
///
/// # Arguments
/// * `from` - Starting coordinate
/// * `to` - Ending coordinate
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rounds a distance in kilometers to 2 decimal places.
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PUSAT: Coordinate = Coordinate { latitude: -6.1944, longitude: 106.8229 };
    const SELATAN: Coordinate = Coordinate { latitude: -6.2088, longitude: 106.8456 };
    const TIMUR: Coordinate = Coordinate { latitude: -6.1744, longitude: 106.9497 };
    const SURABAYA: Coordinate = Coordinate { latitude: -7.2574, longitude: 112.7521 };

    #[test]
    fn test_pusat_to_selatan() {
        let distance = distance_km(&PUSAT, &SELATAN);
        assert!((distance - 2.98).abs() < 0.05, "Pusat-Selatan: {}", distance);
    }

    #[test]
    fn test_pusat_to_timur() {
        let distance = distance_km(&PUSAT, &TIMUR);
        assert!((distance - 14.19).abs() < 0.05, "Pusat-Timur: {}", distance);
    }

    #[test]
    fn test_jakarta_to_surabaya() {
        let distance = distance_km(&PUSAT, &SURABAYA);
        // Expected: ~663 km
        assert!((distance - 663.0).abs() < 10.0, "Jakarta-Surabaya: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(distance_km(&PUSAT, &PUSAT), 0.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        assert_eq!(round_km(2.976_695), 2.98);
        assert_eq!(round_km(1.004), 1.0);
        assert_eq!(round_km(0.125), 0.13);
    }

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(a in coordinate(), b in coordinate()) {
            let d1 = haversine_distance(&a, &b);
            let d2 = haversine_distance(&b, &a);
            prop_assert!((d1 - d2).abs() < 1e-6);
        }

        #[test]
        fn prop_distance_is_non_negative(a in coordinate(), b in coordinate()) {
            prop_assert!(distance_km(&a, &b) >= 0.0);
        }

        #[test]
        fn prop_distance_to_self_is_zero(a in coordinate()) {
            prop_assert!(distance_km(&a, &a).abs() < 1e-9);
        }
    }
}
