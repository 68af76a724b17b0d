//! Great-circle distance calculation.
//!
//! The tracker never computes distances itself; it calls through the
//! [`DistanceCalc`] trait so tests can script distances and embedders
//! can substitute their own geodesy.

use super::GeoPoint;

/// Mean Earth radius in meters (spherical approximation).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Proximity function between two geographic points.
pub trait DistanceCalc {
    /// Distance in meters between `a` and `b`.
    fn distance_meters(&self, a: &GeoPoint, b: &GeoPoint) -> f64;
}

/// Haversine great-circle distance over a spherical Earth.
///
/// No altitude or road-network correction is applied: the result is the
/// straight-line surface distance to the maneuver point, which is what
/// guidance thresholds are calibrated against.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircle;

impl DistanceCalc for GreatCircle {
    fn distance_meters(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        let lat_a = a.latitude().to_radians();
        let lat_b = b.latitude().to_radians();
        let dlat = (b.latitude() - a.latitude()).to_radians();
        let dlon = (b.longitude() - a.longitude()).to_radians();

        let h = (dlat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (dlon / 2.0).sin().powi(2);

        // Clamp against floating point drift past 1.0 for antipodes
        2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_zero_distance_for_identical_points() {
        let p = point(12.9, 77.6);
        assert_eq!(GreatCircle.distance_meters(&p, &p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree of latitude is ~111.19 km on a 6371 km sphere
        let a = point(0.0, 0.0);
        let b = point(1.0, 0.0);
        let d = GreatCircle.distance_meters(&a, &b);
        assert!(
            (d - 111_195.0).abs() < 10.0,
            "Expected ~111195 m, got {} m",
            d
        );
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let a = point(0.0, 77.0);
        let b = point(0.0, 78.0);
        let d = GreatCircle.distance_meters(&a, &b);
        assert!(
            (d - 111_195.0).abs() < 10.0,
            "Expected ~111195 m, got {} m",
            d
        );
    }

    #[test]
    fn test_longitude_shrinks_away_from_equator() {
        // At 60°N a degree of longitude is half a degree at the equator
        let a = point(60.0, 10.0);
        let b = point(60.0, 11.0);
        let d = GreatCircle.distance_meters(&a, &b);
        assert!(
            (d - 55_597.0).abs() < 50.0,
            "Expected ~55597 m, got {} m",
            d
        );
    }

    #[test]
    fn test_adjacent_maneuver_points() {
        // 0.01° of both latitude and longitude near Bangalore is well
        // over a 100 m guidance threshold
        let a = point(12.9000, 77.6000);
        let b = point(12.9100, 77.6100);
        let d = GreatCircle.distance_meters(&a, &b);
        assert!(
            (1500.0..1600.0).contains(&d),
            "Expected ~1553 m, got {} m",
            d
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_distance_is_non_negative(
                lat1 in -90.0..=90.0_f64,
                lon1 in -180.0..=180.0_f64,
                lat2 in -90.0..=90.0_f64,
                lon2 in -180.0..=180.0_f64
            ) {
                let a = point(lat1, lon1);
                let b = point(lat2, lon2);
                prop_assert!(GreatCircle.distance_meters(&a, &b) >= 0.0);
            }

            #[test]
            fn test_distance_is_symmetric(
                lat1 in -90.0..=90.0_f64,
                lon1 in -180.0..=180.0_f64,
                lat2 in -90.0..=90.0_f64,
                lon2 in -180.0..=180.0_f64
            ) {
                let a = point(lat1, lon1);
                let b = point(lat2, lon2);
                let ab = GreatCircle.distance_meters(&a, &b);
                let ba = GreatCircle.distance_meters(&b, &a);
                prop_assert!(
                    (ab - ba).abs() < 1e-6,
                    "Asymmetric: {} vs {}",
                    ab,
                    ba
                );
            }

            #[test]
            fn test_distance_bounded_by_half_circumference(
                lat1 in -90.0..=90.0_f64,
                lon1 in -180.0..=180.0_f64,
                lat2 in -90.0..=90.0_f64,
                lon2 in -180.0..=180.0_f64
            ) {
                let a = point(lat1, lon1);
                let b = point(lat2, lon2);
                let d = GreatCircle.distance_meters(&a, &b);
                let max = std::f64::consts::PI * EARTH_RADIUS_M;
                prop_assert!(d <= max + 1.0, "{} exceeds half circumference", d);
            }
        }
    }
}
