//! Great-circle distance on a spherical Earth.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two lat/lon pairs (degrees).
///
/// The haversine term is clamped to `[0, 1]` so that rounding error near
/// antipodal points can't push the square roots out of their domain.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to whole metres, as reported by the listing endpoints.
pub fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn lat() -> impl Strategy<Value = f64> {
        -90.0f64..=90.0
    }

    fn lon() -> impl Strategy<Value = f64> {
        -180.0f64..=180.0
    }

    proptest! {
        /// Distance from a point to itself is zero
        #[test]
        fn zero_on_identity(la in lat(), lo in lon()) {
            prop_assert_eq!(haversine_km(la, lo, la, lo), 0.0);
        }

        /// Swapping the endpoints gives the same distance
        #[test]
        fn symmetric(la1 in lat(), lo1 in lon(), la2 in lat(), lo2 in lon()) {
            let ab = haversine_km(la1, lo1, la2, lo2);
            let ba = haversine_km(la2, lo2, la1, lo1);
            prop_assert!((ab - ba).abs() < 1e-9, "{} vs {}", ab, ba);
        }

        /// Never negative, never beyond half the circumference
        #[test]
        fn bounded(la1 in lat(), lo1 in lon(), la2 in lat(), lo2 in lon()) {
            let d = haversine_km(la1, lo1, la2, lo2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= EARTH_RADIUS_KM * std::f64::consts::PI + 1e-6);
        }

        /// Points on one meridian: the middle point splits the distance
        #[test]
        fn additive_along_meridian(
            lo in lon(),
            mut lats in proptest::collection::vec(-89.0f64..=89.0, 3),
        ) {
            lats.sort_by(f64::total_cmp);
            let (a, b, c) = (lats[0], lats[1], lats[2]);
            let ac = haversine_km(a, lo, c, lo);
            let ab = haversine_km(a, lo, b, lo);
            let bc = haversine_km(b, lo, c, lo);
            prop_assert!((ac - (ab + bc)).abs() < 1e-6, "{} vs {}", ac, ab + bc);
        }

        /// Points on the equator: the middle point splits the distance
        #[test]
        fn additive_along_equator(mut lons in proptest::collection::vec(-90.0f64..=90.0, 3)) {
            lons.sort_by(f64::total_cmp);
            let (a, b, c) = (lons[0], lons[1], lons[2]);
            let ac = haversine_km(0.0, a, 0.0, c);
            let ab = haversine_km(0.0, a, 0.0, b);
            let bc = haversine_km(0.0, b, 0.0, c);
            prop_assert!((ac - (ab + bc)).abs() < 1e-6, "{} vs {}", ac, ab + bc);
        }
    }
}
