//! Coordinate offset geometry for quadrant subdivision.
//!
//! Spherical approximation: a meter of latitude is the same number of degrees
//! everywhere, while a meter of longitude widens toward the poles as the
//! parallels shrink. No geodesic correction; the error is negligible at
//! search-radius scale.

use mapspider_core::Coordinate;

/// Mean equatorial Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Origins closer to a pole than this are rejected up front: the longitude
/// delta divides by `cos(lat)`, which degenerates at ±90°.
pub const MAX_ORIGIN_LATITUDE: f64 = 89.0;

/// Returns the four points offset from `center` by `offset_meters` both
/// north/south and east/west — the centers of the four quadrants of a square
/// of half-extent `offset_meters` around `center`.
///
/// Output order is fixed for determinism: `(-,-), (-,+), (+,-), (+,+)` in
/// (lat, lng) sign pairs.
#[must_use]
pub fn sub_coordinates(center: Coordinate, offset_meters: f64) -> [Coordinate; 4] {
    let lat_rad = center.lat.to_radians();
    let delta_lat = (offset_meters / EARTH_RADIUS_METERS).to_degrees();
    let delta_lng = (offset_meters / (EARTH_RADIUS_METERS * lat_rad.cos())).to_degrees();

    [
        Coordinate::new(center.lat - delta_lat, center.lng - delta_lng),
        Coordinate::new(center.lat - delta_lat, center.lng + delta_lng),
        Coordinate::new(center.lat + delta_lat, center.lng - delta_lng),
        Coordinate::new(center.lat + delta_lat, center.lng + delta_lng),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 0.0001;

    fn assert_close(actual: Coordinate, lat: f64, lng: f64) {
        assert!(
            (actual.lat - lat).abs() < TOLERANCE && (actual.lng - lng).abs() < TOLERANCE,
            "expected ({lat}, {lng}), got ({}, {})",
            actual.lat,
            actual.lng
        );
    }

    #[test]
    fn moscow_offsets_match_reference_values() {
        let center = Coordinate::new(55.7558, 37.6173);
        let corners = sub_coordinates(center, 1000.0);

        assert_close(corners[0], 55.7468, 37.6013);
        assert_close(corners[1], 55.7468, 37.6333);
        assert_close(corners[2], 55.7648, 37.6013);
        assert_close(corners[3], 55.7648, 37.6333);
    }

    #[test]
    fn equator_offsets_are_symmetric() {
        let corners = sub_coordinates(Coordinate::new(0.0, 0.0), 1000.0);

        // At the equator a kilometer is ~0.009° in both axes.
        for corner in corners {
            assert!((corner.lat.abs() - 0.009).abs() < TOLERANCE);
            assert!((corner.lng.abs() - 0.009).abs() < TOLERANCE);
        }
    }

    #[test]
    fn returns_all_four_sign_combinations() {
        let center = Coordinate::new(40.0, -75.0);
        let corners = sub_coordinates(center, 500.0);

        assert!(corners[0].lat < center.lat && corners[0].lng < center.lng);
        assert!(corners[1].lat < center.lat && corners[1].lng > center.lng);
        assert!(corners[2].lat > center.lat && corners[2].lng < center.lng);
        assert!(corners[3].lat > center.lat && corners[3].lng > center.lng);
    }

    #[test]
    fn longitude_delta_widens_toward_poles() {
        let equator = sub_coordinates(Coordinate::new(0.0, 0.0), 1000.0);
        let arctic = sub_coordinates(Coordinate::new(70.0, 0.0), 1000.0);

        let lng_spread_equator = equator[1].lng - equator[0].lng;
        let lng_spread_arctic = arctic[1].lng - arctic[0].lng;
        assert!(lng_spread_arctic > lng_spread_equator * 2.0);

        // Latitude delta is latitude-independent.
        let lat_spread_equator = equator[2].lat - equator[0].lat;
        let lat_spread_arctic = arctic[2].lat - arctic[0].lat;
        assert!((lat_spread_equator - lat_spread_arctic).abs() < 1e-9);
    }
}
