//! Planar distance and projection primitives.
//!
//! Everything here is a pure function over `f64` coordinates; there is no
//! shared state and no dependency on the graph structures. The planar forms
//! treat latitude/longitude as Cartesian axes and drive query-point
//! snapping: rank candidate edges with the cheap squared metric
//! [`normalized_edge_distance`], gate the winner with
//! [`valid_edge_distance`], and only then pay for the exact
//! [`crossing_point_to_edge`]. [`haversine_distance`] is the great-circle
//! length used for stored edge lengths, never for snapping math.
//!
//! Not-a-number inputs propagate to not-a-number outputs so that upstream
//! misuse stays visible instead of being clamped away.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Planar Euclidean distance between two coordinates.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    squared_distance(lat1, lon1, lat2, lon2).sqrt()
}

/// Planar Euclidean distance with elevation as a third axis.
///
/// For `ele1 == ele2` this reduces exactly to [`distance`].
pub fn distance_3d(lat1: f64, lon1: f64, ele1: f64, lat2: f64, lon2: f64, ele2: f64) -> f64 {
    let d_ele = ele1 - ele2;
    (squared_distance(lat1, lon1, lat2, lon2) + d_ele * d_ele).sqrt()
}

/// Squared planar distance, the unit-squared space shared by
/// [`normalized_edge_distance`].
pub fn squared_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = lat1 - lat2;
    let d_lon = lon1 - lon2;
    d_lat * d_lat + d_lon * d_lon
}

/// Linear interpolation between two coordinates at parameter `f`.
///
/// `f = 0` returns the first point, `f = 1` the second, `f = 0.5` the exact
/// midpoint. `f` is deliberately not clamped: callers may extrapolate.
pub fn intermediate_point(f: f64, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Point {
    Point {
        lat: lat1 + f * (lat2 - lat1),
        lon: lon1 + f * (lon2 - lon1),
    }
}

/// Squared distance from point `r` to the infinite line through `a`-`b`.
///
/// This is a comparison metric for candidate ranking, not a true segment
/// distance: the projection is not clamped to the segment, so callers must
/// check [`valid_edge_distance`] before trusting it as a nearest-point
/// metric. A degenerate segment (`a == b`) falls back to the point-to-point
/// squared distance.
pub fn normalized_edge_distance(
    r_lat: f64,
    r_lon: f64,
    a_lat: f64,
    a_lon: f64,
    b_lat: f64,
    b_lon: f64,
) -> f64 {
    let delta_lat = b_lat - a_lat;
    let delta_lon = b_lon - a_lon;
    let norm = delta_lon * delta_lon + delta_lat * delta_lat;
    if norm == 0.0 {
        return squared_distance(a_lat, a_lon, r_lat, r_lon);
    }
    let factor = ((r_lon - a_lon) * delta_lon + (r_lat - a_lat) * delta_lat) / norm;
    let c_lat = a_lat + factor * delta_lat;
    let c_lon = a_lon + factor * delta_lon;
    squared_distance(c_lat, c_lon, r_lat, r_lon)
}

/// Elevation-aware variant of [`normalized_edge_distance`].
///
/// Projects in three dimensions and penalizes the elevation deviation at
/// the projected point on top of the planar offset.
#[allow(clippy::too_many_arguments)]
pub fn normalized_edge_distance_3d(
    r_lat: f64,
    r_lon: f64,
    r_ele: f64,
    a_lat: f64,
    a_lon: f64,
    a_ele: f64,
    b_lat: f64,
    b_lon: f64,
    b_ele: f64,
) -> f64 {
    let delta_lat = b_lat - a_lat;
    let delta_lon = b_lon - a_lon;
    let delta_ele = b_ele - a_ele;
    let norm = delta_lon * delta_lon + delta_lat * delta_lat + delta_ele * delta_ele;
    let factor = if norm == 0.0 {
        // degenerate segment: project onto the single point
        0.0
    } else {
        ((r_lon - a_lon) * delta_lon + (r_lat - a_lat) * delta_lat + (r_ele - a_ele) * delta_ele)
            / norm
    };
    let c_lat = a_lat + factor * delta_lat;
    let c_lon = a_lon + factor * delta_lon;
    let c_ele = a_ele + factor * delta_ele;
    let d_ele = c_ele - r_ele;
    squared_distance(c_lat, c_lon, r_lat, r_lon) + d_ele * d_ele
}

/// Orthogonal projection of point `r` onto the supporting line of `a`-`b`.
///
/// Not clamped to the segment: the result is where the perpendicular from
/// `r` meets the line, which may lie on its extension. For a degenerate
/// segment the segment point itself is returned.
pub fn crossing_point_to_edge(
    r_lat: f64,
    r_lon: f64,
    a_lat: f64,
    a_lon: f64,
    b_lat: f64,
    b_lon: f64,
) -> Point {
    let delta_lat = b_lat - a_lat;
    let delta_lon = b_lon - a_lon;
    let norm = delta_lon * delta_lon + delta_lat * delta_lat;
    if norm == 0.0 {
        return Point::new(a_lat, a_lon);
    }
    let factor = ((r_lon - a_lon) * delta_lon + (r_lat - a_lat) * delta_lat) / norm;
    Point {
        lat: a_lat + factor * delta_lat,
        lon: a_lon + factor * delta_lon,
    }
}

/// True only if the orthogonal projection of `r` falls strictly between the
/// segment endpoints.
///
/// This is the gate other geometry queries must pass before trusting
/// [`crossing_point_to_edge`] as a segment-relative nearest point; a
/// projection landing exactly on an endpoint or beyond it is rejected.
pub fn valid_edge_distance(
    r_lat: f64,
    r_lon: f64,
    a_lat: f64,
    a_lon: f64,
    b_lat: f64,
    b_lon: f64,
) -> bool {
    let ar_lat = r_lat - a_lat;
    let ar_lon = r_lon - a_lon;
    let ab_lat = b_lat - a_lat;
    let ab_lon = b_lon - a_lon;
    let rb_lat = b_lat - r_lat;
    let rb_lon = b_lon - r_lon;
    let ab_ar = ar_lon * ab_lon + ar_lat * ab_lat;
    let ab_rb = rb_lon * ab_lon + rb_lat * ab_lat;
    ab_ar > 0.0 && ab_rb > 0.0
}

/// Great-circle distance between two points in meters.
pub fn haversine_distance(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let lat1 = lat1_deg.to_radians();
    let lat2 = lat2_deg.to_radians();
    let delta_lat = (lat2_deg - lat1_deg).to_radians();
    let delta_lon = (lon2_deg - lon1_deg).to_radians();

    let a =
        (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_same_point_is_zero() {
        assert_eq!(0.0, distance(10.0, 20.0, 10.0, 20.0));
    }

    #[test]
    fn dist_propagates_nan() {
        assert!(distance(f64::NAN, 0.0, 0.0, 0.0).is_nan());
        assert!(distance(0.0, 0.0, f64::NAN, 0.0).is_nan());
        assert!(distance_3d(0.0, 0.0, f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn dist_3d_reduces_to_2d_at_equal_elevation() {
        let d2 = distance(1.0, 2.0, 3.0, 4.0);
        let d3 = distance_3d(1.0, 2.0, 100.0, 3.0, 4.0, 100.0);
        assert!((d2 - d3).abs() < 1e-12);
    }

    #[test]
    fn dist_3d_pure_elevation() {
        assert!((distance_3d(0.0, 0.0, 0.0, 0.0, 0.0, 1.0) - 1.0).abs() < 1e-6);
        assert!((distance_3d(0.0, 0.0, 0.0, 0.0, 0.0, 10.0) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn intermediate_point_endpoints_exact() {
        let p = intermediate_point(0.0, 10.0, 20.0, 30.0, 40.0);
        assert!((p.lat - 10.0).abs() < 1e-9);
        assert!((p.lon - 20.0).abs() < 1e-9);

        let p = intermediate_point(1.0, 10.0, 20.0, 30.0, 40.0);
        assert!((p.lat - 30.0).abs() < 1e-9);
        assert!((p.lon - 40.0).abs() < 1e-9);
    }

    #[test]
    fn intermediate_point_midpoint_symmetric() {
        let p1 = intermediate_point(0.5, 0.0, 0.0, 10.0, 10.0);
        let p2 = intermediate_point(0.5, 10.0, 10.0, 0.0, 0.0);
        assert!((p1.lat - 5.0).abs() < 1e-9);
        assert!((p1.lon - 5.0).abs() < 1e-9);
        assert!((p1.lat - p2.lat).abs() < 1e-9);
        assert!((p1.lon - p2.lon).abs() < 1e-9);
    }

    #[test]
    fn intermediate_point_stays_in_bounding_box() {
        let (lat1, lon1, lat2, lon2) = (-20.0, -30.0, 40.0, 60.0);
        for f in [0.0, 0.1, 0.3, 0.5, 0.7, 0.9, 1.0] {
            let p = intermediate_point(f, lat1, lon1, lat2, lon2);
            assert!(p.lat >= lat1.min(lat2) - 1e-9 && p.lat <= lat1.max(lat2) + 1e-9);
            assert!(p.lon >= lon1.min(lon2) - 1e-9 && p.lon <= lon1.max(lon2) + 1e-9);
        }
    }

    #[test]
    fn normalized_edge_distance_known_value() {
        assert_eq!(50.0, normalized_edge_distance(0.0, 10.0, 0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn normalized_edge_distance_identical_points_is_zero() {
        assert_eq!(0.0, normalized_edge_distance(1.0, 1.0, 1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn normalized_edge_distance_degenerate_segment_falls_back() {
        // zero-length segment at (2,2): plain squared point distance, no NaN
        let d = normalized_edge_distance(5.0, 6.0, 2.0, 2.0, 2.0, 2.0);
        assert_eq!(9.0 + 16.0, d);
    }

    #[test]
    fn normalized_edge_distance_3d_degenerate_segment() {
        let d = normalized_edge_distance_3d(0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(25.0, d);
    }

    #[test]
    fn crossing_point_known_value() {
        let p = crossing_point_to_edge(0.0, 10.0, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(5.0, p.lat);
        assert_eq!(5.0, p.lon);
    }

    #[test]
    fn crossing_point_degenerate_segment_returns_segment_point() {
        let p = crossing_point_to_edge(3.0, 4.0, 1.0, 2.0, 1.0, 2.0);
        assert_eq!(Point::new(1.0, 2.0), p);
    }

    #[test]
    fn valid_edge_distance_rejects_projections_outside_segment() {
        assert!(!valid_edge_distance(5.0, 15.0, 0.0, 0.0, 10.0, 10.0));
        assert!(!valid_edge_distance(15.0, 5.0, 0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn valid_edge_distance_accepts_interior_projection() {
        assert!(valid_edge_distance(0.0, 10.0, 0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn normalized_edge_distance_random_inputs_stay_finite() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let r_lat = rng.random_range(-90.0..90.0);
            let r_lon = rng.random_range(-180.0..180.0);
            let a_lat = rng.random_range(-90.0..90.0);
            let a_lon = rng.random_range(-180.0..180.0);
            let b_lat = rng.random_range(-90.0..90.0);
            let b_lon = rng.random_range(-180.0..180.0);
            let d = normalized_edge_distance(r_lat, r_lon, a_lat, a_lon, b_lat, b_lon);
            assert!(d.is_finite());
            assert!(d >= 0.0);
        }
    }

    #[test]
    fn haversine_one_degree_longitude_at_equator() {
        let d = haversine_distance(0.0, 0.0, 0.0, 1.0);
        // one degree of arc on the mean earth radius
        assert!((d - 111_195.0).abs() < 100.0);
    }
}
