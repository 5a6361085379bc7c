//! Great-circle helpers on a spherical earth.
//!
//! All functions take decimal degrees and return kilometers. Coordinates are
//! not validated: out-of-range values give a numerically defined result that
//! has no geographic meaning. Routes crossing the antimeridian or a pole are
//! not handled.

use std::f64::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Routes whose endpoints are closer than this are treated as a single point.
pub const DEGENERATE_ROUTE_KM: f64 = 0.001;

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A directed travel route from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

impl Route {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }

    pub fn length_km(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.length_km() < DEGENERATE_ROUTE_KM
    }

    /// Distance from `point` to this route, clamped to the segment.
    /// See [`distance_to_line`].
    pub fn distance_to(&self, point: &GeoPoint) -> f64 {
        distance_to_line(
            point.latitude,
            point.longitude,
            self.start.latitude,
            self.start.longitude,
            self.end.latitude,
            self.end.longitude,
        )
    }
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial bearing from point 1 towards point 2 in radians, in `(-PI, PI]`,
/// measured clockwise from north.
pub fn initial_bearing(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);
    let dlon = to_radians(longitude_2 - longitude_1);

    let y = dlon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin()
        - lat1_rad.sin() * lat2_rad.cos() * dlon.cos();
    y.atan2(x)
}

/// Wraps an angle in radians into `(-PI, PI]`.
pub fn normalize_angle(radians: f64) -> f64 {
    let wrapped = (radians + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Signed perpendicular distance from a point at angular distance
/// `angular_distance` (radians) from the route start, whose bearing differs by
/// `bearing_difference` from the route bearing. Positive means right of the
/// route.
pub fn cross_track_distance(angular_distance: f64, bearing_difference: f64) -> f64 {
    (angular_distance.sin() * bearing_difference.sin()).asin() * EARTH_RADIUS_KM
}

/// Distance from the route start to the point's projection onto the great
/// circle of the route. Always non-negative; use the bearing difference to
/// tell whether the projection lies behind the start.
pub fn along_track_distance(angular_distance: f64, cross_track_km: f64) -> f64 {
    let ratio = angular_distance.cos() / (cross_track_km / EARTH_RADIUS_KM).cos();
    // rounding can push the ratio marginally outside acos' domain
    ratio.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
}

/// Distance in kilometers from point P to the route segment A→B.
///
/// - If A and B coincide (closer than [`DEGENERATE_ROUTE_KM`]), this is the
///   distance A–P.
/// - If P projects behind A (bearing difference above 90°), the distance A–P.
/// - If P projects beyond B, the distance B–P.
/// - Otherwise the absolute cross-track distance.
pub fn distance_to_line(
    latitude: f64,
    longitude: f64,
    start_latitude: f64,
    start_longitude: f64,
    end_latitude: f64,
    end_longitude: f64,
) -> f64 {
    let route_km =
        haversine_distance(start_latitude, start_longitude, end_latitude, end_longitude);
    let start_to_point_km =
        haversine_distance(start_latitude, start_longitude, latitude, longitude);

    if route_km < DEGENERATE_ROUTE_KM {
        return start_to_point_km;
    }

    let route_bearing =
        initial_bearing(start_latitude, start_longitude, end_latitude, end_longitude);
    let point_bearing =
        initial_bearing(start_latitude, start_longitude, latitude, longitude);
    let bearing_difference = normalize_angle(point_bearing - route_bearing);

    let angular_distance = start_to_point_km / EARTH_RADIUS_KM;
    let cross_track_km = cross_track_distance(angular_distance, bearing_difference);
    let along_track_km = along_track_distance(angular_distance, cross_track_km);

    if bearing_difference.abs() > PI / 2.0 {
        start_to_point_km
    } else if along_track_km > route_km {
        haversine_distance(end_latitude, end_longitude, latitude, longitude)
    } else {
        cross_track_km.abs()
    }
}
