use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};

/// Mean Earth radius used for every distance in this crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate in degrees, always ordered (latitude, longitude).
///
/// Stored geofences and map clients send `{lat, lng}` objects, so those
/// spellings are accepted on input. GeoJSON's (lng, lat) ordering is the
/// caller's problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl Point {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Range check for request validation.
    ///
    /// The geometry functions never call this; they accept whatever they are
    /// given and return mathematically defined (if meaningless) results.
    pub fn validate(&self) -> GeoResult<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoError::invalid_argument(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoError::invalid_argument(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    pub fn distance_km(&self, other: &Point) -> f64 {
        haversine_distance_km(*self, *other)
    }
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in kilometres between two points.
///
/// `sqrt(h)` is clamped to 1 so rounding on identical or antipodal points
/// cannot push `asin` out of its domain.
pub fn haversine_distance_km(a: Point, b: Point) -> f64 {
    let delta_lat = to_radians(b.latitude - a.latitude);
    let delta_lng = to_radians(b.longitude - a.longitude);

    let h = (delta_lat / 2.0).sin().powi(2)
        + to_radians(a.latitude).cos()
            * to_radians(b.latitude).cos()
            * (delta_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// A box whose `west` edge lies east of its `east` edge wraps across
    /// longitude ±180.
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Point) -> bool {
        let longitude = if self.crosses_antimeridian() {
            point.longitude >= self.west || point.longitude <= self.east
        } else {
            point.longitude >= self.west && point.longitude <= self.east
        };
        longitude && point.latitude <= self.north && point.latitude >= self.south
    }

    pub(crate) fn around(points: &[Point]) -> Self {
        let empty = Self {
            north: f64::NEG_INFINITY,
            south: f64::INFINITY,
            east: f64::NEG_INFINITY,
            west: f64::INFINITY,
        };
        points.iter().fold(empty, |bounds, point| Self {
            north: bounds.north.max(point.latitude),
            south: bounds.south.min(point.latitude),
            east: bounds.east.max(point.longitude),
            west: bounds.west.min(point.longitude),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAO_PAULO: Point = Point::new(-23.5505, -46.6333);
    const RIO_DE_JANEIRO: Point = Point::new(-22.9068, -43.1729);

    #[test]
    fn to_radians_known_values() {
        assert_eq!(to_radians(0.0), 0.0);
        assert!((to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((to_radians(-90.0) + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn sao_paulo_to_rio() {
        let distance = haversine_distance_km(SAO_PAULO, RIO_DE_JANEIRO);
        assert!(
            (355.0..=363.0).contains(&distance),
            "unexpected distance {distance}"
        );
    }

    #[test]
    fn one_degree_of_latitude() {
        let distance = haversine_distance_km(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert!((distance - 111.195).abs() < 0.01);
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let distance = haversine_distance_km(Point::new(0.0, 0.0), Point::new(0.0, 180.0));
        assert!(distance.is_finite());
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);

        let poles = haversine_distance_km(Point::new(90.0, 0.0), Point::new(-90.0, 0.0));
        assert!((poles - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_input_is_not_a_crash() {
        let distance = haversine_distance_km(Point::new(500.0, -900.0), Point::new(0.0, 0.0));
        assert!(distance >= 0.0);
    }

    #[test]
    fn distance_km_matches_free_function() {
        assert_eq!(
            SAO_PAULO.distance_km(&RIO_DE_JANEIRO),
            haversine_distance_km(SAO_PAULO, RIO_DE_JANEIRO)
        );
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(SAO_PAULO.validate().is_ok());
        assert!(Point::new(90.0, 180.0).validate().is_ok());
        assert!(Point::new(90.5, 0.0).validate().is_err());
        assert!(Point::new(0.0, -180.1).validate().is_err());
        assert!(Point::new(f64::NAN, 0.0).validate().is_err());
        assert!(Point::new(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn deserializes_short_field_names() {
        let point: Point = serde_json::from_str(r#"{"lat": -22.9, "lng": -43.1}"#).unwrap();
        assert_eq!(point, Point::new(-22.9, -43.1));

        let point: Point =
            serde_json::from_str(r#"{"latitude": 1.5, "longitude": 2.5}"#).unwrap();
        assert_eq!(point, Point::new(1.5, 2.5));
    }

    #[test]
    fn bounding_box_is_inclusive() {
        let bounds = BoundingBox::around(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(4.0, -3.0),
        ]);
        assert_eq!(bounds.north, 10.0);
        assert_eq!(bounds.south, 0.0);
        assert_eq!(bounds.east, 5.0);
        assert_eq!(bounds.west, -3.0);
        assert!(bounds.contains(Point::new(10.0, -3.0)));
        assert!(!bounds.contains(Point::new(10.1, 0.0)));
    }

    #[test]
    fn wrapped_box_spans_the_antimeridian() {
        let bounds = BoundingBox {
            north: 1.0,
            south: -1.0,
            east: -179.5,
            west: 179.5,
        };
        assert!(bounds.crosses_antimeridian());
        assert!(bounds.contains(Point::new(0.0, 180.0)));
        assert!(bounds.contains(Point::new(0.0, -179.9)));
        assert!(bounds.contains(Point::new(0.0, 179.5)));
        assert!(!bounds.contains(Point::new(0.0, 0.0)));
        assert!(!bounds.contains(Point::new(0.0, -179.0)));
        assert!(!bounds.contains(Point::new(2.0, 180.0)));
    }

    fn any_point() -> impl Strategy<Value = Point> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Point::new(lat, lng))
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in any_point(), b in any_point()) {
            prop_assert!((haversine_distance_km(a, b) - haversine_distance_km(b, a)).abs() < 1e-9);
        }

        #[test]
        fn distance_to_self_is_zero(p in any_point()) {
            prop_assert_eq!(haversine_distance_km(p, p), 0.0);
        }

        #[test]
        fn distance_is_bounded(a in any_point(), b in any_point()) {
            let distance = haversine_distance_km(a, b);
            prop_assert!(distance >= 0.0);
            prop_assert!(distance <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
