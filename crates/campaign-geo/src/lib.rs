//! Geofence geometry for campaign zones.
//!
//! Everything here is a pure function over plain coordinate values: distances
//! on a spherical Earth, circle and polygon containment, and a facade that
//! dispatches on the geofence shape. Nothing is stored, cached or logged.
//!
//! ```
//! use campaign_geo::{is_point_in_geofence, Geofence, GeofenceShape, Point};
//!
//! let zone = Geofence::new(
//!     "Downtown",
//!     GeofenceShape::circle(Point::new(-23.5505, -46.6333), 2.0).unwrap(),
//! );
//! assert!(is_point_in_geofence(Point::new(-23.5510, -46.6340), &zone));
//! ```

mod circle;
mod error;
mod geofence;
mod point;
mod polygon;

pub use circle::is_point_in_circle;
pub use error::{GeoError, GeoErrorKind, GeoResult};
pub use geofence::{
    filter_within_geofences, is_point_in_geofence, matching_geofences, CircleZone, Geofence,
    GeofenceKind, GeofenceRecord, GeofenceShape, Located, PolygonZone,
};
pub use point::{haversine_distance_km, to_radians, BoundingBox, Point, EARTH_RADIUS_KM};
pub use polygon::{is_point_in_polygon, polygon_perimeter_km, MIN_POLYGON_VERTICES};
