use crate::point::{haversine_distance_km, Point};

/// True when `point` is no further than `radius_km` from `center`.
///
/// The boundary is inclusive. A degenerate radius is not an error here: a
/// zero radius matches only the center itself and a negative or NaN radius
/// matches nothing. Validated zones reject such radii at construction.
pub fn is_point_in_circle(point: Point, center: Point, radius_km: f64) -> bool {
    haversine_distance_km(point, center) <= radius_km
}
