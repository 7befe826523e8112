use crate::point::{haversine_distance_km, Point};

/// Fewer vertices than this cannot enclose an area.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Even-odd ray casting over the ring formed by `vertices`.
///
/// The ring is implicitly closed, so the last vertex must not repeat the
/// first (a repeated vertex only adds a zero-length edge, which never
/// toggles). Winding order does not matter. Self-intersecting and zero-area
/// rings are not rejected; they yield whatever the even-odd rule gives.
///
/// Latitude and longitude are treated as planar coordinates. That is fine
/// for city-scale campaign zones but drifts from the true geodesic answer
/// for polygons spanning many degrees. Points exactly on an edge land on a
/// deterministic but unspecified side.
///
/// Fewer than [`MIN_POLYGON_VERTICES`] vertices returns `false`.
pub fn is_point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < MIN_POLYGON_VERTICES {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, vi) in vertices.iter().enumerate() {
        let vj = &vertices[j];
        // The division only runs when the edge straddles the ray, so the
        // denominator is never zero.
        if ((vi.latitude > point.latitude) != (vj.latitude > point.latitude))
            && (point.longitude
                < (vj.longitude - vi.longitude) * (point.latitude - vi.latitude)
                    / (vj.latitude - vi.latitude)
                    + vi.longitude)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Great-circle length of the closed ring, in kilometres.
pub fn polygon_perimeter_km(vertices: &[Point]) -> f64 {
    if vertices.len() < 2 {
        return 0.0;
    }
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| haversine_distance_km(*a, *b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ]
    }

    #[test]
    fn square_contains_center() {
        assert!(is_point_in_polygon(Point::new(5.0, 5.0), &square()));
    }

    #[test]
    fn square_excludes_far_point() {
        assert!(!is_point_in_polygon(Point::new(15.0, 15.0), &square()));
        assert!(!is_point_in_polygon(Point::new(-1.0, 5.0), &square()));
        assert!(!is_point_in_polygon(Point::new(5.0, 10.5), &square()));
    }

    #[test]
    fn edge_point_is_deterministic() {
        let vertices = square();
        let first = is_point_in_polygon(Point::new(0.0, 5.0), &vertices);
        for _ in 0..100 {
            assert_eq!(is_point_in_polygon(Point::new(0.0, 5.0), &vertices), first);
        }
    }

    #[test]
    fn winding_order_does_not_matter() {
        let clockwise = square();
        let mut counter_clockwise = square();
        counter_clockwise.reverse();

        for (lat, lng) in [(5.0, 5.0), (15.0, 15.0), (9.9, 0.1), (-3.0, 4.0), (2.5, 7.5)] {
            let point = Point::new(lat, lng);
            assert_eq!(
                is_point_in_polygon(point, &clockwise),
                is_point_in_polygon(point, &counter_clockwise)
            );
        }
    }

    #[test]
    fn explicitly_closed_ring_gives_same_answer() {
        let mut closed = square();
        closed.push(closed[0]);
        assert!(is_point_in_polygon(Point::new(5.0, 5.0), &closed));
        assert!(!is_point_in_polygon(Point::new(15.0, 15.0), &closed));
    }

    #[test]
    fn concave_polygon_notch_is_outside() {
        // U shape opening to the north.
        let vertices = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 9.0),
            Point::new(9.0, 9.0),
            Point::new(9.0, 6.0),
            Point::new(3.0, 6.0),
            Point::new(3.0, 3.0),
            Point::new(9.0, 3.0),
            Point::new(9.0, 0.0),
        ];
        assert!(!is_point_in_polygon(Point::new(6.0, 4.5), &vertices));
        assert!(is_point_in_polygon(Point::new(6.0, 1.5), &vertices));
        assert!(is_point_in_polygon(Point::new(1.5, 4.5), &vertices));
    }

    #[test]
    fn real_world_neighbourhood() {
        let centro = vec![
            Point::new(-23.5400, -46.6400),
            Point::new(-23.5400, -46.6250),
            Point::new(-23.5560, -46.6250),
            Point::new(-23.5560, -46.6400),
        ];
        assert!(is_point_in_polygon(Point::new(-23.5505, -46.6333), &centro));
        assert!(!is_point_in_polygon(Point::new(-22.9068, -43.1729), &centro));
    }

    #[test]
    fn bow_tie_follows_even_odd_rule() {
        let bow_tie = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        // The lobes sit north and south of the crossing at (5, 5).
        assert!(is_point_in_polygon(Point::new(1.0, 5.0), &bow_tie));
        assert!(is_point_in_polygon(Point::new(9.0, 5.0), &bow_tie));
        assert!(!is_point_in_polygon(Point::new(5.0, 1.0), &bow_tie));
        assert!(!is_point_in_polygon(Point::new(5.0, 9.0), &bow_tie));
    }

    #[test]
    fn fewer_than_three_vertices_is_never_inside() {
        let point = Point::new(0.0, 0.0);
        assert!(!is_point_in_polygon(point, &[]));
        assert!(!is_point_in_polygon(point, &[Point::new(0.0, 0.0)]));
        assert!(!is_point_in_polygon(
            Point::new(0.0, 5.0),
            &[Point::new(0.0, 0.0), Point::new(0.0, 10.0)]
        ));
    }

    #[test]
    fn duplicate_vertices_are_tolerated() {
        let vertices = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        assert!(is_point_in_polygon(Point::new(5.0, 5.0), &vertices));
        assert!(!is_point_in_polygon(Point::new(15.0, 15.0), &vertices));
    }

    #[test]
    fn perimeter_closes_the_ring() {
        let triangle = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let expected = haversine_distance_km(triangle[0], triangle[1])
            + haversine_distance_km(triangle[1], triangle[2])
            + haversine_distance_km(triangle[2], triangle[0]);
        assert!((polygon_perimeter_km(&triangle) - expected).abs() < 1e-9);
        assert_eq!(polygon_perimeter_km(&triangle[..1]), 0.0);
    }
}
