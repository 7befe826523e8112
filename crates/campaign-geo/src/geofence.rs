use campaign_core::GeofenceId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::circle::is_point_in_circle;
use crate::error::{GeoError, GeoResult};
use crate::point::{to_radians, BoundingBox, Point, EARTH_RADIUS_KM};
use crate::polygon::{is_point_in_polygon, MIN_POLYGON_VERTICES};

/// Stored and reported as `CIRCLE` / `POLYGON`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GeofenceKind {
    Circle,
    Polygon,
}

impl FromStr for GeofenceKind {
    type Err = GeoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "polygon" => Ok(Self::Polygon),
            _ => Err(GeoError::unsupported_type(value)),
        }
    }
}

impl fmt::Display for GeofenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Circle => "CIRCLE",
            Self::Polygon => "POLYGON",
        };
        write!(f, "{}", value)
    }
}

/// A circular zone with a strictly positive, finite radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCircle")]
pub struct CircleZone {
    center: Point,
    radius_km: f64,
}

impl CircleZone {
    pub fn new(center: Point, radius_km: f64) -> GeoResult<Self> {
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(GeoError::invalid_argument(format!(
                "circle radius must be positive, got {radius_km} km"
            )));
        }
        Ok(Self { center, radius_km })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    // Extremes of a spherical cap. A cap that reaches a pole spans every
    // longitude; one that crosses the antimeridian wraps, leaving west > east.
    fn bounds(&self) -> BoundingBox {
        let angular = self.radius_km / EARTH_RADIUS_KM;
        let lat_span = angular.to_degrees();
        let north = (self.center.latitude + lat_span).min(90.0);
        let south = (self.center.latitude - lat_span).max(-90.0);

        let ratio = angular.sin() / to_radians(self.center.latitude).cos();
        if north >= 90.0 || south <= -90.0 || ratio.is_nan() || ratio >= 1.0 {
            return BoundingBox {
                north,
                south,
                east: 180.0,
                west: -180.0,
            };
        }

        let lng_span = ratio.asin().to_degrees();
        BoundingBox {
            north,
            south,
            east: wrap_longitude(self.center.longitude + lng_span),
            west: wrap_longitude(self.center.longitude - lng_span),
        }
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    if longitude > 180.0 {
        longitude - 360.0
    } else if longitude < -180.0 {
        longitude + 360.0
    } else {
        longitude
    }
}

#[derive(Deserialize)]
struct UncheckedCircle {
    center: Point,
    #[serde(alias = "radiusKm")]
    radius_km: f64,
}

impl TryFrom<UncheckedCircle> for CircleZone {
    type Error = GeoError;

    fn try_from(value: UncheckedCircle) -> Result<Self, Self::Error> {
        Self::new(value.center, value.radius_km)
    }
}

/// An open ring of at least three vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPolygon")]
pub struct PolygonZone {
    vertices: Vec<Point>,
}

impl PolygonZone {
    pub fn new(vertices: Vec<Point>) -> GeoResult<Self> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(GeoError::invalid_argument(format!(
                "polygon needs at least {MIN_POLYGON_VERTICES} vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }
}

#[derive(Deserialize)]
struct UncheckedPolygon {
    vertices: Vec<Point>,
}

impl TryFrom<UncheckedPolygon> for PolygonZone {
    type Error = GeoError;

    fn try_from(value: UncheckedPolygon) -> Result<Self, Self::Error> {
        Self::new(value.vertices)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeofenceShape {
    Circle(CircleZone),
    Polygon(PolygonZone),
}

impl GeofenceShape {
    pub fn circle(center: Point, radius_km: f64) -> GeoResult<Self> {
        CircleZone::new(center, radius_km).map(Self::Circle)
    }

    pub fn polygon(vertices: Vec<Point>) -> GeoResult<Self> {
        PolygonZone::new(vertices).map(Self::Polygon)
    }

    pub fn kind(&self) -> GeofenceKind {
        match self {
            Self::Circle(_) => GeofenceKind::Circle,
            Self::Polygon(_) => GeofenceKind::Polygon,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Circle(circle) => is_point_in_circle(point, circle.center, circle.radius_km),
            Self::Polygon(polygon) => is_point_in_polygon(point, &polygon.vertices),
        }
    }

    /// Box that frames the zone on a map. Not a membership test.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Self::Circle(circle) => circle.bounds(),
            Self::Polygon(polygon) => BoundingBox::around(&polygon.vertices),
        }
    }
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    pub id: GeofenceId,
    pub name: String,
    /// Callers drop inactive zones before testing; the geometry ignores it.
    #[serde(default = "active_by_default")]
    pub active: bool,
    pub shape: GeofenceShape,
}

impl Geofence {
    pub fn new(name: impl Into<String>, shape: GeofenceShape) -> Self {
        Self {
            id: GeofenceId::new(),
            name: name.into(),
            active: true,
            shape,
        }
    }

    pub fn kind(&self) -> GeofenceKind {
        self.shape.kind()
    }
}

/// A geofence as the persistence layer stores it: a string type tag and
/// whichever shape fields that tag needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceRecord {
    pub id: GeofenceId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Point>,
    #[serde(default, alias = "radiusKm", skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<Point>>,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

impl TryFrom<GeofenceRecord> for Geofence {
    type Error = GeoError;

    fn try_from(record: GeofenceRecord) -> Result<Self, Self::Error> {
        let shape = match record.kind.parse::<GeofenceKind>()? {
            GeofenceKind::Circle => {
                let center = record
                    .center
                    .ok_or_else(|| GeoError::invalid_argument("circle geofence has no center"))?;
                let radius_km = record
                    .radius_km
                    .ok_or_else(|| GeoError::invalid_argument("circle geofence has no radius"))?;
                GeofenceShape::circle(center, radius_km)?
            }
            GeofenceKind::Polygon => {
                let vertices = record.vertices.ok_or_else(|| {
                    GeoError::invalid_argument("polygon geofence has no vertices")
                })?;
                GeofenceShape::polygon(vertices)?
            }
        };

        Ok(Self {
            id: record.id,
            name: record.name,
            active: record.active,
            shape,
        })
    }
}

impl From<&Geofence> for GeofenceRecord {
    fn from(geofence: &Geofence) -> Self {
        let mut record = Self {
            id: geofence.id,
            name: geofence.name.clone(),
            kind: geofence.kind().to_string(),
            center: None,
            radius_km: None,
            vertices: None,
            active: geofence.active,
        };
        match &geofence.shape {
            GeofenceShape::Circle(circle) => {
                record.center = Some(circle.center);
                record.radius_km = Some(circle.radius_km);
            }
            GeofenceShape::Polygon(polygon) => {
                record.vertices = Some(polygon.vertices.clone());
            }
        }
        record
    }
}

/// Single entry point for zone membership.
pub fn is_point_in_geofence(point: Point, geofence: &Geofence) -> bool {
    geofence.shape.contains(point)
}

/// Anything that may carry a coordinate, such as a voter record whose
/// address has not been geocoded yet.
pub trait Located {
    fn location(&self) -> Option<Point>;
}

impl Located for Point {
    fn location(&self) -> Option<Point> {
        Some(*self)
    }
}

impl Located for Option<Point> {
    fn location(&self) -> Option<Point> {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> Option<Point> {
        (**self).location()
    }
}

/// Items inside at least one of `geofences`, in their original order.
///
/// Items without a location are dropped before any test runs. An empty
/// `geofences` slice matches nothing.
pub fn filter_within_geofences<'a, T: Located>(
    items: &'a [T],
    geofences: &[Geofence],
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| {
            item.location().is_some_and(|point| {
                geofences
                    .iter()
                    .any(|geofence| is_point_in_geofence(point, geofence))
            })
        })
        .collect()
}

/// The geofences that contain `point`.
pub fn matching_geofences<'a>(
    point: Point,
    geofences: &'a [Geofence],
) -> impl Iterator<Item = &'a Geofence> + 'a {
    geofences
        .iter()
        .filter(move |geofence| is_point_in_geofence(point, geofence))
}
