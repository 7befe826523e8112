use actix_web::{post, web, HttpResponse};
use campaign_core::{CampaignError, ErrorCode, GeofenceId, VoterId};
use campaign_geo::{
    filter_within_geofences, haversine_distance_km, is_point_in_geofence, matching_geofences,
    BoundingBox, Geofence, GeofenceKind, GeofenceRecord, Located, Point,
};
use campaign_observability::{
    GEO_CHECKS_TOTAL, GEO_FILTER_POINTS_TOTAL, GEO_REQUESTS_REJECTED_TOTAL,
};
use serde::{Deserialize, Serialize};

use crate::routes::common::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub point: Point,
    pub geofence: GeofenceRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub geofence_id: GeofenceId,
    pub kind: GeofenceKind,
    pub active: bool,
    pub inside: bool,
    pub bounds: BoundingBox,
}

/// A voter as the CRM exports it; coordinates are absent until the address
/// has been geocoded.
#[derive(Debug, Deserialize)]
pub struct VoterLocation {
    pub voter_id: VoterId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Located for VoterLocation {
    fn location(&self) -> Option<Point> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Point::new(latitude, longitude)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub voters: Vec<VoterLocation>,
    pub geofences: Vec<GeofenceRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterResponse {
    pub voter_ids: Vec<VoterId>,
    pub matched: usize,
    pub skipped_without_location: usize,
    pub active_geofences: usize,
}

#[derive(Debug, Deserialize)]
pub struct ZonesRequest {
    pub point: Point,
    pub geofences: Vec<GeofenceRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ZonesResponse {
    pub geofence_ids: Vec<GeofenceId>,
}

#[post("/v1/geo/distance")]
pub async fn distance(payload: web::Json<DistanceRequest>) -> HttpResponse {
    let request = payload.into_inner();
    if let Err(err) = validate_point(&request.from).and(validate_point(&request.to)) {
        return reject(&err);
    }

    HttpResponse::Ok().json(DistanceResponse {
        distance_km: haversine_distance_km(request.from, request.to),
    })
}

#[post("/v1/geo/check")]
pub async fn check(payload: web::Json<CheckRequest>) -> HttpResponse {
    let request = payload.into_inner();
    if let Err(err) = validate_point(&request.point) {
        return reject(&err);
    }
    let geofence = match Geofence::try_from(request.geofence) {
        Ok(geofence) => geofence,
        Err(err) => return reject(&CampaignError::from(err)),
    };

    let inside = is_point_in_geofence(request.point, &geofence);
    metrics::counter!(GEO_CHECKS_TOTAL, "kind" => kind_label(geofence.kind())).increment(1);
    tracing::debug!(
        geofence_id = %geofence.id,
        kind = %geofence.kind(),
        inside,
        "geofence check"
    );

    HttpResponse::Ok().json(CheckResponse {
        geofence_id: geofence.id,
        kind: geofence.kind(),
        active: geofence.active,
        inside,
        bounds: geofence.shape.bounds(),
    })
}

#[post("/v1/geo/zones")]
pub async fn zones(payload: web::Json<ZonesRequest>) -> HttpResponse {
    let request = payload.into_inner();
    if let Err(err) = validate_point(&request.point) {
        return reject(&err);
    }
    let active = match active_geofences(request.geofences) {
        Ok(active) => active,
        Err(err) => return reject(&err),
    };

    let geofence_ids: Vec<GeofenceId> = matching_geofences(request.point, &active)
        .map(|geofence| geofence.id)
        .collect();
    tracing::debug!(
        active_geofences = active.len(),
        matched = geofence_ids.len(),
        "zone membership"
    );

    HttpResponse::Ok().json(ZonesResponse { geofence_ids })
}

#[post("/v1/geo/filter")]
pub async fn filter(
    state: web::Data<AppState>,
    payload: web::Json<FilterRequest>,
) -> HttpResponse {
    let request = payload.into_inner();
    let limit = state.config.max_batch_points;
    if request.voters.len() > limit {
        return reject(&CampaignError::new(
            ErrorCode::PayloadTooLarge,
            format!(
                "{} voters submitted, at most {limit} per request",
                request.voters.len()
            ),
        ));
    }
    for voter in &request.voters {
        if let Some(point) = voter.location() {
            if let Err(err) = validate_point(&point) {
                return reject(&CampaignError::invalid_argument(format!(
                    "voter {}: {}",
                    voter.voter_id, err.message
                )));
            }
        }
    }

    let active = match active_geofences(request.geofences) {
        Ok(active) => active,
        Err(err) => return reject(&err),
    };

    let skipped_without_location = request
        .voters
        .iter()
        .filter(|voter| voter.location().is_none())
        .count();
    let voter_ids: Vec<VoterId> = filter_within_geofences(&request.voters, &active)
        .into_iter()
        .map(|voter| voter.voter_id)
        .collect();

    metrics::counter!(GEO_FILTER_POINTS_TOTAL).increment(request.voters.len() as u64);
    tracing::debug!(
        voters = request.voters.len(),
        active_geofences = active.len(),
        matched = voter_ids.len(),
        skipped_without_location,
        "voter geofence filter"
    );

    HttpResponse::Ok().json(FilterResponse {
        matched: voter_ids.len(),
        voter_ids,
        skipped_without_location,
        active_geofences: active.len(),
    })
}

/// Converts stored records, failing on the first invalid one, and keeps the
/// active zones only.
fn active_geofences(records: Vec<GeofenceRecord>) -> Result<Vec<Geofence>, CampaignError> {
    let geofences = records
        .into_iter()
        .map(Geofence::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(geofences
        .into_iter()
        .filter(|geofence| geofence.active)
        .collect())
}

fn validate_point(point: &Point) -> Result<(), CampaignError> {
    point.validate().map_err(CampaignError::from)
}

fn reject(err: &CampaignError) -> HttpResponse {
    metrics::counter!(GEO_REQUESTS_REJECTED_TOTAL, "reason" => reason_label(err.code))
        .increment(1);
    tracing::debug!(error = %err, "rejected geo request");
    error_response(err)
}

fn kind_label(kind: GeofenceKind) -> &'static str {
    match kind {
        GeofenceKind::Circle => "circle",
        GeofenceKind::Polygon => "polygon",
    }
}

fn reason_label(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidArgument => "invalid_argument",
        ErrorCode::UnsupportedGeofenceType => "unsupported_geofence_type",
        ErrorCode::PayloadTooLarge => "payload_too_large",
    }
}
