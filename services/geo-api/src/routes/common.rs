use actix_web::HttpResponse;
use campaign_core::{CampaignError, ErrorCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn payload_too_large(message: impl Into<String>) -> HttpResponse {
    HttpResponse::PayloadTooLarge().json(ErrorResponse {
        error: message.into(),
    })
}

pub fn error_response(err: &CampaignError) -> HttpResponse {
    match err.code {
        ErrorCode::InvalidArgument | ErrorCode::UnsupportedGeofenceType => {
            bad_request(err.message.clone())
        }
        ErrorCode::PayloadTooLarge => payload_too_large(err.message.clone()),
    }
}
