pub mod common;
pub mod geo;
pub mod health;
pub mod status;

use actix_web::{error, web};

use crate::routes::common::{bad_request, payload_too_large};

/// Largest JSON body any route accepts.
pub const JSON_BODY_LIMIT: usize = 2 * 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let response = match &err {
                error::JsonPayloadError::Overflow { .. }
                | error::JsonPayloadError::OverflowKnownLength { .. } => {
                    payload_too_large(err.to_string())
                }
                _ => bad_request(err.to_string()),
            };
            error::InternalError::from_response(err, response).into()
        });

    cfg.app_data(json_config)
        .service(health::health)
        .service(status::status)
        .service(geo::distance)
        .service(geo::check)
        .service(geo::zones)
        .service(geo::filter);
}
