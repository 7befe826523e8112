mod routes;
mod state;

use actix_web::{web, App, HttpServer};
use campaign_config::ServiceConfig;
use campaign_observability::{init, log_startup, ObservabilityConfig};
use std::io;

use crate::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = ServiceConfig::from_env("geo-api");
    let obs_config = ObservabilityConfig {
        service_name: config.service_name.clone(),
        environment: config.environment.to_string(),
        log_level: config.log_level.clone(),
        metrics_addr: config.metrics_addr.clone(),
    };
    let handle = init(&obs_config);
    log_startup(&handle, &obs_config.environment, &config.bind_addr);

    let bind_addr = config.bind_addr.clone();
    let state = web::Data::new(AppState { config });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
