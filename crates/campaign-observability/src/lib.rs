use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

pub const GEO_CHECKS_TOTAL: &str = "geo_checks_total";
pub const GEO_FILTER_POINTS_TOTAL: &str = "geo_filter_points_total";
pub const GEO_REQUESTS_REJECTED_TOTAL: &str = "geo_requests_rejected_total";

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
    pub metrics_addr: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ObservabilityHandle {
    pub service_name: String,
    pub metrics_enabled: bool,
}

pub fn init(config: &ObservabilityConfig) -> ObservabilityHandle {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level))
        .with_target(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);

    let metrics_enabled = init_metrics(config);
    describe_metrics();

    ObservabilityHandle {
        service_name: config.service_name.clone(),
        metrics_enabled,
    }
}

pub fn log_startup(handle: &ObservabilityHandle, environment: &str, bind_addr: &str) {
    tracing::info!(
        service = %handle.service_name,
        environment = %environment,
        bind_addr = %bind_addr,
        metrics_enabled = handle.metrics_enabled,
        "geofence service starting"
    );
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn describe_metrics() {
    metrics::describe_counter!(
        GEO_CHECKS_TOTAL,
        "Point-in-geofence evaluations, labelled by geofence kind"
    );
    metrics::describe_counter!(
        GEO_FILTER_POINTS_TOTAL,
        "Voter points submitted to batch geofence filtering"
    );
    metrics::describe_counter!(
        GEO_REQUESTS_REJECTED_TOTAL,
        "Geo requests rejected before evaluation, labelled by reason"
    );
}

fn init_metrics(config: &ObservabilityConfig) -> bool {
    let Some(addr) = config.metrics_addr.as_ref() else {
        return false;
    };
    let addr: SocketAddr = match addr.parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(
                service = %config.service_name,
                error = %err,
                "Invalid CAMPAIGN_METRICS_ADDR value"
            );
            return false;
        }
    };

    let builder = PrometheusBuilder::new()
        .with_http_listener(addr)
        .add_global_label("service", config.service_name.clone())
        .add_global_label("environment", config.environment.clone());

    match builder.install() {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                service = %config.service_name,
                error = %err,
                "Failed to initialize Prometheus exporter"
            );
            false
        }
    }
}
