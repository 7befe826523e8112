use campaign_config::ServiceConfig;

pub struct AppState {
    pub config: ServiceConfig,
}
