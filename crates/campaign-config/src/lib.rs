use serde::{Deserialize, Serialize};
use std::{env, fmt};

pub const DEFAULT_MAX_BATCH_POINTS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Dev,
    Test,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_env(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "dev" | "development" => Self::Dev,
            "test" | "testing" => Self::Test,
            "staging" => Self::Staging,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Prod => "prod",
        };
        write!(f, "{}", value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    pub environment: Environment,
    pub region: Option<String>,
    pub bind_addr: String,
    pub metrics_addr: Option<String>,
    pub log_level: String,
    /// Upper bound on voters accepted by a single filter request.
    pub max_batch_points: usize,
}

impl ServiceConfig {
    pub fn from_env(default_service_name: &str) -> Self {
        Self::from_lookup(default_service_name, |key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Missing or
    /// unparseable values fall back to their defaults.
    pub fn from_lookup<F>(default_service_name: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_name = env_var(
            &lookup,
            "CAMPAIGN_SERVICE_NAME",
            default_service_name.to_string(),
        );
        let environment =
            Environment::from_env(&env_var(&lookup, "CAMPAIGN_ENV", "local".to_string()));
        let region = lookup("CAMPAIGN_REGION");
        let bind_addr = env_var(&lookup, "CAMPAIGN_BIND_ADDR", "0.0.0.0:8080".to_string());
        let metrics_addr = lookup("CAMPAIGN_METRICS_ADDR");
        let log_level = env_var(&lookup, "CAMPAIGN_LOG_LEVEL", "info".to_string());
        let max_batch_points = env_var_usize(
            &lookup,
            "CAMPAIGN_MAX_BATCH_POINTS",
            DEFAULT_MAX_BATCH_POINTS,
        );

        Self {
            service_name,
            environment,
            region,
            bind_addr,
            metrics_addr,
            log_level,
            max_batch_points,
        }
    }
}

fn env_var<F>(lookup: &F, key: &str, default: String) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or(default)
}

fn env_var_usize<F>(lookup: &F, key: &str, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
