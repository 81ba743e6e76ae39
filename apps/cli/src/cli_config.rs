use std::env;

use roster_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_endpoint: String,
    pub access_token: String,
    pub identity_endpoint: Option<String>,
    pub http_timeout_secs: u64,
}

impl CliConfig {
    pub fn load() -> AppResult<Self> {
        let api_endpoint = required_env("ROSTER_API_ENDPOINT")?
            .trim_end_matches('/')
            .to_owned();
        let access_token = required_env("ROSTER_ACCESS_TOKEN")?;
        let identity_endpoint = env::var("ROSTER_IDENTITY_ENDPOINT")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_owned())
            .filter(|value| !value.is_empty());
        let http_timeout_secs = parse_env_u64("ROSTER_HTTP_TIMEOUT_SECS", 15)?;

        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "ROSTER_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api_endpoint,
            access_token,
            identity_endpoint,
            http_timeout_secs,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.trim().parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
