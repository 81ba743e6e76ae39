//! Roster administrative client for platform users and roles.

#![forbid(unsafe_code)]

mod cli_config;
mod commands;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use roster_application::{IdentityEndpointResolver, ResourceGateway, UserService};
use roster_core::{AppError, Session};
use roster_infrastructure::{
    ConfiguredIdentityEndpoint, HttpResourceGateway, InfoDocumentEndpointResolver,
};
use tracing::info;

use crate::cli_config::{CliConfig, init_tracing};
use crate::commands::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let command = Cli::parse().command;
    let config = CliConfig::load()?;
    let session = Session::new(config.api_endpoint.as_str(), config.access_token.as_str())?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let platform_gateway: Arc<dyn ResourceGateway> =
        Arc::new(HttpResourceGateway::new(http_client.clone(), "platform"));
    let identity_gateway: Arc<dyn ResourceGateway> =
        Arc::new(HttpResourceGateway::new(http_client, "identity"));
    let identity_endpoints: Arc<dyn IdentityEndpointResolver> = match config.identity_endpoint {
        Some(endpoint) => Arc::new(ConfiguredIdentityEndpoint::new(endpoint)?),
        None => Arc::new(InfoDocumentEndpointResolver::new(
            platform_gateway.clone(),
            session.clone(),
        )),
    };

    info!(
        command = command.name(),
        api_endpoint = %session.api_endpoint(),
        "roster started"
    );

    let service = UserService::new(
        session,
        platform_gateway,
        identity_gateway,
        identity_endpoints,
    );

    run(&service, command).await
}
