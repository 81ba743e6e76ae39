//! Identity API endpoint resolution.

use std::sync::Arc;

use async_trait::async_trait;
use roster_application::{IdentityEndpointResolver, ResourceGateway};
use roster_core::{AppError, AppResult, Session};
use serde::Deserialize;
use tracing::debug;

/// Identity endpoint supplied by configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredIdentityEndpoint {
    endpoint: String,
}

impl ConfiguredIdentityEndpoint {
    /// Creates a resolver that always returns the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> AppResult<Self> {
        let endpoint = endpoint.into().trim().trim_end_matches('/').to_owned();
        if endpoint.is_empty() {
            return Err(AppError::Validation(
                "identity endpoint must not be empty".to_owned(),
            ));
        }

        Ok(Self { endpoint })
    }
}

#[async_trait]
impl IdentityEndpointResolver for ConfiguredIdentityEndpoint {
    async fn identity_endpoint(&self) -> AppResult<String> {
        Ok(self.endpoint.clone())
    }
}

/// Discovers the identity endpoint from the platform's `/v2/info` document.
pub struct InfoDocumentEndpointResolver {
    platform_gateway: Arc<dyn ResourceGateway>,
    session: Session,
}

#[derive(Debug, Deserialize)]
struct PlatformInfo {
    token_endpoint: Option<String>,
}

impl InfoDocumentEndpointResolver {
    /// Creates a resolver reading the info document through the platform gateway.
    #[must_use]
    pub fn new(platform_gateway: Arc<dyn ResourceGateway>, session: Session) -> Self {
        Self {
            platform_gateway,
            session,
        }
    }
}

#[async_trait]
impl IdentityEndpointResolver for InfoDocumentEndpointResolver {
    async fn identity_endpoint(&self) -> AppResult<String> {
        let url = format!("{}/v2/info", self.session.api_endpoint());
        let document = self
            .platform_gateway
            .get_resource(url.as_str(), self.session.access_token())
            .await?;
        let info: PlatformInfo = serde_json::from_value(document).map_err(|error| {
            AppError::Internal(format!("failed to decode platform info document: {error}"))
        })?;

        let endpoint = info
            .token_endpoint
            .map(|value| value.trim().trim_end_matches('/').to_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AppError::Internal(
                    "platform info document does not advertise a token endpoint".to_owned(),
                )
            })?;

        debug!(identity_endpoint = %endpoint, "discovered identity endpoint");
        Ok(endpoint)
    }
}
