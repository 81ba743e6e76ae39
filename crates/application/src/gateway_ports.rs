//! Ports for the remote services the application talks to.

use async_trait::async_trait;
use roster_core::{AppError, AppResult};
use serde_json::Value;

/// HTTP verbs issued against remote resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Reads a resource.
    Get,
    /// Creates a resource.
    Post,
    /// Creates or replaces a relation.
    Put,
    /// Removes a resource or relation.
    Delete,
}

impl HttpMethod {
    /// Returns the method token used on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Prepared request for a resource gateway.
#[derive(Clone, PartialEq)]
pub struct GatewayRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: String,
    /// Bearer token sent with the request.
    pub access_token: String,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl GatewayRequest {
    /// Creates a validated request.
    pub fn new(
        method: HttpMethod,
        url: impl Into<String>,
        access_token: impl Into<String>,
        body: Option<Value>,
    ) -> AppResult<Self> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Validation(format!(
                "request url '{url}' must be absolute"
            )));
        }

        Ok(Self {
            method,
            url,
            access_token: access_token.into(),
            body,
        })
    }
}

impl std::fmt::Debug for GatewayRequest {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("GatewayRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("access_token", &"<redacted>")
            .field("body", &self.body)
            .finish()
    }
}

/// Visitor invoked once per listed resource. Returning `Ok(false)` stops
/// pagination early.
pub type ResourceVisitor<'a> = dyn FnMut(Value) -> AppResult<bool> + Send + 'a;

/// Port for authenticated JSON resource access over HTTP.
///
/// Non-success responses surface as [`AppError::Remote`] carrying the
/// service's error code when the body provides one.
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    /// Fetches every page of a collection at `base_url` + `path`, invoking
    /// `visit` for each resource in order.
    async fn list_paginated(
        &self,
        base_url: &str,
        access_token: &str,
        path: &str,
        visit: &mut ResourceVisitor<'_>,
    ) -> AppResult<()>;

    /// Fetches a single JSON document.
    async fn get_resource(&self, url: &str, access_token: &str) -> AppResult<Value>;

    /// Prepares a request without sending it.
    fn new_request(
        &self,
        method: HttpMethod,
        url: &str,
        access_token: &str,
        body: Option<Value>,
    ) -> AppResult<GatewayRequest> {
        GatewayRequest::new(method, url, access_token, body)
    }

    /// Sends a request and discards the response body.
    async fn perform_request(&self, request: GatewayRequest) -> AppResult<()>;

    /// Sends a request and returns the decoded JSON response body.
    async fn perform_request_for_json(&self, request: GatewayRequest) -> AppResult<Value>;

    /// Creates a resource with `POST`.
    async fn create_resource(
        &self,
        url: &str,
        access_token: &str,
        body: Option<Value>,
    ) -> AppResult<()> {
        let request = self.new_request(HttpMethod::Post, url, access_token, body)?;
        self.perform_request(request).await
    }

    /// Creates or replaces a resource with `PUT`.
    async fn update_resource(
        &self,
        url: &str,
        access_token: &str,
        body: Option<Value>,
    ) -> AppResult<()> {
        let request = self.new_request(HttpMethod::Put, url, access_token, body)?;
        self.perform_request(request).await
    }

    /// Removes a resource with `DELETE`.
    async fn delete_resource(&self, url: &str, access_token: &str) -> AppResult<()> {
        let request = self.new_request(HttpMethod::Delete, url, access_token, None)?;
        self.perform_request(request).await
    }
}

/// Port resolving the identity API base URL for the current session.
#[async_trait]
pub trait IdentityEndpointResolver: Send + Sync {
    /// Returns the identity API base URL without a trailing slash.
    async fn identity_endpoint(&self) -> AppResult<String>;
}

#[cfg(test)]
mod tests {
    use super::{GatewayRequest, HttpMethod};

    #[test]
    fn relative_request_url_is_rejected() {
        assert!(GatewayRequest::new(HttpMethod::Get, "/v2/users", "token", None).is_err());
    }

    #[test]
    fn request_debug_redacts_token() {
        let rendered = GatewayRequest::new(
            HttpMethod::Put,
            "https://api.example.com/v2/users",
            "secret-token",
            None,
        )
        .map(|request| format!("{request:?}"))
        .unwrap_or_default();

        assert!(rendered.contains("api.example.com"));
        assert!(!rendered.contains("secret-token"));
    }
}
