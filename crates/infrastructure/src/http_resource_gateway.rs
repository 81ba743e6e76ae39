use async_trait::async_trait;
use reqwest::header;
use roster_application::{GatewayRequest, HttpMethod, ResourceGateway, ResourceVisitor};
use roster_core::{AppError, AppResult, RemoteFault};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// HTTP-based implementation of the resource gateway port.
///
/// Each request is attempted once; non-success responses are converted into
/// [`RemoteFault`] values carrying the service's error code.
#[derive(Clone)]
pub struct HttpResourceGateway {
    http_client: reqwest::Client,
    service_name: &'static str,
}

#[derive(Debug, Deserialize)]
struct PaginatedResources {
    #[serde(default)]
    next_url: Option<String>,
    #[serde(default)]
    resources: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<Value>,
    description: Option<String>,
    error_code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl HttpResourceGateway {
    /// Creates a gateway labelled with the service it talks to.
    #[must_use]
    pub fn new(http_client: reqwest::Client, service_name: &'static str) -> Self {
        Self {
            http_client,
            service_name,
        }
    }

    async fn send(&self, request: &GatewayRequest) -> AppResult<reqwest::Response> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .http_client
            .request(method, request.url.as_str())
            .header(
                header::AUTHORIZATION,
                authorization_value(request.access_token.as_str()),
            )
            .header(header::ACCEPT, "application/json");

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(
            service = self.service_name,
            method = request.method.as_str(),
            url = %request.url,
            "sending request"
        );

        let response = builder.send().await.map_err(|error| {
            AppError::Remote(RemoteFault::transport(format!(
                "{} {} {} failed: {error}",
                self.service_name,
                request.method.as_str(),
                request.url
            )))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_owned());
        let fault = parse_error_body(status.as_u16(), body.as_str());

        debug!(
            service = self.service_name,
            status = status.as_u16(),
            code = fault.code.as_deref().unwrap_or("-"),
            "request rejected"
        );

        Err(AppError::Remote(fault))
    }

    async fn send_for_json(&self, request: &GatewayRequest) -> AppResult<Value> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(|error| {
            AppError::Remote(RemoteFault::transport(format!(
                "failed to read {} response body: {error}",
                self.service_name
            )))
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|error| {
            AppError::Internal(format!(
                "failed to parse {} response body: {error}",
                self.service_name
            ))
        })
    }
}

#[async_trait]
impl ResourceGateway for HttpResourceGateway {
    async fn list_paginated(
        &self,
        base_url: &str,
        access_token: &str,
        path: &str,
        visit: &mut ResourceVisitor<'_>,
    ) -> AppResult<()> {
        let mut next_url = Some(page_url(base_url, path));

        while let Some(url) = next_url.take() {
            let request = GatewayRequest::new(HttpMethod::Get, url.as_str(), access_token, None)?;
            let document = self.send_for_json(&request).await?;
            let page: PaginatedResources = serde_json::from_value(document).map_err(|error| {
                AppError::Internal(format!(
                    "failed to decode {} page from {url}: {error}",
                    self.service_name
                ))
            })?;

            for resource in page.resources {
                if !visit(resource)? {
                    return Ok(());
                }
            }

            next_url = match page.next_url.filter(|value| !value.trim().is_empty()) {
                Some(next) => {
                    let next = page_url(base_url, next.as_str());
                    if next == url {
                        return Err(AppError::Internal(format!(
                            "{} pagination did not advance past {url}",
                            self.service_name
                        )));
                    }
                    Some(next)
                }
                None => None,
            };
        }

        Ok(())
    }

    async fn get_resource(&self, url: &str, access_token: &str) -> AppResult<Value> {
        let request = GatewayRequest::new(HttpMethod::Get, url, access_token, None)?;
        self.send_for_json(&request).await
    }

    async fn perform_request(&self, request: GatewayRequest) -> AppResult<()> {
        self.send(&request).await.map(|_| ())
    }

    async fn perform_request_for_json(&self, request: GatewayRequest) -> AppResult<Value> {
        self.send_for_json(&request).await
    }
}

fn authorization_value(access_token: &str) -> String {
    let has_scheme = access_token
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bearer "));

    if has_scheme {
        access_token.to_owned()
    } else {
        format!("Bearer {access_token}")
    }
}

fn page_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_owned()
    } else {
        format!("{}{path}", base_url.trim_end_matches('/'))
    }
}

/// Converts a non-success response body into a remote fault.
///
/// Understands the platform shape (`code`, `description`) and the identity
/// shape (`error`, `error_description`); anything else keeps the raw body.
fn parse_error_body(status: u16, body: &str) -> RemoteFault {
    let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();

    let code = match parsed.code {
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
    .or_else(|| parsed.error.clone());

    let message = parsed
        .description
        .or(parsed.error_description)
        .or(parsed.error_code)
        .or(parsed.error)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                trimmed.to_owned()
            }
        });

    RemoteFault::http(status, code, message)
}
