use crate::{AppError, AppResult};

/// Platform session used to authorize every remote call.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    api_endpoint: String,
    access_token: String,
}

impl Session {
    /// Creates a session from the platform API endpoint and an access token.
    ///
    /// Trailing slashes are trimmed from the endpoint so paths can be appended
    /// verbatim.
    pub fn new(
        api_endpoint: impl Into<String>,
        access_token: impl Into<String>,
    ) -> AppResult<Self> {
        let api_endpoint = api_endpoint.into().trim().trim_end_matches('/').to_owned();
        let access_token = access_token.into().trim().to_owned();

        if api_endpoint.is_empty() {
            return Err(AppError::Validation(
                "platform API endpoint must not be empty".to_owned(),
            ));
        }

        if access_token.is_empty() {
            return Err(AppError::Validation(
                "access token must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            api_endpoint,
            access_token,
        })
    }

    /// Returns the platform API base URL without a trailing slash.
    #[must_use]
    pub fn api_endpoint(&self) -> &str {
        self.api_endpoint.as_str()
    }

    /// Returns the bearer token for the current session.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Session")
            .field("api_endpoint", &self.api_endpoint)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Session;

    #[test]
    fn session_trims_trailing_slash() {
        let session = Session::new("https://api.example.com/", "token");
        assert_eq!(
            session.map(|value| value.api_endpoint().to_owned()).ok(),
            Some("https://api.example.com".to_owned())
        );
    }

    #[test]
    fn session_requires_token() {
        assert!(Session::new("https://api.example.com", "  ").is_err());
    }

    #[test]
    fn session_debug_redacts_token() {
        let session = Session::new("https://api.example.com", "secret-token");
        let rendered = session.map(|value| format!("{value:?}")).unwrap_or_default();
        assert!(!rendered.contains("secret-token"));
    }
}
