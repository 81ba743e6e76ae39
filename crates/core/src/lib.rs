//! Shared primitives for all Rust crates in Roster.

#![forbid(unsafe_code)]

/// Session primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};

use thiserror::Error;

pub use auth::Session;

/// Result type used across Roster crates.
pub type AppResult<T> = Result<T, AppError>;

/// Platform API error code reported when a user resource does not exist.
pub const PLATFORM_USER_NOT_FOUND_CODE: &str = "20003";

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Failure reported by a remote service, or by the transport reaching it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe_remote_fault(.status, .code.as_deref(), .message))]
pub struct RemoteFault {
    /// HTTP status, absent for transport failures.
    pub status: Option<u16>,
    /// Machine-readable error code from the response body, if any.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl RemoteFault {
    /// Creates a fault for a non-success HTTP response.
    #[must_use]
    pub fn http(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code,
            message: message.into(),
        }
    }

    /// Creates a fault for a request that never produced a response.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// Returns whether the fault carries the given error code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

fn describe_remote_fault(status: &Option<u16>, code: Option<&str>, message: &str) -> String {
    match (status, code) {
        (Some(status), Some(code)) => format!("status {status}, code {code}: {message}"),
        (Some(status), None) => format!("status {status}: {message}"),
        (None, _) => format!("transport failure: {message}"),
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Role name is not part of the requested scope.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// A remote service rejected the request or could not be reached.
    #[error("remote error: {0}")]
    Remote(RemoteFault),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns whether this is a remote fault carrying the given error code.
    #[must_use]
    pub fn is_remote_code(&self, code: &str) -> bool {
        matches!(self, Self::Remote(fault) if fault.has_code(code))
    }
}

impl From<RemoteFault> for AppError {
    fn from(value: RemoteFault) -> Self {
        Self::Remote(value)
    }
}
