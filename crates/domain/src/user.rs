//! User identifiers and the unified user record.
//!
//! A user is known to two services: the platform API owns the authorization
//! attributes (the admin flag) and the identity API owns the username. Both
//! key the user by the same opaque identifier.

use roster_core::{AppError, AppResult};

macro_rules! opaque_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Creates a validated identifier.
            pub fn new(value: impl Into<String>) -> AppResult<Self> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(AppError::Validation(format!(
                        "{} must not be empty",
                        $label
                    )));
                }

                if trimmed.contains('/') {
                    return Err(AppError::Validation(format!(
                        "{} '{trimmed}' must not contain '/'",
                        $label
                    )));
                }

                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the identifier string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(self.0.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::new(value)
            }
        }
    };
}

opaque_identifier!(
    /// Stable user identifier assigned by the identity API and mirrored by the platform API.
    UserId,
    "user id"
);

opaque_identifier!(
    /// Organization identifier assigned by the platform API.
    OrganizationId,
    "organization id"
);

opaque_identifier!(
    /// Space identifier assigned by the platform API.
    SpaceId,
    "space id"
);

/// Unified view of one user across both services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Join key shared by both services.
    pub id: UserId,
    /// Username owned by the identity API, absent without an identity match.
    pub username: Option<String>,
    /// Admin flag owned by the platform API, `false` without a platform match.
    pub is_admin: bool,
}

impl UserRecord {
    /// Returns the username, or an empty string for partial records.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
}

/// Authorization attributes of a user as listed by the platform API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformUser {
    /// Platform-side user identifier.
    pub id: UserId,
    /// Whether the platform grants the user administrator rights.
    pub is_admin: bool,
}

/// Identity attributes of a user as returned by the identity API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUser {
    /// Identity-side user identifier.
    pub id: UserId,
    /// Canonical username.
    pub username: String,
}
