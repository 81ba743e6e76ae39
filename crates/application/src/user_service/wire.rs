use serde::{Deserialize, Serialize};

/// Platform API user resource inside a paginated envelope.
#[derive(Debug, Deserialize)]
pub(super) struct PlatformUserResource {
    #[serde(alias = "Metadata")]
    pub metadata: ResourceMetadata,
    #[serde(default, alias = "Entity")]
    pub entity: PlatformUserEntity,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResourceMetadata {
    #[serde(alias = "Guid")]
    pub guid: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PlatformUserEntity {
    #[serde(default, alias = "Admin")]
    pub admin: bool,
}

/// Identity API `Users` query response.
#[derive(Debug, Deserialize)]
pub(super) struct IdentityUserResources {
    #[serde(default, alias = "Resources")]
    pub resources: Vec<IdentityUserResource>,
}

#[derive(Debug, Deserialize)]
pub(super) struct IdentityUserResource {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(rename = "userName", alias = "Username", alias = "username")]
    pub username: String,
}

/// Identity API account creation payload.
#[derive(Debug, Serialize)]
pub(super) struct CreateIdentityUserRequest<'a> {
    #[serde(rename = "userName")]
    pub user_name: &'a str,
    pub emails: [IdentityEmail<'a>; 1],
    pub password: &'a str,
    pub name: IdentityName<'a>,
}

impl<'a> CreateIdentityUserRequest<'a> {
    /// Uses the username as email and as both name parts.
    pub fn for_username(username: &'a str, password: &'a str) -> Self {
        Self {
            user_name: username,
            emails: [IdentityEmail { value: username }],
            password,
            name: IdentityName {
                given_name: username,
                family_name: username,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct IdentityEmail<'a> {
    pub value: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct IdentityName<'a> {
    #[serde(rename = "givenName")]
    pub given_name: &'a str,
    #[serde(rename = "familyName")]
    pub family_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreatedIdentityUser {
    #[serde(alias = "Id")]
    pub id: String,
}

/// Platform API user creation payload linking the identity account.
#[derive(Debug, Serialize)]
pub(super) struct CreatePlatformUserRequest<'a> {
    pub guid: &'a str,
}
