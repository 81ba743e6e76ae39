//! User and role management across the platform and identity APIs.
//!
//! The platform API owns role relations and the admin flag, the identity API
//! owns usernames and accounts. Neither service can join against the other,
//! so every read merges both views client-side and every mutation is a
//! strictly ordered sequence of independent calls. There is no rollback: a
//! failure in a later phase leaves earlier phases applied.

use std::sync::Arc;

use roster_core::{AppError, AppResult, Session};
use roster_domain::{IdentityUser, PlatformUser, UserId, UserRecord, reconcile};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::gateway_ports::{IdentityEndpointResolver, ResourceGateway};

mod account;
mod lookup;
mod roles;
mod wire;


use wire::{IdentityUserResources, PlatformUserResource};

/// Application service for user lookup, lifecycle and role assignment.
#[derive(Clone)]
pub struct UserService {
    session: Session,
    platform_gateway: Arc<dyn ResourceGateway>,
    identity_gateway: Arc<dyn ResourceGateway>,
    identity_endpoints: Arc<dyn IdentityEndpointResolver>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        session: Session,
        platform_gateway: Arc<dyn ResourceGateway>,
        identity_gateway: Arc<dyn ResourceGateway>,
        identity_endpoints: Arc<dyn IdentityEndpointResolver>,
    ) -> Self {
        Self {
            session,
            platform_gateway,
            identity_gateway,
            identity_endpoints,
        }
    }

    fn platform_url(&self, path: &str) -> String {
        format!("{}{path}", self.session.api_endpoint())
    }

    fn access_token(&self) -> &str {
        self.session.access_token()
    }

    /// Queries the identity API and merges the result with platform stubs.
    async fn fetch_identity_users(
        &self,
        platform_users: &[PlatformUser],
        url: &str,
    ) -> AppResult<Vec<UserRecord>> {
        let response = self
            .identity_gateway
            .get_resource(url, self.access_token())
            .await?;
        let resources: IdentityUserResources = decode(response, "identity user query response")?;

        let identity_users = resources
            .resources
            .into_iter()
            .map(|resource| {
                Ok(IdentityUser {
                    id: UserId::new(resource.id).map_err(|error| {
                        AppError::Internal(format!("identity API returned an invalid id: {error}"))
                    })?,
                    username: resource.username,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(reconcile(platform_users, identity_users.as_slice()))
    }
}

fn parse_platform_user(resource: Value) -> AppResult<PlatformUser> {
    let resource: PlatformUserResource = decode(resource, "platform user resource")?;
    let id = UserId::new(resource.metadata.guid).map_err(|error| {
        AppError::Internal(format!("platform API returned an invalid guid: {error}"))
    })?;

    Ok(PlatformUser {
        id,
        is_admin: resource.entity.admin,
    })
}

fn decode<T: DeserializeOwned>(value: Value, context: &str) -> AppResult<T> {
    serde_json::from_value(value)
        .map_err(|error| AppError::Internal(format!("failed to decode {context}: {error}")))
}

fn encode<T: Serialize>(value: &T, context: &str) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| AppError::Internal(format!("failed to encode {context}: {error}")))
}
