use roster_core::NonEmptyString;
use roster_domain::{
    IdentityFilter, OrgRole, OrganizationId, RoleScope, SpaceId, SpaceRole, resolve_role_path,
    role_collection_path,
};
use tracing::debug;

use super::*;

impl UserService {
    /// Finds a user by exact username through the identity API.
    ///
    /// Only identity attributes are populated; `is_admin` is always `false`.
    pub async fn find_by_username(&self, username: &str) -> AppResult<UserRecord> {
        let username = NonEmptyString::new(username)?;
        let identity_endpoint = self.identity_endpoints.identity_endpoint().await?;
        let url = IdentityFilter::username_equals(username.as_str())
            .users_query_url(identity_endpoint.as_str());

        self.fetch_identity_users(&[], url.as_str())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("user {username} not found")))
    }

    /// Lists users holding an organization role.
    pub async fn list_users_in_org_for_role(
        &self,
        org_id: &OrganizationId,
        role: OrgRole,
    ) -> AppResult<Vec<UserRecord>> {
        self.list_users_with_path(role_collection_path(
            RoleScope::Organization,
            org_id.as_str(),
            role.path_segment(),
        ))
        .await
    }

    /// Lists users holding an organization role given by name.
    pub async fn list_users_in_org_for_role_name(
        &self,
        org_id: &OrganizationId,
        role_name: &str,
    ) -> AppResult<Vec<UserRecord>> {
        let role_path = resolve_role_path(RoleScope::Organization, role_name)?;
        self.list_users_with_path(role_collection_path(
            RoleScope::Organization,
            org_id.as_str(),
            role_path,
        ))
        .await
    }

    /// Lists users holding a space role.
    pub async fn list_users_in_space_for_role(
        &self,
        space_id: &SpaceId,
        role: SpaceRole,
    ) -> AppResult<Vec<UserRecord>> {
        self.list_users_with_path(role_collection_path(
            RoleScope::Space,
            space_id.as_str(),
            role.path_segment(),
        ))
        .await
    }

    /// Lists users holding a space role given by name.
    pub async fn list_users_in_space_for_role_name(
        &self,
        space_id: &SpaceId,
        role_name: &str,
    ) -> AppResult<Vec<UserRecord>> {
        let role_path = resolve_role_path(RoleScope::Space, role_name)?;
        self.list_users_with_path(role_collection_path(
            RoleScope::Space,
            space_id.as_str(),
            role_path,
        ))
        .await
    }

    async fn list_users_with_path(&self, path: String) -> AppResult<Vec<UserRecord>> {
        let mut platform_users: Vec<PlatformUser> = Vec::new();
        let mut filter = IdentityFilter::any_of_ids();

        self.platform_gateway
            .list_paginated(
                self.session.api_endpoint(),
                self.access_token(),
                path.as_str(),
                &mut |resource: Value| {
                    let user = parse_platform_user(resource)?;
                    filter.push_id(&user.id);
                    platform_users.push(user);
                    Ok(true)
                },
            )
            .await?;

        if filter.is_empty() {
            debug!(path = %path, "role collection has no members");
            return Ok(Vec::new());
        }

        let identity_endpoint = self.identity_endpoints.identity_endpoint().await?;
        let url = filter.users_query_url(identity_endpoint.as_str());

        debug!(
            path = %path,
            member_count = platform_users.len(),
            "resolving usernames for role members"
        );

        self.fetch_identity_users(platform_users.as_slice(), url.as_str())
            .await
    }
}
