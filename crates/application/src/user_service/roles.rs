use std::str::FromStr;

use roster_domain::{OrgRole, OrganizationId, RoleAssignment, SpaceId, SpaceRole};
use tracing::info;

use super::*;
use crate::gateway_ports::HttpMethod;

impl UserService {
    /// Grants an organization role, then ensures base organization membership.
    ///
    /// Membership is only requested once the role grant succeeded.
    pub async fn set_org_role(
        &self,
        user_id: &UserId,
        org_id: &OrganizationId,
        role: OrgRole,
    ) -> AppResult<()> {
        let assignment = RoleAssignment::Organization {
            user_id: user_id.clone(),
            org_id: org_id.clone(),
            role,
        };

        self.send_relation(HttpMethod::Put, &assignment).await?;
        self.ensure_org_membership(user_id, org_id).await?;

        info!(
            user_id = %user_id,
            org_id = %org_id,
            role = assignment.role_name(),
            "organization role granted"
        );
        Ok(())
    }

    /// Grants an organization role given by name.
    pub async fn set_org_role_by_name(
        &self,
        user_id: &UserId,
        org_id: &OrganizationId,
        role_name: &str,
    ) -> AppResult<()> {
        let role = OrgRole::from_str(role_name)?;
        self.set_org_role(user_id, org_id, role).await
    }

    /// Revokes an organization role. Base membership is kept.
    pub async fn unset_org_role(
        &self,
        user_id: &UserId,
        org_id: &OrganizationId,
        role: OrgRole,
    ) -> AppResult<()> {
        let assignment = RoleAssignment::Organization {
            user_id: user_id.clone(),
            org_id: org_id.clone(),
            role,
        };

        self.send_relation(HttpMethod::Delete, &assignment).await?;

        info!(
            user_id = %user_id,
            org_id = %org_id,
            role = assignment.role_name(),
            "organization role revoked"
        );
        Ok(())
    }

    /// Revokes an organization role given by name.
    pub async fn unset_org_role_by_name(
        &self,
        user_id: &UserId,
        org_id: &OrganizationId,
        role_name: &str,
    ) -> AppResult<()> {
        let role = OrgRole::from_str(role_name)?;
        self.unset_org_role(user_id, org_id, role).await
    }

    /// Ensures membership in the owning organization, then grants a space role.
    pub async fn set_space_role(
        &self,
        user_id: &UserId,
        space_id: &SpaceId,
        org_id: &OrganizationId,
        role: SpaceRole,
    ) -> AppResult<()> {
        let assignment = RoleAssignment::Space {
            user_id: user_id.clone(),
            space_id: space_id.clone(),
            role,
        };

        self.ensure_org_membership(user_id, org_id).await?;
        self.platform_gateway
            .update_resource(
                self.platform_url(assignment.relation_path().as_str()).as_str(),
                self.access_token(),
                None,
            )
            .await?;

        info!(
            user_id = %user_id,
            space_id = %space_id,
            org_id = %org_id,
            role = assignment.role_name(),
            "space role granted"
        );
        Ok(())
    }

    /// Grants a space role given by name.
    pub async fn set_space_role_by_name(
        &self,
        user_id: &UserId,
        space_id: &SpaceId,
        org_id: &OrganizationId,
        role_name: &str,
    ) -> AppResult<()> {
        let role = SpaceRole::from_str(role_name)?;
        self.set_space_role(user_id, space_id, org_id, role).await
    }

    /// Revokes a space role. Organization membership is untouched.
    pub async fn unset_space_role(
        &self,
        user_id: &UserId,
        space_id: &SpaceId,
        role: SpaceRole,
    ) -> AppResult<()> {
        let assignment = RoleAssignment::Space {
            user_id: user_id.clone(),
            space_id: space_id.clone(),
            role,
        };

        self.platform_gateway
            .delete_resource(
                self.platform_url(assignment.relation_path().as_str()).as_str(),
                self.access_token(),
            )
            .await?;

        info!(
            user_id = %user_id,
            space_id = %space_id,
            role = assignment.role_name(),
            "space role revoked"
        );
        Ok(())
    }

    /// Revokes a space role given by name.
    pub async fn unset_space_role_by_name(
        &self,
        user_id: &UserId,
        space_id: &SpaceId,
        role_name: &str,
    ) -> AppResult<()> {
        let role = SpaceRole::from_str(role_name)?;
        self.unset_space_role(user_id, space_id, role).await
    }

    async fn send_relation(
        &self,
        method: HttpMethod,
        assignment: &RoleAssignment,
    ) -> AppResult<()> {
        let request = self.platform_gateway.new_request(
            method,
            self.platform_url(assignment.relation_path().as_str()).as_str(),
            self.access_token(),
            None,
        )?;

        self.platform_gateway.perform_request(request).await
    }

    async fn ensure_org_membership(
        &self,
        user_id: &UserId,
        org_id: &OrganizationId,
    ) -> AppResult<()> {
        let membership = RoleAssignment::org_membership(user_id.clone(), org_id.clone());

        self.platform_gateway
            .update_resource(
                self.platform_url(membership.relation_path().as_str()).as_str(),
                self.access_token(),
                None,
            )
            .await
    }
}
