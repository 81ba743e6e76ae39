use std::str::FromStr;

use roster_core::{AppError, AppResult};

use crate::{OrganizationId, SpaceId, UserId};

/// Scope a role is granted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleScope {
    /// Roles attached to an organization.
    Organization,
    /// Roles attached to a space.
    Space,
}

impl RoleScope {
    /// Returns the platform API collection name for this scope.
    #[must_use]
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Organization => "organizations",
            Self::Space => "spaces",
        }
    }
}

/// Roles that can be granted within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrgRole {
    /// Base organization membership.
    OrgUser,
    /// Manages the organization and its members.
    OrgManager,
    /// Manages billing for the organization.
    BillingManager,
    /// Read-only access to organization settings.
    OrgAuditor,
}

impl OrgRole {
    /// Returns the canonical role name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrgUser => "org-user",
            Self::OrgManager => "org-manager",
            Self::BillingManager => "billing-manager",
            Self::OrgAuditor => "org-auditor",
        }
    }

    /// Returns the relation path segment used by the platform API.
    #[must_use]
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::OrgUser => "users",
            Self::OrgManager => "managers",
            Self::BillingManager => "billing_managers",
            Self::OrgAuditor => "auditors",
        }
    }

    /// Returns all organization roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[OrgRole] = &[
            OrgRole::OrgUser,
            OrgRole::OrgManager,
            OrgRole::BillingManager,
            OrgRole::OrgAuditor,
        ];

        ALL
    }
}

impl FromStr for OrgRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "org-user" | "OrgUser" => Ok(Self::OrgUser),
            "org-manager" | "OrgManager" => Ok(Self::OrgManager),
            "billing-manager" | "BillingManager" => Ok(Self::BillingManager),
            "org-auditor" | "OrgAuditor" => Ok(Self::OrgAuditor),
            _ => Err(AppError::InvalidRole(format!(
                "'{value}' is not an organization role"
            ))),
        }
    }
}

/// Roles that can be granted within a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceRole {
    /// Manages the space and its members.
    SpaceManager,
    /// Deploys and manages applications in the space.
    SpaceDeveloper,
    /// Read-only access to the space.
    SpaceAuditor,
}

impl SpaceRole {
    /// Returns the canonical role name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpaceManager => "space-manager",
            Self::SpaceDeveloper => "space-developer",
            Self::SpaceAuditor => "space-auditor",
        }
    }

    /// Returns the relation path segment used by the platform API.
    #[must_use]
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::SpaceManager => "managers",
            Self::SpaceDeveloper => "developers",
            Self::SpaceAuditor => "auditors",
        }
    }

    /// Returns all space roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[SpaceRole] = &[
            SpaceRole::SpaceManager,
            SpaceRole::SpaceDeveloper,
            SpaceRole::SpaceAuditor,
        ];

        ALL
    }
}

impl FromStr for SpaceRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "space-manager" | "SpaceManager" => Ok(Self::SpaceManager),
            "space-developer" | "SpaceDeveloper" => Ok(Self::SpaceDeveloper),
            "space-auditor" | "SpaceAuditor" => Ok(Self::SpaceAuditor),
            _ => Err(AppError::InvalidRole(format!(
                "'{value}' is not a space role"
            ))),
        }
    }
}

/// Resolves a role name to its relation path segment within a scope.
///
/// Names from the other scope are rejected even though they are valid role
/// names there.
pub fn resolve_role_path(scope: RoleScope, role_name: &str) -> AppResult<&'static str> {
    match scope {
        RoleScope::Organization => OrgRole::from_str(role_name).map(|role| role.path_segment()),
        RoleScope::Space => SpaceRole::from_str(role_name).map(|role| role.path_segment()),
    }
}

/// Transient description of one role relation on the platform API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleAssignment {
    /// Role relation between a user and an organization.
    Organization {
        /// User receiving or losing the role.
        user_id: UserId,
        /// Organization the role applies to.
        org_id: OrganizationId,
        /// Organization role.
        role: OrgRole,
    },
    /// Role relation between a user and a space.
    Space {
        /// User receiving or losing the role.
        user_id: UserId,
        /// Space the role applies to.
        space_id: SpaceId,
        /// Space role.
        role: SpaceRole,
    },
}

impl RoleAssignment {
    /// Describes the base organization membership every role grant implies.
    #[must_use]
    pub fn org_membership(user_id: UserId, org_id: OrganizationId) -> Self {
        Self::Organization {
            user_id,
            org_id,
            role: OrgRole::OrgUser,
        }
    }

    /// Returns the canonical role name.
    #[must_use]
    pub fn role_name(&self) -> &'static str {
        match self {
            Self::Organization { role, .. } => role.as_str(),
            Self::Space { role, .. } => role.as_str(),
        }
    }

    /// Returns the collection path listing members holding this role.
    #[must_use]
    pub fn collection_path(&self) -> String {
        match self {
            Self::Organization { org_id, role, .. } => {
                role_collection_path(RoleScope::Organization, org_id.as_str(), role.path_segment())
            }
            Self::Space { space_id, role, .. } => {
                role_collection_path(RoleScope::Space, space_id.as_str(), role.path_segment())
            }
        }
    }

    /// Returns the path of the single relation between the user and the scope.
    #[must_use]
    pub fn relation_path(&self) -> String {
        let user_id = match self {
            Self::Organization { user_id, .. } | Self::Space { user_id, .. } => user_id,
        };

        format!("{}/{user_id}", self.collection_path())
    }
}

/// Builds `/v2/{organizations|spaces}/{scope_id}/{role_path}`.
#[must_use]
pub fn role_collection_path(scope: RoleScope, scope_id: &str, role_path: &str) -> String {
    format!("/v2/{}/{scope_id}/{role_path}", scope.collection())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (UserId, OrganizationId, SpaceId) {
        match (
            UserId::new("user-1"),
            OrganizationId::new("org-1"),
            SpaceId::new("space-1"),
        ) {
            (Ok(user), Ok(org), Ok(space)) => (user, org, space),
            _ => panic!("fixture identifiers must be valid"),
        }
    }

    #[test]
    fn org_roles_resolve_only_in_organization_scope() {
        for role in OrgRole::all() {
            assert_eq!(
                resolve_role_path(RoleScope::Organization, role.as_str()).ok(),
                Some(role.path_segment())
            );
            assert!(matches!(
                resolve_role_path(RoleScope::Space, role.as_str()),
                Err(AppError::InvalidRole(_))
            ));
        }
    }

    #[test]
    fn space_roles_resolve_only_in_space_scope() {
        for role in SpaceRole::all() {
            assert_eq!(
                resolve_role_path(RoleScope::Space, role.as_str()).ok(),
                Some(role.path_segment())
            );
            assert!(matches!(
                resolve_role_path(RoleScope::Organization, role.as_str()),
                Err(AppError::InvalidRole(_))
            ));
        }
    }

    #[test]
    fn platform_display_names_are_accepted() {
        assert_eq!(
            resolve_role_path(RoleScope::Organization, "BillingManager").ok(),
            Some("billing_managers")
        );
        assert_eq!(
            resolve_role_path(RoleScope::Space, "SpaceDeveloper").ok(),
            Some("developers")
        );
    }

    #[test]
    fn unknown_role_is_rejected_in_both_scopes() {
        assert!(resolve_role_path(RoleScope::Organization, "owner").is_err());
        assert!(resolve_role_path(RoleScope::Space, "").is_err());
    }

    #[test]
    fn relation_paths_follow_scope() {
        let (user_id, org_id, space_id) = ids();

        let org = RoleAssignment::Organization {
            user_id: user_id.clone(),
            org_id: org_id.clone(),
            role: OrgRole::OrgAuditor,
        };
        assert_eq!(org.relation_path(), "/v2/organizations/org-1/auditors/user-1");

        let space = RoleAssignment::Space {
            user_id: user_id.clone(),
            space_id,
            role: SpaceRole::SpaceDeveloper,
        };
        assert_eq!(space.collection_path(), "/v2/spaces/space-1/developers");
        assert_eq!(space.relation_path(), "/v2/spaces/space-1/developers/user-1");

        let membership = RoleAssignment::org_membership(user_id, org_id);
        assert_eq!(membership.relation_path(), "/v2/organizations/org-1/users/user-1");
        assert_eq!(membership.role_name(), "org-user");
    }
}
