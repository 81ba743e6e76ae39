//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod identity_filter;
mod reconcile;
mod role;
mod user;

pub use identity_filter::{IDENTITY_USER_ATTRIBUTES, IdentityFilter};
pub use reconcile::reconcile;
pub use role::{
    OrgRole, RoleAssignment, RoleScope, SpaceRole, resolve_role_path, role_collection_path,
};
pub use user::{IdentityUser, OrganizationId, PlatformUser, SpaceId, UserId, UserRecord};
