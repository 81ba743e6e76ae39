use std::collections::HashMap;

use crate::{IdentityUser, PlatformUser, UserId, UserRecord};

/// Merges platform and identity views of the same users.
///
/// The identity side drives the merge: one record per identity entry, in
/// identity order. Platform entries only contribute the admin flag, which is
/// `false` when the identifier has no platform entry.
#[must_use]
pub fn reconcile(platform: &[PlatformUser], identity: &[IdentityUser]) -> Vec<UserRecord> {
    if identity.is_empty() {
        return Vec::new();
    }

    let mut admin_by_id: HashMap<&UserId, bool> = HashMap::with_capacity(platform.len());
    for user in platform {
        // first occurrence wins, matching a linear scan
        admin_by_id.entry(&user.id).or_insert(user.is_admin);
    }

    identity
        .iter()
        .map(|user| UserRecord {
            id: user.id.clone(),
            username: Some(user.username.clone()),
            is_admin: admin_by_id.get(&user.id).copied().unwrap_or(false),
        })
        .collect()
}
