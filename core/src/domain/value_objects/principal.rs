//! Authenticated principal extracted from a verified access token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::UserRole;

/// Identity attached to a request after its bearer token has been validated
///
/// Carries only what the token asserts; no store lookup backs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject of the token
    pub user_id: Uuid,

    /// Role asserted by the token
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// True when the principal owns a resource belonging to `owner_id`
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }

    /// Owner of the resource, or an admin
    pub fn can_modify(&self, owner_id: Uuid) -> bool {
        self.owns(owner_id) || self.role == UserRole::Admin
    }
}
