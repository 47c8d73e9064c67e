use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// An authenticated identity attached to a session.
///
/// Serialized into the session record on login and dropped on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
