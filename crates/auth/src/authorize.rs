use thiserror::Error;

use crate::principal::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The caller is anonymous or lacks the admin role. Deliberately
    /// carries no detail about the resource being accessed.
    #[error("forbidden")]
    Forbidden,
}

/// Gate for the admin surface.
///
/// - No IO
/// - No panics
/// - Checked before any resource lookup, so a denial never leaks whether
///   the resource exists
pub fn require_admin(principal: Option<&Principal>) -> Result<(), AuthzError> {
    match principal {
        Some(p) if p.is_admin() => Ok(()),
        _ => Err(AuthzError::Forbidden),
    }
}
