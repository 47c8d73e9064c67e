//! `beltline-auth` — the admin authorization gate.
//!
//! This crate is intentionally decoupled from HTTP and storage: it defines
//! who a session's principal is and whether that principal may use the
//! admin surface. Credential verification happens at the boundary that
//! owns the credentials.

pub mod authorize;
pub mod principal;
pub mod roles;

pub use authorize::{AuthzError, require_admin};
pub use principal::Principal;
pub use roles::Role;
