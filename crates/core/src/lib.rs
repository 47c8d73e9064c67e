//! `beltline-core` — shared domain building blocks.
//!
//! Strongly typed identifiers and the domain error model. No IO, no
//! framework types.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId, SessionId};
