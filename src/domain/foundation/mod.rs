//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the chapter-credit domain.

mod auth;
mod errors;
mod ids;
mod money;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EditionId, IdempotencyKey, UserId};
pub use money::{Money, MINOR_PER_MAJOR};
