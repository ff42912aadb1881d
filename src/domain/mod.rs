//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, money, auth types, errors)
//! - `pricing` - Tiered chapter-credit pricing and quotes

pub mod foundation;
pub mod pricing;
