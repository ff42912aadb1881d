//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt_validator` - HS256 access tokens from the platform identity service
//! - `mock` - Test implementation that doesn't require real tokens

mod jwt_validator;
mod mock;

pub use jwt_validator::{AccessClaims, JwtSessionValidator, JwtValidatorConfig};
pub use mock::MockSessionValidator;
