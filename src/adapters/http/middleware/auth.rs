//! Authentication middleware and extractor for axum.
//!
//! - `auth_middleware` - validates Bearer tokens and injects the user into extensions
//! - `RequireAuth` - extractor that rejects requests without an authenticated user
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! The middleware only sees the `SessionValidator` port, so tests swap in
//! `MockSessionValidator` without minting real tokens.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

use crate::adapters::http::error::ErrorResponse;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that validates Bearer tokens.
///
/// 1. Missing header: continues without a user; `RequireAuth` rejects later
/// 2. Valid token: injects `AuthenticatedUser` into request extensions
/// 3. Invalid or expired token: 401
/// 4. Validator failure: 503
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_owned);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            let (status, code, message) = match &e {
                AuthError::TokenExpired => {
                    (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", "Token expired")
                }
                AuthError::InvalidToken => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Invalid token")
                }
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!(error = %msg, "Auth service unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "AUTH_UNAVAILABLE",
                        "Authentication service unavailable",
                    )
                }
            };

            (status, Json(ErrorResponse::new(code, message))).into_response()
        }
    }
}

/// Extractor that requires authentication.
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.label())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("UNAUTHENTICATED", "Authentication required")),
            )
                .into_response(),
        }
    }
}
