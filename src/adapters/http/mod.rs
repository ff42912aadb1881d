//! HTTP adapters - REST API implementations.
//!
//! `api_router` assembles the `/api` tree; `with_layers` adds the tower-http
//! stack (tracing, request timeout, CORS) around it.

pub mod error;
pub mod middleware;
pub mod purchase;

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use purchase::{purchase_routes, CheckoutRedirects, PurchaseAppState};

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the `/api` router with authentication applied.
///
/// Requests without a token still reach public routes; purchase handlers
/// reject them through `RequireAuth`.
pub fn api_router(state: PurchaseAppState, auth: AuthState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .merge(purchase_routes().with_state(state))
        .layer(axum::middleware::from_fn_with_state(auth, auth_middleware));

    Router::new().nest("/api", api)
}

/// Wrap a router with request tracing, a request timeout, and CORS.
pub fn with_layers(router: Router, request_timeout: Duration, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(TimeoutLayer::new(request_timeout)),
    )
}
