//! Axum router configuration for chapter purchase endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_price_table, get_purchase_options, get_quote, start_checkout, PurchaseAppState,
};

/// Create the chapter purchase router.
///
/// # Routes
///
/// ## Public
/// - `GET /pricing/chapters` - Price table
///
/// ## User Endpoints (require authentication)
/// - `GET /editions/:edition_id/chapter-credits` - Purchase options with quotes
/// - `GET /editions/:edition_id/chapter-credits/quote?chapters=N` - Single quote
/// - `POST /editions/:edition_id/chapter-credits/checkout` - Start checkout
pub fn purchase_routes() -> Router<PurchaseAppState> {
    Router::new()
        .route("/pricing/chapters", get(get_price_table))
        .route("/editions/:edition_id/chapter-credits", get(get_purchase_options))
        .route("/editions/:edition_id/chapter-credits/quote", get(get_quote))
        .route(
            "/editions/:edition_id/chapter-credits/checkout",
            post(start_checkout),
        )
}
