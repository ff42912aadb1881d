//! HTTP handlers for chapter purchase endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    CheckoutPolicy, GetPurchaseOptionsHandler, GetPurchaseOptionsQuery, QuoteChaptersHandler,
    QuoteChaptersQuery, StartChapterCheckoutCommand, StartChapterCheckoutHandler,
};
use crate::domain::foundation::EditionId;
use crate::domain::pricing::CreditCalculator;
use crate::ports::{CheckoutProvider, CreditsReader};

use super::dto::{
    CheckoutResponse, PriceTableResponse, PurchaseOptionsResponse, QuoteParams, QuoteResponse,
    StartCheckoutRequest,
};

const EDITION_PLACEHOLDER: &str = "{edition_id}";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Redirect URL templates; `{edition_id}` is replaced per request.
#[derive(Debug, Clone)]
pub struct CheckoutRedirects {
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRedirects {
    pub fn new(success_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }

    /// `(success_url, cancel_url)` for one edition.
    pub fn for_edition(&self, edition_id: &EditionId) -> (String, String) {
        (
            self.success_url.replace(EDITION_PLACEHOLDER, edition_id.as_str()),
            self.cancel_url.replace(EDITION_PLACEHOLDER, edition_id.as_str()),
        )
    }
}

/// Shared state for purchase endpoints.
///
/// Cloned per request; collaborators are Arc-wrapped.
#[derive(Clone)]
pub struct PurchaseAppState {
    pub calculator: CreditCalculator,
    pub credits_reader: Arc<dyn CreditsReader>,
    pub checkout_provider: Arc<dyn CheckoutProvider>,
    pub currency: String,
    pub checkout_policy: CheckoutPolicy,
    pub redirects: CheckoutRedirects,
}

impl PurchaseAppState {
    pub fn purchase_options_handler(&self) -> GetPurchaseOptionsHandler {
        GetPurchaseOptionsHandler::new(self.calculator.clone(), self.credits_reader.clone())
    }

    pub fn quote_handler(&self) -> QuoteChaptersHandler {
        QuoteChaptersHandler::new(self.calculator.clone(), self.credits_reader.clone())
    }

    pub fn checkout_handler(&self) -> StartChapterCheckoutHandler {
        StartChapterCheckoutHandler::new(
            self.calculator.clone(),
            self.credits_reader.clone(),
            self.checkout_provider.clone(),
            self.currency.clone(),
            self.checkout_policy,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/pricing/chapters - Price table shown next to the purchase dialog
pub async fn get_price_table(State(state): State<PurchaseAppState>) -> impl IntoResponse {
    Json(PriceTableResponse::new(state.calculator.table(), &state.currency))
}

/// GET /api/editions/:edition_id/chapter-credits - Options with quotes
pub async fn get_purchase_options(
    State(state): State<PurchaseAppState>,
    RequireAuth(user): RequireAuth,
    Path(edition_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let edition_id = EditionId::new(edition_id)?;
    let query = GetPurchaseOptionsQuery {
        user_id: user.id,
        edition_id: edition_id.clone(),
    };

    let result = state.purchase_options_handler().handle(query).await?;

    Ok(Json(PurchaseOptionsResponse::new(
        &edition_id,
        &state.currency,
        result,
    )))
}

/// GET /api/editions/:edition_id/chapter-credits/quote?chapters=N - One quote
pub async fn get_quote(
    State(state): State<PurchaseAppState>,
    RequireAuth(user): RequireAuth,
    Path(edition_id): Path<String>,
    params: Result<Query<QuoteParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let edition_id = EditionId::new(edition_id)?;
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let quote = state
        .quote_handler()
        .handle(QuoteChaptersQuery {
            user_id: user.id,
            edition_id,
            chapters: params.chapters,
        })
        .await?;

    Ok(Json(QuoteResponse::from(quote)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/editions/:edition_id/chapter-credits/checkout - Confirm a purchase
pub async fn start_checkout(
    State(state): State<PurchaseAppState>,
    RequireAuth(user): RequireAuth,
    Path(edition_id): Path<String>,
    body: Result<Json<StartCheckoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let edition_id = EditionId::new(edition_id)?;
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let (success_url, cancel_url) = state.redirects.for_edition(&edition_id);

    let result = state
        .checkout_handler()
        .handle(StartChapterCheckoutCommand {
            user_id: user.id,
            edition_id,
            chapters: request.chapters,
            success_url,
            cancel_url,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse::new(&state.currency, result)),
    ))
}
