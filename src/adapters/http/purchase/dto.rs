//! Request and response bodies for the chapter purchase endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{GetPurchaseOptionsResult, StartChapterCheckoutResult};
use crate::domain::foundation::{EditionId, Money};
use crate::domain::pricing::{PriceTable, PurchaseQuote};

/// Amount in minor units plus a display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyResponse {
    pub amount_minor: i64,
    pub formatted: String,
}

impl From<Money> for MoneyResponse {
    fn from(money: Money) -> Self {
        Self {
            amount_minor: money.minor_units(),
            formatted: money.to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// `?chapters=N`
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteParams {
    pub chapters: u32,
}

/// Body of `POST .../checkout`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartCheckoutRequest {
    pub chapters: u32,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTierResponse {
    pub chapters: u32,
    pub cumulative_price: MoneyResponse,
}

/// Response for `GET /api/pricing/chapters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTableResponse {
    pub currency: String,
    pub max_chapters: u32,
    pub unit_price: MoneyResponse,
    pub tiers: Vec<PriceTierResponse>,
}

impl PriceTableResponse {
    pub fn new(table: &PriceTable, currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            max_chapters: table.max_chapters(),
            unit_price: table.unit_price().into(),
            tiers: table
                .entries()
                .map(|entry| PriceTierResponse {
                    chapters: entry.chapters,
                    cumulative_price: entry.cumulative_price.into(),
                })
                .collect(),
        }
    }
}

/// One priced purchase option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub already_purchased: u32,
    pub requested_additional: u32,
    pub total_after_purchase: u32,
    pub marginal_price: MoneyResponse,
    pub unit_price: MoneyResponse,
    pub savings: MoneyResponse,
    pub per_unit_effective: MoneyResponse,
}

impl From<PurchaseQuote> for QuoteResponse {
    fn from(quote: PurchaseQuote) -> Self {
        Self {
            already_purchased: quote.already_purchased,
            requested_additional: quote.requested_additional,
            total_after_purchase: quote.total_after_purchase(),
            marginal_price: quote.marginal_price.into(),
            unit_price: quote.unit_price.into(),
            savings: quote.savings.into(),
            per_unit_effective: quote.per_unit_effective.into(),
        }
    }
}

/// Response for `GET /api/editions/:edition_id/chapter-credits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOptionsResponse {
    pub edition_id: String,
    pub currency: String,
    pub already_purchased: u32,
    pub max_chapters: u32,
    pub purchase_enabled: bool,
    pub options: Vec<u32>,
    pub quotes: Vec<QuoteResponse>,
}

impl PurchaseOptionsResponse {
    pub fn new(edition_id: &EditionId, currency: &str, result: GetPurchaseOptionsResult) -> Self {
        Self {
            edition_id: edition_id.to_string(),
            currency: currency.to_string(),
            already_purchased: result.already_purchased,
            max_chapters: result.max_chapters,
            purchase_enabled: result.purchase_enabled,
            options: result.options(),
            quotes: result.quotes.into_iter().map(QuoteResponse::from).collect(),
        }
    }
}

/// Response for `POST /api/editions/:edition_id/chapter-credits/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub checkout_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    pub currency: String,
    pub quote: QuoteResponse,
}

impl CheckoutResponse {
    pub fn new(currency: &str, result: StartChapterCheckoutResult) -> Self {
        Self {
            session_id: result.checkout.id,
            checkout_url: result.checkout.url,
            expires_at: result.checkout.expires_at,
            currency: currency.to_string(),
            quote: result.quote.into(),
        }
    }
}
