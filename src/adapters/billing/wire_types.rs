//! JSON payloads exchanged with the billing API.

use serde::{Deserialize, Serialize};

use crate::ports::ChapterCheckoutRequest;

/// `GET /v1/editions/{edition_id}/chapter-credits?user_id=...`
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterCreditsResponse {
    pub edition_id: String,
    pub chapters_purchased: u32,
}

/// `POST /v1/checkout/chapter-credits`
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequestBody<'a> {
    pub user_id: &'a str,
    pub edition_id: &'a str,
    pub chapter_count: u32,
    pub amount_minor: i64,
    pub currency: &'a str,
    pub success_url: &'a str,
    pub cancel_url: &'a str,
}

impl<'a> From<&'a ChapterCheckoutRequest> for CheckoutRequestBody<'a> {
    fn from(request: &'a ChapterCheckoutRequest) -> Self {
        Self {
            user_id: request.user_id.as_str(),
            edition_id: request.edition_id.as_str(),
            chapter_count: request.chapter_count,
            amount_minor: request.amount.minor_units(),
            currency: &request.currency,
            success_url: &request.success_url,
            cancel_url: &request.cancel_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutResponseBody {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// Error envelope returned on non-2xx responses, when the body is JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
