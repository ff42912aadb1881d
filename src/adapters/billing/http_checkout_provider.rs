//! Checkout provider backed by the billing API.
//!
//! Sends one JSON request per attempt; the `Idempotency-Key` header lets the
//! billing side collapse retries of the same confirmation into one session.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::ports::{
    ChapterCheckoutRequest, CheckoutProvider, CheckoutSession, PaymentError, PaymentErrorCode,
};

use super::client::BillingClient;
use super::wire_types::{CheckoutRequestBody, CheckoutResponseBody, ErrorBody};

const CHECKOUT_PATH: &str = "/v1/checkout/chapter-credits";
const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Creates hosted checkout sessions over HTTP.
pub struct HttpCheckoutProvider {
    client: BillingClient,
}

impl HttpCheckoutProvider {
    pub fn new(client: BillingClient) -> Self {
        Self { client }
    }
}

/// Maps a non-success status and optional message to a payment error.
fn status_error(status: StatusCode, message: Option<String>) -> PaymentError {
    let message = message.unwrap_or_else(|| format!("billing API answered {}", status));
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            PaymentError::new(PaymentErrorCode::RateLimitExceeded, message)
        }
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            PaymentError::network(message)
        }
        s if s.is_server_error() => PaymentError::provider(message),
        _ => PaymentError::rejected(message),
    }
}

/// Converts a decoded response into a session; a blank URL is an error.
fn into_session(body: CheckoutResponseBody) -> Result<CheckoutSession, PaymentError> {
    match body.url {
        Some(url) if !url.trim().is_empty() => Ok(CheckoutSession {
            id: body.id,
            url,
            expires_at: body.expires_at,
        }),
        _ => Err(PaymentError::missing_redirect()),
    }
}

#[async_trait]
impl CheckoutProvider for HttpCheckoutProvider {
    async fn create_checkout(
        &self,
        request: ChapterCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .post(CHECKOUT_PATH)
            .header(IDEMPOTENCY_HEADER, request.idempotency_key.to_string())
            .json(&CheckoutRequestBody::from(&request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::timeout(self.client.timeout())
                } else {
                    PaymentError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            return Err(status_error(status, message));
        }

        let body: CheckoutResponseBody = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse checkout response: {}", e))
        })?;

        into_session(body)
    }
}
