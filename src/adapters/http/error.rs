//! API error type shared by the HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::PurchaseError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Whether repeating the request may succeed; only set for collaborator failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            retryable: None,
            details: None,
        }
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Errors returned by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    Purchase(PurchaseError),
    Validation(ValidationError),
    /// Malformed query string or body.
    BadRequest(String),
}

impl From<PurchaseError> for ApiError {
    fn from(err: PurchaseError) -> Self {
        Self::Purchase(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::OutOfRange => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::EditionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::CreditsUnavailable | ErrorCode::PaymentFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::PricingMisconfigured | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn details_json(err: &DomainError) -> Option<serde_json::Value> {
    if err.details.is_empty() {
        None
    } else {
        serde_json::to_value(&err.details).ok()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Purchase(err) => {
                let code = err.code();
                let status = status_for(code);
                let retryable = match &err {
                    PurchaseError::Pricing(_) => None,
                    _ => Some(err.is_retryable()),
                };
                let message = err.to_string();

                if status.is_server_error() {
                    tracing::error!(
                        error_code = %code,
                        error = %message,
                        "Purchase request failed"
                    );
                } else {
                    tracing::debug!(
                        error_code = %code,
                        error = %message,
                        "Purchase request rejected"
                    );
                }

                let details = details_json(&DomainError::from(err));
                let mut body = ErrorResponse::new(code.to_string(), message);
                if let Some(retryable) = retryable {
                    body = body.with_retryable(retryable);
                }
                if let Some(details) = details {
                    body = body.with_details(details);
                }
                (status, body)
            }
            ApiError::Validation(err) => {
                let domain = DomainError::from(err);
                let body = ErrorResponse::new(domain.code.to_string(), domain.message.clone());
                let body = match details_json(&domain) {
                    Some(details) => body.with_details(details),
                    None => body,
                };
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), message),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::PricingError;
    use crate::ports::{CreditsError, PaymentError};
    use std::time::Duration;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn out_of_range_is_422() {
        let err = PurchaseError::from(PricingError::out_of_range(6, 3, 8));
        assert_eq!(status_of(err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn misconfigured_table_is_500() {
        let err = PurchaseError::from(PricingError::configuration("empty"));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn collaborator_failures_are_502() {
        assert_eq!(
            status_of(PurchaseError::from(CreditsError::unavailable("down"))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(PurchaseError::from(PaymentError::missing_redirect())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn unknown_edition_is_404() {
        let err = PurchaseError::from(CreditsError::EditionNotFound("12".to_string()));
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn payment_timeout_is_504() {
        let err = PurchaseError::from(PaymentError::timeout(Duration::from_secs(10)));
        assert_eq!(status_of(err), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn validation_is_400() {
        assert_eq!(
            status_of(ValidationError::empty_field("edition_id")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::BadRequest("bad query".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn error_response_omits_empty_optionals() {
        let json = serde_json::to_value(ErrorResponse::new("OUT_OF_RANGE", "too many")).unwrap();
        assert_eq!(json, serde_json::json!({"error_code": "OUT_OF_RANGE", "message": "too many"}));

        let json = serde_json::to_value(
            ErrorResponse::new("PAYMENT_FAILED", "down").with_retryable(true),
        )
        .unwrap();
        assert_eq!(json["retryable"], true);
    }
}
