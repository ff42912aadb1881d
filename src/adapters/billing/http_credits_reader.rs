//! Credits reader backed by the billing API.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::foundation::{EditionId, UserId};
use crate::ports::{CreditsError, CreditsReader};

use super::client::BillingClient;
use super::wire_types::ChapterCreditsResponse;

/// Reads purchased chapter counts over HTTP.
pub struct HttpCreditsReader {
    client: BillingClient,
}

impl HttpCreditsReader {
    pub fn new(client: BillingClient) -> Self {
        Self { client }
    }

    fn path(edition_id: &EditionId) -> String {
        format!("/v1/editions/{}/chapter-credits", edition_id)
    }
}

/// Maps a non-success status to a credits error.
fn status_error(status: StatusCode, edition_id: &EditionId) -> CreditsError {
    if status == StatusCode::NOT_FOUND {
        CreditsError::EditionNotFound(edition_id.to_string())
    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        CreditsError::unavailable(format!("billing API answered {}", status))
    } else {
        CreditsError::malformed(format!("unexpected status {}", status))
    }
}

#[async_trait]
impl CreditsReader for HttpCreditsReader {
    async fn chapters_purchased(
        &self,
        user_id: &UserId,
        edition_id: &EditionId,
    ) -> Result<u32, CreditsError> {
        let response = self
            .client
            .get(&Self::path(edition_id))
            .query(&[("user_id", user_id.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(edition_id = %edition_id, error = %e, "Credits lookup failed");
                CreditsError::unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(edition_id = %edition_id, status = %status, "Credits lookup rejected");
            return Err(status_error(status, edition_id));
        }

        let body: ChapterCreditsResponse = response
            .json()
            .await
            .map_err(|e| CreditsError::malformed(e.to_string()))?;

        if body.edition_id != edition_id.as_str() {
            return Err(CreditsError::malformed(format!(
                "asked for edition {}, got {}",
                edition_id, body.edition_id
            )));
        }

        tracing::debug!(
            edition_id = %edition_id,
            chapters_purchased = body.chapters_purchased,
            "Credits lookup succeeded"
        );

        Ok(body.chapters_purchased)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edition() -> EditionId {
        EditionId::new("12").unwrap()
    }

    #[test]
    fn path_embeds_edition() {
        assert_eq!(
            HttpCreditsReader::path(&edition()),
            "/v1/editions/12/chapter-credits"
        );
    }

    #[test]
    fn not_found_maps_to_edition_not_found() {
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, &edition()),
            CreditsError::EditionNotFound("12".to_string())
        );
    }

    #[test]
    fn server_errors_are_retryable() {
        assert!(status_error(StatusCode::SERVICE_UNAVAILABLE, &edition()).is_retryable());
        assert!(status_error(StatusCode::TOO_MANY_REQUESTS, &edition()).is_retryable());
    }

    #[test]
    fn other_client_errors_are_not_retryable() {
        let err = status_error(StatusCode::UNAUTHORIZED, &edition());
        assert!(!err.is_retryable());
        assert!(matches!(err, CreditsError::MalformedResponse(_)));
    }
}
