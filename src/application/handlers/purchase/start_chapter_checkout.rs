//! StartChapterCheckoutHandler - Command handler for confirming a chapter purchase.
//!
//! Re-reads the purchase count, re-quotes, and hands the marginal price to the
//! payment collaborator. Fulfilment (crediting chapters) happens downstream
//! once payment completes; nothing is written here.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{EditionId, IdempotencyKey, UserId};
use crate::domain::pricing::{CreditCalculator, PurchaseQuote};
use crate::ports::{
    ChapterCheckoutRequest, CheckoutProvider, CheckoutSession, CreditsReader, PaymentError,
};

use super::PurchaseError;

/// Timeout and retry behaviour for the payment call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPolicy {
    /// Upper bound for a single provider call.
    pub timeout: Duration,

    /// Extra attempts after a retryable failure.
    pub max_retries: u32,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 1,
        }
    }
}

/// Command to start checkout for `chapters` more chapters.
#[derive(Debug, Clone)]
pub struct StartChapterCheckoutCommand {
    pub user_id: UserId,
    pub edition_id: EditionId,
    pub chapters: u32,
    pub success_url: String,
    pub cancel_url: String,
}

/// Result of a successful checkout start.
#[derive(Debug, Clone)]
pub struct StartChapterCheckoutResult {
    pub checkout: CheckoutSession,
    pub quote: PurchaseQuote,
    /// Provider calls made, including the successful one.
    pub attempts: u32,
}

/// Handler for the purchase confirmation step.
pub struct StartChapterCheckoutHandler {
    calculator: CreditCalculator,
    credits_reader: Arc<dyn CreditsReader>,
    checkout_provider: Arc<dyn CheckoutProvider>,
    currency: String,
    policy: CheckoutPolicy,
}

impl StartChapterCheckoutHandler {
    pub fn new(
        calculator: CreditCalculator,
        credits_reader: Arc<dyn CreditsReader>,
        checkout_provider: Arc<dyn CheckoutProvider>,
        currency: impl Into<String>,
        policy: CheckoutPolicy,
    ) -> Self {
        Self {
            calculator,
            credits_reader,
            checkout_provider,
            currency: currency.into(),
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartChapterCheckoutCommand,
    ) -> Result<StartChapterCheckoutResult, PurchaseError> {
        // 1. Current purchase count, read fresh so a stale page cannot overbuy
        let already_purchased = self
            .credits_reader
            .chapters_purchased(&cmd.user_id, &cmd.edition_id)
            .await?;

        // 2. Quote; out-of-range requests never reach the payment provider
        let quote = self.calculator.quote(already_purchased, cmd.chapters)?;
        if quote.savings_clamped {
            tracing::warn!(
                edition_id = %cmd.edition_id,
                already_purchased,
                chapters = cmd.chapters,
                "Negative savings clamped to zero; price table charges more than individual purchases"
            );
        }

        // 3. One idempotency key for every attempt of this confirmation
        let request = ChapterCheckoutRequest {
            user_id: cmd.user_id,
            edition_id: cmd.edition_id,
            chapter_count: cmd.chapters,
            amount: quote.marginal_price,
            currency: self.currency.clone(),
            idempotency_key: IdempotencyKey::new(),
            success_url: cmd.success_url,
            cancel_url: cmd.cancel_url,
        };

        tracing::info!(
            user_id = %request.user_id,
            edition_id = %request.edition_id,
            chapters = request.chapter_count,
            amount_minor = request.amount.minor_units(),
            idempotency_key = %request.idempotency_key,
            "Starting chapter checkout"
        );

        // 4. Payment call with timeout and bounded retry
        let (checkout, attempts) = self.create_checkout_with_retry(&request).await?;

        tracing::info!(
            user_id = %request.user_id,
            edition_id = %request.edition_id,
            session_id = %checkout.id,
            attempts,
            "Chapter checkout created"
        );

        Ok(StartChapterCheckoutResult {
            checkout,
            quote,
            attempts,
        })
    }

    async fn create_checkout_with_retry(
        &self,
        request: &ChapterCheckoutRequest,
    ) -> Result<(CheckoutSession, u32), PaymentError> {
        let mut attempt = 1;
        loop {
            match self.create_checkout_once(request).await {
                Ok(session) => return Ok((session, attempt)),
                Err(err) if err.retryable && attempt <= self.policy.max_retries => {
                    tracing::warn!(
                        edition_id = %request.edition_id,
                        attempt,
                        error = %err,
                        "Checkout attempt failed, retrying"
                    );
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(
                        edition_id = %request.edition_id,
                        attempt,
                        error = %err,
                        "Chapter checkout failed"
                    );
                    return Err(err);
                }
            }
        }
    }

    async fn create_checkout_once(
        &self,
        request: &ChapterCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let session = tokio::time::timeout(
            self.policy.timeout,
            self.checkout_provider.create_checkout(request.clone()),
        )
        .await
        .map_err(|_| PaymentError::timeout(self.policy.timeout))??;

        if session.url.trim().is_empty() {
            return Err(PaymentError::missing_redirect());
        }

        Ok(session)
    }
}
