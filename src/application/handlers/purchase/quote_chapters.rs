//! QuoteChaptersHandler - Query handler pricing one chapter quantity.

use std::sync::Arc;

use crate::domain::foundation::{EditionId, UserId};
use crate::domain::pricing::{CreditCalculator, PurchaseQuote};
use crate::ports::CreditsReader;

use super::PurchaseError;

/// Query for the price of `chapters` more chapters.
#[derive(Debug, Clone)]
pub struct QuoteChaptersQuery {
    pub user_id: UserId,
    pub edition_id: EditionId,
    pub chapters: u32,
}

/// Handler for single-quantity quotes.
pub struct QuoteChaptersHandler {
    calculator: CreditCalculator,
    credits_reader: Arc<dyn CreditsReader>,
}

impl QuoteChaptersHandler {
    pub fn new(calculator: CreditCalculator, credits_reader: Arc<dyn CreditsReader>) -> Self {
        Self {
            calculator,
            credits_reader,
        }
    }

    pub async fn handle(&self, query: QuoteChaptersQuery) -> Result<PurchaseQuote, PurchaseError> {
        let already_purchased = self
            .credits_reader
            .chapters_purchased(&query.user_id, &query.edition_id)
            .await?;

        let quote = self.calculator.quote(already_purchased, query.chapters)?;
        if quote.savings_clamped {
            tracing::warn!(
                edition_id = %query.edition_id,
                already_purchased,
                chapters = query.chapters,
                "Negative savings clamped to zero; price table charges more than individual purchases"
            );
        }

        Ok(quote)
    }
}
