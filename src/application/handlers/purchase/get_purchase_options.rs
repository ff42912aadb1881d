//! GetPurchaseOptionsHandler - Query handler listing the chapter quantities a user can still buy.

use std::sync::Arc;

use crate::domain::foundation::{EditionId, UserId};
use crate::domain::pricing::{CreditCalculator, PurchaseQuote};
use crate::ports::CreditsReader;

use super::PurchaseError;

/// Query for the purchase options of one edition.
#[derive(Debug, Clone)]
pub struct GetPurchaseOptionsQuery {
    pub user_id: UserId,
    pub edition_id: EditionId,
}

/// Purchase options with one quote per option.
#[derive(Debug, Clone)]
pub struct GetPurchaseOptionsResult {
    pub already_purchased: u32,
    pub max_chapters: u32,
    /// False once the allowance is used up; the purchase action is hidden.
    pub purchase_enabled: bool,
    pub quotes: Vec<PurchaseQuote>,
}

impl GetPurchaseOptionsResult {
    /// The selectable quantities, ascending.
    pub fn options(&self) -> Vec<u32> {
        self.quotes.iter().map(|q| q.requested_additional).collect()
    }
}

/// Handler for listing purchase options.
pub struct GetPurchaseOptionsHandler {
    calculator: CreditCalculator,
    credits_reader: Arc<dyn CreditsReader>,
}

impl GetPurchaseOptionsHandler {
    pub fn new(calculator: CreditCalculator, credits_reader: Arc<dyn CreditsReader>) -> Self {
        Self {
            calculator,
            credits_reader,
        }
    }

    pub async fn handle(
        &self,
        query: GetPurchaseOptionsQuery,
    ) -> Result<GetPurchaseOptionsResult, PurchaseError> {
        let already_purchased = self
            .credits_reader
            .chapters_purchased(&query.user_id, &query.edition_id)
            .await?;

        let quotes = self.calculator.quote_all(already_purchased);
        for quote in quotes.iter().filter(|q| q.savings_clamped) {
            tracing::warn!(
                edition_id = %query.edition_id,
                already_purchased,
                chapters = quote.requested_additional,
                "Negative savings clamped to zero; price table charges more than individual purchases"
            );
        }

        Ok(GetPurchaseOptionsResult {
            already_purchased,
            max_chapters: self.calculator.max_chapters(),
            purchase_enabled: !quotes.is_empty(),
            quotes,
        })
    }
}
