//! Credit-tiered purchase calculator.
//!
//! Turns "N more chapters" into a marginal price and a savings figure using
//! the cumulative price table. Pure and synchronous; it never talks to the
//! billing collaborator.

use std::sync::Arc;

use super::{PriceTable, PricingError, PurchaseQuote};
use crate::domain::foundation::Money;

/// Calculator over a shared, immutable price table.
#[derive(Debug, Clone)]
pub struct CreditCalculator {
    table: Arc<PriceTable>,
}

impl CreditCalculator {
    pub fn new(table: PriceTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn max_chapters(&self) -> u32 {
        self.table.max_chapters()
    }

    /// Purchasable quantities given the chapters already bought.
    ///
    /// Returns `[1, 2, ..., max - already]`, or an empty list once the
    /// allowance is used up.
    pub fn available_options(&self, already_purchased: u32) -> Vec<u32> {
        let remaining = self.max_chapters().saturating_sub(already_purchased);
        (1..=remaining).collect()
    }

    /// Quotes buying `requested_additional` chapters on top of `already_purchased`.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::OutOfRange` if `requested_additional` is zero or
    /// the total would exceed the table maximum.
    pub fn quote(
        &self,
        already_purchased: u32,
        requested_additional: u32,
    ) -> Result<PurchaseQuote, PricingError> {
        let max = self.max_chapters();
        let out_of_range =
            || PricingError::out_of_range(already_purchased, requested_additional, max);

        if requested_additional == 0 {
            return Err(out_of_range());
        }
        let target = already_purchased
            .checked_add(requested_additional)
            .ok_or_else(out_of_range)?;

        let cumulative_target = self.table.cumulative(target).ok_or_else(out_of_range)?;
        let cumulative_baseline = self
            .table
            .cumulative(already_purchased)
            .ok_or_else(out_of_range)?;

        let marginal_price = cumulative_target - cumulative_baseline;
        let unit_price = self.table.unit_price();

        let (savings, savings_clamped) = if requested_additional <= 1 {
            (Money::ZERO, false)
        } else {
            let raw = unit_price * requested_additional - marginal_price;
            (raw.clamp_non_negative(), raw.is_negative())
        };

        let per_unit_effective = marginal_price
            .div_rounded(requested_additional)
            .ok_or_else(out_of_range)?;

        Ok(PurchaseQuote {
            already_purchased,
            requested_additional,
            marginal_price,
            unit_price,
            savings,
            per_unit_effective,
            savings_clamped,
        })
    }

    /// Quotes every available option, in ascending order.
    pub fn quote_all(&self, already_purchased: u32) -> Vec<PurchaseQuote> {
        self.available_options(already_purchased)
            .into_iter()
            .filter_map(|n| self.quote(already_purchased, n).ok())
            .collect()
    }
}

impl Default for CreditCalculator {
    fn default() -> Self {
        Self::new(PriceTable::reference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> CreditCalculator {
        CreditCalculator::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Available Options
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn options_for_new_buyer_cover_full_range() {
        assert_eq!(calc().available_options(0), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn options_shrink_with_purchases() {
        assert_eq!(calc().available_options(5), vec![1, 2, 3]);
        assert_eq!(calc().available_options(7), vec![1]);
    }

    #[test]
    fn options_empty_when_allowance_used() {
        assert!(calc().available_options(8).is_empty());
        assert!(calc().available_options(12).is_empty());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Quotes
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn single_chapter_costs_unit_price_with_no_savings() {
        let q = calc().quote(0, 1).unwrap();
        assert_eq!(q.marginal_price, Money::from_major(25));
        assert_eq!(q.savings, Money::ZERO);
        assert_eq!(q.per_unit_effective, Money::from_major(25));
    }

    #[test]
    fn five_chapter_bundle_saves_against_unit_price() {
        let q = calc().quote(0, 5).unwrap();
        assert_eq!(q.marginal_price, Money::from_major(69));
        assert_eq!(q.savings, Money::from_major(56));
        assert_eq!(q.per_unit_effective, Money::from_minor(1380));
    }

    #[test]
    fn top_up_charges_difference_of_cumulative_prices() {
        let q = calc().quote(3, 2).unwrap();
        assert_eq!(q.marginal_price, Money::from_major(20));
        assert_eq!(q.savings, Money::from_major(30));
        assert_eq!(q.total_after_purchase(), 5);
    }

    #[test]
    fn single_top_up_chapter_has_no_savings_even_when_cheaper() {
        // 6 -> 7 costs 17, below the unit price, but single purchases never report savings
        let q = calc().quote(6, 1).unwrap();
        assert_eq!(q.marginal_price, Money::from_major(17));
        assert_eq!(q.savings, Money::ZERO);
        assert!(!q.savings_clamped);
    }

    #[test]
    fn full_allowance_in_one_purchase() {
        let q = calc().quote(0, 8).unwrap();
        assert_eq!(q.marginal_price, Money::from_major(106));
        assert_eq!(q.savings, Money::from_major(94));
    }

    #[test]
    fn exceeding_maximum_is_out_of_range() {
        assert_eq!(
            calc().quote(6, 4).unwrap_err(),
            PricingError::out_of_range(6, 4, 8)
        );
    }

    #[test]
    fn zero_requested_is_out_of_range() {
        assert!(matches!(
            calc().quote(0, 0),
            Err(PricingError::OutOfRange { .. })
        ));
    }

    #[test]
    fn already_above_maximum_is_out_of_range() {
        assert!(calc().quote(9, 1).is_err());
    }

    #[test]
    fn overflowing_counts_are_out_of_range() {
        assert!(calc().quote(u32::MAX, 1).is_err());
    }

    #[test]
    fn quote_is_idempotent() {
        assert_eq!(calc().quote(2, 3).unwrap(), calc().quote(2, 3).unwrap());
    }

    #[test]
    fn unfavourable_bundle_clamps_savings_and_flags_it() {
        let table = PriceTable::parse("1:10,2:30").unwrap();
        let q = CreditCalculator::new(table).quote(0, 2).unwrap();
        assert_eq!(q.marginal_price, Money::from_major(30));
        assert_eq!(q.savings, Money::ZERO);
        assert!(q.savings_clamped);
    }

    #[test]
    fn quote_all_matches_options() {
        let quotes = calc().quote_all(5);
        let counts: Vec<u32> = quotes.iter().map(|q| q.requested_additional).collect();
        assert_eq!(counts, vec![1, 2, 3]);
        assert_eq!(quotes[2].marginal_price, Money::from_major(37));
    }

    #[test]
    fn quote_all_empty_when_allowance_used() {
        assert!(calc().quote_all(8).is_empty());
    }

    #[test]
    fn largest_accepted_prices_quote_without_overflow() {
        let unit = Money::from_minor(i64::MAX / 3);
        let entries = [(1, unit), (2, unit), (3, unit)].into_iter().collect();
        let calc = CreditCalculator::new(PriceTable::new(entries).unwrap());

        let quote = calc.quote(0, 3).unwrap();
        assert_eq!(quote.marginal_price, unit);
        assert!(quote.savings > Money::ZERO);
    }
}
