//! Property tests for chapter-credit pricing over arbitrary valid tables.

use std::collections::BTreeMap;

use proptest::prelude::*;

use chapter_credits::domain::foundation::Money;
use chapter_credits::domain::pricing::{CreditCalculator, PriceTable, PricingError};

/// Non-decreasing cumulative tables with 1..=12 tiers, prices in whole cents.
fn price_table() -> impl Strategy<Value = PriceTable> {
    (1_i64..5_000, prop::collection::vec(0_i64..4_000, 0..12)).prop_map(|(first, steps)| {
        let mut entries = BTreeMap::new();
        let mut price = first;
        entries.insert(1, Money::from_minor(price));
        for (index, step) in steps.into_iter().enumerate() {
            price += step;
            entries.insert(index as u32 + 2, Money::from_minor(price));
        }
        PriceTable::new(entries).unwrap()
    })
}

fn cumulative_or_zero(table: &PriceTable, count: u32) -> Money {
    if count == 0 {
        Money::ZERO
    } else {
        table.cumulative(count).unwrap()
    }
}

proptest! {
    #[test]
    fn larger_purchases_never_cost_less(table in price_table(), already in 0_u32..12) {
        let calculator = CreditCalculator::new(table);
        let quotes = calculator.quote_all(already);

        for pair in quotes.windows(2) {
            prop_assert!(pair[0].marginal_price <= pair[1].marginal_price);
        }
    }

    #[test]
    fn options_cover_exactly_the_remaining_chapters(table in price_table(), already in 0_u32..16) {
        let max = table.max_chapters();
        let calculator = CreditCalculator::new(table);

        let expected: Vec<u32> = (1..=max.saturating_sub(already)).collect();
        prop_assert_eq!(calculator.available_options(already), expected);
    }

    #[test]
    fn every_option_can_be_quoted(table in price_table(), already in 0_u32..16) {
        let calculator = CreditCalculator::new(table);

        for option in calculator.available_options(already) {
            prop_assert!(calculator.quote(already, option).is_ok());
        }
    }

    #[test]
    fn marginal_price_is_cumulative_difference(
        table in price_table(),
        already in 0_u32..12,
        additional in 1_u32..12,
    ) {
        let max = table.max_chapters();
        prop_assume!(already + additional <= max);
        let calculator = CreditCalculator::new(table.clone());

        let quote = calculator.quote(already, additional).unwrap();

        let expected = cumulative_or_zero(&table, already + additional)
            - cumulative_or_zero(&table, already);
        prop_assert_eq!(quote.marginal_price, expected);
        prop_assert!(quote.marginal_price >= Money::ZERO);
        prop_assert_eq!(quote.unit_price, table.unit_price());
    }

    #[test]
    fn savings_never_negative(
        table in price_table(),
        already in 0_u32..12,
        additional in 1_u32..12,
    ) {
        let max = table.max_chapters();
        prop_assume!(already + additional <= max);
        let calculator = CreditCalculator::new(table);

        let quote = calculator.quote(already, additional).unwrap();

        prop_assert!(quote.savings >= Money::ZERO);
        if additional == 1 {
            prop_assert_eq!(quote.savings, Money::ZERO);
        } else if !quote.savings_clamped {
            prop_assert_eq!(quote.savings + quote.marginal_price, quote.individual_equivalent());
        } else {
            prop_assert_eq!(quote.savings, Money::ZERO);
        }
    }

    #[test]
    fn quoting_is_deterministic(
        table in price_table(),
        already in 0_u32..12,
        additional in 1_u32..12,
    ) {
        let calculator = CreditCalculator::new(table);

        prop_assert_eq!(
            calculator.quote(already, additional),
            calculator.quote(already, additional)
        );
    }

    #[test]
    fn buying_in_two_steps_costs_the_same(
        table in price_table(),
        first in 1_u32..6,
        second in 1_u32..6,
    ) {
        let max = table.max_chapters();
        prop_assume!(first + second <= max);
        let calculator = CreditCalculator::new(table);

        let at_once = calculator.quote(0, first + second).unwrap().marginal_price;
        let step_one = calculator.quote(0, first).unwrap().marginal_price;
        let step_two = calculator.quote(first, second).unwrap().marginal_price;

        prop_assert_eq!(step_one + step_two, at_once);
    }

    #[test]
    fn requests_past_the_limit_are_out_of_range(
        table in price_table(),
        already in 0_u32..16,
        extra in 1_u32..8,
    ) {
        let max = table.max_chapters();
        let additional = max.saturating_sub(already) + extra;
        let calculator = CreditCalculator::new(table);

        let err = calculator.quote(already, additional).unwrap_err();
        let is_out_of_range = matches!(err, PricingError::OutOfRange { .. });
        prop_assert!(is_out_of_range);
    }

    #[test]
    fn zero_chapters_is_out_of_range(table in price_table(), already in 0_u32..16) {
        let calculator = CreditCalculator::new(table);
        let is_out_of_range = matches!(
            calculator.quote(already, 0),
            Err(PricingError::OutOfRange { .. })
        );
        prop_assert!(is_out_of_range);
    }
}
