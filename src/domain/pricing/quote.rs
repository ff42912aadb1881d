//! Purchase quote value object.

use serde::Serialize;

use crate::domain::foundation::Money;

/// Price and savings for buying `requested_additional` more chapters.
///
/// Derived on demand from the price table and the buyer's purchase count;
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseQuote {
    /// Chapters already bought in the edition.
    pub already_purchased: u32,

    /// Chapters being quoted.
    pub requested_additional: u32,

    /// Amount to charge: cumulative(already + requested) - cumulative(already).
    pub marginal_price: Money,

    /// Price of one chapter bought alone.
    pub unit_price: Money,

    /// What buying each chapter separately would save, floored at zero.
    pub savings: Money,

    /// Marginal price divided by chapter count, rounded to the cent.
    pub per_unit_effective: Money,

    /// True when the bundle costs more than separate chapters and savings
    /// were floored to zero.
    #[serde(skip)]
    pub savings_clamped: bool,
}

impl PurchaseQuote {
    /// Total chapters the buyer will hold after this purchase.
    pub fn total_after_purchase(&self) -> u32 {
        self.already_purchased + self.requested_additional
    }

    /// What the same chapters would cost bought one by one at the unit price.
    pub fn individual_equivalent(&self) -> Money {
        self.unit_price * self.requested_additional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> PurchaseQuote {
        PurchaseQuote {
            already_purchased: 3,
            requested_additional: 2,
            marginal_price: Money::from_major(20),
            unit_price: Money::from_major(25),
            savings: Money::from_major(30),
            per_unit_effective: Money::from_major(10),
            savings_clamped: false,
        }
    }

    #[test]
    fn total_after_purchase_adds_counts() {
        assert_eq!(quote().total_after_purchase(), 5);
    }

    #[test]
    fn individual_equivalent_multiplies_unit_price() {
        assert_eq!(quote().individual_equivalent(), Money::from_major(50));
    }

    #[test]
    fn serializes_without_internal_flag() {
        let json = serde_json::to_value(quote()).unwrap();
        assert_eq!(json["marginal_price"], 2000);
        assert!(json.get("savings_clamped").is_none());
    }
}
