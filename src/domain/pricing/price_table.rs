//! Cumulative chapter price table.
//!
//! Maps a cumulative chapter count to the total price of buying that many
//! chapters in one edition. The table is business policy, loaded once at
//! startup and never mutated.
//!
//! # Invariants
//!
//! - Defined for every count in `1..=max_chapters` (no gaps, no zero entry)
//! - Prices are non-decreasing in chapter count
//! - The single-chapter price is positive
//! - Buying every chapter singly fits in an `i64` of minor units

use std::collections::BTreeMap;

use serde::Serialize;

use super::PricingError;
use crate::domain::foundation::{Money, MINOR_PER_MAJOR};

/// Validated cumulative price table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    /// Cumulative prices; index `n - 1` holds the price of `n` chapters.
    cumulative: Vec<Money>,
}

/// One row of the table, as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceTableEntry {
    pub chapters: u32,
    pub cumulative_price: Money,
}

impl PriceTable {
    /// Builds a table from explicit entries, validating the invariants.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::Configuration` if the table is empty, has a
    /// zero-count entry, skips a count, decreases, has a non-positive
    /// single-chapter price, or prices so large that quoting would overflow.
    pub fn new(entries: BTreeMap<u32, Money>) -> Result<Self, PricingError> {
        if entries.is_empty() {
            return Err(PricingError::configuration("price table is empty"));
        }

        let mut cumulative = Vec::with_capacity(entries.len());
        for (expected, (&count, &price)) in (1u32..).zip(entries.iter()) {
            if count != expected {
                return Err(PricingError::configuration(format!(
                    "missing price for {} chapter(s)",
                    expected
                )));
            }
            if price.is_negative() {
                return Err(PricingError::configuration(format!(
                    "negative price for {} chapter(s)",
                    count
                )));
            }
            if let Some(&previous) = cumulative.last() {
                if price < previous {
                    return Err(PricingError::configuration(format!(
                        "price for {} chapter(s) ({}) is lower than for {} ({})",
                        count,
                        price,
                        count - 1,
                        previous
                    )));
                }
            }
            cumulative.push(price);
        }

        if cumulative[0] <= Money::ZERO {
            return Err(PricingError::configuration(
                "single-chapter price must be positive",
            ));
        }

        let max_chapters = cumulative.len() as u32;
        if cumulative[0].checked_mul(max_chapters).is_none() {
            return Err(PricingError::configuration(format!(
                "single-chapter price {} is too large for {} chapters",
                cumulative[0], max_chapters
            )));
        }

        Ok(Self { cumulative })
    }

    /// The published cumulative price table, in euros.
    ///
    /// | Chapters | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 |
    /// |----------|---|---|---|---|---|---|---|---|
    /// | Price    | 25 | 35 | 49 | 64 | 69 | 72 | 89 | 106 |
    pub fn reference() -> Self {
        const PRICES: [i64; 8] = [25, 35, 49, 64, 69, 72, 89, 106];
        Self {
            cumulative: PRICES.iter().map(|&p| Money::from_major(p)).collect(),
        }
    }

    /// Parses a table from a `count:price` list, e.g. `"1:25, 2:35, 3:49.50"`.
    ///
    /// Prices are in major units with at most two decimals.
    pub fn parse(input: &str) -> Result<Self, PricingError> {
        let mut entries = BTreeMap::new();

        for raw in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (count, price) = raw.split_once(':').ok_or_else(|| {
                PricingError::configuration(format!("expected 'count:price', got '{}'", raw))
            })?;

            let count: u32 = count.trim().parse().map_err(|_| {
                PricingError::configuration(format!("invalid chapter count '{}'", count.trim()))
            })?;
            let price = parse_major_amount(price.trim())?;

            if entries.insert(count, price).is_some() {
                return Err(PricingError::configuration(format!(
                    "duplicate price for {} chapter(s)",
                    count
                )));
            }
        }

        Self::new(entries)
    }

    /// Largest cumulative chapter count the table prices.
    pub fn max_chapters(&self) -> u32 {
        self.cumulative.len() as u32
    }

    /// Price of a single chapter bought alone.
    pub fn unit_price(&self) -> Money {
        self.cumulative[0]
    }

    /// Cumulative price for `count` chapters.
    ///
    /// A count of zero costs nothing; counts above the maximum are `None`.
    pub fn cumulative(&self, count: u32) -> Option<Money> {
        match count {
            0 => Some(Money::ZERO),
            n => self.cumulative.get(n as usize - 1).copied(),
        }
    }

    /// All rows in ascending chapter order.
    pub fn entries(&self) -> impl Iterator<Item = PriceTableEntry> + '_ {
        (1u32..).zip(self.cumulative.iter()).map(|(chapters, &cumulative_price)| {
            PriceTableEntry {
                chapters,
                cumulative_price,
            }
        })
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::reference()
    }
}

fn parse_major_amount(raw: &str) -> Result<Money, PricingError> {
    let invalid = || PricingError::configuration(format!("invalid price '{}'", raw));

    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if whole.is_empty() || fraction.len() > 2 {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: i64 = whole.parse().map_err(|_| invalid())?;
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    whole
        .checked_mul(MINOR_PER_MAJOR)
        .and_then(|w| w.checked_add(fraction))
        .map(Money::from_minor)
        .ok_or_else(invalid)
}
