//! Money value object.
//!
//! Amounts are held as integer minor units (cents) so that tier arithmetic is
//! exact. The currency itself is a deployment setting, not part of the value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Minor units per major unit (cents per euro).
pub const MINOR_PER_MAJOR: i64 = 100;

/// An amount of money in minor currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from minor units (cents).
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole major units (euros).
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Returns the amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the amount in major units as a float, for display only.
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Divides by a positive count, rounding half away from zero to the nearest minor unit.
    ///
    /// Returns `None` when `count` is zero.
    pub fn div_rounded(&self, count: u32) -> Option<Money> {
        if count == 0 {
            return None;
        }
        let count = i64::from(count);
        let quotient = self.0 / count;
        let remainder = self.0 % count;
        let adjust = if remainder.abs() * 2 >= count {
            self.0.signum()
        } else {
            0
        };
        Some(Money(quotient + adjust))
    }

    /// Multiplies by a count, returning `None` on overflow.
    pub fn checked_mul(self, count: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(count)).map(Money)
    }

    /// Clamps negative amounts to zero.
    pub fn clamp_non_negative(self) -> Money {
        self.max(Money::ZERO)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0 * i64::from(rhs))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / MINOR_PER_MAJOR,
            abs % MINOR_PER_MAJOR
        )
    }
}
