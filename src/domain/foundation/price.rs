//! Price value object in whole currency units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use super::ValidationError;

/// Non-negative amount in whole pesos.
///
/// Storefront prices never carry centavos, so the amount is kept as an
/// unsigned integer and all arithmetic is exact. Amounts read from the wire
/// are capped at [`Price::MAX`], which keeps every configuration total far
/// from `u64` overflow.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct Price(u64);

impl Price {
    /// Zero surcharge.
    pub const ZERO: Price = Price(0);

    /// Largest accepted price: one trillion pesos.
    pub const MAX: Price = Price(1_000_000_000_000);

    /// Creates a price from whole pesos.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Creates a price, rejecting amounts above [`Price::MAX`].
    pub fn try_new(amount: u64) -> Result<Self, ValidationError> {
        if amount > Self::MAX.0 {
            return Err(ValidationError::invalid_format(
                "price",
                format!("{} exceeds the maximum of {}", amount, Self::MAX.0),
            ));
        }
        Ok(Self(amount))
    }

    /// Returns the amount in whole pesos.
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Returns true if this is a free option.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Formats the amount with thousands separators, e.g. `₱1,015,000`.
    pub fn to_display(&self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        out.push('₱');
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

impl Add for Price {
    type Output = Price;

    /// Saturates at `u64::MAX`.
    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price {
        iter.copied().sum()
    }
}

impl TryFrom<u64> for Price {
    type Error = ValidationError;

    fn try_from(amount: u64) -> Result<Self, Self::Error> {
        Self::try_new(amount)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display())
    }
}
