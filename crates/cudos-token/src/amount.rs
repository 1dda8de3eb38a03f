//! CUDOS token amount representation.
//!
//! Amounts are stored as base units (1 CUDOS = 10^18 base units) in a `u128`,
//! which comfortably holds the fixed genesis supply. Arithmetic is checked:
//! nothing in the ledger ever wraps.

use crate::error::{Result, TokenError};
use crate::{BASE_UNITS_PER_TOKEN, DECIMALS, TOKEN_SYMBOL};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// An amount of CUDOS tokens, in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    base_units: u128,
}

impl Amount {
    /// Zero CUDOS.
    pub const ZERO: Self = Self { base_units: 0 };

    /// Maximum representable amount.
    pub const MAX: Self = Self {
        base_units: u128::MAX,
    };

    /// Create an amount from base units.
    #[must_use]
    pub const fn from_base_units(base_units: u128) -> Self {
        Self { base_units }
    }

    /// Create an amount of whole tokens.
    #[must_use]
    pub const fn tokens(whole: u64) -> Self {
        Self {
            base_units: whole as u128 * BASE_UNITS_PER_TOKEN,
        }
    }

    /// Get the amount in base units.
    #[must_use]
    pub const fn base_units(&self) -> u128 {
        self.base_units
    }

    /// Check if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.base_units == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: Self) -> Option<Self> {
        match self.base_units.checked_add(other.base_units) {
            Some(base_units) => Some(Self { base_units }),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: Self) -> Option<Self> {
        match self.base_units.checked_sub(other.base_units) {
            Some(base_units) => Some(Self { base_units }),
            None => None,
        }
    }

    /// Addition that fails with [`TokenError::ArithmeticOverflow`].
    ///
    /// # Errors
    ///
    /// Returns error if the sum exceeds [`Amount::MAX`].
    pub fn try_add(&self, other: Self) -> Result<Self> {
        match self.checked_add(other) {
            Some(sum) => Ok(sum),
            None => Err(TokenError::ArithmeticOverflow),
        }
    }

    /// Subtraction that fails with [`TokenError::ArithmeticUnderflow`].
    ///
    /// # Errors
    ///
    /// Returns error if `other` is larger than `self`.
    pub fn try_sub(&self, other: Self) -> Result<Self> {
        match self.checked_sub(other) {
            Some(diff) => Ok(diff),
            None => Err(TokenError::ArithmeticUnderflow),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.base_units / BASE_UNITS_PER_TOKEN;
        let frac = self.base_units % BASE_UNITS_PER_TOKEN;
        if frac == 0 {
            return write!(f, "{whole} {TOKEN_SYMBOL}");
        }
        let digits = format!("{frac:0width$}", width = usize::from(DECIMALS));
        write!(f, "{whole}.{} {TOKEN_SYMBOL}", digits.trim_end_matches('0'))
    }
}

impl From<u128> for Amount {
    fn from(base_units: u128) -> Self {
        Self::from_base_units(base_units)
    }
}

// 128-bit integers do not survive most JSON tooling, so amounts travel as
// decimal strings. Plain integers are accepted on input up to u64::MAX;
// JSON parsers hand larger numbers over as floats, which are refused.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.base_units)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer count of base units")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Amount, E> {
                Ok(Amount::from_base_units(u128::from(v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Amount, E> {
                u64::try_from(v)
                    .map(|v| Amount::from_base_units(u128::from(v)))
                    .map_err(|_| E::custom(format!("amount cannot be negative: {v}")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Amount, E> {
                if v.fract() == 0.0 && v > 0.0 {
                    Err(E::custom(format!(
                        "amount {v} is above u64; amounts above u64 must be decimal strings"
                    )))
                } else {
                    Err(E::custom(format!("amount must be a whole number of base units: {v}")))
                }
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<Amount, E> {
                Ok(Amount::from_base_units(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Amount, E> {
                v.trim()
                    .parse::<u128>()
                    .map(Amount::from_base_units)
                    .map_err(|_| E::custom(format!("invalid amount '{v}'")))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
