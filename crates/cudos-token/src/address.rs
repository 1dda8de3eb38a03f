//! Account addresses.
//!
//! Addresses are opaque 20-byte values rendered as `0x`-prefixed lowercase
//! hex. The all-zero address is the null sentinel: it can never hold a role,
//! receive funds or be granted an allowance.

use crate::error::{Result, TokenError};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; Address::LEN]);

impl Address {
    /// Address width in bytes.
    pub const LEN: usize = 20;

    /// The null address.
    pub const ZERO: Self = Self([0; Self::LEN]);

    /// Create an address from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Create an address from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns error if the slice is not exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; Self::LEN] = bytes.try_into().map_err(|_| {
            TokenError::invalid_account(format!(
                "address must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(raw))
    }

    /// Parse an address from hex, with or without the `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not valid hex or has the wrong length.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| TokenError::invalid_account(format!("invalid hex address '{s}': {e}")))?;
        Self::from_slice(&bytes)
    }

    /// Get the raw bytes of the address.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Check if this is the null address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Reject the null address.
    ///
    /// `what` describes the role the address plays in the failing call and
    /// ends up in the error message.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidAccount`] for the null address.
    pub fn ensure_non_zero(&self, what: &str) -> Result<()> {
        if self.is_zero() {
            return Err(TokenError::invalid_account(format!("{what} is the zero address")));
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<[u8; Address::LEN]> for Address {
    fn from(bytes: [u8; Address::LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
