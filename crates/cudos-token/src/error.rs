//! Error types for CUDOS token operations.

use thiserror::Error;

use crate::amount::Amount;
use crate::role::Role;
use crate::address::Address;

/// Result type alias for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors that can occur during token operations.
///
/// Every error aborts the whole operation: no balance, allowance or role
/// mutation is applied and no event is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The null address was used where a real account is required.
    #[error("invalid account: {reason}")]
    InvalidAccount {
        /// What the null (or malformed) address was used for.
        reason: String,
    },

    /// Caller is not allowed to perform an admin-gated mutation.
    #[error("unauthorized: {caller} {reason}")]
    Unauthorized {
        /// Account that attempted the call.
        caller: Address,
        /// Why the call was refused.
        reason: String,
    },

    /// Account already holds the role.
    #[error("{account} already has the {role} role")]
    AlreadyMember {
        /// Role being granted.
        role: Role,
        /// Account that already holds it.
        account: Address,
    },

    /// Account does not hold the role.
    #[error("{account} does not have the {role} role")]
    NotMember {
        /// Role being removed.
        role: Role,
        /// Account that does not hold it.
        account: Address,
    },

    /// Sender is neither whitelisted nor covered by the global switch.
    #[error("transfers are closed for {account}")]
    GateClosed {
        /// The account whose funds would move.
        account: Address,
    },

    /// Balance is lower than the amount to move.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        /// Current balance.
        have: Amount,
        /// Requested amount.
        need: Amount,
    },

    /// Allowance is lower than the amount to move.
    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance {
        /// Remaining allowance.
        have: Amount,
        /// Requested amount.
        need: Amount,
    },

    /// Addition would exceed the representable range.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// Subtraction would go below zero.
    #[error("arithmetic underflow")]
    ArithmeticUnderflow,
}

impl TokenError {
    /// Create an invalid account error.
    #[must_use]
    pub fn invalid_account(reason: impl Into<String>) -> Self {
        Self::InvalidAccount {
            reason: reason.into(),
        }
    }

    /// Create an unauthorized error for a caller missing `role`.
    #[must_use]
    pub fn missing_role(caller: Address, role: Role) -> Self {
        Self::Unauthorized {
            caller,
            reason: format!("does not have the {role} role"),
        }
    }

    /// Create an insufficient balance error.
    #[must_use]
    pub const fn insufficient_balance(have: Amount, need: Amount) -> Self {
        Self::InsufficientBalance { have, need }
    }

    /// Create an insufficient allowance error.
    #[must_use]
    pub const fn insufficient_allowance(have: Amount, need: Amount) -> Self {
        Self::InsufficientAllowance { have, need }
    }

    /// Stable name of the error kind, for machine-readable output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidAccount { .. } => "InvalidAccount",
            Self::Unauthorized { .. } => "Unauthorized",
            Self::AlreadyMember { .. } => "AlreadyMember",
            Self::NotMember { .. } => "NotMember",
            Self::GateClosed { .. } => "GateClosed",
            Self::InsufficientBalance { .. } => "InsufficientBalance",
            Self::InsufficientAllowance { .. } => "InsufficientAllowance",
            Self::ArithmeticOverflow => "ArithmeticOverflow",
            Self::ArithmeticUnderflow => "ArithmeticUnderflow",
        }
    }

    /// Check if this error is an authorization failure.
    #[must_use]
    pub const fn is_authorization_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::GateClosed { .. })
    }
}
