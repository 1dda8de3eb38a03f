//! Mutating operations as data.
//!
//! A [`Call`] is what an external caller submits to the ledger; the caller's
//! identity travels alongside it rather than inside it.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::Amount;
use crate::role::Role;

/// A state-changing request against the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    /// Move the caller's own funds.
    Transfer {
        /// Recipient.
        to: Address,
        /// Amount to move.
        amount: Amount,
    },
    /// Set the allowance of `spender` over the caller's funds.
    Approve {
        /// Account allowed to spend.
        spender: Address,
        /// New allowance.
        amount: Amount,
    },
    /// Spend an allowance granted by `from`.
    TransferFrom {
        /// Owner of the funds.
        from: Address,
        /// Recipient.
        to: Address,
        /// Amount to move.
        amount: Amount,
    },
    /// Raise an allowance.
    IncreaseAllowance {
        /// Account allowed to spend.
        spender: Address,
        /// Amount to add.
        delta: Amount,
    },
    /// Lower an allowance.
    DecreaseAllowance {
        /// Account allowed to spend.
        spender: Address,
        /// Amount to subtract.
        delta: Amount,
    },
    /// Grant a role.
    AddRole {
        /// Role to grant.
        role: Role,
        /// Account receiving it.
        account: Address,
    },
    /// Revoke a role from someone else.
    RemoveRole {
        /// Role to revoke.
        role: Role,
        /// Account losing it.
        account: Address,
    },
    /// Drop one of the caller's own roles.
    RenounceRole {
        /// Role to drop.
        role: Role,
    },
    /// Open transfers for everyone, permanently.
    EnableTransfersForAll,
}

impl Call {
    /// Short operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::Approve { .. } => "approve",
            Self::TransferFrom { .. } => "transfer_from",
            Self::IncreaseAllowance { .. } => "increase_allowance",
            Self::DecreaseAllowance { .. } => "decrease_allowance",
            Self::AddRole { .. } => "add_role",
            Self::RemoveRole { .. } => "remove_role",
            Self::RenounceRole { .. } => "renounce_role",
            Self::EnableTransfersForAll => "enable_transfers_for_all",
        }
    }

    /// Every address named in the call's arguments.
    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        match self {
            Self::Transfer { to, .. } => vec![*to],
            Self::Approve { spender, .. }
            | Self::IncreaseAllowance { spender, .. }
            | Self::DecreaseAllowance { spender, .. } => vec![*spender],
            Self::TransferFrom { from, to, .. } => vec![*from, *to],
            Self::AddRole { account, .. } | Self::RemoveRole { account, .. } => vec![*account],
            Self::RenounceRole { .. } | Self::EnableTransfersForAll => Vec::new(),
        }
    }
}
