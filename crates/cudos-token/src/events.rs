//! Events emitted by successful ledger operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::amount::Amount;
use crate::role::Role;

/// An event record emitted by the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Value moved between accounts. `from` is the null address for the
    /// genesis issuance.
    Transfer {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Amount moved.
        value: Amount,
    },
    /// An allowance was set to a new value.
    Approval {
        /// Account whose funds may be spent.
        owner: Address,
        /// Account allowed to spend.
        spender: Address,
        /// New allowance.
        value: Amount,
    },
    /// An account gained a role.
    RoleAdded {
        /// Role granted.
        role: Role,
        /// Account that received it.
        account: Address,
    },
    /// An account lost a role.
    RoleRemoved {
        /// Role revoked or renounced.
        role: Role,
        /// Account that lost it.
        account: Address,
    },
}

impl LedgerEvent {
    /// External event name, e.g. `WhitelistedAdded`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::RoleAdded { role, .. } => match role {
                Role::WhitelistAdmin => "WhitelistAdminAdded",
                Role::Whitelisted => "WhitelistedAdded",
            },
            Self::RoleRemoved { role, .. } => match role {
                Role::WhitelistAdmin => "WhitelistAdminRemoved",
                Role::Whitelisted => "WhitelistedRemoved",
            },
        }
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Self::Transfer { from, to, value } => write!(f, "{name}({from}, {to}, {value})"),
            Self::Approval {
                owner,
                spender,
                value,
            } => write!(f, "{name}({owner}, {spender}, {value})"),
            Self::RoleAdded { account, .. } | Self::RoleRemoved { account, .. } => {
                write!(f, "{name}({account})")
            }
        }
    }
}
