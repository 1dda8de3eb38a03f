//! The one-way "transfers enabled for everyone" switch.

use crate::address::Address;
use crate::role::{Role, Roles};

/// Decides whose funds may move.
///
/// While closed, only whitelisted accounts may send. Once opened the gate
/// stays open for the lifetime of the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferGate {
    enabled: bool,
}

impl TransferGate {
    /// A closed gate.
    #[must_use]
    pub const fn new() -> Self {
        Self { enabled: false }
    }

    /// Whether transfers are enabled for everyone.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.enabled
    }

    /// Opens the gate. Returns `true` if this call changed the state.
    pub fn open(&mut self) -> bool {
        let changed = !self.enabled;
        self.enabled = true;
        changed
    }

    /// Whether `account` may currently send funds.
    #[must_use]
    pub fn permits(&self, roles: &Roles, account: &Address) -> bool {
        self.enabled || roles.set(Role::Whitelisted).contains(account)
    }
}
