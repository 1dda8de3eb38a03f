//! The CUDOS token: ledger, roles and transfer gate combined.
//!
//! Every mutating method takes the caller explicitly, validates everything
//! before mutating, and on success appends its events to a pending buffer.
//! The buffer is drained with [`CudosToken::take_events`] once the caller's
//! environment has committed the operation.

use tracing::{debug, info, warn};

use crate::address::Address;
use crate::amount::Amount;
use crate::call::Call;
use crate::error::{Result, TokenError};
use crate::events::LedgerEvent;
use crate::gate::TransferGate;
use crate::ledger::FungibleLedger;
use crate::role::{Role, Roles};
use crate::{DECIMALS, INITIAL_SUPPLY, TOKEN_NAME, TOKEN_SYMBOL};

/// Complete token state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CudosToken {
    ledger: FungibleLedger,
    roles: Roles,
    gate: TransferGate,
    pending: Vec<LedgerEvent>,
}

impl CudosToken {
    /// Deploys the token on behalf of `genesis`.
    ///
    /// The genesis caller becomes the first `WhitelistAdmin`, the first
    /// `Whitelisted` member, and the holder of the entire supply.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidAccount`] if `genesis` is the null address.
    pub fn new(genesis: Address) -> Result<Self> {
        genesis.ensure_non_zero("genesis caller")?;

        let mut roles = Roles::new();
        roles.seed(Role::WhitelistAdmin, genesis)?;
        roles.seed(Role::Whitelisted, genesis)?;
        let ledger = FungibleLedger::genesis(genesis, INITIAL_SUPPLY)?;

        let pending = vec![
            LedgerEvent::RoleAdded {
                role: Role::WhitelistAdmin,
                account: genesis,
            },
            LedgerEvent::RoleAdded {
                role: Role::Whitelisted,
                account: genesis,
            },
            LedgerEvent::Transfer {
                from: Address::ZERO,
                to: genesis,
                value: INITIAL_SUPPLY,
            },
        ];

        info!(%genesis, supply = %INITIAL_SUPPLY, "token deployed");
        Ok(Self {
            ledger,
            roles,
            gate: TransferGate::new(),
            pending,
        })
    }

    // ==================== Metadata ====================

    /// Token name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        TOKEN_NAME
    }

    /// Token symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        TOKEN_SYMBOL
    }

    /// Decimal precision.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        DECIMALS
    }

    // ==================== Queries ====================

    /// Total supply.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    /// Balance of `account`.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.ledger.balance_of(account)
    }

    /// Remaining allowance of `spender` over `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.ledger.allowance(owner, spender)
    }

    /// Read access to the balance ledger.
    #[must_use]
    pub const fn ledger(&self) -> &FungibleLedger {
        &self.ledger
    }

    /// Read access to the role sets.
    #[must_use]
    pub const fn roles(&self) -> &Roles {
        &self.roles
    }

    /// Whether `account` holds `role`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidAccount`] for the null address.
    pub fn has_role(&self, role: Role, account: &Address) -> Result<bool> {
        self.roles.has(role, account)
    }

    /// Whether `account` is a `WhitelistAdmin`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidAccount`] for the null address.
    pub fn is_whitelist_admin(&self, account: &Address) -> Result<bool> {
        self.has_role(Role::WhitelistAdmin, account)
    }

    /// Whether `account` is `Whitelisted`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidAccount`] for the null address.
    pub fn is_whitelisted(&self, account: &Address) -> Result<bool> {
        self.has_role(Role::Whitelisted, account)
    }

    /// Whether transfers have been enabled for everyone.
    #[must_use]
    pub const fn transfers_enabled(&self) -> bool {
        self.gate.is_open()
    }

    /// Whether funds owned by `account` may currently move.
    #[must_use]
    pub fn can_transfer(&self, account: &Address) -> bool {
        self.gate.permits(&self.roles, account)
    }

    // ==================== Events ====================

    /// Events of operations not yet drained.
    #[must_use]
    pub fn pending_events(&self) -> &[LedgerEvent] {
        &self.pending
    }

    /// Drains buffered events.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.pending)
    }

    // ==================== Value movement ====================

    fn ensure_can_transfer(&self, account: &Address) -> Result<()> {
        if self.can_transfer(account) {
            return Ok(());
        }
        warn!(%account, "transfer refused: gate closed");
        Err(TokenError::GateClosed { account: *account })
    }

    /// Moves `amount` of the caller's funds to `to`.
    ///
    /// # Errors
    ///
    /// Fails with `GateClosed`, `InvalidAccount` or `InsufficientBalance`,
    /// checked in that order.
    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: Amount) -> Result<()> {
        self.ensure_can_transfer(caller)?;
        self.ledger.move_balance(caller, to, amount)?;

        debug!(from = %caller, %to, %amount, "transfer");
        self.pending.push(LedgerEvent::Transfer {
            from: *caller,
            to: *to,
            value: amount,
        });
        Ok(())
    }

    /// Sets the allowance of `spender` over the caller's funds.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidAccount`] for a null spender.
    pub fn approve(&mut self, caller: &Address, spender: &Address, amount: Amount) -> Result<()> {
        self.ledger.set_allowance(caller, spender, amount)?;
        debug!(owner = %caller, %spender, %amount, "approve");
        self.pending.push(LedgerEvent::Approval {
            owner: *caller,
            spender: *spender,
            value: amount,
        });
        Ok(())
    }

    /// Moves `amount` from `from` to `to`, spending the caller's allowance.
    ///
    /// The gate is checked against `from`, not the caller. The allowance
    /// decrement emits no event of its own.
    ///
    /// # Errors
    ///
    /// Fails with `GateClosed`, `InvalidAccount`, `InsufficientAllowance` or
    /// `InsufficientBalance`, checked in that order.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        self.ensure_can_transfer(from)?;
        caller.ensure_non_zero("spender")?;
        to.ensure_non_zero("recipient")?;

        let allowed = self.ledger.allowance(from, caller);
        let remaining = allowed
            .checked_sub(amount)
            .ok_or(TokenError::insufficient_allowance(allowed, amount))?;

        self.ledger.move_balance(from, to, amount)?;
        // from and caller are both non-zero here, so this cannot fail
        self.ledger.set_allowance(from, caller, remaining)?;

        debug!(spender = %caller, %from, %to, %amount, "transfer_from");
        self.pending.push(LedgerEvent::Transfer {
            from: *from,
            to: *to,
            value: amount,
        });
        Ok(())
    }

    /// Adds `delta` to the allowance of `spender` over the caller's funds.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidAccount` for a null spender, or
    /// `ArithmeticOverflow`.
    pub fn increase_allowance(
        &mut self,
        caller: &Address,
        spender: &Address,
        delta: Amount,
    ) -> Result<()> {
        spender.ensure_non_zero("spender")?;
        let value = self.ledger.allowance(caller, spender).try_add(delta)?;
        self.approve(caller, spender, value)
    }

    /// Subtracts `delta` from the allowance of `spender` over the caller's funds.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidAccount` for a null spender, or
    /// `ArithmeticUnderflow` if `delta` exceeds the current allowance.
    pub fn decrease_allowance(
        &mut self,
        caller: &Address,
        spender: &Address,
        delta: Amount,
    ) -> Result<()> {
        spender.ensure_non_zero("spender")?;
        let value = self.ledger.allowance(caller, spender).try_sub(delta)?;
        self.approve(caller, spender, value)
    }

    // ==================== Roles ====================

    /// Grants `role` to `account`.
    ///
    /// # Errors
    ///
    /// Fails with `Unauthorized`, `InvalidAccount` or `AlreadyMember`.
    pub fn add_role(&mut self, caller: &Address, role: Role, account: &Address) -> Result<()> {
        self.roles.add(role, *account, caller)?;
        info!(%caller, %role, %account, "role added");
        self.pending.push(LedgerEvent::RoleAdded {
            role,
            account: *account,
        });
        Ok(())
    }

    /// Revokes `role` from `account`. Only roles that allow eviction can be
    /// removed this way.
    ///
    /// # Errors
    ///
    /// Fails with `Unauthorized`, `InvalidAccount` or `NotMember`.
    pub fn remove_role(&mut self, caller: &Address, role: Role, account: &Address) -> Result<()> {
        self.roles.remove(role, account, caller)?;
        info!(%caller, %role, %account, "role removed");
        self.pending.push(LedgerEvent::RoleRemoved {
            role,
            account: *account,
        });
        Ok(())
    }

    /// Drops `role` from the caller.
    ///
    /// # Errors
    ///
    /// Fails with `NotMember` if the caller does not hold the role.
    pub fn renounce_role(&mut self, caller: &Address, role: Role) -> Result<()> {
        self.roles.renounce(role, caller)?;
        info!(%caller, %role, "role renounced");
        self.pending.push(LedgerEvent::RoleRemoved {
            role,
            account: *caller,
        });
        Ok(())
    }

    /// Adds a `WhitelistAdmin`.
    ///
    /// # Errors
    ///
    /// See [`CudosToken::add_role`].
    pub fn add_whitelist_admin(&mut self, caller: &Address, account: &Address) -> Result<()> {
        self.add_role(caller, Role::WhitelistAdmin, account)
    }

    /// Drops the caller's `WhitelistAdmin` role.
    ///
    /// # Errors
    ///
    /// See [`CudosToken::renounce_role`].
    pub fn renounce_whitelist_admin(&mut self, caller: &Address) -> Result<()> {
        self.renounce_role(caller, Role::WhitelistAdmin)
    }

    /// Adds a `Whitelisted` member.
    ///
    /// # Errors
    ///
    /// See [`CudosToken::add_role`].
    pub fn add_whitelisted(&mut self, caller: &Address, account: &Address) -> Result<()> {
        self.add_role(caller, Role::Whitelisted, account)
    }

    /// Removes a `Whitelisted` member.
    ///
    /// # Errors
    ///
    /// See [`CudosToken::remove_role`].
    pub fn remove_whitelisted(&mut self, caller: &Address, account: &Address) -> Result<()> {
        self.remove_role(caller, Role::Whitelisted, account)
    }

    /// Drops the caller's `Whitelisted` role.
    ///
    /// # Errors
    ///
    /// See [`CudosToken::renounce_role`].
    pub fn renounce_whitelisted(&mut self, caller: &Address) -> Result<()> {
        self.renounce_role(caller, Role::Whitelisted)
    }

    // ==================== Gate ====================

    /// Enables transfers for everyone. Repeating the call is not an error,
    /// but the caller is checked every time.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless the caller is a
    /// `WhitelistAdmin`.
    pub fn enable_transfers_for_all(&mut self, caller: &Address) -> Result<()> {
        if !self.roles.set(Role::WhitelistAdmin).contains(caller) {
            warn!(%caller, "enable transfers refused");
            return Err(TokenError::missing_role(*caller, Role::WhitelistAdmin));
        }
        if self.gate.open() {
            info!(%caller, "transfers enabled for all");
        }
        Ok(())
    }

    // ==================== Dispatch ====================

    /// Applies `call` on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying operation returns.
    pub fn dispatch(&mut self, caller: &Address, call: &Call) -> Result<()> {
        match call {
            Call::Transfer { to, amount } => self.transfer(caller, to, *amount),
            Call::Approve { spender, amount } => self.approve(caller, spender, *amount),
            Call::TransferFrom { from, to, amount } => {
                self.transfer_from(caller, from, to, *amount)
            }
            Call::IncreaseAllowance { spender, delta } => {
                self.increase_allowance(caller, spender, *delta)
            }
            Call::DecreaseAllowance { spender, delta } => {
                self.decrease_allowance(caller, spender, *delta)
            }
            Call::AddRole { role, account } => self.add_role(caller, *role, account),
            Call::RemoveRole { role, account } => self.remove_role(caller, *role, account),
            Call::RenounceRole { role } => self.renounce_role(caller, *role),
            Call::EnableTransfersForAll => self.enable_transfers_for_all(caller),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    fn deployed() -> CudosToken {
        let mut token = CudosToken::new(addr(1)).expect("deploy");
        token.take_events();
        token
    }

    #[test]
    fn metadata() {
        let token = deployed();
        assert_eq!(token.name(), "CudosToken");
        assert_eq!(token.symbol(), "CUDOS");
        assert_eq!(token.decimals(), 18);
    }

    #[test]
    fn genesis_rejects_zero_caller() {
        let err = CudosToken::new(Address::ZERO).expect_err("zero genesis");
        assert_eq!(err.code(), "InvalidAccount");
    }

    #[test]
    fn genesis_events_in_construction_order() {
        let mut token = CudosToken::new(addr(1)).expect("deploy");
        let names: Vec<_> = token.take_events().iter().map(LedgerEvent::name).collect();
        assert_eq!(names, vec!["WhitelistAdminAdded", "WhitelistedAdded", "Transfer"]);
        assert!(token.pending_events().is_empty());
    }

    #[test]
    fn transfer_emits_event() {
        let mut token = deployed();
        token
            .transfer(&addr(1), &addr(2), Amount::tokens(10))
            .expect("transfer");
        assert_eq!(
            token.take_events(),
            vec![LedgerEvent::Transfer {
                from: addr(1),
                to: addr(2),
                value: Amount::tokens(10),
            }]
        );
        assert_eq!(token.balance_of(&addr(2)), Amount::tokens(10));
    }

    #[test]
    fn transfer_to_zero_rejected_after_gate() {
        let mut token = deployed();
        let err = token
            .transfer(&addr(1), &Address::ZERO, Amount::tokens(1))
            .expect_err("zero");
        assert_eq!(err.code(), "InvalidAccount");

        // gate is checked before the recipient
        token.transfer(&addr(1), &addr(2), Amount::tokens(1)).expect("fund");
        let err = token
            .transfer(&addr(2), &Address::ZERO, Amount::tokens(1))
            .expect_err("gate");
        assert_eq!(err.code(), "GateClosed");
        assert_eq!(token.take_events().len(), 1);
    }

    #[test]
    fn transfer_from_checks_gate_on_owner_not_spender() {
        let mut token = deployed();
        token.transfer(&addr(1), &addr(2), Amount::tokens(5)).expect("fund");
        token.approve(&addr(2), &addr(1), Amount::tokens(5)).expect("approve");

        // addr(1) is whitelisted but addr(2), the owner, is not
        let err = token
            .transfer_from(&addr(1), &addr(2), &addr(3), Amount::tokens(1))
            .expect_err("gate");
        assert_eq!(err, TokenError::GateClosed { account: addr(2) });
    }

    #[test]
    fn transfer_from_by_unlisted_spender_of_whitelisted_owner() {
        let mut token = deployed();
        token.approve(&addr(1), &addr(7), Amount::tokens(3)).expect("approve");
        token.take_events();

        token
            .transfer_from(&addr(7), &addr(1), &addr(8), Amount::tokens(2))
            .expect("transfer_from");
        assert_eq!(token.allowance(&addr(1), &addr(7)), Amount::tokens(1));
        assert_eq!(token.balance_of(&addr(8)), Amount::tokens(2));

        // only a Transfer, no Approval for the silent decrement
        let events = token.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "Transfer");
    }

    #[test]
    fn increase_allowance_overflow() {
        let mut token = deployed();
        token.approve(&addr(1), &addr(2), Amount::MAX).expect("approve");
        let err = token
            .increase_allowance(&addr(1), &addr(2), Amount::from_base_units(1))
            .expect_err("overflow");
        assert_eq!(err, TokenError::ArithmeticOverflow);
        assert_eq!(token.allowance(&addr(1), &addr(2)), Amount::MAX);
    }

    #[test]
    fn allowance_deltas_reject_zero_spender() {
        let mut token = deployed();
        for result in [
            token.increase_allowance(&addr(1), &Address::ZERO, Amount::tokens(1)),
            token.decrease_allowance(&addr(1), &Address::ZERO, Amount::ZERO),
            token.approve(&addr(1), &Address::ZERO, Amount::tokens(1)),
        ] {
            assert_eq!(result.expect_err("zero spender").code(), "InvalidAccount");
        }
        assert!(token.pending_events().is_empty());
    }

    #[test]
    fn enable_transfers_requires_admin_every_time() {
        let mut token = deployed();
        let err = token.enable_transfers_for_all(&addr(2)).expect_err("not admin");
        assert_eq!(err.code(), "Unauthorized");
        assert!(!token.transfers_enabled());

        token.enable_transfers_for_all(&addr(1)).expect("enable");
        token.enable_transfers_for_all(&addr(1)).expect("enable again");
        assert!(token.transfers_enabled());
        assert!(token.enable_transfers_for_all(&addr(2)).is_err());
        assert!(token.pending_events().is_empty());
    }

    #[test]
    fn dispatch_routes_calls() {
        let mut token = deployed();
        token
            .dispatch(
                &addr(1),
                &Call::AddRole {
                    role: Role::Whitelisted,
                    account: addr(4),
                },
            )
            .expect("add");
        token
            .dispatch(&addr(4), &Call::RenounceRole { role: Role::Whitelisted })
            .expect("renounce");
        assert_eq!(token.is_whitelisted(&addr(4)), Ok(false));
        let names: Vec<_> = token.take_events().iter().map(LedgerEvent::name).collect();
        assert_eq!(names, vec!["WhitelistedAdded", "WhitelistedRemoved"]);
    }
}
