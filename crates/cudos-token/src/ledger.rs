//! Balances, allowances and the fixed total supply.
//!
//! Every mutating method validates all of its preconditions before touching
//! any map, so a failed call leaves the ledger exactly as it was.

use std::collections::HashMap;

use crate::address::Address;
use crate::amount::Amount;
use crate::error::{Result, TokenError};

/// Fungible balance and allowance state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleLedger {
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    /// Keyed by `(owner, spender)`.
    allowances: HashMap<(Address, Address), Amount>,
}

impl FungibleLedger {
    /// Creates a ledger whose entire supply belongs to `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidAccount`] if `holder` is the null address.
    pub fn genesis(holder: Address, supply: Amount) -> Result<Self> {
        holder.ensure_non_zero("genesis holder")?;
        let mut balances = HashMap::new();
        balances.insert(holder, supply);
        Ok(Self {
            total_supply: supply,
            balances,
            allowances: HashMap::new(),
        })
    }

    /// Total supply. Never changes after genesis.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of `account`.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Remaining amount `spender` may move out of `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Accounts with a balance entry, in address order.
    #[must_use]
    pub fn holders(&self) -> Vec<(Address, Amount)> {
        let mut holders: Vec<_> = self.balances.iter().map(|(a, b)| (*a, *b)).collect();
        holders.sort_unstable_by_key(|(a, _)| *a);
        holders
    }

    /// Sum of all balances, or `None` if it does not fit in an [`Amount`].
    #[must_use]
    pub fn circulating(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(Amount::ZERO, |acc, b| acc.checked_add(*b))
    }

    /// Returns true if the null address appears as a key in either map.
    #[must_use]
    pub fn touches_zero_address(&self) -> bool {
        self.balances.contains_key(&Address::ZERO)
            || self
                .allowances
                .keys()
                .any(|(owner, spender)| owner.is_zero() || spender.is_zero())
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidAccount` for a null sender or recipient, and with
    /// `InsufficientBalance` when `from` holds less than `amount`.
    pub fn move_balance(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        from.ensure_non_zero("sender")?;
        to.ensure_non_zero("recipient")?;

        let have = self.balance_of(from);
        let debited = have
            .checked_sub(amount)
            .ok_or(TokenError::insufficient_balance(have, amount))?;
        if from == to {
            return Ok(());
        }
        let credited = self.balance_of(to).try_add(amount)?;

        self.balances.insert(*from, debited);
        self.balances.insert(*to, credited);
        Ok(())
    }

    /// Sets the allowance of `spender` over `owner` to exactly `amount`.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidAccount` for a null owner or spender.
    pub fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: Amount) -> Result<()> {
        owner.ensure_non_zero("owner")?;
        spender.ensure_non_zero("spender")?;
        self.allowances.insert((*owner, *spender), amount);
        Ok(())
    }
}
