//! Role membership sets and the policies that guard them.
//!
//! Two roles exist:
//! - [`Role::WhitelistAdmin`] is self-service: any admin may add another admin.
//!   Admins can never be evicted, only renounce.
//! - [`Role::Whitelisted`] is managed: only a `WhitelistAdmin` may add or
//!   remove members.
//!
//! Any member may renounce their own role without consulting the policy.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::address::Address;
use crate::error::{Result, TokenError};

/// A named role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages the whitelist and may open transfers for everyone.
    WhitelistAdmin,
    /// May move funds while transfers are closed.
    Whitelisted,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 2] = [Self::WhitelistAdmin, Self::Whitelisted];

    /// Who may grant and revoke this role.
    #[must_use]
    pub const fn policy(self) -> AdminPolicy {
        match self {
            Self::WhitelistAdmin => AdminPolicy::SelfService,
            Self::Whitelisted => AdminPolicy::ManagedBy(Self::WhitelistAdmin),
        }
    }

    /// Whether a member can be removed by someone other than themselves.
    #[must_use]
    pub const fn allows_eviction(self) -> bool {
        matches!(self, Self::Whitelisted)
    }

    /// The role's external name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WhitelistAdmin => "WhitelistAdmin",
            Self::Whitelisted => "Whitelisted",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Admin policy of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPolicy {
    /// Existing members administer the role.
    SelfService,
    /// Members of another role administer this one.
    ManagedBy(Role),
}

impl AdminPolicy {
    /// The role whose members may administer `role` under this policy.
    #[must_use]
    pub const fn authority(self, role: Role) -> Role {
        match self {
            Self::SelfService => role,
            Self::ManagedBy(manager) => manager,
        }
    }
}

/// Members of a single role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet {
    role: Role,
    members: HashSet<Address>,
}

impl RoleSet {
    /// Creates an empty set for `role`.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            members: HashSet::new(),
        }
    }

    /// The role this set tracks.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Membership query.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidAccount`] for the null address.
    pub fn has(&self, account: &Address) -> Result<bool> {
        account.ensure_non_zero("account")?;
        Ok(self.members.contains(account))
    }

    /// Membership test that treats the null address as a non-member.
    #[must_use]
    pub fn contains(&self, account: &Address) -> bool {
        self.members.contains(account)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if nobody holds the role.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in address order.
    #[must_use]
    pub fn members(&self) -> Vec<Address> {
        let mut members: Vec<_> = self.members.iter().copied().collect();
        members.sort_unstable();
        members
    }

    /// Inserts without any authorization check.
    fn insert(&mut self, account: Address) -> Result<()> {
        account.ensure_non_zero("account")?;
        if !self.members.insert(account) {
            return Err(TokenError::AlreadyMember {
                role: self.role,
                account,
            });
        }
        Ok(())
    }

    /// Deletes without any authorization check.
    fn delete(&mut self, account: &Address) -> Result<()> {
        account.ensure_non_zero("account")?;
        if !self.members.remove(account) {
            return Err(TokenError::NotMember {
                role: self.role,
                account: *account,
            });
        }
        Ok(())
    }
}

/// Both role sets, with the authorization rules that connect them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roles {
    admins: RoleSet,
    whitelisted: RoleSet,
}

impl Default for Roles {
    fn default() -> Self {
        Self::new()
    }
}

impl Roles {
    /// Creates empty role sets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            admins: RoleSet::new(Role::WhitelistAdmin),
            whitelisted: RoleSet::new(Role::Whitelisted),
        }
    }

    /// The membership set of `role`.
    #[must_use]
    pub const fn set(&self, role: Role) -> &RoleSet {
        match role {
            Role::WhitelistAdmin => &self.admins,
            Role::Whitelisted => &self.whitelisted,
        }
    }

    fn set_mut(&mut self, role: Role) -> &mut RoleSet {
        match role {
            Role::WhitelistAdmin => &mut self.admins,
            Role::Whitelisted => &mut self.whitelisted,
        }
    }

    /// Membership query.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidAccount`] for the null address.
    pub fn has(&self, role: Role, account: &Address) -> Result<bool> {
        self.set(role).has(account)
    }

    /// Checks that `caller` may administer `role`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] if the caller is not a member of
    /// the role named by the policy.
    pub fn authorize(&self, role: Role, caller: &Address) -> Result<()> {
        let authority = self.set(role.policy().authority(role));
        if authority.contains(caller) {
            return Ok(());
        }
        warn!(%caller, %role, required = %authority.role(), "role administration refused");
        Err(TokenError::missing_role(*caller, authority.role()))
    }

    /// Grants `role` to `account` on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Fails with `Unauthorized`, `InvalidAccount` or `AlreadyMember`, checked
    /// in that order.
    pub fn add(&mut self, role: Role, account: Address, caller: &Address) -> Result<()> {
        self.authorize(role, caller)?;
        self.set_mut(role).insert(account)
    }

    /// Revokes `role` from `account` on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Fails with `Unauthorized` (including for roles that cannot be evicted),
    /// `InvalidAccount` or `NotMember`, checked in that order.
    pub fn remove(&mut self, role: Role, account: &Address, caller: &Address) -> Result<()> {
        if !role.allows_eviction() {
            warn!(%caller, %account, %role, "eviction refused");
            return Err(TokenError::Unauthorized {
                caller: *caller,
                reason: format!("cannot remove a {role}; members may only renounce"),
            });
        }
        self.authorize(role, caller)?;
        self.set_mut(role).delete(account)
    }

    /// Drops `role` from `caller` without consulting the policy.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::NotMember`] if the caller does not hold the role.
    pub fn renounce(&mut self, role: Role, caller: &Address) -> Result<()> {
        self.set_mut(role).delete(caller)
    }

    /// Seeds a member at genesis, bypassing the policy.
    pub(crate) fn seed(&mut self, role: Role, account: Address) -> Result<()> {
        self.set_mut(role).insert(account)
    }
}
