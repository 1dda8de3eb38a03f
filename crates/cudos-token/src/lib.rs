//! # cudos-token
//!
//! CUDOS: a fixed-supply fungible token whose transfers are gated by a
//! whitelist until an administrator opens them for everyone.
//!
//! This crate provides:
//! - Balances and allowances with overflow-checked arithmetic ([`FungibleLedger`])
//! - Two roles, `WhitelistAdmin` and `Whitelisted` ([`Roles`])
//! - The one-way "transfers enabled for all" switch ([`TransferGate`])
//! - The combined token state machine ([`CudosToken`])
//! - A serializing execution host that commits events to sinks ([`Host`])
//!
//! ## Token Details
//!
//! - **Name**: `CudosToken`
//! - **Symbol**: CUDOS
//! - **Decimals**: 18
//! - **Supply**: 10 billion CUDOS, issued once to the deploying account
//!
//! ## Example
//!
//! ```rust
//! use cudos_token::{Address, Amount, Call, Host};
//!
//! # fn example() -> cudos_token::Result<()> {
//! let cudos = Address::from_bytes([1; 20]);
//! let partner = Address::from_bytes([2; 20]);
//!
//! let host = Host::deploy(cudos)?;
//! host.execute(cudos, Call::Transfer { to: partner, amount: Amount::tokens(10) })?;
//!
//! // partner is not whitelisted, so its funds are frozen until the gate opens
//! let back = Call::Transfer { to: cudos, amount: Amount::tokens(1) };
//! assert!(host.execute(partner, back.clone()).is_err());
//!
//! host.execute(cudos, Call::EnableTransfersForAll)?;
//! host.execute(partner, back)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod amount;
pub mod call;
pub mod error;
pub mod events;
pub mod gate;
pub mod host;
pub mod ledger;
pub mod role;
pub mod sink;
pub mod token;

#[cfg(test)]
mod tests;

pub use address::Address;
pub use amount::Amount;
pub use call::Call;
pub use error::{Result, TokenError};
pub use events::LedgerEvent;
pub use gate::TransferGate;
pub use host::{Host, HostBuilder, Receipt};
pub use ledger::FungibleLedger;
pub use role::{AdminPolicy, Role, RoleSet, Roles};
pub use sink::{BoxedEventSink, EventSink, NoopEventSink, TracingEventSink};
pub use token::CudosToken;

/// Token name.
pub const TOKEN_NAME: &str = "CudosToken";

/// Token symbol.
pub const TOKEN_SYMBOL: &str = "CUDOS";

/// Token decimals.
pub const DECIMALS: u8 = 18;

/// One CUDOS in base units.
pub const BASE_UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Supply issued to the genesis caller.
pub const INITIAL_SUPPLY: Amount = Amount::tokens(10_000_000_000);
