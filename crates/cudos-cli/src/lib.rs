//! # cudos-cli
//!
//! Command-line driver for the CUDOS token ledger.
//!
//! Provides commands for:
//! - Showing token metadata
//! - Replaying a scripted sequence of calls against a fresh ledger
//!
//! # Architecture
//!
//! The CLI plays the part of the execution environment: it deploys a
//! [`cudos_token::Host`], feeds it one call at a time with the caller named
//! in the scenario, and reports the committed receipts.
//!
//! ```text
//! ┌───────────────┐   steps    ┌──────────────┐   events   ┌───────────────┐
//! │ scenario.json │──────────►│     Host     │──────────►│ tracing sink  │
//! └───────────────┘            └──────────────┘            └───────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod scenario;

pub use cli::{Cli, Commands, Format, ReplayArgs};
pub use error::CliError;
pub use output::OutputFormat;
pub use scenario::{Scenario, Step};
