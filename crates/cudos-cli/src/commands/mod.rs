//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`info`] - Token metadata
//! - [`replay`] - Scenario replay

pub mod info;
pub mod replay;

pub use info::InfoCommand;
pub use replay::ReplayCommand;
