//! Token metadata command.

use std::io::Write;

use cudos_token::{DECIMALS, INITIAL_SUPPLY, TOKEN_NAME, TOKEN_SYMBOL};

use crate::error::CliError;
use crate::output::{OutputFormat, TokenInfo};

/// Info command executor.
#[derive(Debug, Default)]
pub struct InfoCommand;

impl InfoCommand {
    /// Create a new info command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Print token metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let info = TokenInfo {
            name: TOKEN_NAME.to_string(),
            symbol: TOKEN_SYMBOL.to_string(),
            decimals: DECIMALS,
            total_supply: INITIAL_SUPPLY,
        };
        format.write(writer, &info)
    }
}
