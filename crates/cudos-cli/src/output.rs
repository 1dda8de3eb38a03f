//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use cudos_token::{Address, Amount, Receipt, TokenError};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Token metadata.
#[derive(Debug, Clone, Serialize)]
pub struct TokenInfo {
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Decimal precision.
    pub decimals: u8,
    /// Total supply in base units.
    pub total_supply: Amount,
}

impl TableDisplay for TokenInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Token")?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "Name:           {}", self.name)?;
        writeln!(writer, "Symbol:         {}", self.symbol)?;
        writeln!(writer, "Decimals:       {}", self.decimals)?;
        writeln!(writer, "Total Supply:   {}", self.total_supply)?;
        Ok(())
    }
}

/// What happened to one scenario step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The call was committed.
    Committed {
        /// Zero-based step index.
        step: usize,
        /// Optional step label.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        /// The commit receipt.
        receipt: Receipt,
    },
    /// The call was refused.
    Rejected {
        /// Zero-based step index.
        step: usize,
        /// Optional step label.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        /// Account that made the call.
        caller: Address,
        /// Operation name.
        op: String,
        /// Error kind.
        code: String,
        /// Error message.
        message: String,
    },
}

impl StepOutcome {
    /// Build a rejection outcome from a ledger error.
    #[must_use]
    pub fn rejected(
        step: usize,
        label: Option<String>,
        caller: Address,
        op: &str,
        error: &TokenError,
    ) -> Self {
        Self::Rejected {
            step,
            label,
            caller,
            op: op.to_string(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }

    /// Whether the step was committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Final state of one account after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    /// The account.
    pub address: Address,
    /// Its balance.
    pub balance: Amount,
    /// Whether it holds `WhitelistAdmin`.
    pub whitelist_admin: bool,
    /// Whether it holds `Whitelisted`.
    pub whitelisted: bool,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Per-step outcomes, in order.
    pub steps: Vec<StepOutcome>,
    /// Sequence number of the last commit.
    pub last_sequence: u64,
    /// Whether transfers were enabled for everyone at the end.
    pub transfers_enabled: bool,
    /// Final state of every account the scenario mentions.
    pub accounts: Vec<AccountSummary>,
}

impl ReplayReport {
    /// Number of committed steps.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.steps.iter().filter(|s| s.is_committed()).count()
    }
}

impl TableDisplay for ReplayReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Steps")?;
        writeln!(writer, "══════════════════════════════════")?;
        for outcome in &self.steps {
            match outcome {
                StepOutcome::Committed {
                    step,
                    label,
                    receipt,
                } => {
                    let op = receipt.call.as_ref().map_or("genesis", |c| c.name());
                    writeln!(
                        writer,
                        "✓ #{step:<3} seq {:<4} {op:<24} {}",
                        receipt.sequence,
                        label.as_deref().unwrap_or("")
                    )?;
                    for event in &receipt.events {
                        writeln!(writer, "      {event}")?;
                    }
                }
                StepOutcome::Rejected {
                    step,
                    label,
                    op,
                    code,
                    message,
                    ..
                } => {
                    writeln!(
                        writer,
                        "✗ #{step:<3} {:<8} {op:<24} {}",
                        "",
                        label.as_deref().unwrap_or("")
                    )?;
                    writeln!(writer, "      {code}: {message}")?;
                }
            }
        }
        writeln!(writer)?;
        writeln!(
            writer,
            "Committed: {}/{}   Last sequence: {}   Transfers enabled: {}",
            self.committed(),
            self.steps.len(),
            self.last_sequence,
            if self.transfers_enabled { "yes" } else { "no" }
        )?;
        writeln!(writer)?;
        writeln!(
            writer,
            "{:<44} {:<6} {:<6} BALANCE",
            "ACCOUNT", "ADMIN", "LISTED"
        )?;
        for account in &self.accounts {
            writeln!(
                writer,
                "{:<44} {:<6} {:<6} {}",
                account.address.to_string(),
                if account.whitelist_admin { "yes" } else { "-" },
                if account.whitelisted { "yes" } else { "-" },
                account.balance
            )?;
        }
        Ok(())
    }
}
