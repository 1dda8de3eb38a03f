//! CLI error types.

use cudos_token::TokenError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario file could not be parsed.
    #[error("scenario error: {0}")]
    Scenario(String),

    /// A scenario step was rejected by the ledger.
    #[error("step {step} ({op}) rejected: {source}")]
    Rejected {
        /// Zero-based step index.
        step: usize,
        /// Operation name.
        op: &'static str,
        /// The ledger error.
        #[source]
        source: TokenError,
    },

    /// Ledger error outside of a scenario step.
    #[error("ledger error: {0}")]
    Token(#[from] TokenError),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
