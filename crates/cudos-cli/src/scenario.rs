//! Scenario files: a genesis account and an ordered list of calls.
//!
//! ```json
//! {
//!   "genesis": "0x1111111111111111111111111111111111111111",
//!   "steps": [
//!     { "caller": "0x1111111111111111111111111111111111111111",
//!       "call": { "op": "transfer", "to": "0x2222222222222222222222222222222222222222", "amount": "1000" } }
//!   ]
//! }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use cudos_token::{Address, Call};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

/// A scripted session against a fresh ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Account that deploys the token.
    pub genesis: Address,
    /// Calls to execute, in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One call and the account making it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Account making the call.
    pub caller: Address,
    /// The call itself.
    pub call: Call,
    /// Optional note shown next to the outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Scenario`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        serde_json::from_str(json).map_err(|e| CliError::Scenario(e.to_string()))
    }

    /// Load a scenario from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let scenario = Self::from_json(&contents)
            .map_err(|e| CliError::Scenario(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), steps = scenario.steps.len(), "loaded scenario");
        Ok(scenario)
    }

    /// Every non-null account mentioned anywhere in the scenario, sorted.
    #[must_use]
    pub fn accounts(&self) -> Vec<Address> {
        let mut accounts = BTreeSet::new();
        accounts.insert(self.genesis);
        for step in &self.steps {
            accounts.insert(step.caller);
            accounts.extend(step.call.addresses());
        }
        accounts.into_iter().filter(|a| !a.is_zero()).collect()
    }
}
