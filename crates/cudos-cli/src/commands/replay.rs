//! Scenario replay command.
//!
//! Deploys a fresh ledger, executes every step of a scenario in order and
//! reports the receipts, rejections and final account state.

use std::io::Write;
use std::path::PathBuf;

use cudos_token::{Address, Host, TracingEventSink};
use tracing::{info, warn};

use crate::cli::ReplayArgs;
use crate::error::CliError;
use crate::output::{AccountSummary, OutputFormat, ReplayReport, StepOutcome};
use crate::scenario::Scenario;

/// Replay command executor.
#[derive(Debug)]
pub struct ReplayCommand {
    scenario: PathBuf,
    genesis: Option<Address>,
    keep_going: bool,
}

impl ReplayCommand {
    /// Create a replay command from parsed arguments.
    #[must_use]
    pub fn new(args: &ReplayArgs) -> Self {
        Self {
            scenario: args.scenario.clone(),
            genesis: args.genesis,
            keep_going: args.keep_going,
        }
    }

    /// Load the scenario file and replay it.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario cannot be loaded, deployment fails,
    /// or a step is rejected without `--keep-going`.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let scenario = Scenario::load(&self.scenario)?;
        self.run(writer, format, scenario)
    }

    /// Replay an already-parsed scenario.
    ///
    /// The report is written even when a step aborts the run.
    ///
    /// # Errors
    ///
    /// See [`ReplayCommand::execute`].
    pub fn run<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        mut scenario: Scenario,
    ) -> Result<(), CliError> {
        if let Some(genesis) = self.genesis {
            scenario.genesis = genesis;
        }

        let host = Host::builder()
            .sink(TracingEventSink::new())
            .deploy(scenario.genesis)?;
        info!(genesis = %scenario.genesis, steps = scenario.steps.len(), "replaying scenario");

        let mut outcomes = Vec::with_capacity(scenario.steps.len());
        let mut abort = None;
        for (index, step) in scenario.steps.iter().enumerate() {
            let op = step.call.name();
            match host.execute(step.caller, step.call.clone()) {
                Ok(receipt) => outcomes.push(StepOutcome::Committed {
                    step: index,
                    label: step.label.clone(),
                    receipt,
                }),
                Err(error) => {
                    warn!(step = index, op, code = error.code(), "step rejected");
                    outcomes.push(StepOutcome::rejected(
                        index,
                        step.label.clone(),
                        step.caller,
                        op,
                        &error,
                    ));
                    if !self.keep_going {
                        abort = Some(CliError::Rejected {
                            step: index,
                            op,
                            source: error,
                        });
                        break;
                    }
                }
            }
        }

        let report = Self::report(&host, &scenario, outcomes);
        format.write(writer, &report)?;

        match abort {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn report(host: &Host, scenario: &Scenario, steps: Vec<StepOutcome>) -> ReplayReport {
        let accounts = host.query(|token| {
            scenario
                .accounts()
                .into_iter()
                .map(|address| AccountSummary {
                    address,
                    balance: token.balance_of(&address),
                    whitelist_admin: token.is_whitelist_admin(&address).unwrap_or(false),
                    whitelisted: token.is_whitelisted(&address).unwrap_or(false),
                })
                .collect()
        });
        ReplayReport {
            steps,
            last_sequence: host.last_sequence(),
            transfers_enabled: host.query(cudos_token::CudosToken::transfers_enabled),
            accounts,
        }
    }
}
