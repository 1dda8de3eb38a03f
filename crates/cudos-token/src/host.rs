//! Serialized execution of calls against a single token instance.
//!
//! The host stands in for the environment that runs the token: it orders
//! callers, assigns every committed operation a sequence number, and only
//! then makes the operation's events visible to sinks and the journal.
//! Genesis is committed as sequence 0.
//!
//! Sinks run after the state lock is released, so a sink may read the host
//! through [`Host::query`] or [`Host::journal`]. A sink must not call
//! [`Host::execute`]. Publication is serialized in commit order.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::Address;
use crate::call::Call;
use crate::error::Result;
use crate::events::LedgerEvent;
use crate::sink::{BoxedEventSink, EventSink};
use crate::token::CudosToken;

/// Record of one committed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Commit sequence number.
    pub sequence: u64,
    /// Account that made the call.
    pub caller: Address,
    /// The call, or `None` for genesis.
    pub call: Option<Call>,
    /// Events emitted, in order.
    pub events: Vec<LedgerEvent>,
    /// Commit timestamp.
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug)]
struct HostState {
    token: CudosToken,
    next_sequence: u64,
    journal: Vec<Receipt>,
}

/// Executes calls one at a time and publishes their events.
pub struct Host {
    state: Mutex<HostState>,
    // held by a writer from dispatch until its sinks return; readers skip it
    publishing: Mutex<()>,
    sinks: Vec<BoxedEventSink>,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("state", &self.state)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Host {
    /// Creates a new host builder.
    #[must_use]
    pub fn builder() -> HostBuilder {
        HostBuilder::default()
    }

    /// Deploys a token with no event sinks.
    ///
    /// # Errors
    ///
    /// Returns an error if `genesis` is the null address.
    pub fn deploy(genesis: Address) -> Result<Self> {
        Self::builder().deploy(genesis)
    }

    /// Executes `call` on behalf of `caller`.
    ///
    /// On failure nothing is committed and the sequence does not advance.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying token operation.
    pub fn execute(&self, caller: Address, call: Call) -> Result<Receipt> {
        let _publishing = self.publishing.lock();
        let mut state = self.state.lock();
        state.token.dispatch(&caller, &call)?;
        let events = state.token.take_events();
        let receipt = Self::commit(&mut state, caller, Some(call), events);
        drop(state);

        self.publish(&receipt);
        Ok(receipt)
    }

    /// Runs a read-only query against the current state.
    pub fn query<R>(&self, f: impl FnOnce(&CudosToken) -> R) -> R {
        let state = self.state.lock();
        f(&state.token)
    }

    /// Every committed receipt, oldest first.
    #[must_use]
    pub fn journal(&self) -> Vec<Receipt> {
        self.state.lock().journal.clone()
    }

    /// Sequence number of the most recent commit.
    #[must_use]
    pub fn last_sequence(&self) -> u64 {
        self.state.lock().next_sequence.saturating_sub(1)
    }

    fn commit(
        state: &mut HostState,
        caller: Address,
        call: Option<Call>,
        events: Vec<LedgerEvent>,
    ) -> Receipt {
        let sequence = state.next_sequence;
        state.next_sequence += 1;

        let receipt = Receipt {
            sequence,
            caller,
            call,
            events,
            committed_at: Utc::now(),
        };
        debug!(
            sequence,
            %caller,
            events = receipt.events.len(),
            "committed"
        );
        state.journal.push(receipt.clone());
        receipt
    }

    fn publish(&self, receipt: &Receipt) {
        for event in &receipt.events {
            for sink in &self.sinks {
                sink.publish(receipt.sequence, event);
            }
        }
    }
}

/// Builder for [`Host`] instances.
#[derive(Default)]
pub struct HostBuilder {
    sinks: Vec<BoxedEventSink>,
}

impl HostBuilder {
    /// Adds an event sink.
    #[must_use]
    pub fn sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Deploys the token and commits genesis.
    ///
    /// # Errors
    ///
    /// Returns an error if `genesis` is the null address.
    pub fn deploy(self, genesis: Address) -> Result<Host> {
        let mut token = CudosToken::new(genesis)?;
        let events = token.take_events();
        let mut state = HostState {
            token,
            next_sequence: 0,
            journal: Vec::new(),
        };
        let receipt = Host::commit(&mut state, genesis, None, events);
        let host = Host {
            state: Mutex::new(state),
            publishing: Mutex::new(()),
            sinks: self.sinks,
        };
        host.publish(&receipt);
        Ok(host)
    }
}
