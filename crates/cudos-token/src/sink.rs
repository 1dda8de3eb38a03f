//! Consumers of committed ledger events.
//!
//! The [`Host`](crate::host::Host) forwards every committed event to its
//! sinks, in commit order.

use crate::events::LedgerEvent;

/// Trait for event consumers.
///
/// Implement this trait to feed committed events into an indexer, a log
/// file or any other downstream store.
pub trait EventSink: Send + Sync {
    /// Publishes one committed event.
    fn publish(&self, sequence: u64, event: &LedgerEvent);
}

/// Event sink that emits structured `tracing` records.
#[derive(Debug, Clone, Default)]
pub struct TracingEventSink {
    /// Optional prefix for all log messages.
    prefix: Option<String>,
}

impl TracingEventSink {
    /// Creates a new tracing-based event sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracing-based event sink with a message prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

impl EventSink for TracingEventSink {
    fn publish(&self, sequence: u64, event: &LedgerEvent) {
        let name = event.name();
        let json = event.to_json().unwrap_or_else(|_| "{}".to_string());
        let prefix = self.prefix.as_deref().unwrap_or("CUDOS");

        tracing::info!(
            target: "cudos_token::events",
            sequence,
            event = name,
            event_json = %json,
            "[{prefix}] {event}"
        );
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl NoopEventSink {
    /// Creates a new no-op sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EventSink for NoopEventSink {
    fn publish(&self, _sequence: u64, _event: &LedgerEvent) {}
}

/// A boxed event sink for dynamic dispatch.
pub type BoxedEventSink = Box<dyn EventSink>;

impl EventSink for BoxedEventSink {
    fn publish(&self, sequence: u64, event: &LedgerEvent) {
        (**self).publish(sequence, event);
    }
}
