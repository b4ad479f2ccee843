//! Diagnostics sink for executed statements.
//!
//! Every statement a [`Connection`](crate::Connection) runs is offered to its
//! sink first. Sinks only observe; they cannot veto or alter execution.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

/// Receives the text of every statement before it is executed.
pub trait StatementSink {
    /// Records a statement about to be executed.
    fn record(&self, sql: &str);

    /// Reports a failure of a best-effort release step (closing the handle,
    /// ending a transaction from `Drop`) that cannot be returned to a caller.
    fn release_failed(&self, message: &str) {
        warn!(error = %message, "release failed");
    }
}

/// Sink emitting statements as `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatementSink for TracingSink {
    fn record(&self, sql: &str) {
        debug!(sql = %sql, "Executing SQL");
    }
}

/// Sink discarding statements. Release failures are still reported through
/// `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatementSink for NullSink {
    fn record(&self, _sql: &str) {}
}

/// Sink keeping every statement in memory, in execution order.
///
/// Clones share the same buffer, so a clone can be handed to a connection
/// while the original is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    statements: Arc<Mutex<Vec<String>>>,
    failures: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements recorded so far.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Release failures reported so far.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl StatementSink for MemorySink {
    fn record(&self, sql: &str) {
        if let Ok(mut statements) = self.statements.lock() {
            statements.push(sql.to_string());
        }
    }

    fn release_failed(&self, message: &str) {
        warn!(error = %message, "release failed");
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let handed_out = sink.clone();
        handed_out.record("SELECT 1;");
        handed_out.release_failed("boom");
        assert_eq!(sink.statements(), ["SELECT 1;"]);
        assert_eq!(sink.failures(), ["boom"]);
    }

    #[test]
    fn test_null_sink_ignores() {
        NullSink.record("SELECT 1;");
        TracingSink.record("SELECT 1;");
    }
}
