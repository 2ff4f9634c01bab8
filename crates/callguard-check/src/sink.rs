//! Diagnostic sinks for non-fatal guard notices.

use parking_lot::Mutex;

use crate::diagnostics::ArityIncongruity;

/// Receives non-fatal diagnostics emitted by a guard.
///
/// Sinks are shared across calls and threads, so implementations must be
/// `Send + Sync` and must not block the guarded call for long.
pub trait DiagnosticSink: Send + Sync {
    /// Called once per invocation whose arity is incongruent.
    fn arity_incongruity(&self, notice: &ArityIncongruity);
}

/// Emits notices as `tracing` warnings. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn arity_incongruity(&self, notice: &ArityIncongruity) {
        tracing::warn!(
            function = %notice.function,
            specifiers = notice.specifier_count,
            parameters = notice.parameter_count,
            "{notice}"
        );
    }
}

/// Discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn arity_incongruity(&self, _notice: &ArityIncongruity) {}
}

/// In-memory sink for tests and callers that inspect notices.
#[derive(Debug, Default)]
pub struct MemorySink {
    notices: Mutex<Vec<ArityIncongruity>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every notice received so far.
    pub fn notices(&self) -> Vec<ArityIncongruity> {
        self.notices.lock().clone()
    }

    /// Removes and returns all notices.
    pub fn take(&self) -> Vec<ArityIncongruity> {
        std::mem::take(&mut *self.notices.lock())
    }

    pub fn len(&self) -> usize {
        self.notices.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn arity_incongruity(&self, notice: &ArityIncongruity) {
        self.notices.lock().push(notice.clone());
    }
}
