//! Diagnostic Sink Adapters
//!
//! Implements `DiagnosticSink` for the tracing stack, for discarding, and
//! for in-memory capture.

use crate::ports::outbound::DiagnosticSink;
use std::sync::Mutex;
use tracing::debug;

/// Forwards every diagnostic line to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn record(&self, line: &str) {
        debug!(subsystem = "qc-12", "[qc-12] {}", line);
    }
}

/// Discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnosticSink;

impl DiagnosticSink for NullDiagnosticSink {
    fn record(&self, _line: &str) {}
}

/// Buffers lines in memory for later inspection.
#[derive(Debug, Default)]
pub struct MemoryDiagnosticSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded lines
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl DiagnosticSink for MemoryDiagnosticSink {
    fn record(&self, line: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(line.to_string());
    }
}
