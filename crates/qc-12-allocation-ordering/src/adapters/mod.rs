//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for integration with the node runtime.

mod diagnostics;

pub use diagnostics::{MemoryDiagnosticSink, NullDiagnosticSink, TracingDiagnosticSink};
