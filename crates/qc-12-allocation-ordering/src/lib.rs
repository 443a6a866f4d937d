//! # QC-12: Allocation Ordering Subsystem
//!
//! Per-block ordering of asset allocation transactions. Accounts that send
//! a tracked asset to other accounts in the same block are processed
//! strictly before those receivers, and no block with a circular
//! sender/receiver dependency is accepted.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (AllocationGraph, BlockDag, BlockTemplate, BlockTotals)
//! - **Algorithms**: DAG building, circuit enumeration, SCC, Kahn's sort,
//!   cycle pruning (assembly) and topological ordering (validation)
//! - **Ports**: Inbound (AllocationOrderingApi) and Outbound (AllocationDecoder, DiagnosticSink)
//! - **Adapters**: Diagnostic sinks (tracing, null, in-memory)
//! - **Application**: Service orchestration
//!
//! ## Paths
//!
//! - Assembly: [`AllocationOrderingApi::remove_cycles`] never fails, it only
//!   removes transactions and keeps the running totals exact.
//! - Validation: [`AllocationOrderingApi::topological_sort`] either rewrites
//!   the block into sender-first order or returns an [`OrderingError`] that
//!   must make the caller reject the block.

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{MemoryDiagnosticSink, NullDiagnosticSink, TracingDiagnosticSink};
pub use application::service::AllocationOrderingService;
pub use config::OrderingConfig;
pub use domain::entities::*;
pub use domain::errors::{ConfigError, OrderingError};
pub use domain::value_objects::*;
pub use ports::inbound::AllocationOrderingApi;
pub use ports::outbound::{AllocationDecoder, BlockTransaction, DiagnosticSink};
