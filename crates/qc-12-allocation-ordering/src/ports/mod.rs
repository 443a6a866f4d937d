//! Ports module for Allocation Ordering
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::AllocationOrderingApi;
pub use outbound::{AllocationDecoder, BlockTransaction, DiagnosticSink};
