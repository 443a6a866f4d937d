//! Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators consumed by this subsystem, never implemented here.

use crate::domain::value_objects::{AliasEnvelope, AssetAllocation};

/// Transaction envelope decoder and asset allocation payload model.
pub trait AllocationDecoder: Send + Sync {
    /// Block transaction type this decoder understands
    type Transaction;

    /// Decode the alias envelope.
    ///
    /// Returns `None` when the transaction is not alias-annotated.
    fn decode_alias(&self, tx: &Self::Transaction) -> Option<AliasEnvelope>;

    /// Decode the asset allocation payload.
    ///
    /// Returns `None` when the transaction is not an asset allocation
    /// (alias-only or unrelated).
    fn decode_allocation(&self, tx: &Self::Transaction) -> Option<AssetAllocation>;
}

/// Serialized size of a block transaction
pub trait BlockTransaction: Clone {
    fn serialized_size(&self) -> u64;
}

/// Receiver of human-readable trace lines. Purely observational.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, line: &str);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn record(&self, line: &str) {
        (**self).record(line)
    }
}
