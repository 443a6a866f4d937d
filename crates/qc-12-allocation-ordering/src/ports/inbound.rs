//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{
    Block, BlockDag, BlockTemplate, BlockTotals, PruneOutcome, SortOutcome,
};
use crate::domain::errors::OrderingError;

/// Primary Allocation Ordering API
pub trait AllocationOrderingApi<Tx>: Send + Sync {
    /// Build the sender/receiver graph for a block.
    ///
    /// Returns `None` when the block carries no asset allocations.
    fn build_dag(&self, transactions: &[Tx]) -> Option<BlockDag>;

    /// Block assembly: drop every allocation whose sender sits on a circuit,
    /// adjusting the template's parallel arrays and running totals.
    ///
    /// Never fails.
    fn remove_cycles(&self, template: &mut BlockTemplate<Tx>, totals: &mut BlockTotals)
        -> PruneOutcome;

    /// Block validation: rewrite the block into sender-first order.
    ///
    /// Any `Err` means the block's ordering is invalid and the block must be
    /// rejected; the block is left untouched.
    fn topological_sort(&self, block: &mut Block<Tx>) -> Result<SortOutcome, OrderingError>;
}
