//! Allocation Ordering Service
//!
//! Main service implementing AllocationOrderingApi.

use crate::adapters::TracingDiagnosticSink;
use crate::algorithms::{build_allocation_dag, order_block, prune_cycles};
use crate::config::OrderingConfig;
use crate::domain::entities::{
    Block, BlockDag, BlockTemplate, BlockTotals, PruneOutcome, SortOutcome,
};
use crate::domain::errors::{ConfigError, OrderingError};
use crate::ports::inbound::AllocationOrderingApi;
use crate::ports::outbound::{AllocationDecoder, BlockTransaction, DiagnosticSink};

use tracing::{debug, info, warn};

/// Allocation Ordering Service
///
/// Wires the envelope decoder and the diagnostic sink into:
/// 1. Cycle pruning while a block template is assembled
/// 2. Topological validation when a block is accepted
pub struct AllocationOrderingService<D, S = TracingDiagnosticSink> {
    config: OrderingConfig,
    decoder: D,
    sink: S,
}

impl<D: AllocationDecoder> AllocationOrderingService<D> {
    /// Create a new service with default config, tracing diagnostics
    pub fn new(decoder: D) -> Self {
        Self {
            config: OrderingConfig::default(),
            decoder,
            sink: TracingDiagnosticSink,
        }
    }

    /// Create a new service with custom config, tracing diagnostics
    pub fn with_config(decoder: D, config: OrderingConfig) -> Result<Self, ConfigError> {
        Self::with_sink(decoder, TracingDiagnosticSink, config)
    }
}

impl<D: AllocationDecoder, S: DiagnosticSink> AllocationOrderingService<D, S> {
    /// Create a new service with a custom diagnostic sink
    pub fn with_sink(decoder: D, sink: S, config: OrderingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            decoder,
            sink,
        })
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<D, S> AllocationOrderingApi<D::Transaction> for AllocationOrderingService<D, S>
where
    D: AllocationDecoder,
    D::Transaction: BlockTransaction,
    S: DiagnosticSink,
{
    fn build_dag(&self, transactions: &[D::Transaction]) -> Option<BlockDag> {
        let dag = build_allocation_dag(
            transactions,
            &self.decoder,
            &self.sink,
            self.config.trace_graph,
        );
        if let Some(dag) = &dag {
            debug!(
                tx_count = transactions.len(),
                vertex_count = dag.graph.vertex_count(),
                edge_count = dag.graph.edge_count(),
                "Built allocation DAG"
            );
        }
        dag
    }

    fn remove_cycles(
        &self,
        template: &mut BlockTemplate<D::Transaction>,
        totals: &mut BlockTotals,
    ) -> PruneOutcome {
        debug!(tx_count = template.block.len(), "Removing allocation cycles");

        let outcome = prune_cycles(template, totals, &self.decoder, &self.sink, &self.config);

        match &outcome {
            PruneOutcome::NoChange => {
                debug!("No allocation cycles in block template");
            }
            PruneOutcome::Pruned {
                cleared_vertices,
                removed_positions,
            } => {
                info!(
                    cleared_vertices = *cleared_vertices,
                    removed = removed_positions.len(),
                    remaining = template.block.len(),
                    fees = totals.fees,
                    "Pruned cyclic asset allocations from block template"
                );
            }
        }

        outcome
    }

    fn topological_sort(
        &self,
        block: &mut Block<D::Transaction>,
    ) -> Result<SortOutcome, OrderingError> {
        debug!(tx_count = block.len(), "Sorting block allocations");

        match order_block(block, &self.decoder, &self.sink, self.config.trace_graph) {
            Ok(SortOutcome::NoDependencies) => {
                debug!("Block has no allocation dependencies");
                Ok(SortOutcome::NoDependencies)
            }
            Ok(SortOutcome::Reordered { vertex_order }) => {
                info!(
                    tx_count = block.len(),
                    vertex_count = vertex_order.len(),
                    "Block allocations sorted topologically"
                );
                Ok(SortOutcome::Reordered { vertex_order })
            }
            Err(e) => {
                warn!(error = %e, "Block allocation ordering invalid");
                Err(e)
            }
        }
    }
}
