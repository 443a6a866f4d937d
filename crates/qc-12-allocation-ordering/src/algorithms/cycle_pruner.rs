//! Cycle Pruner (block assembly path)
//!
//! Removes every allocation transaction whose sender sits on a circuit of
//! the block's allocation graph, keeping the template's running totals in
//! lockstep with the removals.

use crate::algorithms::circuits::for_each_circuit;
use crate::algorithms::dag_builder::build_allocation_dag;
use crate::algorithms::scc::cyclic_vertices;
use crate::config::OrderingConfig;
use crate::domain::entities::{AllocationGraph, BlockDag, BlockTemplate, BlockTotals, PruneOutcome};
use crate::domain::value_objects::{TxPosition, VertexIndex};
use crate::ports::outbound::{AllocationDecoder, BlockTransaction, DiagnosticSink};
use std::collections::BTreeSet;
use std::ops::ControlFlow;

/// Remove cyclic allocation transactions from a block template.
///
/// Never fails: a block without allocations or without circuits yields
/// `PruneOutcome::NoChange`, and stale positions are skipped.
pub fn prune_cycles<D, S>(
    template: &mut BlockTemplate<D::Transaction>,
    totals: &mut BlockTotals,
    decoder: &D,
    sink: &S,
    config: &OrderingConfig,
) -> PruneOutcome
where
    D: AllocationDecoder + ?Sized,
    D::Transaction: BlockTransaction,
    S: DiagnosticSink + ?Sized,
{
    let Some(dag) = build_allocation_dag(
        &template.block.transactions,
        decoder,
        sink,
        config.trace_graph,
    ) else {
        return PruneOutcome::NoChange;
    };

    let cleared = implicated_vertices(&dag.graph, config.max_enumerated_circuits, sink);
    if cleared.is_empty() {
        return PruneOutcome::NoChange;
    }

    let positions = positions_to_remove(&dag, &cleared, template, sink);
    remove_positions(template, totals, &positions, sink);

    PruneOutcome::Pruned {
        cleared_vertices: cleared.len(),
        removed_positions: positions,
    }
}

/// Vertices appearing in at least one elementary circuit, deduplicated.
///
/// Circuits are enumerated up to `max_circuits`; past that budget the
/// remaining cyclic vertices come from strongly connected components,
/// which yields the same set.
pub fn implicated_vertices<S>(
    graph: &AllocationGraph,
    max_circuits: usize,
    sink: &S,
) -> BTreeSet<VertexIndex>
where
    S: DiagnosticSink + ?Sized,
{
    let mut cleared = BTreeSet::new();
    let mut enumerated = 0usize;
    let mut halted = false;

    let found = for_each_circuit(graph, |circuit| {
        sink.record(&format!("found circuit {:?}", circuit));
        cleared.extend(circuit.iter().copied());
        enumerated += 1;
        // Nothing left to learn once every vertex is implicated
        if cleared.len() == graph.vertex_count() {
            return ControlFlow::Break(());
        }
        if enumerated >= max_circuits {
            halted = true;
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    });

    if halted {
        sink.record(&format!(
            "circuit budget of {} reached, completing from strongly connected components",
            max_circuits
        ));
        cleared.extend(cyclic_vertices(graph));
    }

    sink.record(&format!(
        "found {} circuits implicating {} vertices",
        found,
        cleared.len()
    ));
    cleared
}

/// Positions contributed by senders in `cleared`, highest first.
fn positions_to_remove<Tx, S>(
    dag: &BlockDag,
    cleared: &BTreeSet<VertexIndex>,
    template: &BlockTemplate<Tx>,
    sink: &S,
) -> Vec<TxPosition>
where
    S: DiagnosticSink + ?Sized,
{
    let bound = template.block.len();

    let mut positions = Vec::new();
    for &vertex in cleared {
        sink.record(&format!("trying to clear vertex {}", vertex));
        // Receiver-only vertices contribute nothing
        for &position in dag.sender_positions(vertex) {
            if position >= bound {
                continue;
            }
            sink.record(&format!("outputs to remove {}", position));
            positions.push(position);
        }
    }

    positions.sort_unstable_by(|a, b| b.cmp(a));
    positions.dedup();
    positions
}

/// Erase `positions` (strictly descending) from the template and totals.
fn remove_positions<Tx, S>(
    template: &mut BlockTemplate<Tx>,
    totals: &mut BlockTotals,
    positions: &[TxPosition],
    sink: &S,
) where
    Tx: BlockTransaction,
    S: DiagnosticSink + ?Sized,
{
    debug_assert_eq!(template.tx_fees.len(), template.block.len());
    debug_assert_eq!(template.tx_sig_ops.len(), template.block.len());

    for &position in positions {
        sink.record(&format!("reversed outputs to remove {}", position));

        let tx = template.block.transactions.remove(position);
        // Short metadata arrays are a caller error; the transaction still goes
        if position < template.tx_fees.len() {
            totals.fees -= template.tx_fees.remove(position);
        }
        if position < template.tx_sig_ops.len() {
            totals.sig_ops -= template.tx_sig_ops.remove(position);
        }
        totals.size -= tx.serialized_size();
        totals.tx_count -= 1;
    }
}
