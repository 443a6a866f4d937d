//! Allocation DAG Builder
//!
//! Builds the sender/receiver graph of one block from its asset
//! allocation transactions.

use crate::domain::entities::BlockDag;
use crate::ports::outbound::{AllocationDecoder, DiagnosticSink};

/// Build the allocation graph for a block's transactions.
///
/// For every transaction that decodes as alias-annotated and then as an
/// asset allocation:
/// 1. The sender gets a vertex (on first sighting) and the position is
///    appended to its SenderTxIndex entry
/// 2. Each receiver gets a vertex and an edge sender → receiver is added
///    (parallel edges kept)
///
/// Returns `None` when no sender was recorded: the block has no ordering
/// dependencies. The coinbase at position 0 never decodes and is skipped.
pub fn build_allocation_dag<D, S>(
    transactions: &[D::Transaction],
    decoder: &D,
    sink: &S,
    trace_graph: bool,
) -> Option<BlockDag>
where
    D: AllocationDecoder + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    let mut dag = BlockDag::new();

    for (position, tx) in transactions.iter().enumerate() {
        let Some(envelope) = decoder.decode_alias(tx) else {
            continue;
        };
        let Some(allocation) = decoder.decode_allocation(tx) else {
            continue;
        };
        let Some(sender) = envelope.sender() else {
            continue;
        };

        let (sender_vertex, created) = dag.vertex_for(&sender);
        if created && trace_graph {
            sink.record(&format!("add vertex {} for sender {}", sender_vertex, sender));
        }
        dag.record_sender_tx(sender_vertex, position);
        sink.record(&format!(
            "found asset allocation from sender {} at position {}",
            sender, position
        ));

        for receiver in allocation.receivers() {
            let (receiver_vertex, created) = dag.vertex_for(receiver);
            if created && trace_graph {
                sink.record(&format!(
                    "add vertex {} for receiver {}",
                    receiver_vertex, receiver
                ));
            }
            dag.graph.add_edge(sender_vertex, receiver_vertex);
            if trace_graph {
                sink.record(&format!(
                    "add edge from {}(index {}) to {}(index {})",
                    sender, sender_vertex, receiver, receiver_vertex
                ));
            }
        }
    }

    dag.has_dependencies().then_some(dag)
}
