//! Domain invariants for Allocation Ordering

use super::entities::{AllocationGraph, BlockDag, BlockTemplate, BlockTotals};
use super::value_objects::VertexIndex;
use crate::ports::outbound::BlockTransaction;
use std::collections::HashMap;
use std::hash::Hash;

/// INVARIANT-1: Sender Precedes Receiver
/// For every edge sender → receiver where the receiver is itself a sender
/// in this block, all of the sender's transactions come first.
///
/// `positions` holds the original block position of each transaction, in
/// the order the transactions now appear.
pub fn invariant_senders_precede_receivers(dag: &BlockDag, positions: &[usize]) -> bool {
    let mut slot_of: HashMap<usize, usize> = HashMap::new();
    for (slot, &position) in positions.iter().enumerate() {
        slot_of.insert(position, slot);
    }

    let last_slot = |vertex: VertexIndex| {
        dag.sender_positions(vertex)
            .iter()
            .filter_map(|p| slot_of.get(p).copied())
            .max()
    };
    let first_slot = |vertex: VertexIndex| {
        dag.sender_positions(vertex)
            .iter()
            .filter_map(|p| slot_of.get(p).copied())
            .min()
    };

    dag.graph.edges().all(|(from, to)| {
        if from == to {
            return true;
        }
        match (last_slot(from), first_slot(to)) {
            (Some(sender_last), Some(receiver_first)) => sender_last < receiver_first,
            _ => true,
        }
    })
}

/// INVARIANT-2: No Cycles
/// The allocation graph must be a DAG (self-loops count as cycles).
pub fn invariant_no_cycles(graph: &AllocationGraph) -> bool {
    // Iterative DFS: a successor still on the recursion stack is a back edge
    let n = graph.vertex_count();
    let mut visited = vec![false; n];
    let mut rec_stack = vec![false; n];

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        rec_stack[root] = true;
        let mut frames: Vec<(VertexIndex, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            let (vertex, offset) = *frame;
            match graph.successors(vertex).get(offset) {
                Some(&next) => {
                    frame.1 += 1;
                    if rec_stack[next] {
                        return false; // Back edge found - cycle!
                    }
                    if !visited[next] {
                        visited[next] = true;
                        rec_stack[next] = true;
                        frames.push((next, 0));
                    }
                }
                None => {
                    rec_stack[vertex] = false;
                    frames.pop();
                }
            }
        }
    }

    true
}

/// INVARIANT-3: Totals Consistency
/// Parallel arrays match the transaction sequence and the aggregate count
/// equals its length.
pub fn invariant_totals_consistent<Tx>(template: &BlockTemplate<Tx>, totals: &BlockTotals) -> bool {
    let len = template.block.len();
    template.tx_fees.len() == len
        && template.tx_sig_ops.len() == len
        && totals.tx_count == len as u64
}

/// INVARIANT-4: Exact Accounting
/// Totals equal the sums over the template (coinbase fee excluded).
pub fn invariant_totals_exact<Tx: BlockTransaction>(
    template: &BlockTemplate<Tx>,
    totals: &BlockTotals,
) -> bool {
    let fees: i64 = template.tx_fees.iter().skip(1).sum();
    let sig_ops: u32 = template.tx_sig_ops.iter().sum();
    let size: u64 = template
        .block
        .transactions
        .iter()
        .map(|tx| tx.serialized_size())
        .sum();

    invariant_totals_consistent(template, totals)
        && totals.fees == fees
        && totals.sig_ops == sig_ops
        && totals.size == size
}

/// INVARIANT-5: Completeness
/// Reordering is a permutation: same multiset, nothing lost or duplicated.
pub fn invariant_permutation<T: Eq + Hash>(before: &[T], after: &[T]) -> bool {
    if before.len() != after.len() {
        return false;
    }
    let mut counts: HashMap<&T, isize> = HashMap::new();
    for item in before {
        *counts.entry(item).or_insert(0) += 1;
    }
    for item in after {
        *counts.entry(item).or_insert(0) -= 1;
    }
    counts.values().all(|&count| count == 0)
}
