//! Kahn's Topological Sort Algorithm
//!
//! O(V + E) complexity, detects cycles. Works on out-degrees so the natural
//! output lists vertices with no remaining dependents first.

use crate::domain::entities::AllocationGraph;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::VertexIndex;
use std::collections::BinaryHeap;

/// Topological walk emitting every vertex after all of its successors.
///
/// Among vertices that are ready together, the highest index goes first,
/// so that [`sender_first_order`] keeps independent vertices in ascending
/// (first-sighting) order.
///
/// Returns `Err(NotAcyclic)` when a cycle (including a self-loop) keeps
/// some vertices from ever becoming ready.
pub fn dependents_first_order(graph: &AllocationGraph) -> Result<Vec<VertexIndex>, OrderingError> {
    let n = graph.vertex_count();

    // 1. Out-degree per vertex and predecessor lists (parallel edges repeated)
    let mut out_degree = vec![0usize; n];
    let mut predecessors: Vec<Vec<VertexIndex>> = vec![Vec::new(); n];
    for (from, to) in graph.edges() {
        out_degree[from] += 1;
        predecessors[to].push(from);
    }

    // 2. Seed with vertices that fund nobody
    let mut ready: BinaryHeap<VertexIndex> = (0..n).filter(|&v| out_degree[v] == 0).collect();

    // 3. Peel ready vertices, releasing their predecessors
    let mut order = Vec::with_capacity(n);
    while let Some(vertex) = ready.pop() {
        order.push(vertex);
        for &pred in &predecessors[vertex] {
            out_degree[pred] = out_degree[pred].saturating_sub(1);
            if out_degree[pred] == 0 {
                ready.push(pred);
            }
        }
    }

    // 4. Cycle detection: if not all vertices sorted, there's a cycle
    if order.len() < n {
        return Err(OrderingError::NotAcyclic {
            remaining: n - order.len(),
        });
    }

    Ok(order)
}

/// Topological order in which every sender precedes the receivers it funds.
pub fn sender_first_order(graph: &AllocationGraph) -> Result<Vec<VertexIndex>, OrderingError> {
    let mut order = dependents_first_order(graph)?;
    order.reverse();
    Ok(order)
}
