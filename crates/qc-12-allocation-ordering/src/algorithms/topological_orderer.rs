//! Topological Orderer (block validation path)
//!
//! Linearizes a finalized block so that every sender's allocation
//! transactions precede those of the receivers it funds, rejecting blocks
//! whose allocation graph admits no such order.

use crate::algorithms::dag_builder::build_allocation_dag;
use crate::algorithms::kahns::sender_first_order;
use crate::domain::entities::{Block, BlockDag, SortOutcome};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::VertexIndex;
use crate::ports::outbound::{AllocationDecoder, DiagnosticSink};
use std::collections::HashSet;

/// Rewrite `block` into canonical allocation order.
///
/// State machine:
/// - no allocations → `Ok(NoDependencies)`, block untouched
/// - cyclic graph → `Err(NotAcyclic)`, block untouched
/// - reconstruction length differs → `Err(LengthMismatch)`, block untouched
/// - otherwise → `Ok(Reordered)`, block transactions replaced
pub fn order_block<D, S>(
    block: &mut Block<D::Transaction>,
    decoder: &D,
    sink: &S,
    trace_graph: bool,
) -> Result<SortOutcome, OrderingError>
where
    D: AllocationDecoder + ?Sized,
    D::Transaction: Clone,
    S: DiagnosticSink + ?Sized,
{
    let Some(dag) = build_allocation_dag(&block.transactions, decoder, sink, trace_graph) else {
        return Ok(SortOutcome::NoDependencies);
    };

    let vertex_order = sender_first_order(&dag.graph).map_err(|err| {
        sink.record(&format!("not a DAG: {}", err));
        err
    })?;
    sink.record(&format!("topological ordering: {}", describe_order(&dag, &vertex_order)));

    let reordered = reconstruct(&block.transactions, &dag, &vertex_order);

    sink.record(&format!(
        "sorted size {} vs block size {}",
        reordered.len(),
        block.transactions.len()
    ));
    if reordered.len() != block.transactions.len() {
        sink.record(
            "sorted block transaction count does not match unsorted block transaction count",
        );
        return Err(OrderingError::LengthMismatch {
            expected: block.transactions.len(),
            actual: reordered.len(),
        });
    }

    block.transactions = reordered;
    Ok(SortOutcome::Reordered { vertex_order })
}

/// Coinbase, then allocation transactions in sender-first vertex order,
/// then every other transaction in its original order.
fn reconstruct<Tx: Clone>(
    transactions: &[Tx],
    dag: &BlockDag,
    vertex_order: &[VertexIndex],
) -> Vec<Tx> {
    let mut reordered = Vec::with_capacity(transactions.len());
    let Some(coinbase) = transactions.first() else {
        return reordered;
    };
    reordered.push(coinbase.clone());

    let mut dependent = HashSet::new();
    for &vertex in vertex_order {
        for &position in dag.sender_positions(vertex) {
            dependent.insert(position);
            if let Some(tx) = transactions.get(position) {
                reordered.push(tx.clone());
            }
        }
    }

    reordered.extend(
        transactions
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(position, _)| !dependent.contains(position))
            .map(|(_, tx)| tx.clone()),
    );
    reordered
}

fn describe_order(dag: &BlockDag, vertex_order: &[VertexIndex]) -> String {
    vertex_order
        .iter()
        .filter_map(|&vertex| dag.identity_of(vertex))
        .map(|identity| identity.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
