//! Core entities for Allocation Ordering

use super::value_objects::{Amount, Identity, TxPosition, VertexIndex};
use std::collections::{BTreeMap, HashMap};

/// Directed multigraph over block identities.
///
/// Parallel edges are kept; a self-edge is valid.
#[derive(Debug, Clone, Default)]
pub struct AllocationGraph {
    /// Adjacency list: vertex -> [successor, successor, ...]
    adjacency: Vec<Vec<VertexIndex>>,
    edge_count: usize,
}

impl AllocationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self) -> VertexIndex {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    /// Add an edge; both endpoints must already exist
    pub fn add_edge(&mut self, from: VertexIndex, to: VertexIndex) {
        debug_assert!(to < self.adjacency.len());
        self.adjacency[from].push(to);
        self.edge_count += 1;
    }

    /// Successors of `vertex`, parallel edges repeated
    pub fn successors(&self, vertex: VertexIndex) -> &[VertexIndex] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_edge(&self, from: VertexIndex, to: VertexIndex) -> bool {
        self.successors(from).contains(&to)
    }

    pub fn has_self_loop(&self, vertex: VertexIndex) -> bool {
        self.has_edge(vertex, vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterate every edge as (from, to)
    pub fn edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, targets)| targets.iter().map(move |&to| (from, to)))
    }
}

/// Dependency graph built from one block
#[derive(Debug, Clone, Default)]
pub struct BlockDag {
    pub graph: AllocationGraph,
    /// Vertex -> identity (first-sighting order)
    pub identities: Vec<Identity>,
    /// Identity -> vertex
    pub vertex_by_identity: HashMap<Identity, VertexIndex>,
    /// Sender vertex -> block positions it contributed, in block order
    pub sender_tx_index: BTreeMap<VertexIndex, Vec<TxPosition>>,
}

impl BlockDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the vertex for `identity`, allocating one on first sighting.
    ///
    /// Returns the vertex and whether it was just created.
    pub fn vertex_for(&mut self, identity: &Identity) -> (VertexIndex, bool) {
        if let Some(&vertex) = self.vertex_by_identity.get(identity) {
            return (vertex, false);
        }
        let vertex = self.graph.add_vertex();
        self.identities.push(identity.clone());
        self.vertex_by_identity.insert(identity.clone(), vertex);
        (vertex, true)
    }

    pub fn record_sender_tx(&mut self, sender: VertexIndex, position: TxPosition) {
        self.sender_tx_index.entry(sender).or_default().push(position);
    }

    pub fn vertex_of(&self, identity: &Identity) -> Option<VertexIndex> {
        self.vertex_by_identity.get(identity).copied()
    }

    pub fn identity_of(&self, vertex: VertexIndex) -> Option<&Identity> {
        self.identities.get(vertex)
    }

    /// Positions recorded for `vertex`; empty for receiver-only vertices
    pub fn sender_positions(&self, vertex: VertexIndex) -> &[TxPosition] {
        self.sender_tx_index
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when at least one sender was recorded
    pub fn has_dependencies(&self) -> bool {
        !self.sender_tx_index.is_empty()
    }

    /// Whether `position` belongs to any sender entry
    pub fn is_dependent_position(&self, position: TxPosition) -> bool {
        self.sender_tx_index
            .values()
            .any(|positions| positions.contains(&position))
    }
}

/// Finalized or in-progress block: ordered transactions, coinbase at 0
#[derive(Debug, Clone, PartialEq)]
pub struct Block<Tx> {
    pub transactions: Vec<Tx>,
}

impl<Tx> Block<Tx> {
    pub fn new(transactions: Vec<Tx>) -> Self {
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Block template under assembly with per-transaction economic metadata.
///
/// `tx_fees` and `tx_sig_ops` are parallel to `block.transactions`
/// (index 0 belongs to the coinbase).
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTemplate<Tx> {
    pub block: Block<Tx>,
    pub tx_fees: Vec<Amount>,
    pub tx_sig_ops: Vec<u32>,
}

impl<Tx> BlockTemplate<Tx> {
    pub fn new(block: Block<Tx>, tx_fees: Vec<Amount>, tx_sig_ops: Vec<u32>) -> Self {
        Self {
            block,
            tx_fees,
            tx_sig_ops,
        }
    }
}

/// Aggregate running totals maintained while assembling a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockTotals {
    pub fees: Amount,
    pub sig_ops: u32,
    pub size: u64,
    pub tx_count: u64,
}

/// Result of running cycle pruning over a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOutcome {
    /// No allocation transactions, or no circuits: template untouched
    NoChange,
    /// One or more circuits were cleared
    Pruned {
        /// Distinct vertices that appeared in any circuit
        cleared_vertices: usize,
        /// Removed positions, highest first
        removed_positions: Vec<TxPosition>,
    },
}

impl PruneOutcome {
    /// Count of distinct implicated vertices (0 when nothing changed)
    pub fn cleared_vertices(&self) -> usize {
        match self {
            PruneOutcome::NoChange => 0,
            PruneOutcome::Pruned {
                cleared_vertices, ..
            } => *cleared_vertices,
        }
    }

    pub fn removed_positions(&self) -> &[TxPosition] {
        match self {
            PruneOutcome::NoChange => &[],
            PruneOutcome::Pruned {
                removed_positions, ..
            } => removed_positions,
        }
    }

    pub fn is_no_change(&self) -> bool {
        matches!(self, PruneOutcome::NoChange)
    }
}

/// Result of a successful topological validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    /// No allocation transactions: block already validly ordered
    NoDependencies,
    /// Block transactions rewritten into canonical order
    Reordered {
        /// Sender-first vertex order used for reconstruction
        vertex_order: Vec<VertexIndex>,
    },
}
