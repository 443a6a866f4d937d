//! Algorithms module for Allocation Ordering
//!
//! Contains:
//! - Allocation DAG builder
//! - Elementary circuit enumeration and SCC analysis
//! - Kahn's topological sort
//! - Cycle pruner (assembly) and topological orderer (validation)

pub mod circuits;
pub mod cycle_pruner;
pub mod dag_builder;
pub mod kahns;
pub mod scc;
pub mod topological_orderer;

pub use circuits::{elementary_circuits, for_each_circuit};
pub use cycle_pruner::{implicated_vertices, prune_cycles};
pub use dag_builder::build_allocation_dag;
pub use kahns::{dependents_first_order, sender_first_order};
pub use scc::{cyclic_vertices, strongly_connected_components};
pub use topological_orderer::order_block;
