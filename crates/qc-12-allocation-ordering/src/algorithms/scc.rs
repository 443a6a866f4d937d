//! Strongly Connected Components (Tarjan, iterative)
//!
//! A vertex lies on some elementary circuit exactly when its component has
//! two or more vertices or it carries a self-loop.

use crate::domain::entities::AllocationGraph;
use crate::domain::value_objects::VertexIndex;
use std::collections::BTreeSet;

/// Compute the strongly connected components of `graph`.
///
/// Components are emitted in reverse topological order of the condensation.
pub fn strongly_connected_components(graph: &AllocationGraph) -> Vec<Vec<VertexIndex>> {
    let n = graph.vertex_count();
    let mut index: Vec<Option<usize>> = vec![None; n];
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<VertexIndex> = Vec::new();
    let mut next_index = 0usize;
    let mut components = Vec::new();

    for root in 0..n {
        if index[root].is_some() {
            continue;
        }

        // (vertex, next successor offset)
        let mut frames: Vec<(VertexIndex, usize)> = vec![(root, 0)];
        index[root] = Some(next_index);
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;

        while let Some(frame) = frames.last_mut() {
            let (v, offset) = *frame;
            let successors = graph.successors(v);

            if offset < successors.len() {
                frame.1 += 1;
                let w = successors[offset];
                match index[w] {
                    None => {
                        index[w] = Some(next_index);
                        lowlink[w] = next_index;
                        next_index += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        frames.push((w, 0));
                    }
                    Some(w_index) if on_stack[w] => {
                        lowlink[v] = lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }

            if Some(lowlink[v]) == index[v] {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                component.sort_unstable();
                components.push(component);
            }
        }
    }

    components
}

/// Every vertex that participates in at least one elementary circuit.
pub fn cyclic_vertices(graph: &AllocationGraph) -> BTreeSet<VertexIndex> {
    strongly_connected_components(graph)
        .into_iter()
        .filter(|component| component.len() > 1 || graph.has_self_loop(component[0]))
        .flatten()
        .collect()
}
