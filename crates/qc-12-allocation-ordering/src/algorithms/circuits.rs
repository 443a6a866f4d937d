//! Elementary Circuit Enumeration
//!
//! Hawick–James variant of Johnson's algorithm. Works directly on
//! multigraphs with self-loops: parallel edges are collapsed while
//! searching, so each distinct elementary circuit is reported once, and a
//! self-loop is reported as a one-vertex circuit.
//!
//! The walk keeps explicit frames and only visits vertices of non-trivial
//! strongly connected components, so acyclic graphs cost O(V + E).

use crate::algorithms::scc::strongly_connected_components;
use crate::domain::entities::AllocationGraph;
use crate::domain::value_objects::{Circuit, VertexIndex};
use std::ops::ControlFlow;

/// Enumerate elementary circuits, handing each one to `visit`.
///
/// A circuit is passed as its vertices in traversal order, starting at its
/// lowest vertex index (the start is not repeated at the end). Returning
/// `ControlFlow::Break` halts the search.
///
/// Returns the number of circuits visited.
pub fn for_each_circuit<F>(graph: &AllocationGraph, visit: F) -> usize
where
    F: FnMut(&[VertexIndex]) -> ControlFlow<()>,
{
    let mut search = CircuitSearch::new(graph, visit);
    search.run();
    search.count
}

/// Collect every elementary circuit of `graph`.
pub fn elementary_circuits(graph: &AllocationGraph) -> Vec<Circuit> {
    let mut circuits = Vec::new();
    for_each_circuit(graph, |vertices| {
        circuits.push(Circuit(vertices.to_vec()));
        ControlFlow::Continue(())
    });
    circuits
}

struct CircuitSearch<F> {
    /// Sorted, deduplicated successors inside the vertex's own strongly
    /// connected component; empty for vertices on no circuit
    adjacency: Vec<Vec<VertexIndex>>,
    cyclic: Vec<bool>,
    blocked: Vec<bool>,
    blocked_by: Vec<Vec<VertexIndex>>,
    stack: Vec<VertexIndex>,
    start: VertexIndex,
    count: usize,
    halted: bool,
    visit: F,
}

/// One pending vertex of the depth-first walk
struct Frame {
    vertex: VertexIndex,
    next: usize,
    found: bool,
}

impl Frame {
    fn new(vertex: VertexIndex) -> Self {
        Self {
            vertex,
            next: 0,
            found: false,
        }
    }
}

impl<F> CircuitSearch<F>
where
    F: FnMut(&[VertexIndex]) -> ControlFlow<()>,
{
    fn new(graph: &AllocationGraph, visit: F) -> Self {
        let n = graph.vertex_count();

        let mut component_of = vec![0usize; n];
        let mut cyclic = vec![false; n];
        for (id, component) in strongly_connected_components(graph).iter().enumerate() {
            let on_circuit = component.len() > 1 || graph.has_self_loop(component[0]);
            for &v in component {
                component_of[v] = id;
                cyclic[v] = on_circuit;
            }
        }

        let adjacency = (0..n)
            .map(|v| {
                if !cyclic[v] {
                    return Vec::new();
                }
                let mut succ: Vec<VertexIndex> = graph
                    .successors(v)
                    .iter()
                    .copied()
                    .filter(|&w| component_of[w] == component_of[v])
                    .collect();
                succ.sort_unstable();
                succ.dedup();
                succ
            })
            .collect();

        Self {
            adjacency,
            cyclic,
            blocked: vec![false; n],
            blocked_by: vec![Vec::new(); n],
            stack: Vec::new(),
            start: 0,
            count: 0,
            halted: false,
            visit,
        }
    }

    fn run(&mut self) {
        for start in 0..self.adjacency.len() {
            if self.halted {
                return;
            }
            if !self.cyclic[start] {
                continue;
            }
            self.start = start;
            for v in start..self.adjacency.len() {
                self.blocked[v] = false;
                self.blocked_by[v].clear();
            }
            self.search();
        }
    }

    /// Iterative circuit search rooted at `self.start`
    fn search(&mut self) {
        let start = self.start;
        self.stack.clear();
        self.stack.push(start);
        self.blocked[start] = true;
        let mut frames = vec![Frame::new(start)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.vertex;

            if frame.next < self.adjacency[v].len() {
                let w = self.adjacency[v][frame.next];
                frame.next += 1;

                // Circuits through lower vertices were reported from their start
                if w < start {
                    continue;
                }
                if w == start {
                    frame.found = true;
                    self.count += 1;
                    if (self.visit)(&self.stack).is_break() {
                        self.halted = true;
                        return;
                    }
                } else if !self.blocked[w] {
                    self.stack.push(w);
                    self.blocked[w] = true;
                    frames.push(Frame::new(w));
                }
                continue;
            }

            let found = frame.found;
            frames.pop();

            if found {
                self.unblock(v);
            } else {
                for i in 0..self.adjacency[v].len() {
                    let w = self.adjacency[v][i];
                    if w >= start && !self.blocked_by[w].contains(&v) {
                        self.blocked_by[w].push(v);
                    }
                }
            }
            self.stack.pop();

            if found {
                if let Some(parent) = frames.last_mut() {
                    parent.found = true;
                }
            }
        }
    }

    fn unblock(&mut self, u: VertexIndex) {
        self.blocked[u] = false;
        let mut pending = std::mem::take(&mut self.blocked_by[u]);
        while let Some(w) = pending.pop() {
            if self.blocked[w] {
                self.blocked[w] = false;
                pending.append(&mut self.blocked_by[w]);
            }
        }
    }
}
