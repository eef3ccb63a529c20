use crate::graph::*;
use ahash::RandomState;
use num_traits::CheckedAdd;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// A concrete cycle found in a graph.
///
/// The `i`-th edge leads from the `i`-th vertex to the next one,
/// and the last edge leads back to the first vertex.
pub struct Cycle<'a, K, E> {
    edges: Vec<EdgeRef<'a, K, E>>,
}

impl<'a, K, E> Cycle<'a, K, E> {
    /// Keys along the cycle, starting from the vertex where it closes.
    pub fn vertices(&self) -> impl Iterator<Item = &'a K> + '_ {
        self.edges.iter().map(|e| e.source)
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.edges.iter().map(|e| e.id.source)
    }

    pub fn edges(&self) -> &[EdgeRef<'a, K, E>] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of the edge weights, or `None` if it overflows.
    pub fn total_weight(&self) -> Option<E::Weight>
    where
        E: Weighted,
    {
        self.edges
            .iter()
            .try_fold(E::Weight::default(), |acc, e| {
                acc.checked_add(&e.payload.weight())
            })
    }
}

impl<'a, K, E> std::fmt::Debug for Cycle<'a, K, E>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.vertices()).finish()
    }
}

/// Depth-first cycle detection.
///
/// Every vertex is tried as a root in matrix order, with a fresh visited set
/// each time. The first back edge found ends the search, and the path from
/// its target to the current vertex is returned as the witness.
/// Runs in O(|V| * (|V| + |E|)) on top of the cost of scanning rows.
pub trait CycleDetection
where
    Self: QueryableGraph + Sized,
{
    fn find_cycle(&self) -> Option<Cycle<'_, Self::Key, Self::Edge>> {
        for root in self.iter_vertices() {
            if let Some(cycle) = CycleSearch::new(self).run(root) {
                debug!(?cycle, "cycle found");
                return Some(cycle);
            }
        }
        debug!(vertices = self.vertex_size(), "graph is acyclic");
        None
    }

    fn is_acyclic(&self) -> bool {
        self.find_cycle().is_none()
    }
}

impl<G: QueryableGraph> CycleDetection for G {}

struct CycleSearch<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    visited: HashSet<VertexId, RandomState>,
    vertex_stack: Vec<VertexId>,
    vertex_backtrack: HashMap<VertexId, usize, RandomState>,
    // `edge_stack[i]` leads from `vertex_stack[i]` to `vertex_stack[i + 1]`
    edge_stack: Vec<EdgeRef<'a, G::Key, G::Edge>>,
    edge_to_scan: Vec<EdgeRef<'a, G::Key, G::Edge>>,
}

impl<'a, G> CycleSearch<'a, G>
where
    G: QueryableGraph,
{
    fn new(graph: &'a G) -> Self {
        Self {
            graph,
            visited: HashSet::with_hasher(RandomState::new()),
            vertex_stack: vec![],
            vertex_backtrack: HashMap::with_hasher(RandomState::new()),
            edge_stack: vec![],
            edge_to_scan: vec![],
        }
    }

    fn run(mut self, root: VertexId) -> Option<Cycle<'a, G::Key, G::Edge>> {
        self.push_vertex(root);
        while let Some(next_edge) = self.edge_to_scan.pop() {
            while self.vertex_stack.last() != Some(&next_edge.id.source) {
                assert!(!self.vertex_stack.is_empty());
                self.one_step_backward();
            }
            let sink = next_edge.id.sink;
            if !self.visited.contains(&sink) {
                self.edge_stack.push(next_edge);
                self.push_vertex(sink);
            } else if let Some(&pos) = self.vertex_backtrack.get(&sink) {
                let mut edges = self.edge_stack.split_off(pos);
                edges.push(next_edge);
                return Some(Cycle { edges });
            }
        }
        None
    }

    fn push_vertex(&mut self, vert: VertexId) {
        trace!(?vert, depth = self.vertex_stack.len(), "entering");
        self.visited.insert(vert);
        self.vertex_backtrack.insert(vert, self.vertex_stack.len());
        self.vertex_stack.push(vert);
        // reversed, so that the lowest column is scanned first
        let outs: Vec<_> = self.graph.out_edges(&vert).collect();
        self.edge_to_scan.extend(outs.into_iter().rev());
    }

    fn one_step_backward(&mut self) {
        if let Some(v) = self.vertex_stack.pop() {
            self.vertex_backtrack.remove(&v);
            self.edge_stack.pop();
        }
    }
}
