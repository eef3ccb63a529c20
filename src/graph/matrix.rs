use crate::{error::Result, graph::*, GraphError};
use tracing::{debug, trace};

/// A directed graph stored as a dense adjacency matrix.
///
/// `matrix[i][j]` is the slot of the edge from the `i`-th vertex to the
/// `j`-th one. Removed edges are tombstoned (`None`) rather than reclaimed.
///
/// | Operation          | Complexity                                    |
/// | ------------------ | --------------------------------------------- |
/// | `add_vertex`       | O(\|V\|), a key scan plus one new row/column  |
/// | `remove_vertex`    | O(\|V\|^2) in the worst case, rows shift      |
/// | `add_edge`         | O(\|V\|), resolving both endpoint keys        |
/// | `remove_edge`      | O(1)                                          |
/// | `find_vertex`      | O(\|V\|)                                      |
/// | `find_edge`        | O(\|V\|)                                      |
/// | `in_edges`         | O(\|V\|)                                      |
/// | `out_edges`        | O(\|V\|)                                      |
/// | `iter_edges`       | O(\|V\|^2)                                    |
/// | `transpose`        | O(\|V\|^2)                                    |
#[derive(Clone)]
pub struct MatrixGraph<K, E> {
    vertices: Vec<K>,
    matrix: Vec<Vec<Option<E>>>,
    edge_count: usize,
    generation: u64,
}

impl<K, E> Default for MatrixGraph<K, E> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            matrix: Vec::new(),
            edge_count: 0,
            generation: 0,
        }
    }
}

impl<K, E> MatrixGraph<K, E>
where
    K: PartialEq + std::fmt::Debug,
{
    /// The only place where keys are resolved into matrix indices.
    fn index_of(&self, key: &K) -> Option<usize> {
        self.vertices.iter().position(|k| k == key)
    }

    fn index_of_or_err(&self, key: &K) -> Result<usize> {
        self.index_of(key)
            .ok_or_else(|| GraphError::vertex_not_found(key))
    }

    fn vid(&self, index: usize) -> VertexId {
        VertexId::new(index, self.generation)
    }

    /// Index behind a handle, provided the handle is from the current generation.
    fn checked_index(&self, v: &VertexId) -> Result<usize> {
        if v.generation() != self.generation {
            return Err(GraphError::StaleHandle {
                vertex: *v,
                issued: v.generation(),
                current: self.generation,
            });
        }
        if v.to_raw() >= self.vertices.len() {
            return Err(GraphError::VertexNotFound(format!("{:?}", v)));
        }
        Ok(v.to_raw())
    }

    fn live_index(&self, v: &VertexId) -> Option<usize> {
        self.checked_index(v).ok()
    }

    fn edge_ref(&self, source: usize, sink: usize) -> Option<EdgeRef<'_, K, E>> {
        self.matrix[source][sink].as_ref().map(|payload| EdgeRef {
            id: EdgeId {
                source: self.vid(source),
                sink: self.vid(sink),
            },
            source: &self.vertices[source],
            sink: &self.vertices[sink],
            payload,
        })
    }

    fn debug_assert_square(&self) {
        debug_assert_eq!(self.matrix.len(), self.vertices.len());
        debug_assert!(self.matrix.iter().all(|row| row.len() == self.vertices.len()));
    }

    /// Number of vertex removals so far; handles carry the value they were issued at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Vertex keys in matrix order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.vertices.iter()
    }
}

impl<K, E> GrowableGraph for MatrixGraph<K, E>
where
    K: PartialEq + std::fmt::Debug,
{
    fn new() -> Self {
        Self::default()
    }

    fn add_vertex(&mut self, key: K) -> VertexId {
        if let Some(idx) = self.index_of(&key) {
            trace!(?key, index = idx, "vertex already present");
            return self.vid(idx);
        }
        let n = self.vertices.len() + 1;
        for row in self.matrix.iter_mut() {
            row.push(None);
        }
        self.matrix.push(std::iter::repeat_with(|| None).take(n).collect());
        debug!(?key, index = n - 1, "vertex added");
        self.vertices.push(key);
        self.debug_assert_square();
        self.vid(n - 1)
    }

    fn add_edge(&mut self, source: &K, sink: &K, payload: E) -> Result<EdgeId> {
        let src = self.index_of_or_err(source)?;
        let snk = self.index_of_or_err(sink)?;
        if self.matrix[src][snk].replace(payload).is_none() {
            self.edge_count += 1;
            trace!(?source, ?sink, "edge added");
        } else {
            trace!(?source, ?sink, "edge overwritten");
        }
        Ok(EdgeId {
            source: self.vid(src),
            sink: self.vid(snk),
        })
    }
}

impl<K, E> EdgeShrinkableGraph for MatrixGraph<K, E>
where
    K: PartialEq + std::fmt::Debug,
{
    fn remove_edge(&mut self, edge: &EdgeId) -> Result<Option<E>> {
        let src = self.checked_index(&edge.source)?;
        let snk = self.checked_index(&edge.sink)?;
        let removed = self.matrix[src][snk].take();
        if removed.is_some() {
            self.edge_count -= 1;
            trace!(source = ?self.vertices[src], sink = ?self.vertices[snk], "edge removed");
        }
        Ok(removed)
    }
}

impl<K, E> VertexShrinkableGraph for MatrixGraph<K, E>
where
    K: PartialEq + std::fmt::Debug,
{
    fn remove_vertex(&mut self, key: &K) -> Result<()> {
        let idx = self.index_of_or_err(key)?;
        let outs = self.matrix[idx].iter().filter(|slot| slot.is_some()).count();
        let ins = self
            .matrix
            .iter()
            .filter(|row| row[idx].is_some())
            .count();
        let self_loop = usize::from(self.matrix[idx][idx].is_some());
        let dropped = outs + ins - self_loop;

        self.vertices.remove(idx);
        self.matrix.remove(idx);
        for row in self.matrix.iter_mut() {
            row.remove(idx);
        }
        self.edge_count -= dropped;
        self.generation += 1;
        self.debug_assert_square();
        debug!(?key, index = idx, dropped_edges = dropped, "vertex removed");
        Ok(())
    }
}

impl<K, E> TransposableGraph for MatrixGraph<K, E> {
    fn transpose(&mut self) {
        let n = self.matrix.len();
        for j in 1..n {
            let (upper, lower) = self.matrix.split_at_mut(j);
            for (i, row) in upper.iter_mut().enumerate() {
                std::mem::swap(&mut row[j], &mut lower[0][i]);
            }
        }
        debug!(vertices = n, edges = self.edge_count, "graph transposed");
    }
}

impl<K, E> QueryableGraph for MatrixGraph<K, E>
where
    K: PartialEq + std::fmt::Debug,
{
    type Key = K;
    type Edge = E;

    fn vertex_size(&self) -> usize {
        self.vertices.len()
    }

    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        Box::new((0..self.vertices.len()).map(|i| self.vid(i)))
    }

    fn vertex_key(&self, v: &VertexId) -> Option<&K> {
        self.live_index(v).map(|i| &self.vertices[i])
    }

    fn find_vertex(&self, key: &K) -> Option<VertexId> {
        self.index_of(key).map(|i| self.vid(i))
    }

    fn edge_size(&self) -> usize {
        self.edge_count
    }

    fn iter_edges(&self) -> Box<dyn Iterator<Item = EdgeRef<'_, K, E>> + '_> {
        let n = self.vertices.len();
        let it = (0..n).flat_map(move |i| (0..n).filter_map(move |j| self.edge_ref(i, j)));
        Box::new(it)
    }

    fn edge(&self, e: &EdgeId) -> Option<EdgeRef<'_, K, E>> {
        let src = self.live_index(&e.source)?;
        let snk = self.live_index(&e.sink)?;
        self.edge_ref(src, snk)
    }

    fn in_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = EdgeRef<'_, K, E>> + '_> {
        match self.live_index(v) {
            Some(snk) => {
                let it = (0..self.vertices.len()).filter_map(move |src| self.edge_ref(src, snk));
                Box::new(it)
            }
            None => Box::new(std::iter::empty()),
        }
    }

    fn out_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = EdgeRef<'_, K, E>> + '_> {
        match self.live_index(v) {
            Some(src) => {
                let it = (0..self.vertices.len()).filter_map(move |snk| self.edge_ref(src, snk));
                Box::new(it)
            }
            None => Box::new(std::iter::empty()),
        }
    }
}

/// Two graphs are equal when they hold the same keys in the same order and
/// the same slots; generations are not compared.
impl<K, E> PartialEq for MatrixGraph<K, E>
where
    K: PartialEq,
    E: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.matrix == other.matrix
    }
}

impl<K, E> Eq for MatrixGraph<K, E>
where
    K: Eq,
    E: Eq,
{
}

impl<K, E> std::fmt::Debug for MatrixGraph<K, E>
where
    K: PartialEq + std::fmt::Debug,
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MatrixGraph {{")?;
        for (i, key) in self.vertices.iter().enumerate() {
            writeln!(f, "{:?}:", key)?;
            for e in self.out_edges(&self.vid(i)) {
                writeln!(f, "  -> {:?} by {:?}", e.sink, e.payload)?;
            }
        }
        writeln!(f, "}}")?;
        Ok(())
    }
}
