use crate::{error::Result, graph::*, GraphError};

/// Graphs into which keyed vertices and weighted edges can be inserted.
pub trait GrowableGraph: QueryableGraph {
    fn new() -> Self;

    /// Inserts a vertex unless one with an equal key is present,
    /// in which case the present one is returned and nothing changes.
    fn add_vertex(&mut self, key: Self::Key) -> VertexId;

    /// Stores `payload` on the edge `source -> sink`, replacing whatever the slot held.
    ///
    /// Fails with [GraphError::VertexNotFound] if either endpoint is absent.
    fn add_edge(
        &mut self,
        source: &Self::Key,
        sink: &Self::Key,
        payload: Self::Edge,
    ) -> Result<EdgeId>;
}

pub trait EdgeShrinkableGraph: QueryableGraph {
    /// Tombstones an edge slot and returns the payload it held, if any.
    fn remove_edge(&mut self, edge: &EdgeId) -> Result<Option<Self::Edge>>;

    fn remove_edge_between(
        &mut self,
        source: &Self::Key,
        sink: &Self::Key,
    ) -> Result<Option<Self::Edge>> {
        let source = self
            .find_vertex(source)
            .ok_or_else(|| GraphError::vertex_not_found(source))?;
        let sink = self
            .find_vertex(sink)
            .ok_or_else(|| GraphError::vertex_not_found(sink))?;
        self.remove_edge(&EdgeId { source, sink })
    }
}

pub trait VertexShrinkableGraph: EdgeShrinkableGraph {
    /// Removes a vertex together with its row and column.
    ///
    /// Every handle issued before this call becomes stale.
    fn remove_vertex(&mut self, key: &Self::Key) -> Result<()>;
}

pub trait TransposableGraph {
    /// Reverses the direction of every edge in place.
    fn transpose(&mut self);
}

/// Read-only access to a matrix-backed graph.
///
/// `iter_vertices` yields handles in matrix order,
/// so the raw index of the `i`-th handle is `i`.
pub trait QueryableGraph {
    type Key: std::fmt::Debug;
    type Edge;

    fn vertex_size(&self) -> usize;
    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_>;
    fn vertex_key(&self, v: &VertexId) -> Option<&Self::Key>;
    fn find_vertex(&self, key: &Self::Key) -> Option<VertexId>;

    fn contains_vertex(&self, key: &Self::Key) -> bool {
        self.find_vertex(key).is_some()
    }

    fn edge_size(&self) -> usize;
    fn iter_edges(&self) -> Box<dyn Iterator<Item = EdgeRef<'_, Self::Key, Self::Edge>> + '_>;
    fn edge(&self, e: &EdgeId) -> Option<EdgeRef<'_, Self::Key, Self::Edge>>;
    fn in_edges(
        &self,
        v: &VertexId,
    ) -> Box<dyn Iterator<Item = EdgeRef<'_, Self::Key, Self::Edge>> + '_>;
    fn out_edges(
        &self,
        v: &VertexId,
    ) -> Box<dyn Iterator<Item = EdgeRef<'_, Self::Key, Self::Edge>> + '_>;

    fn find_edge(
        &self,
        source: &Self::Key,
        sink: &Self::Key,
    ) -> Option<EdgeRef<'_, Self::Key, Self::Edge>> {
        let source = self.find_vertex(source)?;
        let sink = self.find_vertex(sink)?;
        self.edge(&EdgeId { source, sink })
    }

    /// Absent endpoints mean no edge rather than an error.
    fn has_edge(&self, source: &Self::Key, sink: &Self::Key) -> bool {
        self.find_edge(source, sink).is_some()
    }

    fn edges_from(
        &self,
        key: &Self::Key,
    ) -> Result<Box<dyn Iterator<Item = EdgeRef<'_, Self::Key, Self::Edge>> + '_>> {
        let v = self
            .find_vertex(key)
            .ok_or_else(|| GraphError::vertex_not_found(key))?;
        Ok(self.out_edges(&v))
    }

    fn edges_to(
        &self,
        key: &Self::Key,
    ) -> Result<Box<dyn Iterator<Item = EdgeRef<'_, Self::Key, Self::Edge>> + '_>> {
        let v = self
            .find_vertex(key)
            .ok_or_else(|| GraphError::vertex_not_found(key))?;
        Ok(self.in_edges(&v))
    }

    fn debug(&self) -> GraphDebug<'_, Self>
    where
        Self: Sized,
    {
        GraphDebug::new(self)
    }
}
