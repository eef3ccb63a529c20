/// Handle for a vertex: its row/column in the matrix plus the generation of
/// the graph it was issued under.
///
/// Removing a vertex shifts every later row and column, so handles issued
/// before a removal are stale and rejected by the graph that issued them.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct VertexId {
    index: usize,
    generation: u64,
}

impl VertexId {
    pub(crate) fn new(index: usize, generation: u64) -> Self {
        Self { index, generation }
    }

    /// The matrix index this handle points to.
    pub fn to_raw(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 1-based position, the form used by line-oriented front ends.
    pub fn ordinal(&self) -> usize {
        self.index + 1
    }
}
