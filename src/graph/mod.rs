//! Vertex and edge handles, capability traits, and the adjacency-matrix graph.
//!
//! Vertices are identified by caller-supplied keys.
//! Internally every vertex owns one row and one column of a square matrix of
//! edge slots, so the matrix side always equals the number of vertices.
//! Handles ([VertexId], [EdgeId]) are cheap to copy but only valid until the
//! next vertex removal, which shifts rows and columns.

mod vertex;
pub use self::vertex::*;
mod edge;
pub use self::edge::*;
mod r#trait;
pub use self::r#trait::*;
mod matrix;
pub use self::matrix::*;
mod graph_debug;
pub use self::graph_debug::*;

#[cfg(test)]
pub use self::tests::*;
