//! Graph algorithms
mod acyclic;
pub use self::acyclic::*;
mod bandwidth_path;
pub use self::bandwidth_path::*;
pub mod graphviz;
