//! A directed graph stored as a dense adjacency matrix, with cycle detection
//! and bandwidth-constrained shortest paths.
//!
//! # Vertices, edges and handles
//!
//! Vertices are identified by caller-supplied keys, compared by equality.
//! Every vertex owns one row and one column of a square matrix of edge slots;
//! `matrix[i][j]` holds the payload of the edge from the `i`-th vertex to the
//! `j`-th one, or nothing. Removing an edge only empties its slot, while
//! removing a vertex drops its row and column and shifts everything after it.
//!
//! Edge payloads are either plain weights (any primitive integer) or
//! [`Link`](graph::Link)s carrying a weight and a bandwidth.
//!
//! Operations return [`VertexId`](graph::VertexId) and [`EdgeId`](graph::EdgeId)
//! handles. They are plain indices tagged with the generation of the graph,
//! and are refused once a vertex removal has moved the indices under them.
//!
//! # Algorithms
//!
//! *   [`CycleDetection`](algorithm::CycleDetection) finds a witness cycle by
//!     depth-first search from every vertex.
//! *   [`BandwidthConstrainedPath`](algorithm::BandwidthConstrainedPath) finds
//!     the lightest path using only edges with enough bandwidth, and reports
//!     the narrowest bandwidth along it.
//! *   [`DumpInGraphviz`](algorithm::graphviz::DumpInGraphviz) writes a graph
//!     in the graphviz format.
//!
//! ```rust
//! use matrigraph::{algorithm::*, graph::*};
//!
//! let mut g = MatrixGraph::<&str, Link<u32>>::new();
//! for k in ["A", "B", "C"] {
//!     g.add_vertex(k);
//! }
//! g.add_edge(&"A", &"B", Link::new(1, 5)).unwrap();
//! g.add_edge(&"B", &"C", Link::new(1, 5)).unwrap();
//! g.add_edge(&"A", &"C", Link::new(5, 1)).unwrap();
//! assert!(g.is_acyclic());
//!
//! let route = g.shortest_path_with_bandwidth(&"A", &"C", 3).unwrap();
//! let path = route.path().unwrap();
//! assert_eq!(path.keys(), &[&"A", &"B", &"C"]);
//! assert_eq!((path.total_weight(), path.bottleneck()), (2, 5));
//!
//! g.add_edge(&"C", &"A", Link::new(1, 1)).unwrap();
//! let cycle = g.find_cycle().unwrap();
//! assert_eq!(cycle.vertices().copied().collect::<Vec<_>>(), vec!["A", "B", "C"]);
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod algorithm;
mod error;
pub mod graph;

pub use self::error::{GraphError, Result};
