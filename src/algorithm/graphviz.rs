//! Dump matrix graphs in the graphviz format.
use crate::graph::*;
use ahash::RandomState;
use std::collections::HashMap;

/**
 * Provides graphviz labels for vertex keys.
 *
 * See [DumpInGraphviz] for details.
 */
pub trait GraphvizLabelForVertex {
    /**
     * Returns a string for graphviz name and an optional attribute list.
     */
    fn label(&self) -> (String, Option<String>);
}

/**
 * Provides graphviz attributes for edge payloads.
 *
 * See [DumpInGraphviz] for details.
 */
pub trait GraphvizLabelForEdge {
    /**
     * Returns an optional attribute list.
     */
    fn label(&self) -> Option<String>;
}

impl GraphvizLabelForVertex for String {
    fn label(&self) -> (String, Option<String>) {
        (format!("{:?}", self), None)
    }
}

impl GraphvizLabelForVertex for &str {
    fn label(&self) -> (String, Option<String>) {
        (format!("{:?}", self), None)
    }
}

impl<W: std::fmt::Display> GraphvizLabelForEdge for Link<W> {
    fn label(&self) -> Option<String> {
        Some(format!("label=\"{} / {}\"", self.weight, self.bandwidth))
    }
}

macro_rules! plain_labels {
    ($($t:ty),*) => {
        $(
            impl GraphvizLabelForVertex for $t {
                fn label(&self) -> (String, Option<String>) {
                    (self.to_string(), None)
                }
            }

            impl GraphvizLabelForEdge for $t {
                fn label(&self) -> Option<String> {
                    Some(format!("label=\"{}\"", self))
                }
            }
        )*
    };
}

plain_labels!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/**
 * Dumps a directed graph into graphviz format.
 *
 * # Examples
 *
 * ```rust
 * use matrigraph::{algorithm::graphviz::*, graph::*};
 *
 * let mut g = MatrixGraph::<&str, Link<u32>>::new();
 * g.add_vertex("a");
 * g.add_vertex("b");
 * g.add_edge(&"a", &"b", Link::new(3, 10)).unwrap();
 * g.add_edge(&"b", &"b", Link::new(1, 2)).unwrap();
 * let trial = {
 *     let mut buf = vec![];
 *     g.dump_in_graphviz(&mut buf, "trial").unwrap();
 *     String::from_utf8(buf).unwrap()
 * };
 * assert_eq!(
 *     trial,
 *     r#"digraph trial {
 *   "a" ;
 *   "b" ;
 *   "a" -> "b" [label="3 / 10"] ;
 *   "b" -> "b" [label="1 / 2"] ;
 * }
 * "#
 * );
 * ```
 */
pub trait DumpInGraphviz
where
    Self: QueryableGraph,
    Self::Key: GraphvizLabelForVertex,
    Self::Edge: GraphvizLabelForEdge,
{
    /**
     * Dumps the graph to a `std::io::Write` object in the graphviz format.
     *
     * Vertices come in matrix order, edges row by row.
     */
    fn dump_in_graphviz<W>(&self, out: &mut W, graph_name: &str) -> std::io::Result<()>
    where
        W: std::io::Write,
    {
        writeln!(out, "digraph {} {{", graph_name)?;
        let mut names = HashMap::with_hasher(RandomState::new());
        for vid in self.iter_vertices() {
            let Some(vert) = self.vertex_key(&vid) else {
                continue;
            };
            let (name, label) = vert.label();
            if let Some(label) = label {
                writeln!(out, "  {} [{}] ;", name, label)?;
            } else {
                writeln!(out, "  {} ;", name)?;
            }
            names.insert(vid, name);
        }
        for e in self.iter_edges() {
            let (Some(src), Some(snk)) = (names.get(&e.id.source), names.get(&e.id.sink)) else {
                continue;
            };
            if let Some(label) = e.payload.label() {
                writeln!(out, "  {} -> {} [{}] ;", src, snk, label)?;
            } else {
                writeln!(out, "  {} -> {} ;", src, snk)?;
            }
        }
        writeln!(out, "}}")?;
        Ok(())
    }
}

impl<G> DumpInGraphviz for G
where
    G: QueryableGraph,
    G::Key: GraphvizLabelForVertex,
    G::Edge: GraphvizLabelForEdge,
{
}
