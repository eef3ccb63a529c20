use crate::graph::*;

/// Renders a graph vertex by vertex, each followed by its out-edges.
pub struct GraphDebug<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    init_indent: usize,
    indent_step: usize,
}

impl<'a, G> GraphDebug<'a, G>
where
    G: QueryableGraph,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            init_indent: 0,
            indent_step: 2,
        }
    }

    pub fn indent(mut self, init: usize, step: usize) -> Self {
        self.init_indent = init;
        self.indent_step = step;
        self
    }

    fn display_indent(&self, f: &mut std::fmt::Formatter<'_>, level: usize) -> std::fmt::Result {
        let indention = self.init_indent + self.indent_step * level;
        write!(f, "{:indention$}", "")
    }
}

impl<'a, G> std::fmt::Debug for GraphDebug<'a, G>
where
    G: QueryableGraph,
    G::Edge: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.iter_vertices() {
            if let Some(key) = self.graph.vertex_key(&v) {
                self.display_indent(f, 0)?;
                writeln!(f, "{:?}", key)?;
            }
            for e in self.graph.out_edges(&v) {
                self.display_indent(f, 1)?;
                writeln!(f, "--{:?}-> {:?}", e.payload, e.sink)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::*;

    #[test]
    fn indented_rendering() {
        let mut g = MatrixGraph::<&str, u32>::new();
        g.add_vertex("a");
        g.add_vertex("b");
        g.add_edge(&"a", &"b", 3).unwrap();
        g.add_edge(&"b", &"b", 1).unwrap();
        let trial = format!("{:?}", g.debug().indent(1, 3));
        let oracle = " \"a\"\n    --3-> \"b\"\n \"b\"\n    --1-> \"b\"\n";
        assert_eq!(trial, oracle);
    }
}
