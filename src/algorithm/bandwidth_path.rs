use crate::{error::Result, graph::*, GraphError};
use ahash::RandomState;
use keyed_priority_queue::KeyedPriorityQueue;
use num_traits::CheckedAdd;
use std::cmp::Reverse;
use tracing::{debug, trace};

/// Weight type of the edge payloads of a graph.
pub type WeightOf<G> = <<G as QueryableGraph>::Edge as Weighted>::Weight;

/// Outcome of a bandwidth-constrained shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a, K, W> {
    /// No path with at least one edge satisfies the bandwidth threshold.
    Impossible,
    Found(Path<'a, K, W>),
}

impl<'a, K, W> Route<'a, K, W> {
    pub fn is_impossible(&self) -> bool {
        matches!(self, Route::Impossible)
    }

    pub fn path(&self) -> Option<&Path<'a, K, W>> {
        match self {
            Route::Found(path) => Some(path),
            Route::Impossible => None,
        }
    }
}

/// A lightest path together with its bottleneck bandwidth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'a, K, W> {
    vertices: Vec<VertexId>,
    keys: Vec<&'a K>,
    total_weight: W,
    bottleneck: W,
}

impl<'a, K, W: Copy> Path<'a, K, W> {
    /// Number of vertices on the path, both endpoints included.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn total_weight(&self) -> W {
        self.total_weight
    }

    /// The smallest bandwidth among the edges of the path.
    pub fn bottleneck(&self) -> W {
        self.bottleneck
    }

    pub fn keys(&self) -> &[&'a K] {
        &self.keys
    }

    pub fn vertex_ids(&self) -> &[VertexId] {
        &self.vertices
    }

    /// 1-based matrix positions of the vertices along the path.
    pub fn ordinals(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices.iter().map(VertexId::ordinal)
    }
}

/// Dijkstra's algorithm restricted to edges whose bandwidth reaches a threshold.
///
/// Vertices are settled in order of tentative distance, ties going to the
/// lower matrix index. Each vertex keeps the whole vertex sequence of its
/// best known path rather than a single predecessor.
/// Settled vertices are never relaxed again, so negative weights cannot
/// reopen them, and a path whose weight overflows is treated as absent.
pub trait BandwidthConstrainedPath
where
    Self: QueryableGraph + Sized,
{
    fn shortest_path_with_bandwidth(
        &self,
        from: &Self::Key,
        to: &Self::Key,
        min_bandwidth: WeightOf<Self>,
    ) -> Result<Route<'_, Self::Key, WeightOf<Self>>>
    where
        Self::Edge: Bandwidthed,
    {
        let source = self
            .find_vertex(from)
            .ok_or_else(|| GraphError::vertex_not_found(from))?;
        let target = self
            .find_vertex(to)
            .ok_or_else(|| GraphError::vertex_not_found(to))?;
        let ids: Vec<VertexId> = self.iter_vertices().collect();
        let n = ids.len();

        let mut distance: Vec<Option<WeightOf<Self>>> = vec![None; n];
        let mut bottleneck: Vec<Option<WeightOf<Self>>> = vec![None; n];
        let mut chain: Vec<Vec<VertexId>> = vec![vec![]; n];
        let mut settled = vec![false; n];
        let mut queue = KeyedPriorityQueue::with_capacity_and_hasher(n, RandomState::new());

        let zero = WeightOf::<Self>::default();
        distance[source.to_raw()] = Some(zero);
        queue.push(source.to_raw(), Reverse((zero, source.to_raw())));

        while let Some((cur, Reverse((dist_cur, _)))) = queue.pop() {
            settled[cur] = true;
            trace!(vertex = ?ids[cur], distance = ?dist_cur, "settled");
            for e in self.out_edges(&ids[cur]) {
                let bandwidth = e.payload.bandwidth();
                if bandwidth < min_bandwidth {
                    continue;
                }
                let next = e.id.sink.to_raw();
                if settled[next] {
                    continue;
                }
                let Some(candidate) = dist_cur.checked_add(&e.payload.weight()) else {
                    trace!(from = ?ids[cur], to = ?ids[next], "weight overflow");
                    continue;
                };
                if distance[next].map_or(false, |d| d <= candidate) {
                    continue;
                }
                trace!(from = ?ids[cur], to = ?ids[next], distance = ?candidate, "relaxed");
                distance[next] = Some(candidate);
                bottleneck[next] = Some(match bottleneck[cur] {
                    Some(b) => b.min(bandwidth),
                    None => bandwidth,
                });
                let mut path = chain[cur].clone();
                path.push(ids[cur]);
                chain[next] = path;
                queue.push(next, Reverse((candidate, next)));
            }
        }

        let t = target.to_raw();
        let route = match (distance[t], bottleneck[t]) {
            (Some(total_weight), Some(bottleneck)) if !chain[t].is_empty() => {
                let mut vertices = std::mem::take(&mut chain[t]);
                vertices.push(target);
                let keys = vertices.iter().filter_map(|v| self.vertex_key(v)).collect();
                Route::Found(Path {
                    vertices,
                    keys,
                    total_weight,
                    bottleneck,
                })
            }
            _ => Route::Impossible,
        };
        debug!(
            ?from,
            ?to,
            ?min_bandwidth,
            impossible = route.is_impossible(),
            "bandwidth-constrained shortest path"
        );
        Ok(route)
    }
}

impl<G: QueryableGraph> BandwidthConstrainedPath for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::{graph::NodeIndex, visit::EdgeRef as _};
    use quickcheck_macros::quickcheck;

    fn graph_of(
        keys: &[&'static str],
        edges: &[(&'static str, &'static str, i32, i32)],
    ) -> MatrixGraph<&'static str, Link<i32>> {
        let mut g = MatrixGraph::new();
        for k in keys {
            g.add_vertex(*k);
        }
        for (src, snk, w, b) in edges {
            g.add_edge(src, snk, Link::new(*w, *b)).unwrap();
        }
        g
    }

    fn abc() -> MatrixGraph<&'static str, Link<i32>> {
        graph_of(
            &["A", "B", "C"],
            &[("A", "B", 1, 5), ("B", "C", 1, 5), ("A", "C", 5, 1)],
        )
    }

    #[test]
    fn narrow_edge_is_excluded() {
        let g = abc();
        let route = g.shortest_path_with_bandwidth(&"A", &"C", 3).unwrap();
        let path = route.path().unwrap();
        assert_eq!(path.keys(), &[&"A", &"B", &"C"]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.total_weight(), 2);
        assert_eq!(path.bottleneck(), 5);
        assert_eq!(path.ordinals().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn unconstrained_takes_the_lighter_path() {
        let g = abc();
        let route = g.shortest_path_with_bandwidth(&"A", &"C", 0).unwrap();
        let path = route.path().unwrap();
        assert_eq!(path.keys(), &[&"A", &"B", &"C"]);
        assert_eq!(path.bottleneck(), 5);
    }

    #[test]
    fn bottleneck_is_the_narrowest_edge() {
        let g = graph_of(
            &["A", "B", "C", "D"],
            &[("A", "B", 1, 9), ("B", "C", 1, 4), ("C", "D", 1, 7)],
        );
        let route = g.shortest_path_with_bandwidth(&"A", &"D", 2).unwrap();
        let path = route.path().unwrap();
        assert_eq!(path.total_weight(), 3);
        assert_eq!(path.bottleneck(), 4);
    }

    #[test]
    fn threshold_above_every_bandwidth_is_impossible() {
        let g = abc();
        let route = g.shortest_path_with_bandwidth(&"A", &"C", 10).unwrap();
        assert_eq!(route, Route::Impossible);
    }

    #[test]
    fn unreachable_is_impossible() {
        let g = abc();
        let route = g.shortest_path_with_bandwidth(&"C", &"A", 0).unwrap();
        assert!(route.is_impossible());
    }

    #[test]
    fn source_to_itself_is_impossible() {
        let g = graph_of(&["A", "B"], &[("A", "A", 1, 5), ("A", "B", 1, 5)]);
        let route = g.shortest_path_with_bandwidth(&"A", &"A", 0).unwrap();
        assert!(route.is_impossible());
    }

    #[test]
    fn negative_edge_into_source_does_not_reopen_it() {
        let g = graph_of(&["A", "B"], &[("A", "B", -3, 5), ("B", "A", 1, 5)]);
        let route = g.shortest_path_with_bandwidth(&"A", &"A", 0).unwrap();
        assert_eq!(route, Route::Impossible);
        let route = g.shortest_path_with_bandwidth(&"A", &"B", 0).unwrap();
        assert_eq!(route.path().unwrap().total_weight(), -3);
    }

    #[test]
    fn overflowing_path_is_skipped() {
        let mut g = MatrixGraph::<&str, Link<u8>>::new();
        for k in ["A", "B", "C"] {
            g.add_vertex(k);
        }
        g.add_edge(&"A", &"B", Link::new(200, 5)).unwrap();
        g.add_edge(&"B", &"C", Link::new(100, 5)).unwrap();
        let route = g.shortest_path_with_bandwidth(&"A", &"C", 0).unwrap();
        assert!(route.is_impossible());

        g.add_edge(&"A", &"C", Link::new(250, 5)).unwrap();
        let route = g.shortest_path_with_bandwidth(&"A", &"C", 0).unwrap();
        let path = route.path().unwrap();
        assert_eq!(path.keys(), &[&"A", &"C"]);
        assert_eq!(path.total_weight(), 250);
    }

    #[test]
    fn absent_key_is_an_error() {
        let g = abc();
        assert!(matches!(
            g.shortest_path_with_bandwidth(&"A", &"Z", 0),
            Err(GraphError::VertexNotFound(_))
        ));
        assert!(g.shortest_path_with_bandwidth(&"Z", &"A", 0).is_err());
    }

    #[test]
    fn removed_edge_is_not_traversed() {
        let mut g = abc();
        g.remove_edge_between(&"B", &"C").unwrap();
        let route = g.shortest_path_with_bandwidth(&"A", &"C", 0).unwrap();
        let path = route.path().unwrap();
        assert_eq!(path.keys(), &[&"A", &"C"]);
        assert_eq!(path.total_weight(), 5);
        assert_eq!(path.bottleneck(), 1);
    }

    /// Settling vertices by matrix index instead of tentative distance would
    /// settle `C` (index 2) before `D` (index 3) while `C` still holds the
    /// heavy direct edge, then extend that stale distance to `E`.
    #[test]
    fn vertices_are_settled_by_distance_not_index() {
        let g = graph_of(
            &["A", "B", "C", "D", "E"],
            &[
                ("A", "C", 10, 5),
                ("A", "D", 1, 5),
                ("D", "C", 1, 5),
                ("C", "E", 1, 5),
                ("A", "B", 20, 5),
            ],
        );
        let route = g.shortest_path_with_bandwidth(&"A", &"E", 0).unwrap();
        let path = route.path().unwrap();
        assert_eq!(path.keys(), &[&"A", &"D", &"C", &"E"]);
        assert_eq!(path.total_weight(), 3);
    }

    #[test]
    fn ties_go_to_the_lower_index() {
        let g = graph_of(
            &["A", "B", "C", "D"],
            &[("A", "B", 1, 5), ("A", "C", 1, 5), ("B", "D", 1, 5), ("C", "D", 1, 5)],
        );
        let route = g.shortest_path_with_bandwidth(&"A", &"D", 0).unwrap();
        assert_eq!(route.path().unwrap().keys(), &[&"A", &"B", &"D"]);
    }

    #[test]
    fn integer_keys_report_one_based_positions() {
        let mut g = MatrixGraph::<u32, Link<u64>>::new();
        for k in 0..4 {
            g.add_vertex(k);
        }
        g.add_edge(&0, &2, Link::new(3, 8)).unwrap();
        g.add_edge(&2, &3, Link::new(4, 6)).unwrap();
        let route = g.shortest_path_with_bandwidth(&0, &3, 6).unwrap();
        let path = route.path().unwrap();
        assert_eq!(path.ordinals().collect::<Vec<_>>(), vec![1, 3, 4]);
        assert_eq!(path.total_weight(), 7);
        assert_eq!(path.bottleneck(), 6);
    }

    #[quickcheck]
    fn weight_agrees_with_petgraph(ops: Ops, threshold: u8) {
        let g = ops.build();
        let threshold = u32::from(threshold % 16);
        let mut pg = to_petgraph(&g);
        pg.retain_edges(|pg, e| pg[e].bandwidth >= threshold);
        for src in g.iter_vertices() {
            let oracle = petgraph::algo::dijkstra(&pg, NodeIndex::new(src.to_raw()), None, |e| {
                e.weight().weight
            });
            for snk in g.iter_vertices() {
                let from = g.vertex_key(&src).unwrap();
                let to = g.vertex_key(&snk).unwrap();
                let route = g.shortest_path_with_bandwidth(from, to, threshold).unwrap();
                match route {
                    Route::Found(path) => {
                        assert_ne!(src, snk);
                        let expected = oracle.get(&NodeIndex::new(snk.to_raw()));
                        assert_eq!(Some(&path.total_weight()), expected);
                    }
                    Route::Impossible => {
                        let reachable = oracle.contains_key(&NodeIndex::new(snk.to_raw()));
                        assert!(src == snk || !reachable);
                    }
                }
            }
        }
    }

    #[quickcheck]
    fn paths_are_walkable(ops: Ops, threshold: u8) {
        let g = ops.build();
        let threshold = u32::from(threshold % 16);
        for src in g.iter_vertices() {
            for snk in g.iter_vertices() {
                let from = g.vertex_key(&src).unwrap();
                let to = g.vertex_key(&snk).unwrap();
                let route = g.shortest_path_with_bandwidth(from, to, threshold).unwrap();
                if let Route::Found(path) = route {
                    let ids = path.vertex_ids();
                    assert_eq!(ids.first(), Some(&src));
                    assert_eq!(ids.last(), Some(&snk));
                    let links: Vec<_> = ids
                        .windows(2)
                        .map(|w| {
                            let e = EdgeId {
                                source: w[0],
                                sink: w[1],
                            };
                            *g.edge(&e).unwrap().payload
                        })
                        .collect();
                    assert!(links.iter().all(|l| l.bandwidth >= threshold));
                    let weight: u32 = links.iter().map(|l| l.weight).sum();
                    assert_eq!(weight, path.total_weight());
                    let narrowest = links.iter().map(|l| l.bandwidth).min();
                    assert_eq!(narrowest, Some(path.bottleneck()));
                }
            }
        }
    }
}
