//! Signed graph representation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{ClusterError, ClusterResult};

/// Opaque vertex identifier.
///
/// Blanket-implemented for every comparable, printable type, so integers and
/// strings both work.
pub trait Vertex: Ord + Clone + fmt::Debug + fmt::Display {}

impl<T: Ord + Clone + fmt::Debug + fmt::Display> Vertex for T {}

/// Undirected edge with a canonical endpoint order (smaller vertex first).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge<V> {
    u: V,
    v: V,
}

impl<V: Ord> Edge<V> {
    /// Create an edge; `Edge::new(a, b) == Edge::new(b, a)`.
    pub fn new(a: V, b: V) -> Self {
        if a <= b {
            Self { u: a, v: b }
        } else {
            Self { u: b, v: a }
        }
    }

    /// Smaller endpoint.
    pub fn u(&self) -> &V {
        &self.u
    }

    /// Larger endpoint.
    pub fn v(&self) -> &V {
        &self.v
    }

    /// Both endpoints in canonical order.
    pub fn endpoints(&self) -> (&V, &V) {
        (&self.u, &self.v)
    }

    /// Returns true if both endpoints are the same vertex.
    pub fn is_loop(&self) -> bool {
        self.u == self.v
    }
}

impl<V: fmt::Display> Edge<V> {
    /// Name of the LP variable attached to this edge, e.g. `z_1_2`.
    pub fn variable_name(&self) -> String {
        format!("z_{}_{}", self.u, self.v)
    }
}

impl<V: fmt::Display> fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

/// Size summary of a signed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of distinct positive edges.
    pub positive_edge_count: usize,
    /// Number of distinct negative edges.
    pub negative_edge_count: usize,
    /// Positive plus negative edge count.
    pub total_edge_count: usize,
}

/// Graph with vertices and two sets of undirected edges.
///
/// Positive edges join vertices that should share a cluster, negative edges
/// join vertices that should not. The graph is immutable once built.
///
/// Each edge set is deduplicated, but the two sets are not required to be
/// disjoint. An edge present in both is undefined input: construction logs a
/// warning and [`SignedGraph::conflicting_edges`] reports it, nothing else
/// resolves it.
#[derive(Debug, Clone)]
pub struct SignedGraph<V> {
    /// Vertices in caller order.
    vertices: Vec<V>,

    /// Position of each vertex in `vertices`.
    index: BTreeMap<V, usize>,

    positive: BTreeSet<Edge<V>>,
    negative: BTreeSet<Edge<V>>,
}

impl<V: Vertex> SignedGraph<V> {
    /// Build a signed graph from a vertex list and two edge lists.
    ///
    /// Fails with [`ClusterError::InvalidInput`] on a duplicate vertex, an edge
    /// endpoint missing from the vertex list, or a self-loop.
    pub fn new<I, P, N>(vertices: I, positive: P, negative: N) -> ClusterResult<Self>
    where
        I: IntoIterator<Item = V>,
        P: IntoIterator<Item = (V, V)>,
        N: IntoIterator<Item = (V, V)>,
    {
        let vertices: Vec<V> = vertices.into_iter().collect();

        let mut index = BTreeMap::new();
        for (pos, vertex) in vertices.iter().enumerate() {
            if index.insert(vertex.clone(), pos).is_some() {
                return Err(ClusterError::InvalidInput(format!(
                    "Vertex {} listed more than once",
                    vertex
                )));
            }
        }

        let positive = Self::edge_set("positive", positive, &index)?;
        let negative = Self::edge_set("negative", negative, &index)?;

        let graph = Self {
            vertices,
            index,
            positive,
            negative,
        };

        let conflicts = graph.conflicting_edges();
        if !conflicts.is_empty() {
            log::warn!(
                "{} edge(s) are both positive and negative (first: {}); result is undefined",
                conflicts.len(),
                conflicts[0]
            );
        }

        Ok(graph)
    }

    fn edge_set<E>(
        kind: &str,
        pairs: E,
        index: &BTreeMap<V, usize>,
    ) -> ClusterResult<BTreeSet<Edge<V>>>
    where
        E: IntoIterator<Item = (V, V)>,
    {
        let mut edges = BTreeSet::new();
        for (a, b) in pairs {
            for endpoint in [&a, &b] {
                if !index.contains_key(endpoint) {
                    return Err(ClusterError::InvalidInput(format!(
                        "{} edge ({}, {}) references unknown vertex {}",
                        kind, a, b, endpoint
                    )));
                }
            }
            let edge = Edge::new(a, b);
            if edge.is_loop() {
                return Err(ClusterError::InvalidInput(format!(
                    "{} edge {} is a self-loop",
                    kind, edge
                )));
            }
            edges.insert(edge);
        }
        Ok(edges)
    }

    /// Vertices in caller order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Position of a vertex in the vertex list.
    pub fn position(&self, vertex: &V) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    /// Check if a vertex belongs to the graph.
    pub fn contains(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    /// Positive edges in canonical order.
    pub fn positive_edges(&self) -> &BTreeSet<Edge<V>> {
        &self.positive
    }

    /// Negative edges in canonical order.
    pub fn negative_edges(&self) -> &BTreeSet<Edge<V>> {
        &self.negative
    }

    /// Check for a positive edge between `a` and `b` (either order).
    pub fn has_positive(&self, a: &V, b: &V) -> bool {
        self.positive.contains(&Edge::new(a.clone(), b.clone()))
    }

    /// Check for a negative edge between `a` and `b` (either order).
    pub fn has_negative(&self, a: &V, b: &V) -> bool {
        self.negative.contains(&Edge::new(a.clone(), b.clone()))
    }

    /// Edges present in both the positive and the negative set.
    pub fn conflicting_edges(&self) -> Vec<&Edge<V>> {
        self.positive.intersection(&self.negative).collect()
    }

    /// Total number of edges (an edge in both sets counts twice).
    pub fn num_edges(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// Vertex and edge counts.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertex_count: self.vertices.len(),
            positive_edge_count: self.positive.len(),
            negative_edge_count: self.negative.len(),
            total_edge_count: self.num_edges(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> SignedGraph<u32> {
        SignedGraph::new(vec![1, 2, 3], vec![(1, 2), (2, 3)], vec![(1, 3)]).unwrap()
    }

    #[test]
    fn test_edge_is_canonical() {
        assert_eq!(Edge::new(3, 1), Edge::new(1, 3));
        let edge = Edge::new(5, 2);
        assert_eq!(edge.endpoints(), (&2, &5));
        assert_eq!(edge.variable_name(), "z_2_5");
        assert!(Edge::new(4, 4).is_loop());
    }

    #[test]
    fn test_edge_sets_deduplicate() {
        let graph = SignedGraph::new(
            vec![1, 2, 3],
            vec![(1, 2), (2, 1), (1, 2)],
            vec![(3, 1), (1, 3)],
        )
        .unwrap();

        assert_eq!(graph.positive_edges().len(), 1);
        assert_eq!(graph.negative_edges().len(), 1);
        assert!(graph.has_positive(&2, &1));
        assert!(graph.has_negative(&1, &3));
        assert!(!graph.has_negative(&1, &2));
    }

    #[test]
    fn test_stats() {
        let stats = path_graph().stats();
        assert_eq!(
            stats,
            GraphStats {
                vertex_count: 3,
                positive_edge_count: 2,
                negative_edge_count: 1,
                total_edge_count: 3,
            }
        );
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let err = SignedGraph::new(vec![1, 2], vec![(1, 7)], vec![]).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidInput(_)));

        let err = SignedGraph::new(vec![1, 2], vec![], vec![(9, 2)]).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidInput(_)));
    }

    #[test]
    fn test_self_loop_and_duplicate_vertex_rejected() {
        let err = SignedGraph::new(vec![1, 2], vec![(2, 2)], vec![]).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidInput(_)));

        let err = SignedGraph::<u32>::new(vec![1, 2, 1], vec![], vec![]).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidInput(_)));
    }

    #[test]
    fn test_conflicting_edges_reported() {
        let graph = SignedGraph::new(vec![1, 2, 3], vec![(1, 2), (2, 3)], vec![(2, 1)]).unwrap();
        assert_eq!(graph.conflicting_edges(), vec![&Edge::new(1, 2)]);
        assert_eq!(graph.num_edges(), 3);
        assert!(path_graph().conflicting_edges().is_empty());
    }

    #[test]
    fn test_string_vertices() {
        let graph = SignedGraph::new(
            vec!["b".to_string(), "a".to_string()],
            vec![("b".to_string(), "a".to_string())],
            vec![],
        )
        .unwrap();

        assert_eq!(graph.position(&"b".to_string()), Some(0));
        assert!(graph.contains(&"a".to_string()));
        let edge = graph.positive_edges().iter().next().unwrap();
        assert_eq!(edge.variable_name(), "z_a_b");
    }
}
