//! Clustering results.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::graph::{SignedGraph, Vertex};
use crate::error::ClusterResult;
use crate::evaluate::{count_mistakes, validate};

/// Cluster label. Labels are arbitrary and need not be contiguous.
pub type ClusterId = usize;

/// Vertex → cluster label map.
pub type Assignment<V> = BTreeMap<V, ClusterId>;

/// Evaluated clustering of a signed graph.
///
/// A `Clustering` can only be built by evaluating an assignment against a
/// graph, so its mistake count always describes the exact assignment it holds.
/// Improving a clustering means building a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering<V> {
    assignment: Assignment<V>,
    mistakes: usize,
    cluster_count: usize,
}

impl<V: Vertex> Clustering<V> {
    /// Evaluate `assignment` against `graph`.
    ///
    /// Fails with [`crate::ClusterError::MissingVertexAssignment`] if an edge
    /// endpoint has no label.
    pub fn evaluate(graph: &SignedGraph<V>, assignment: Assignment<V>) -> ClusterResult<Self> {
        let mistakes = count_mistakes(graph, &assignment)?;
        Ok(Self::with_mistakes(assignment, mistakes))
    }

    /// Wrap an assignment whose mistake count was just computed.
    pub(crate) fn with_mistakes(assignment: Assignment<V>, mistakes: usize) -> Self {
        let cluster_count = count_clusters(&assignment);
        Self {
            assignment,
            mistakes,
            cluster_count,
        }
    }

    /// Vertex → label map.
    pub fn assignment(&self) -> &Assignment<V> {
        &self.assignment
    }

    /// Consume the clustering, returning its assignment.
    pub fn into_assignment(self) -> Assignment<V> {
        self.assignment
    }

    /// Label of a vertex.
    pub fn label(&self, vertex: &V) -> Option<ClusterId> {
        self.assignment.get(vertex).copied()
    }

    /// Number of disagreeing edges.
    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    /// Number of distinct labels in use.
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Number of labeled vertices.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Returns true if no vertex is labeled.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Returns true if both vertices are labeled and share a label.
    pub fn same_cluster(&self, a: &V, b: &V) -> bool {
        match (self.assignment.get(a), self.assignment.get(b)) {
            (Some(la), Some(lb)) => la == lb,
            _ => false,
        }
    }

    /// Grouped view: label → members, members sorted by vertex.
    pub fn clusters(&self) -> BTreeMap<ClusterId, Vec<V>> {
        let mut groups: BTreeMap<ClusterId, Vec<V>> = BTreeMap::new();
        // BTreeMap iteration keeps members sorted
        for (vertex, &label) in &self.assignment {
            groups.entry(label).or_default().push(vertex.clone());
        }
        groups
    }

    /// Returns true if both clusterings induce the same partition, whatever
    /// labels they use.
    pub fn same_partition(&self, other: &Self) -> bool {
        let mut groups: Vec<Vec<V>> = self.clusters().into_values().collect();
        let mut other_groups: Vec<Vec<V>> = other.clusters().into_values().collect();
        groups.sort();
        other_groups.sort();
        groups == other_groups
    }

    /// Returns true if the labeled vertices are exactly the graph's vertices.
    pub fn is_valid_for(&self, graph: &SignedGraph<V>) -> bool {
        validate(graph, &self.assignment)
    }
}

impl<V: Vertex> fmt::Display for Clustering<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Clustering ({} clusters, {} mistakes):",
            self.cluster_count, self.mistakes
        )?;
        for (label, members) in self.clusters() {
            let names: Vec<String> = members.iter().map(|v| v.to_string()).collect();
            writeln!(f, "  cluster {}: [{}]", label, names.join(", "))?;
        }
        Ok(())
    }
}

/// Number of distinct labels in an assignment.
pub(crate) fn count_clusters<V>(assignment: &Assignment<V>) -> usize {
    assignment.values().collect::<BTreeSet<_>>().len()
}
