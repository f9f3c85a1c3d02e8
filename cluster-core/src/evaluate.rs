//! Mistake counting and assignment validation.
//!
//! A mistake is a positive edge split across two clusters, or a negative edge
//! inside one cluster. Everything here is a pure function of the graph and the
//! assignment.

use std::collections::BTreeSet;

use crate::error::{ClusterError, ClusterResult};
use crate::model::{Assignment, ClusterId, SignedGraph, Vertex};

/// Count the edges of `graph` that disagree with `assignment`.
///
/// Every endpoint of every edge must be labeled; a missing label fails with
/// [`ClusterError::MissingVertexAssignment`] instead of being counted as a
/// mismatch.
pub fn count_mistakes<V: Vertex>(
    graph: &SignedGraph<V>,
    assignment: &Assignment<V>,
) -> ClusterResult<usize> {
    let mut mistakes = 0;

    for edge in graph.positive_edges() {
        let (a, b) = labels(assignment, edge.endpoints())?;
        if a != b {
            mistakes += 1;
        }
    }

    for edge in graph.negative_edges() {
        let (a, b) = labels(assignment, edge.endpoints())?;
        if a == b {
            mistakes += 1;
        }
    }

    Ok(mistakes)
}

fn labels<V: Vertex>(
    assignment: &Assignment<V>,
    (u, v): (&V, &V),
) -> ClusterResult<(ClusterId, ClusterId)> {
    let label = |vertex: &V| {
        assignment
            .get(vertex)
            .copied()
            .ok_or_else(|| ClusterError::MissingVertexAssignment(vertex.to_string()))
    };
    Ok((label(u)?, label(v)?))
}

/// Returns true iff the assignment labels exactly the graph's vertices.
pub fn validate<V: Vertex>(graph: &SignedGraph<V>, assignment: &Assignment<V>) -> bool {
    if assignment.len() != graph.num_vertices() {
        return false;
    }
    let vertices: BTreeSet<&V> = graph.vertices().iter().collect();
    assignment.keys().all(|v| vertices.contains(v))
}

/// Each vertex in its own cluster.
///
/// Labels are the vertices' ranks in ascending vertex order, so label order
/// matches vertex order whatever order the graph lists its vertices in.
pub fn singleton_assignment<V: Vertex>(graph: &SignedGraph<V>) -> Assignment<V> {
    let mut sorted: Vec<&V> = graph.vertices().iter().collect();
    sorted.sort();
    sorted
        .into_iter()
        .enumerate()
        .map(|(rank, v)| (v.clone(), rank))
        .collect()
}
