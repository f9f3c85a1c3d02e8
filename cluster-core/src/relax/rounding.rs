//! Threshold rounding of an LP solution into a clustering.

use std::collections::BTreeMap;

use super::backend::LpSolution;
use crate::error::{ClusterError, ClusterResult};
use crate::model::{Assignment, ClusterId, Clustering, Edge, SignedGraph, Vertex};
use crate::settings::RoundingSettings;

/// Round an LP solution into a clustering.
///
/// Vertices are visited in vertex-list order. Each vertex not yet assigned
/// opens a new cluster (ids 0, 1, 2, ...) and pulls in every other unassigned
/// vertex whose pair variable is below `settings.threshold`. Pairs without an
/// edge variable never pull, and neither do edges the solution has no value
/// for. Names matching no graph edge are ignored.
///
/// Fails with [`ClusterError::InvalidInput`] if the solution is empty while
/// the graph has edges, or if an edge value is not finite or lies outside
/// [0, 1] by more than `settings.bound_tol`.
pub fn interpret<V: Vertex>(
    graph: &SignedGraph<V>,
    solution: &LpSolution,
    settings: &RoundingSettings,
) -> ClusterResult<Clustering<V>> {
    let values = edge_values(graph, solution, settings)?;
    let vertices = graph.vertices();

    let mut assignment = Assignment::new();
    let mut next_id: ClusterId = 0;

    for pivot in vertices {
        if assignment.contains_key(pivot) {
            continue;
        }
        let cluster = next_id;
        next_id += 1;
        assignment.insert(pivot.clone(), cluster);

        for other in vertices {
            if other == pivot || assignment.contains_key(other) {
                continue;
            }
            let pair = Edge::new(pivot.clone(), other.clone());
            if let Some(&z) = values.get(&pair) {
                if z < settings.threshold {
                    assignment.insert(other.clone(), cluster);
                }
            }
        }
    }

    log::debug!(
        "Rounded LP solution at threshold {} into {} clusters",
        settings.threshold,
        next_id
    );

    Clustering::evaluate(graph, assignment)
}

/// Key the solution's edge values by edge, checking their range.
fn edge_values<V: Vertex>(
    graph: &SignedGraph<V>,
    solution: &LpSolution,
    settings: &RoundingSettings,
) -> ClusterResult<BTreeMap<Edge<V>, f64>> {
    if solution.is_empty() && graph.num_edges() > 0 {
        return Err(ClusterError::InvalidInput(
            "Empty LP solution for a graph with edges".to_string(),
        ));
    }

    let mut values = BTreeMap::new();

    for edge in graph.positive_edges().iter().chain(graph.negative_edges()) {
        if values.contains_key(edge) {
            continue;
        }
        let name = edge.variable_name();
        let Some(value) = solution
            .get(&name)
            .or_else(|| solution.get(&format!("z_{}_{}", edge.v(), edge.u())))
        else {
            continue;
        };

        if !value.is_finite() || value < -settings.bound_tol || value > 1.0 + settings.bound_tol {
            return Err(ClusterError::InvalidInput(format!(
                "Value {} of {} is outside [0, 1]",
                value, name
            )));
        }
        values.insert(edge.clone(), value);
    }

    Ok(values)
}
