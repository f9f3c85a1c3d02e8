//! Local search over pairs of vertices.

use super::merged;
use super::run::{SearchOutcome, SearchRun, SearchStatus};
use crate::error::ClusterResult;
use crate::model::{SignedGraph, Vertex};
use crate::settings::SearchSettings;

/// Greedy vertex-pair merge search.
///
/// Each pass visits every ordered pair `(u, v)`, `u != v`, in vertex-list
/// order. Pairs already sharing a cluster are skipped; otherwise the candidate
/// moves all of `u`'s cluster into `v`'s cluster and is committed if it
/// strictly lowers the mistake count. Passes repeat until one commits nothing,
/// or the round ceiling in `settings` is reached.
///
/// The merges are the same kind as in [`super::cluster_merge_search`], but the
/// visiting order differs, so ties may settle in a different local optimum.
pub fn vertex_merge_search<V: Vertex>(
    graph: &SignedGraph<V>,
    settings: &SearchSettings,
) -> ClusterResult<SearchOutcome<V>> {
    if let Some(outcome) = SearchRun::trivial(graph)? {
        return Ok(outcome);
    }

    let mut run = SearchRun::new(graph, settings)?;
    let vertices = graph.vertices();
    let mut changed = true;

    while changed {
        if run.round_limit_reached() {
            return Ok(run.finish(SearchStatus::RoundLimit));
        }
        run.begin_round();
        changed = false;

        for u in vertices {
            for v in vertices {
                if u == v {
                    continue;
                }

                let from = run.label_of(u)?;
                let into = run.label_of(v)?;
                if from == into {
                    continue;
                }

                let candidate = merged(run.current(), from, into);
                if run.try_accept(candidate)? {
                    changed = true;
                }
            }
        }

        run.log_progress();
    }

    Ok(run.finish(SearchStatus::LocalOptimum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::cluster_merge_search;

    #[test]
    fn test_finds_planted_partition() {
        let graph = SignedGraph::new(
            vec![1u32, 2, 3, 4, 5],
            vec![(1, 2), (2, 3), (4, 5)],
            vec![(1, 4), (2, 5)],
        )
        .unwrap();
        let outcome = vertex_merge_search(&graph, &SearchSettings::default()).unwrap();

        assert_eq!(outcome.status, SearchStatus::LocalOptimum);
        assert_eq!(outcome.clustering.mistakes(), 0);
        assert_eq!(outcome.clustering.cluster_count(), 2);
        // (1,2): 1 joins 2; (1,3): {1,2} joins 3; then (4,5)
        assert_eq!(outcome.stats.history, vec![3, 2, 1, 0]);
        assert_eq!(outcome.clustering.label(&1), Some(2));
        assert_eq!(outcome.clustering.label(&4), Some(4));
    }

    #[test]
    fn test_ties_follow_visit_order() {
        // Vertex 2 is pulled equally toward 1 and 3, which repel each other.
        let graph = SignedGraph::new(
            vec![3u32, 1, 2],
            vec![(1, 2), (2, 3)],
            vec![(1, 3)],
        )
        .unwrap();

        let by_vertex = vertex_merge_search(&graph, &SearchSettings::default()).unwrap();
        let by_cluster = cluster_merge_search(&graph, &SearchSettings::default()).unwrap();

        // Both stop at one mistake
        assert_eq!(by_vertex.clustering.mistakes(), 1);
        assert_eq!(by_cluster.clustering.mistakes(), 1);

        // Vertex order (3,1): rejected, (3,2): 3 joins 2
        assert!(by_vertex.clustering.same_cluster(&3, &2));
        assert!(!by_vertex.clustering.same_cluster(&1, &2));

        // Labels follow vertex order 1,2,3: (1,2) merges first, then 1 and 2
        // joining 3 is no better
        assert!(by_cluster.clustering.same_cluster(&1, &2));
        assert!(!by_cluster.clustering.same_cluster(&2, &3));
        assert_eq!(by_cluster.stats.history, vec![2, 1]);
        assert!(!by_vertex.clustering.same_partition(&by_cluster.clustering));
    }

    #[test]
    fn test_round_limit() {
        let graph = SignedGraph::new(vec![1u32, 2, 3], vec![(1, 2), (2, 3)], vec![]).unwrap();
        let settings = SearchSettings::default().with_max_rounds(1);
        let outcome = vertex_merge_search(&graph, &settings).unwrap();

        assert_eq!(outcome.status, SearchStatus::RoundLimit);
        assert_eq!(outcome.clustering.mistakes(), 0);
        assert_eq!(outcome.stats.rounds, 1);
    }

    #[test]
    fn test_string_vertices() {
        let names = ["ann", "bob", "cat", "dan"].map(String::from);
        let graph = SignedGraph::new(
            names.to_vec(),
            vec![(names[0].clone(), names[1].clone()), (names[2].clone(), names[3].clone())],
            vec![(names[1].clone(), names[2].clone())],
        )
        .unwrap();

        let outcome = vertex_merge_search(&graph, &SearchSettings::default()).unwrap();
        assert_eq!(outcome.clustering.mistakes(), 0);
        assert_eq!(outcome.clustering.cluster_count(), 2);
        assert!(outcome.clustering.same_cluster(&names[0], &names[1]));
        assert!(!outcome.clustering.same_cluster(&names[1], &names[2]));
    }
}
