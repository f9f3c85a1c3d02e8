//! Local search over pairs of cluster labels.

use std::collections::BTreeSet;

use super::merged;
use super::run::{SearchOutcome, SearchRun, SearchStatus};
use crate::error::ClusterResult;
use crate::model::{ClusterId, SignedGraph, Vertex};
use crate::settings::SearchSettings;

/// Greedy cluster-merge search.
///
/// Each round snapshots the labels in use (ascending) and tries every
/// unordered pair `(a, b)`, `a < b`, merging cluster `a` into cluster `b`. The
/// first strictly improving merge is committed at once and the round keeps
/// scanning its remaining pairs against the new assignment. Rounds repeat
/// while the previous one improved, up to the round ceiling in `settings`.
///
/// The result is a local optimum with respect to whole-cluster merges, not a
/// global one.
pub fn cluster_merge_search<V: Vertex>(
    graph: &SignedGraph<V>,
    settings: &SearchSettings,
) -> ClusterResult<SearchOutcome<V>> {
    if let Some(outcome) = SearchRun::trivial(graph)? {
        return Ok(outcome);
    }

    let mut run = SearchRun::new(graph, settings)?;
    let mut improved = true;

    while improved {
        if run.round_limit_reached() {
            return Ok(run.finish(SearchStatus::RoundLimit));
        }
        run.begin_round();
        improved = false;

        let labels: Vec<ClusterId> = run
            .current()
            .values()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut live: BTreeSet<ClusterId> = labels.iter().copied().collect();

        for (i, &a) in labels.iter().enumerate() {
            for &b in &labels[i + 1..] {
                // A label emptied earlier this round makes the merge a rename
                if !live.contains(&a) || !live.contains(&b) {
                    continue;
                }

                let candidate = merged(run.current(), a, b);
                if run.try_accept(candidate)? {
                    live.remove(&a);
                    improved = true;
                }
            }
        }

        run.log_progress();
    }

    Ok(run.finish(SearchStatus::LocalOptimum))
}
