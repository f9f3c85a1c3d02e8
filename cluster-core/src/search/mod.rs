//! Local search over whole-cluster merges.
//!
//! Both variants start from the singleton partition and only ever commit a
//! merge that strictly lowers the mistake count. Each candidate is built on a
//! fresh copy of the current assignment, so the assignment a decision is
//! measured against never changes while a candidate is being evaluated.

mod cluster_merge;
mod incumbent;
mod run;
mod vertex_merge;

pub use cluster_merge::cluster_merge_search;
pub use incumbent::Incumbent;
pub use run::{SearchOutcome, SearchStats, SearchStatus};
pub use vertex_merge::vertex_merge_search;

use crate::error::ClusterResult;
use crate::model::{Assignment, ClusterId, SignedGraph, Vertex};
use crate::settings::{MergeStrategy, SearchSettings};

/// Run local search with the strategy selected in `settings`.
pub fn local_search<V: Vertex>(
    graph: &SignedGraph<V>,
    settings: &SearchSettings,
) -> ClusterResult<SearchOutcome<V>> {
    match settings.strategy {
        MergeStrategy::ClusterMerge => cluster_merge_search(graph, settings),
        MergeStrategy::VertexMerge => vertex_merge_search(graph, settings),
    }
}

/// Copy of `assignment` with every `from` vertex relabeled to `into`.
pub(crate) fn merged<V: Vertex>(
    assignment: &Assignment<V>,
    from: ClusterId,
    into: ClusterId,
) -> Assignment<V> {
    let mut candidate = assignment.clone();
    for label in candidate.values_mut() {
        if *label == from {
            *label = into;
        }
    }
    candidate
}
