//! Shared bookkeeping for a local search run.

use std::time::Instant;

use super::incumbent::Incumbent;
use crate::error::{ClusterError, ClusterResult};
use crate::evaluate::{count_mistakes, singleton_assignment};
use crate::model::{Assignment, ClusterId, Clustering, SignedGraph, Vertex};
use crate::settings::SearchSettings;

/// Why a local search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// A full round found no improving merge.
    LocalOptimum,

    /// The round ceiling was reached while still improving.
    RoundLimit,

    /// Fewer than two vertices; the singleton partition is returned as is.
    Trivial,
}

impl SearchStatus {
    /// Returns true if no improving merge remains.
    pub fn is_local_optimum(&self) -> bool {
        matches!(self, SearchStatus::LocalOptimum | SearchStatus::Trivial)
    }
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Rounds started (full passes over the move space).
    pub rounds: usize,

    /// Candidate assignments evaluated.
    pub candidates_evaluated: u64,

    /// Merges committed.
    pub moves_accepted: usize,

    /// Mistake count after every committed merge, singleton partition first.
    pub history: Vec<usize>,

    /// Wall time in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome<V> {
    /// Why the search stopped.
    pub status: SearchStatus,

    /// Best clustering found.
    pub clustering: Clustering<V>,

    /// Run counters.
    pub stats: SearchStats,
}

/// Local search controller.
///
/// Owns the incumbent, the round ceiling and the counters; the variants only
/// decide which candidates to build.
pub(crate) struct SearchRun<'a, V> {
    graph: &'a SignedGraph<V>,
    settings: &'a SearchSettings,
    incumbent: Incumbent<V>,
    round_limit: usize,
    rounds: usize,
    candidates_evaluated: u64,
    start_time: Instant,
}

impl<'a, V: Vertex> SearchRun<'a, V> {
    /// Start from the singleton partition.
    pub fn new(graph: &'a SignedGraph<V>, settings: &'a SearchSettings) -> ClusterResult<Self> {
        let start = singleton_assignment(graph);
        let mistakes = count_mistakes(graph, &start)?;

        if settings.verbose {
            log::info!(
                "Local search on {} vertices, {} edges | singleton mistakes: {}",
                graph.num_vertices(),
                graph.num_edges(),
                mistakes
            );
        }

        Ok(Self {
            graph,
            settings,
            incumbent: Incumbent::new(start, mistakes),
            round_limit: settings.round_limit(graph.num_vertices()),
            rounds: 0,
            candidates_evaluated: 0,
            start_time: Instant::now(),
        })
    }

    /// Outcome for graphs too small to search, if `graph` is one.
    pub fn trivial(graph: &SignedGraph<V>) -> ClusterResult<Option<SearchOutcome<V>>> {
        if graph.num_vertices() >= 2 {
            return Ok(None);
        }
        let clustering = Clustering::evaluate(graph, singleton_assignment(graph))?;
        let stats = SearchStats {
            history: vec![clustering.mistakes()],
            ..Default::default()
        };
        Ok(Some(SearchOutcome {
            status: SearchStatus::Trivial,
            clustering,
            stats,
        }))
    }

    /// Current (and best) assignment.
    pub fn current(&self) -> &Assignment<V> {
        self.incumbent.assignment()
    }

    /// Label of `vertex` in the current assignment.
    pub fn label_of(&self, vertex: &V) -> ClusterResult<ClusterId> {
        self.current()
            .get(vertex)
            .copied()
            .ok_or_else(|| ClusterError::MissingVertexAssignment(vertex.to_string()))
    }

    /// Returns true if another round would exceed the ceiling.
    pub fn round_limit_reached(&self) -> bool {
        self.rounds >= self.round_limit
    }

    /// Count a new round.
    pub fn begin_round(&mut self) {
        self.rounds += 1;
    }

    /// Evaluate a candidate and commit it if strictly better.
    ///
    /// Returns true if the candidate was committed.
    pub fn try_accept(&mut self, candidate: Assignment<V>) -> ClusterResult<bool> {
        self.candidates_evaluated += 1;
        let mistakes = count_mistakes(self.graph, &candidate)?;
        let accepted = self.incumbent.offer(candidate, mistakes);

        if accepted {
            log::trace!("Round {}: accepted merge, mistakes={}", self.rounds, mistakes);
        }

        Ok(accepted)
    }

    /// Elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Log progress (if verbose).
    pub fn log_progress(&self) {
        if !self.settings.verbose {
            return;
        }

        if self.settings.log_freq == 0 || self.rounds % self.settings.log_freq != 0 {
            return;
        }

        log::info!(
            "Round: {} | Mistakes: {} | Accepted: {} | Candidates: {} | Time: {:.1}s",
            self.rounds,
            self.incumbent.mistakes(),
            self.incumbent.update_count(),
            self.candidates_evaluated,
            self.elapsed_ms() as f64 / 1000.0,
        );
    }

    /// Finalize the run.
    pub fn finish(self, status: SearchStatus) -> SearchOutcome<V> {
        let elapsed_ms = self.elapsed_ms();
        let moves_accepted = self.incumbent.update_count();
        let (assignment, mistakes, history) = self.incumbent.into_parts();
        let clustering = Clustering::with_mistakes(assignment, mistakes);

        log::debug!(
            "Local search finished: {:?} after {} rounds, {} mistakes in {} clusters",
            status,
            self.rounds,
            clustering.mistakes(),
            clustering.cluster_count()
        );

        SearchOutcome {
            status,
            clustering,
            stats: SearchStats {
                rounds: self.rounds,
                candidates_evaluated: self.candidates_evaluated,
                moves_accepted,
                history,
                elapsed_ms,
            },
        }
    }
}
