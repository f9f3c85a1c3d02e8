//! Configuration settings for local search and LP rounding.

/// Move generation rule for local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Try every unordered pair of current cluster labels; take the first
    /// strictly improving merge.
    #[default]
    ClusterMerge,

    /// Try every ordered pair of vertices in different clusters, merging the
    /// first vertex's cluster into the second's.
    VertexMerge,
}

/// Local search settings.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Move generation rule.
    pub strategy: MergeStrategy,

    /// Ceiling on improvement rounds (full passes over the move space).
    /// None = |V|².
    pub max_rounds: Option<usize>,

    /// Log progress information.
    pub verbose: bool,

    /// Log frequency (log every N rounds).
    pub log_freq: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            strategy: MergeStrategy::default(),
            max_rounds: None,
            verbose: false,
            log_freq: 1,
        }
    }
}

impl SearchSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    /// Set the move generation rule.
    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the round ceiling.
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Round ceiling for a graph with `num_vertices` vertices.
    pub fn round_limit(&self, num_vertices: usize) -> usize {
        self.max_rounds
            .unwrap_or_else(|| num_vertices.saturating_mul(num_vertices))
    }
}

/// Settings for rounding an LP solution into a clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundingSettings {
    /// Pairs whose variable is strictly below this value are co-clustered.
    pub threshold: f64,

    /// Slack allowed outside [0, 1] before a value is rejected.
    pub bound_tol: f64,
}

impl Default for RoundingSettings {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            bound_tol: 1e-6,
        }
    }
}

impl RoundingSettings {
    /// Set the rounding threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}
