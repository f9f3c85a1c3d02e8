//! Benchmark report types and JSON output.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Size of the generated instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSummary {
    pub vertices: usize,
    pub positive_edges: usize,
    pub negative_edges: usize,
    pub seed: u64,
    /// Mistakes of the planted partition (noise floor).
    pub planted_mistakes: usize,
    /// Mistakes of the singleton partition (search starting point).
    pub singleton_mistakes: usize,
}

/// Result of one local search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub strategy: String,
    pub status: String,
    pub mistakes: usize,
    pub clusters: usize,
    pub rounds: usize,
    pub candidates_evaluated: u64,
    pub moves_accepted: usize,
    pub solve_time_ms: u64,
}

/// LP relaxation size and the rounding of the best heuristic clustering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LpReport {
    pub variables: usize,
    pub constraints: usize,
    pub nonzeros: usize,
    pub formulate_time_ms: f64,
    /// Relaxed objective (with offset) at the integral point of the best run.
    pub integral_disagreement: f64,
    pub max_violation: f64,
    pub rounded_mistakes: usize,
    pub rounded_clusters: usize,
}

/// Full benchmark report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    pub graph: GraphSummary,
    pub runs: Vec<RunResult>,
    pub lp: Option<LpReport>,
}

impl BenchReport {
    /// Save to JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file {}", path.as_ref().display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .with_context(|| format!("Failed to write JSON to {}", path.as_ref().display()))?;
        Ok(())
    }
}
