//! Planted-partition signed graph generator.

use anyhow::{bail, Context, Result};
use cluster_core::{Assignment, SignedGraph};

/// Generated instance with its planted partition.
pub struct PlantedInstance {
    pub graph: SignedGraph<u32>,
    pub planted: Assignment<u32>,
}

/// Generate a planted-partition signed graph:
///
/// vertex `v` belongs to group `v % groups`; each pair gets an edge with
/// probability `density`, positive inside a group and negative across groups,
/// and each sign is flipped with probability `noise`.
pub fn planted_partition(
    n: u32,
    groups: u32,
    density: f64,
    noise: f64,
    seed: u64,
) -> Result<PlantedInstance> {
    if groups == 0 {
        bail!("Need at least one planted group");
    }

    // Simple LCG random number generator
    let mut rng_state = seed;
    let mut rand = || -> f64 {
        rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((rng_state >> 33) as f64) / (u32::MAX as f64)
    };

    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for a in 0..n {
        for b in (a + 1)..n {
            if rand() >= density {
                continue;
            }
            let together = a % groups == b % groups;
            let flipped = rand() < noise;
            if together != flipped {
                positive.push((a, b));
            } else {
                negative.push((a, b));
            }
        }
    }

    let planted = (0..n).map(|v| (v, (v % groups) as usize)).collect();
    let graph = SignedGraph::new(0..n, positive, negative)
        .context("Generated graph failed validation")?;

    Ok(PlantedInstance { graph, planted })
}
