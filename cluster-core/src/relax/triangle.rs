//! Triangle-inequality constraints over edge variables.
//!
//! For three vertices whose three pairs all carry an edge variable, the
//! relaxed "distance" variables must satisfy the triangle inequality in every
//! direction:
//!
//! ```text
//! z_ij <= z_ik + z_jk
//! z_ik <= z_ij + z_jk
//! z_jk <= z_ij + z_ik
//! ```
//!
//! Triples missing any of the three pairs are skipped, so only a polynomial
//! subset of the metric constraints is generated.

use std::collections::BTreeMap;

use crate::error::{ClusterError, ClusterResult};
use crate::model::{Edge, Vertex};

/// One triangle inequality: `z[lhs] - z[others[0]] - z[others[1]] <= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleInequality {
    /// Variable bounded by the other two.
    pub lhs: usize,

    /// Variables on the other two sides of the triangle.
    pub others: [usize; 2],
}

impl TriangleInequality {
    /// Sparse row coefficients as (variable, coefficient).
    pub fn coefficients(&self) -> [(usize, f64); 3] {
        [
            (self.lhs, 1.0),
            (self.others[0], -1.0),
            (self.others[1], -1.0),
        ]
    }

    /// Compute violation: `z_lhs - z_a - z_b` (positive means violated).
    ///
    /// Fails with [`ClusterError::InvalidInput`] if `z` is too short for the
    /// row's variables.
    pub fn violation(&self, z: &[f64]) -> ClusterResult<f64> {
        let value = |var: usize| {
            z.get(var).copied().ok_or_else(|| {
                ClusterError::InvalidInput(format!(
                    "Point has {} entries, row uses variable {}",
                    z.len(),
                    var
                ))
            })
        };
        Ok(value(self.lhs)? - value(self.others[0])? - value(self.others[1])?)
    }

    /// Check if the inequality is violated by more than `tol`.
    pub fn is_violated(&self, z: &[f64], tol: f64) -> ClusterResult<bool> {
        Ok(self.violation(z)? > tol)
    }
}

/// Generate the three inequalities of every fully connected vertex triple.
///
/// Triples are visited as positions `i < j < k` in `vertices`; each emits its
/// rows in the order (ij, ik, jk) as the bounded side.
pub(crate) fn triangle_inequalities<V: Vertex>(
    vertices: &[V],
    edge_index: &BTreeMap<Edge<V>, usize>,
) -> Vec<TriangleInequality> {
    let n = vertices.len();
    if n < 3 || edge_index.len() < 3 {
        return Vec::new();
    }

    // Dense position-pair lookup so the triple loop avoids map probes
    let mut pair_var = vec![None; n * n];
    for (i, vi) in vertices.iter().enumerate() {
        for (j, vj) in vertices.iter().enumerate().skip(i + 1) {
            if let Some(&var) = edge_index.get(&Edge::new(vi.clone(), vj.clone())) {
                pair_var[i * n + j] = Some(var);
            }
        }
    }

    let mut rows = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let Some(ij) = pair_var[i * n + j] else {
                continue;
            };
            for k in (j + 1)..n {
                let (Some(ik), Some(jk)) = (pair_var[i * n + k], pair_var[j * n + k]) else {
                    continue;
                };
                rows.push(TriangleInequality { lhs: ij, others: [ik, jk] });
                rows.push(TriangleInequality { lhs: ik, others: [ij, jk] });
                rows.push(TriangleInequality { lhs: jk, others: [ij, ik] });
            }
        }
    }
    rows
}
