//! Relaxation solver trait and solution types.
//!
//! Solving the LP is delegated to an external numerical solver. This module
//! defines the seam the engine talks to and two reference implementations.

use std::collections::BTreeMap;

use super::formulation::LpFormulation;
use crate::error::{ClusterError, ClusterResult};
use crate::model::{Clustering, Vertex};

/// Variable values returned by a relaxation solver, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LpSolution {
    values: BTreeMap<String, f64>,
}

impl LpSolution {
    /// Create an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a solution from a dense point ordered like `lp`'s variables.
    pub fn from_dense<V: Vertex>(lp: &LpFormulation<V>, z: &[f64]) -> ClusterResult<Self> {
        if z.len() != lp.num_vars() {
            return Err(ClusterError::InvalidInput(format!(
                "Expected {} variable values, got {}",
                lp.num_vars(),
                z.len()
            )));
        }
        Ok(lp
            .variable_names()
            .iter()
            .cloned()
            .zip(z.iter().copied())
            .collect())
    }

    /// Set the value of a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Remove a variable, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Value of a variable.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of variables with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no variable has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, f64)> for LpSolution {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// External LP solver.
///
/// Implementations receive the full formulation (objective, sparse constraint
/// matrix, right-hand sides, senses and bounds) and return one value per
/// variable name. Failures must be reported as errors, not panics.
pub trait RelaxationSolver<V> {
    /// Solve the relaxation.
    fn solve(&mut self, lp: &LpFormulation<V>) -> ClusterResult<LpSolution>;
}

/// Placeholder solver that gives every variable the same value.
///
/// Useful to exercise the pipeline without a numerical solver. The default
/// value 0.5 sits exactly on the rounding threshold, so rounding its output
/// keeps every vertex apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSolver {
    /// Value assigned to every variable.
    pub value: f64,
}

impl Default for UniformSolver {
    fn default() -> Self {
        Self { value: 0.5 }
    }
}

impl UniformSolver {
    /// Create a solver that returns `value` everywhere.
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl<V: Vertex> RelaxationSolver<V> for UniformSolver {
    fn solve(&mut self, lp: &LpFormulation<V>) -> ClusterResult<LpSolution> {
        if !self.value.is_finite() {
            return Err(ClusterError::SolverError(format!(
                "Uniform value {} is not finite",
                self.value
            )));
        }
        Ok(lp
            .variable_names()
            .iter()
            .map(|name| (name.clone(), self.value))
            .collect())
    }
}

/// Integral point of an existing clustering: 0 for co-clustered endpoints,
/// 1 for separated ones.
///
/// The point is feasible for every triangle inequality and its disagreement
/// value equals the clustering's mistake count.
#[derive(Debug, Clone, Copy)]
pub struct IntegralSolver<'a, V> {
    clustering: &'a Clustering<V>,
}

impl<'a, V: Vertex> IntegralSolver<'a, V> {
    /// Wrap a clustering.
    pub fn new(clustering: &'a Clustering<V>) -> Self {
        Self { clustering }
    }
}

impl<V: Vertex> RelaxationSolver<V> for IntegralSolver<'_, V> {
    fn solve(&mut self, lp: &LpFormulation<V>) -> ClusterResult<LpSolution> {
        let mut solution = LpSolution::new();
        for (edge, name) in lp.edges().iter().zip(lp.variable_names()) {
            for vertex in [edge.u(), edge.v()] {
                if self.clustering.label(vertex).is_none() {
                    return Err(ClusterError::MissingVertexAssignment(vertex.to_string()));
                }
            }
            let separated = !self.clustering.same_cluster(edge.u(), edge.v());
            solution.insert(name.clone(), if separated { 1.0 } else { 0.0 });
        }
        Ok(solution)
    }
}
