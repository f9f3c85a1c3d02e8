//! LP relaxation of correlation clustering.
//!
//! One variable `z_e ∈ [0, 1]` per edge, read as "how separated" the two
//! endpoints are. The true objective
//!
//! ```text
//! minimize  Σ_{e ∈ E+} z_e + Σ_{e ∈ E-} (1 - z_e)
//! ```
//!
//! is stored as the coefficient vector of `Σ_{E+} z_e - Σ_{E-} z_e` plus the
//! constant offset `|E-|`, which does not move the minimizer. Constraints are
//! the triangle inequalities of [`super::triangle`], all in `A z <= 0` form.

use std::collections::{BTreeMap, BTreeSet};

use sprs::{CsMat, TriMat};

use super::backend::LpSolution;
use super::triangle::{triangle_inequalities, TriangleInequality};
use crate::error::{ClusterError, ClusterResult};
use crate::model::{Edge, SignedGraph, Vertex};

/// Sparse constraint matrix (row-major, one row per constraint).
pub type SparseCsr = CsMat<f64>;

/// Sense of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    /// Row · z <= rhs
    LessEqual,
    /// Row · z >= rhs
    GreaterEqual,
    /// Row · z = rhs
    Equal,
}

impl ConstraintSense {
    /// Conventional symbol, e.g. `<=`.
    pub fn symbol(&self) -> &'static str {
        match self {
            ConstraintSense::LessEqual => "<=",
            ConstraintSense::GreaterEqual => ">=",
            ConstraintSense::Equal => "=",
        }
    }
}

/// Box bounds of one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarBound {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
}

impl VarBound {
    /// The unit interval [0, 1].
    pub const UNIT: VarBound = VarBound {
        lower: 0.0,
        upper: 1.0,
    };
}

/// LP relaxation data for one signed graph.
///
/// Built once by [`formulate`] and never modified. Variables are the positive
/// edges in canonical order followed by the negative edges in canonical
/// order.
#[derive(Debug, Clone)]
pub struct LpFormulation<V> {
    objective: Vec<f64>,
    objective_offset: f64,
    constraints: SparseCsr,
    rhs: Vec<f64>,
    senses: Vec<ConstraintSense>,
    bounds: Vec<VarBound>,
    variable_names: Vec<String>,

    /// Edge of each variable.
    edges: Vec<Edge<V>>,

    /// Variable of each edge. An edge in both sign sets maps to its positive
    /// variable.
    edge_index: BTreeMap<Edge<V>, usize>,

    triangles: Vec<TriangleInequality>,
}

/// Formulate the triangle-inequality LP relaxation of `graph`.
///
/// Fails with [`ClusterError::InvalidInput`] if two different edges would get
/// the same variable name, which happens when vertex names contain `_` in
/// ambiguous ways.
pub fn formulate<V: Vertex>(graph: &SignedGraph<V>) -> ClusterResult<LpFormulation<V>> {
    let num_vars = graph.num_edges();

    let mut objective = Vec::with_capacity(num_vars);
    let mut variable_names = Vec::with_capacity(num_vars);
    let mut edges = Vec::with_capacity(num_vars);
    let mut edge_index = BTreeMap::new();
    let mut names_seen: BTreeMap<String, &Edge<V>> = BTreeMap::new();

    let signed = graph
        .positive_edges()
        .iter()
        .map(|e| (e, 1.0))
        .chain(graph.negative_edges().iter().map(|e| (e, -1.0)));

    for (var, (edge, coef)) in signed.enumerate() {
        let name = edge.variable_name();
        if let Some(other) = names_seen.insert(name.clone(), edge) {
            if other != edge {
                return Err(ClusterError::InvalidInput(format!(
                    "Edges {} and {} share variable name {}",
                    other, edge, name
                )));
            }
        }

        objective.push(coef);
        variable_names.push(name);
        edges.push(edge.clone());
        edge_index.entry(edge.clone()).or_insert(var);
    }

    let triangles = triangle_inequalities(graph.vertices(), &edge_index);
    let num_rows = triangles.len();

    let mut tri = TriMat::new((num_rows, num_vars));
    for (row, ineq) in triangles.iter().enumerate() {
        for (col, val) in ineq.coefficients() {
            tri.add_triplet(row, col, val);
        }
    }
    let constraints: SparseCsr = tri.to_csr();

    log::debug!(
        "Formulated LP relaxation: {} variables, {} triangle constraints, {} nonzeros",
        num_vars,
        num_rows,
        constraints.nnz()
    );

    Ok(LpFormulation {
        objective,
        objective_offset: graph.negative_edges().len() as f64,
        constraints,
        rhs: vec![0.0; num_rows],
        senses: vec![ConstraintSense::LessEqual; num_rows],
        bounds: vec![VarBound::UNIT; num_vars],
        variable_names,
        edges,
        edge_index,
        triangles,
    })
}

impl<V: Vertex> LpFormulation<V> {
    /// Number of variables (one per edge).
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Number of constraint rows.
    pub fn num_constraints(&self) -> usize {
        self.rhs.len()
    }

    /// Objective coefficients: +1 for positive edges, -1 for negative edges.
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Constant dropped from the objective (`|E-|`).
    pub fn objective_offset(&self) -> f64 {
        self.objective_offset
    }

    /// Constraint matrix, row-major.
    pub fn constraints(&self) -> &SparseCsr {
        &self.constraints
    }

    /// Constraint matrix converted to column-major storage.
    pub fn constraints_csc(&self) -> SparseCsr {
        self.constraints.to_csc()
    }

    /// Dense copy of one constraint row.
    pub fn dense_row(&self, row: usize) -> Option<Vec<f64>> {
        let view = self.constraints.outer_view(row)?;
        let mut dense = vec![0.0; self.num_vars()];
        for (col, &val) in view.iter() {
            dense[col] = val;
        }
        Some(dense)
    }

    /// Right-hand sides (all zero).
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Constraint senses (all `<=`).
    pub fn senses(&self) -> &[ConstraintSense] {
        &self.senses
    }

    /// Variable bounds (all [0, 1]).
    pub fn bounds(&self) -> &[VarBound] {
        &self.bounds
    }

    /// Variable names, `z_{u}_{v}` with `u < v`.
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// Edge of each variable.
    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    /// Variable attached to an edge.
    pub fn variable_index(&self, edge: &Edge<V>) -> Option<usize> {
        self.edge_index.get(edge).copied()
    }

    /// Variable attached to the pair `{a, b}`.
    pub fn variable_for(&self, a: &V, b: &V) -> Option<usize> {
        self.variable_index(&Edge::new(a.clone(), b.clone()))
    }

    /// Triangle inequality behind each constraint row.
    pub fn triangles(&self) -> &[TriangleInequality] {
        &self.triangles
    }

    /// Objective value `c · z` (without the constant offset).
    ///
    /// This and the other point evaluations below fail with
    /// [`ClusterError::InvalidInput`] if `z` does not have one entry per
    /// variable.
    pub fn objective_value(&self, z: &[f64]) -> ClusterResult<f64> {
        self.check_len(z)?;
        Ok(self.objective.iter().zip(z).map(|(c, z)| c * z).sum())
    }

    /// Relaxed disagreement `c · z + |E-|`.
    ///
    /// For the integral point of a clustering this is its mistake count.
    pub fn disagreement_value(&self, z: &[f64]) -> ClusterResult<f64> {
        Ok(self.objective_value(z)? + self.objective_offset)
    }

    /// Largest constraint violation (0 if all rows hold).
    pub fn max_violation(&self, z: &[f64]) -> ClusterResult<f64> {
        self.check_len(z)?;
        let mut max = 0.0_f64;
        for t in &self.triangles {
            max = max.max(t.violation(z)?);
        }
        Ok(max)
    }

    /// Rows violated by more than `tol`.
    pub fn violated(&self, z: &[f64], tol: f64) -> ClusterResult<Vec<usize>> {
        self.check_len(z)?;
        let mut rows = Vec::new();
        for (row, t) in self.triangles.iter().enumerate() {
            if t.is_violated(z, tol)? {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn check_len(&self, z: &[f64]) -> ClusterResult<()> {
        if z.len() != self.num_vars() {
            return Err(ClusterError::InvalidInput(format!(
                "Point has {} entries, LP has {} variables",
                z.len(),
                self.num_vars()
            )));
        }
        Ok(())
    }

    /// Check if a point satisfies the variable bounds.
    pub fn satisfies_bounds(&self, z: &[f64], tol: f64) -> bool {
        z.len() == self.num_vars()
            && z
                .iter()
                .zip(&self.bounds)
                .all(|(&x, b)| x >= b.lower - tol && x <= b.upper + tol)
    }

    /// Dense point from a name-keyed solution.
    ///
    /// Fails with [`ClusterError::InvalidInput`] if a variable has no value.
    pub fn values_from(&self, solution: &LpSolution) -> ClusterResult<Vec<f64>> {
        self.variable_names
            .iter()
            .map(|name| {
                solution.get(name).ok_or_else(|| {
                    ClusterError::InvalidInput(format!("No value for variable {}", name))
                })
            })
            .collect()
    }

    /// Distinct vertices touched by at least one variable.
    pub fn covered_vertices(&self) -> BTreeSet<&V> {
        self.edges
            .iter()
            .flat_map(|e| [e.u(), e.v()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_graph() -> SignedGraph<u32> {
        SignedGraph::new(vec![1, 2, 3], vec![(1, 2), (2, 3)], vec![(1, 3)]).unwrap()
    }

    #[test]
    fn test_variables_and_objective() {
        let lp = formulate(&triangle_graph()).unwrap();

        assert_eq!(lp.num_vars(), 3);
        assert_eq!(lp.variable_names(), &["z_1_2", "z_2_3", "z_1_3"]);
        assert_eq!(lp.objective(), &[1.0, 1.0, -1.0]);
        assert_eq!(lp.objective_offset(), 1.0);
        assert_eq!(lp.bounds(), &[VarBound::UNIT; 3]);
        assert_eq!(lp.variable_for(&3, &1), Some(2));
        assert_eq!(lp.variable_for(&1, &1), None);
    }

    #[test]
    fn test_triangle_rows() {
        let lp = formulate(&triangle_graph()).unwrap();

        assert_eq!(lp.num_constraints(), 3);
        assert_eq!(lp.rhs(), &[0.0; 3]);
        assert!(lp.senses().iter().all(|s| *s == ConstraintSense::LessEqual));

        // Vertex order 1,2,3: ij = z_1_2 (0), ik = z_1_3 (2), jk = z_2_3 (1)
        assert_eq!(lp.dense_row(0).unwrap(), vec![1.0, -1.0, -1.0]);
        assert_eq!(lp.dense_row(1).unwrap(), vec![-1.0, -1.0, 1.0]);
        assert_eq!(lp.dense_row(2).unwrap(), vec![-1.0, 1.0, -1.0]);
        assert!(lp.dense_row(3).is_none());

        assert_eq!(lp.constraints().nnz(), 9);
        let csc = lp.constraints_csc();
        assert!(csc.is_csc());
        assert_eq!(csc.shape(), (3, 3));
    }

    #[test]
    fn test_no_triangles() {
        let graph = SignedGraph::new(vec![1, 2, 3, 4], vec![(1, 2), (3, 4)], vec![(2, 3)]).unwrap();
        let lp = formulate(&graph).unwrap();

        assert_eq!(lp.num_vars(), 3);
        assert_eq!(lp.num_constraints(), 0);
        assert_eq!(lp.constraints().shape(), (0, 3));
        assert_eq!(lp.max_violation(&[0.3, 0.2, 0.9]).unwrap(), 0.0);
    }

    #[test]
    fn test_values_and_violations() {
        let lp = formulate(&triangle_graph()).unwrap();

        // z_1_2 = 0, z_2_3 = 0, z_1_3 = 1: 1 and 3 separated but both joined to 2
        let z = [0.0, 0.0, 1.0];
        assert!(lp.satisfies_bounds(&z, 1e-9));
        assert_eq!(lp.violated(&z, 1e-9).unwrap(), vec![1]);
        assert!((lp.max_violation(&z).unwrap() - 1.0).abs() < 1e-12);
        assert!((lp.objective_value(&z).unwrap() + 1.0).abs() < 1e-12);
        assert!(lp.disagreement_value(&z).unwrap().abs() < 1e-12);

        // Everything together: one mistake (the negative edge)
        let z = [0.0, 0.0, 0.0];
        assert!(lp.violated(&z, 1e-9).unwrap().is_empty());
        assert!((lp.disagreement_value(&z).unwrap() - 1.0).abs() < 1e-12);

        assert!(!lp.satisfies_bounds(&[0.0, 1.5, 0.0], 1e-9));
        assert!(!lp.satisfies_bounds(&[0.0, 0.5], 1e-9));
    }

    #[test]
    fn test_wrong_length_point_is_an_error() {
        let lp = formulate(&triangle_graph()).unwrap();
        let short = [0.0, 0.0];

        for result in [
            lp.max_violation(&short),
            lp.objective_value(&short),
            lp.disagreement_value(&short),
            lp.max_violation(&[0.0; 4]),
        ] {
            assert!(matches!(result, Err(ClusterError::InvalidInput(_))));
        }
        assert!(matches!(lp.violated(&short, 1e-9), Err(ClusterError::InvalidInput(_))));
    }

    #[test]
    fn test_values_from_solution() {
        let lp = formulate(&triangle_graph()).unwrap();
        let mut solution: LpSolution = [("z_1_2", 0.1), ("z_2_3", 0.2), ("z_1_3", 0.9)]
            .into_iter()
            .map(|(n, v)| (n.to_string(), v))
            .collect();

        assert_eq!(lp.values_from(&solution).unwrap(), vec![0.1, 0.2, 0.9]);

        solution.remove("z_2_3");
        let err = lp.values_from(&solution).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidInput(_)));
    }

    #[test]
    fn test_ambiguous_names_rejected() {
        let v = |s: &str| s.to_string();
        let graph = SignedGraph::new(
            vec![v("a_b"), v("c"), v("a"), v("b_c")],
            vec![(v("a_b"), v("c")), (v("a"), v("b_c"))],
            vec![],
        )
        .unwrap();

        let err = formulate(&graph).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidInput(_)));
    }

    #[test]
    fn test_conflicting_edge_gets_two_variables() {
        let graph = SignedGraph::new(vec![1, 2], vec![(1, 2)], vec![(2, 1)]).unwrap();
        let lp = formulate(&graph).unwrap();

        assert_eq!(lp.num_vars(), 2);
        assert_eq!(lp.objective(), &[1.0, -1.0]);
        assert_eq!(lp.variable_for(&1, &2), Some(0));
        assert_eq!(lp.covered_vertices().len(), 2);
    }
}
