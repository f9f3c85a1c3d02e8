//! LP relaxation: formulation, external solve and rounding.

mod backend;
mod formulation;
mod rounding;
mod triangle;

pub use backend::{IntegralSolver, LpSolution, RelaxationSolver, UniformSolver};
pub use formulation::{formulate, ConstraintSense, LpFormulation, SparseCsr, VarBound};
pub use rounding::interpret;
pub use triangle::TriangleInequality;

use crate::error::ClusterResult;
use crate::model::{Clustering, SignedGraph, Vertex};
use crate::settings::RoundingSettings;

/// Formulate the relaxation of `graph`, solve it with `solver` and round the
/// result.
pub fn relax_and_round<V, S>(
    graph: &SignedGraph<V>,
    solver: &mut S,
    settings: &RoundingSettings,
) -> ClusterResult<Clustering<V>>
where
    V: Vertex,
    S: RelaxationSolver<V> + ?Sized,
{
    let lp = formulate(graph)?;
    let solution = solver.solve(&lp)?;

    match lp.values_from(&solution) {
        Ok(z) => log::debug!(
            "Relaxation solved: disagreement {:.4}, max violation {:.2e}",
            lp.disagreement_value(&z)?,
            lp.max_violation(&z)?
        ),
        Err(_) => log::debug!(
            "Relaxation solved with {} of {} variables set",
            solution.len(),
            lp.num_vars()
        ),
    }

    interpret(graph, &solution, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClusterError;
    use crate::search::cluster_merge_search;
    use crate::settings::SearchSettings;

    struct FailingSolver;

    impl RelaxationSolver<u32> for FailingSolver {
        fn solve(&mut self, _lp: &LpFormulation<u32>) -> ClusterResult<LpSolution> {
            Err(ClusterError::SolverError("no license".to_string()))
        }
    }

    fn graph() -> SignedGraph<u32> {
        SignedGraph::new(
            vec![1, 2, 3, 4, 5],
            vec![(1, 2), (2, 3), (4, 5)],
            vec![(1, 4), (2, 5)],
        )
        .unwrap()
    }

    #[test]
    fn test_uniform_solver_keeps_vertices_apart() {
        let graph = graph();
        let clustering =
            relax_and_round(&graph, &mut UniformSolver::default(), &RoundingSettings::default())
                .unwrap();

        assert_eq!(clustering.cluster_count(), 5);
        assert_eq!(clustering.mistakes(), 3);
    }

    #[test]
    fn test_integral_point_round_trips() {
        // Rounding only follows direct edges, so each cluster must be a clique
        let graph = SignedGraph::new(
            vec![1, 2, 3, 4, 5],
            vec![(1, 2), (2, 3), (1, 3), (4, 5)],
            vec![(1, 4), (2, 5)],
        )
        .unwrap();
        let outcome = cluster_merge_search(&graph, &SearchSettings::default()).unwrap();

        let mut solver = IntegralSolver::new(&outcome.clustering);
        let rounded = relax_and_round(&graph, &mut solver, &RoundingSettings::default()).unwrap();

        assert!(rounded.same_partition(&outcome.clustering));
        assert_eq!(rounded.mistakes(), outcome.clustering.mistakes());
    }

    #[test]
    fn test_solver_failure_propagates() {
        let err = relax_and_round(&graph(), &mut FailingSolver, &RoundingSettings::default())
            .unwrap_err();
        assert_eq!(err, ClusterError::SolverError("no license".to_string()));
    }
}
