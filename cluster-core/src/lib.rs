//! Correlation clustering engine for signed graphs.
//!
//! Given vertices, a set of positive ("should be together") edges and a set of
//! negative ("should be apart") edges, the engine partitions the vertices so as
//! to minimize the number of disagreeing edges. It provides:
//!
//! - **Local search**: hill-climbing over whole-cluster merges, driven either
//!   by cluster label pairs or by vertex pairs
//! - **LP relaxation**: the triangle-inequality relaxation of the problem as
//!   sparse matrix data for an external LP solver
//! - **Threshold rounding**: turns an LP solution back into a clustering
//!
//! # Example
//!
//! ```
//! use cluster_core::{local_search, SearchSettings, SignedGraph};
//!
//! let graph = SignedGraph::new(
//!     vec![1, 2, 3, 4, 5],
//!     vec![(1, 2), (2, 3), (4, 5)],
//!     vec![(1, 4), (2, 5)],
//! )?;
//!
//! let outcome = local_search(&graph, &SearchSettings::default())?;
//! assert!(outcome.clustering.is_valid_for(&graph));
//! assert!(outcome.clustering.mistakes() <= 3);
//! # Ok::<(), cluster_core::ClusterError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod evaluate;
pub mod model;
pub mod relax;
pub mod search;
pub mod settings;

pub use error::{ClusterError, ClusterResult};
pub use evaluate::{count_mistakes, singleton_assignment, validate};
pub use model::{Assignment, ClusterId, Clustering, Edge, GraphStats, SignedGraph, Vertex};
pub use relax::{
    formulate, interpret, relax_and_round, IntegralSolver, LpFormulation, LpSolution,
    RelaxationSolver, UniformSolver,
};
pub use search::{
    cluster_merge_search, local_search, vertex_merge_search, SearchOutcome, SearchStats,
    SearchStatus,
};
pub use settings::{MergeStrategy, RoundingSettings, SearchSettings};
