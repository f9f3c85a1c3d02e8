//! Signed graph and clustering types.

mod clustering;
mod graph;

pub use clustering::{Assignment, ClusterId, Clustering};
pub use graph::{Edge, GraphStats, SignedGraph, Vertex};
