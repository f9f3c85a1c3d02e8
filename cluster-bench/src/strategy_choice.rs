use clap::ValueEnum;
use cluster_core::MergeStrategy;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyChoice {
    ClusterMerge,
    VertexMerge,
    All,
}

impl StrategyChoice {
    pub fn strategies(self) -> Vec<MergeStrategy> {
        match self {
            StrategyChoice::ClusterMerge => vec![MergeStrategy::ClusterMerge],
            StrategyChoice::VertexMerge => vec![MergeStrategy::VertexMerge],
            StrategyChoice::All => vec![MergeStrategy::ClusterMerge, MergeStrategy::VertexMerge],
        }
    }
}
