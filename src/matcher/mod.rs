pub mod similarity;
pub mod cluster;
pub mod types;
pub mod observer;
// Re-export the main types
pub use self::cluster::{Clusterer, ClusterSet, Cluster, RawIndex, Summary, group_records, summarize, records_per_cluster};
pub use self::similarity::{SimilarityCalculator, sequence_ratio};
pub use self::observer::{Assignment, CloseCallCollector, GroupingObserver, LogObserver};
pub use self::types::{
    CloseCall,
    Comparison,
    Grouping,
    Verdict,
};
