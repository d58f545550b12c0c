// cluster/mod.rs
pub mod index;
pub mod set;
pub mod grouping;
pub mod summary;

pub use self::index::RawIndex;
pub use self::set::{Cluster, ClusterSet};
pub use self::grouping::{Clusterer, group_records};
pub use self::summary::{Summary, summarize, records_per_cluster};
