//! rdclean groups vendor-style records whose normalized names are textually
//! similar and keeps the first-seen record of each group as its
//! representative.

// Module declarations
pub mod error;
pub mod normalizer;
pub mod matcher;
pub mod utils;
pub mod config;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use matcher::{
    Clusterer,
    ClusterSet,
    RawIndex,
    SimilarityCalculator,
    Summary,
    CloseCall,
    Grouping,
};
pub use normalizer::{normalize, Normalizer};
pub use types::{FieldLayout, RecordAttributes, SourceRow};

// Re-export the config from config module
pub use config::RdCleanConfig;
pub use config::subsystems::{CountPolicy, MatcherConfig, SimilarityMode};
