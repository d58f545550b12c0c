pub mod input;
pub mod normalizer;
pub mod matcher;
pub mod logging;

pub use input::InputConfig;
pub use normalizer::NormalizerConfig;
pub use matcher::{MatcherConfig, SimilarityMode, CountPolicy};
pub use logging::LoggingConfig;
