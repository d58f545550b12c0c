// src/config/subsystems/matcher.rs

use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use crate::error::{Error, Result};
use crate::config::FromIni;

/// Which parts of a record feed the similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMode {
    /// Normalized name only.
    #[default]
    Name,
    /// Name ratio averaged with an exact join-date match.
    FullRecord,
}

impl SimilarityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMode::Name => "name",
            SimilarityMode::FullRecord => "full_record",
        }
    }
}

impl FromStr for SimilarityMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim_matches('"').trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "full_record" => Ok(Self::FullRecord),
            other => Err(Error::Config(
                format!("Invalid similarity mode (must be name or full_record): {}", other)
            )),
        }
    }
}

impl fmt::Display for SimilarityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much a raw key adds to the count of the cluster that absorbs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    /// The number of source rows that normalized to the key.
    #[default]
    Occurrences,
    /// One per distinct key, ignoring rows that collapsed onto the same key.
    PerKey,
}

impl CountPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountPolicy::Occurrences => "occurrences",
            CountPolicy::PerKey => "per_key",
        }
    }
}

impl FromStr for CountPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim_matches('"').trim().to_lowercase().as_str() {
            "occurrences" => Ok(Self::Occurrences),
            "per_key" => Ok(Self::PerKey),
            other => Err(Error::Config(
                format!("Invalid count policy (must be occurrences or per_key): {}", other)
            )),
        }
    }
}

pub const DEFAULT_THRESHOLD: f64 = 0.9;
pub const DEFAULT_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Scores strictly above this are similar.
    pub threshold: f64,
    pub mode: SimilarityMode,
    /// Half-width of the close-call band around `threshold`.
    pub tolerance: f64,
    pub count_policy: CountPolicy,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mode: SimilarityMode::Name,
            tolerance: DEFAULT_TOLERANCE,
            count_policy: CountPolicy::Occurrences,
        }
    }
}

impl FromIni for MatcherConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "matcher" {
            return None;
        }

        match key {
            "threshold" => {
                match value.parse::<f64>() {
                    Ok(threshold) if threshold > 0.0 && threshold < 1.0 => {
                        self.threshold = threshold;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid threshold (must be between 0 and 1, exclusive): {}", value)
                    ))),
                }
            },
            "tolerance" => {
                match value.parse::<f64>() {
                    Ok(tolerance) if tolerance >= 0.0 => {
                        self.tolerance = tolerance;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid tolerance (must be non-negative): {}", value)
                    ))),
                }
            },
            "mode" => Some(value.parse::<SimilarityMode>().map(|mode| self.mode = mode)),
            "count_policy" => Some(value.parse::<CountPolicy>().map(|policy| self.count_policy = policy)),
            _ => None,
        }
    }
}

impl MatcherConfig {
    pub fn new(threshold: f64, mode: SimilarityMode) -> Self {
        Self {
            threshold,
            mode,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_count_policy(mut self, count_policy: CountPolicy) -> Self {
        self.count_policy = count_policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(Error::Config(
                format!("Invalid threshold (must be between 0 and 1, exclusive): {}", self.threshold)
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::Config(
                format!("Invalid tolerance (must be non-negative): {}", self.tolerance)
            ));
        }
        Ok(())
    }
}
