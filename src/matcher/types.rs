// types.rs
use serde::{Serialize, Deserialize};
use std::fmt;
use crate::types::RecordAttributes;
use super::cluster::ClusterSet;

/// The decision taken for a pair whose score fell inside the close-call band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Similar,
    NotSimilar,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Similar => "similar",
            Verdict::NotSimilar => "not similar",
        }
    }
}

/// A comparison that scored within `tolerance` of the threshold and should be
/// reviewed by hand, whichever way it was decided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseCall {
    pub raw_key: String,
    pub representative: String,
    pub raw_attributes: RecordAttributes,
    pub representative_attributes: RecordAttributes,
    pub score: f64,
    pub verdict: Verdict,
}

impl fmt::Display for CloseCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - close call, score = {:.4} | {} {:?} | {} {:?}",
            self.verdict.as_str(),
            self.score,
            self.raw_key,
            self.raw_attributes,
            self.representative,
            self.representative_attributes
        )
    }
}

/// Outcome of scoring one raw key against one representative.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub score: f64,
    pub similar: bool,
    pub close_call: Option<CloseCall>,
}

/// Result of a grouping pass.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    pub clusters: ClusterSet,
    pub close_calls: Vec<CloseCall>,
}
