//! Name normalization: strips ignored substrings and folds case,
//! whitespace and punctuation so names can be compared as keys.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::{Regex, RegexBuilder};

use crate::config::subsystems::NormalizerConfig;
use crate::error::Result;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W").unwrap();
}

/// Patterns stripped from vendor names unless configured otherwise.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 2] = [",", r"\."];

pub fn default_ignore_patterns() -> Vec<String> {
    DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// One-shot normalization. Compiles `ignore_patterns` on every call; use
/// [`Normalizer`] when normalizing many values with the same patterns.
pub fn normalize<S: AsRef<str>>(input: &str, fold: bool, ignore_patterns: &[S]) -> Result<String> {
    Ok(Normalizer::new(fold, ignore_patterns)?.normalize(input))
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    fold: bool,
    ignore: Vec<Regex>,
}

impl Normalizer {
    pub fn new<S: AsRef<str>>(fold: bool, ignore_patterns: &[S]) -> Result<Self> {
        let ignore = ignore_patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern.as_ref())
                    .case_insensitive(true)
                    .build()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Compiled {} ignore patterns (fold = {})", ignore.len(), fold);
        Ok(Self { fold, ignore })
    }

    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        Self::new(config.fold, &config.ignore_patterns)
    }

    pub fn fold(&self) -> bool {
        self.fold
    }

    pub fn normalize(&self, input: &str) -> String {
        // Each removal sees the output of the previous one
        let mut text = input.to_string();
        for pattern in &self.ignore {
            text = pattern.replace_all(&text, "").into_owned();
        }

        if !self.fold {
            return text;
        }

        let lowered = text.trim().to_lowercase();
        let folded = NON_WORD.replace_all(&lowered, "").trim().to_string();
        trace!("Normalized {:?} -> {:?}", input, folded);
        folded
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        let ignore = DEFAULT_IGNORE_PATTERNS
            .iter()
            .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
            .collect();
        Self { fold: true, ignore }
    }
}
