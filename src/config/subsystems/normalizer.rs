// src/config/subsystems/normalizer.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::{FromIni, parse_quoted_list};
use crate::normalizer::default_ignore_patterns;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default = "default_fold")]
    pub fold: bool,

    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

fn default_fold() -> bool { true }

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            fold: default_fold(),
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

impl FromIni for NormalizerConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "normalizer" {
            return None;
        }

        match key {
            "fold" => {
                match value.parse() {
                    Ok(flag) => {
                        self.fold = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid fold value (must be true/false): {}", value)
                    ))),
                }
            },
            "ignore_patterns" => {
                match parse_quoted_list(value) {
                    Ok(patterns) => {
                        self.ignore_patterns = patterns;
                        Some(Ok(()))
                    },
                    Err(e) => Some(Err(e)),
                }
            },
            _ => None,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<()> {
        // Compile once so a bad pattern fails at load time
        for pattern in &self.ignore_patterns {
            regex::Regex::new(pattern)?;
        }
        Ok(())
    }

    /// Returns a description of the configured normalization
    pub fn describe(&self) -> String {
        let mut steps = Vec::new();
        if !self.ignore_patterns.is_empty() {
            steps.push(format!("removing {:?}", self.ignore_patterns));
        }
        if self.fold {
            steps.push("folding case and punctuation".to_string());
        }

        if steps.is_empty() {
            "no normalization".to_string()
        } else {
            steps.join(", ")
        }
    }
}
