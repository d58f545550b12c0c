pub mod file;
pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::{Error, Result};
use log::{info, warn, trace};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RdCleanConfig {
    // File paths
    pub files: file::FileConfig,

    // Subsystem configs
    pub input: subsystems::InputConfig,
    pub normalizer: subsystems::NormalizerConfig,
    pub matcher: subsystems::MatcherConfig,
    pub logging: subsystems::LoggingConfig,
}

impl RdCleanConfig {
    pub fn validate(&self) -> Result<()> {
        self.files.validate()?;
        self.input.validate()?;
        self.normalizer.validate()?;
        self.matcher.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!("Loading configuration from: {:?}", path.as_ref());
        let content = fs::read_to_string(&path)?;
        let config = Self::from_ini_str(&content)?;
        info!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len()-1].trim().to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                warn!("Ignoring malformed config line {}: {}", line_num + 1, line);
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Delegate to appropriate subsystem config
            let handled = match current_section.as_str() {
                "file" => config.files.from_ini_section(&current_section, key, value),
                "input" => config.input.from_ini_section(&current_section, key, value),
                "normalizer" => config.normalizer.from_ini_section(&current_section, key, value),
                "matcher" => config.matcher.from_ini_section(&current_section, key, value),
                "logging" => config.logging.from_ini_section(&current_section, key, value),
                _ => None,
            };

            match handled {
                Some(Err(e)) => {
                    return Err(Error::config(format!("line {}: {}", line_num + 1, e)));
                }
                Some(Ok(())) => {}
                None => {
                    warn!("Unrecognized config key: {}={} in section [{}]", key, value, current_section);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Splits a comma-separated list of double-quoted strings: `",", "\."`.
/// Commas inside quotes are kept.
pub(crate) fn parse_quoted_list(value: &str) -> Result<Vec<String>> {
    let mut items = Vec::new();
    let mut rest = value.trim();

    while !rest.is_empty() {
        let Some(body) = rest.strip_prefix('"') else {
            return Err(Error::config(format!("expected a quoted string at: {}", rest)));
        };
        let Some(end) = body.find('"') else {
            return Err(Error::config(format!("unterminated quoted string: {}", rest)));
        };
        items.push(body[..end].to_string());

        rest = body[end + 1..].trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
        } else if !rest.is_empty() {
            return Err(Error::config(format!("expected ',' between items at: {}", rest)));
        }
    }

    Ok(items)
}

pub(crate) fn parse_usize_list(value: &str) -> Result<Vec<usize>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<usize>().map_err(|_| Error::config(format!("invalid column index: {}", v))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::subsystems::{CountPolicy, SimilarityMode};

    #[test]
    fn quoted_list_keeps_commas_and_escapes() {
        let items = parse_quoted_list(r#"",", "\.", "inc""#).unwrap();
        assert_eq!(items, vec![",", r"\.", "inc"]);
        assert!(parse_quoted_list("").unwrap().is_empty());
        assert!(parse_quoted_list(r#""open"#).is_err());
        assert!(parse_quoted_list(r#""a" "b""#).is_err());
    }

    #[test]
    fn sections_reach_their_subsystems() {
        let ini = r#"
# vendor run
[file]
input_file = "vendors.csv"
output_dir = "out"

[input]
has_headers = false
name_column = 0
attribute_columns = 1, 2, 3
join_date_field = 2

[normalizer]
fold = true
ignore_patterns = ",", "\.", "llc"

[matcher]
threshold = 0.85
mode = full_record
tolerance = 0.02
count_policy = per_key

[logging]
level = debug
"#;
        let config = RdCleanConfig::from_ini_str(ini).unwrap();
        assert_eq!(config.files.input_file.to_str(), Some("vendors.csv"));
        assert!(!config.input.has_headers);
        assert_eq!(config.input.layout.attribute_columns, vec![1, 2, 3]);
        assert_eq!(config.normalizer.ignore_patterns, vec![",", r"\.", "llc"]);
        assert_eq!(config.matcher.threshold, 0.85);
        assert_eq!(config.matcher.mode, SimilarityMode::FullRecord);
        assert_eq!(config.matcher.count_policy, CountPolicy::PerKey);
        assert_eq!(config.logging.get_log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn rejects_unknown_mode_and_bad_threshold() {
        assert!(RdCleanConfig::from_ini_str("[matcher]\nmode = phonetic\n").is_err());
        assert!(RdCleanConfig::from_ini_str("[matcher]\nthreshold = 1.0\n").is_err());
        assert!(RdCleanConfig::from_ini_str("[matcher]\nthreshold = 0\n").is_err());
    }

    #[test]
    fn reads_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rdclean.ini");
        fs::write(&path, "[matcher]\nthreshold = 0.7\n").unwrap();
        let config = RdCleanConfig::from_ini(&path).unwrap();
        assert_eq!(config.matcher.threshold, 0.7);
        assert_eq!(config.matcher.tolerance, 0.05);
    }
}
