// src/config/subsystems/logging.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use log::LevelFilter;
use crate::error::{Error, Result};
use crate::config::FromIni;

const LEVELS: [&str; 6] = ["error", "warn", "info", "debug", "trace", "none"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for timestamped log files; logs go to stderr when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl FromIni for LoggingConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "logging" {
            return None;
        }

        match key {
            "level" => {
                let level = value.trim_matches('"').trim().to_lowercase();
                if LEVELS.contains(&level.as_str()) {
                    self.level = level;
                    Some(Ok(()))
                } else {
                    Some(Err(Error::Config(format!("Invalid log level: {}", value))))
                }
            },
            "log_dir" => {
                let dir = value.trim_matches('"');
                self.log_dir = if dir.is_empty() { None } else { Some(PathBuf::from(dir)) };
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl LoggingConfig {
    pub fn get_log_level(&self) -> LevelFilter {
        match self.level.trim().to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "none" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !LEVELS.contains(&self.level.trim().to_lowercase().as_str()) {
            return Err(Error::Config(format!("Invalid log level: {}", self.level)));
        }
        Ok(())
    }
}
