// src/config/file.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use super::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub clusters_file: String,
    pub summary_file: String,
    pub close_calls_file: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("data/vendors.csv"),
            output_dir: PathBuf::from("data/clean"),
            clusters_file: "clusters.csv".to_string(),
            summary_file: "summary.json".to_string(),
            close_calls_file: "close_calls.log".to_string(),
        }
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        let value = value.trim_matches('"');
        match key {
            "input_file" => {
                self.input_file = PathBuf::from(value);
                Some(Ok(()))
            },
            "output_dir" => {
                self.output_dir = PathBuf::from(value);
                Some(Ok(()))
            },
            "clusters_file" => {
                self.clusters_file = value.to_string();
                Some(Ok(()))
            },
            "summary_file" => {
                self.summary_file = value.to_string();
                Some(Ok(()))
            },
            "close_calls_file" => {
                self.close_calls_file = value.to_string();
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Err(Error::config("input_file must not be empty"));
        }
        for (name, file) in [
            ("clusters_file", &self.clusters_file),
            ("summary_file", &self.summary_file),
            ("close_calls_file", &self.close_calls_file),
        ] {
            if file.is_empty() {
                return Err(Error::config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    pub fn clusters_path(&self) -> PathBuf {
        self.output_dir.join(&self.clusters_file)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_file)
    }

    pub fn close_calls_path(&self) -> PathBuf {
        self.output_dir.join(&self.close_calls_file)
    }

    /// Creates the output directory if it does not exist yet.
    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}
