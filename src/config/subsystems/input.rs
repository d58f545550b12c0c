// src/config/subsystems/input.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::{FromIni, parse_usize_list};
use crate::types::FieldLayout;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub has_headers: bool,
    pub delimiter: u8,
    pub layout: FieldLayout,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
            layout: FieldLayout::default(),
        }
    }
}

impl FromIni for InputConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "input" {
            return None;
        }

        match key {
            "has_headers" => {
                match value.parse() {
                    Ok(flag) => {
                        self.has_headers = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid has_headers value (must be true/false): {}", value)
                    ))),
                }
            },
            "delimiter" => {
                let raw = value.trim_matches('"');
                let delimiter = if raw == "\\t" { "\t" } else { raw };
                match delimiter.as_bytes() {
                    [byte] => {
                        self.delimiter = *byte;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid delimiter (must be a single byte): {}", value)
                    ))),
                }
            },
            "name_column" => {
                match value.parse() {
                    Ok(column) => {
                        self.layout.name_column = column;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid name_column: {}", value)
                    ))),
                }
            },
            "attribute_columns" => {
                match parse_usize_list(value) {
                    Ok(columns) => {
                        self.layout.attribute_columns = columns;
                        Some(Ok(()))
                    },
                    Err(e) => Some(Err(e)),
                }
            },
            "join_date_field" => {
                match value.parse() {
                    Ok(field) => {
                        self.layout.join_date_field = field;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid join_date_field: {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()
    }
}
