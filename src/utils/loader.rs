// src/utils/loader.rs
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use log::{debug, info};

use crate::config::subsystems::InputConfig;
use crate::error::Result;
use crate::types::SourceRow;

/// Reads every row of a delimited file. Short rows are kept as-is; the field
/// layout rejects them later with the missing column.
pub fn load_rows<P: AsRef<Path>>(path: P, config: &InputConfig) -> Result<Vec<SourceRow>> {
    let path = path.as_ref();
    debug!("Opening input file {:?}", path);
    let file = File::open(path)?;
    let rows = read_rows(BufReader::new(file), config)?;
    info!("Loaded {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

pub fn read_rows<R: Read>(reader: R, config: &InputConfig) -> Result<Vec<SourceRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter)
        .flexible(true) // Allow missing fields
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let record = result?;
        rows.push(SourceRow::new(i, record.iter().map(str::to_string).collect()));
    }
    Ok(rows)
}
