// src/utils/report.rs
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use log::info;
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::matcher::{ClusterSet, Summary, records_per_cluster};

/// Everything written to the summary file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub summary: Summary,
    /// Cluster size -> number of clusters of that size.
    pub records_per_cluster: BTreeMap<usize, usize>,
    pub close_calls: usize,
}

impl RunReport {
    pub fn new(summary: Summary, clusters: &ClusterSet, close_calls: usize) -> Self {
        Self {
            summary,
            records_per_cluster: records_per_cluster(clusters),
            close_calls,
        }
    }
}

/// One line per cluster: representative, count, then its attributes.
pub fn write_clusters<W: Write>(writer: W, clusters: &ClusterSet) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    csv_writer.write_record(["representative", "count", "attributes..."])?;
    for cluster in clusters {
        let mut record = vec![cluster.representative.clone(), cluster.count.to_string()];
        record.extend(cluster.attributes.iter().cloned());
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_clusters_file<P: AsRef<Path>>(path: P, clusters: &ClusterSet) -> Result<()> {
    let file = File::create(&path)?;
    write_clusters(BufWriter::new(file), clusters)?;
    info!("Wrote {} clusters to {:?}", clusters.len(), path.as_ref());
    Ok(())
}

pub fn write_report_file<P: AsRef<Path>>(path: P, report: &RunReport) -> Result<()> {
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    info!("Wrote summary to {:?}", path.as_ref());
    Ok(())
}
