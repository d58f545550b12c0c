// cluster/summary.rs
use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};

use super::index::RawIndex;
use super::set::ClusterSet;

/// Before/after sizes of a grouping pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Source rows behind the raw index.
    pub total_rows: usize,
    /// Distinct normalized names.
    pub raw_count: usize,
    /// Cluster representatives.
    pub clean_count: usize,
    /// Raw keys absorbed into some other cluster, in raw index order.
    pub removed_keys: Vec<String>,
}

pub fn summarize(raw: &RawIndex, clusters: &ClusterSet) -> Summary {
    let removed_keys = raw
        .keys()
        .filter(|key| !clusters.contains_key(key))
        .map(str::to_string)
        .collect();

    Summary {
        total_rows: raw.total_occurrences(),
        raw_count: raw.len(),
        clean_count: clusters.len(),
        removed_keys,
    }
}

/// Cluster size -> number of clusters of that size.
pub fn records_per_cluster(clusters: &ClusterSet) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();
    for (_, count) in clusters.counts() {
        *histogram.entry(count).or_insert(0) += 1;
    }
    histogram
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# of source rows {}", self.total_rows)?;
        writeln!(f, "# of raw vendors {}", self.raw_count)?;
        writeln!(f, "# of cleaned vendors {}", self.clean_count)?;
        write!(f, "cleaned away: {:?}", self.removed_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_clusters_by_size() {
        let mut clusters = ClusterSet::new();
        clusters.insert_new("a", vec![], 3);
        clusters.insert_new("b", vec![], 1);
        clusters.insert_new("c", vec![], 1);
        let histogram = records_per_cluster(&clusters);
        assert_eq!(histogram.get(&1), Some(&2));
        assert_eq!(histogram.get(&3), Some(&1));
        assert_eq!(histogram.len(), 2);
    }

    #[test]
    fn removed_keys_follow_raw_order() {
        let raw: RawIndex = ["c", "a", "b"].iter().map(|k| (k.to_string(), vec![])).collect();
        let mut clusters = ClusterSet::new();
        clusters.insert_new("a", vec![], 3);
        let summary = summarize(&raw, &clusters);
        assert_eq!(summary.removed_keys, vec!["c", "b"]);
        assert_eq!(summary.raw_count, 3);
        assert_eq!(summary.clean_count, 1);
        assert!(summary.to_string().contains("# of cleaned vendors 1"));
    }
}
