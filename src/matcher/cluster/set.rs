// cluster/set.rs
use ahash::AHashMap;
use serde::{Serialize, Deserialize};

use crate::types::RecordAttributes;

/// A group of raw keys represented by the first key assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub representative: String,
    /// The representative's attributes at the moment the cluster was created.
    pub attributes: RecordAttributes,
    /// Raw entries folded into this cluster, the representative included.
    pub count: usize,
}

/// Clusters in creation order. Grows only; clusters are never merged or removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
    positions: AHashMap<String, usize>,
}

impl ClusterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_new(&mut self, representative: &str, attributes: RecordAttributes, count: usize) {
        debug_assert!(!self.positions.contains_key(representative));
        self.positions.insert(representative.to_string(), self.clusters.len());
        self.clusters.push(Cluster {
            representative: representative.to_string(),
            attributes,
            count,
        });
    }

    pub(crate) fn absorb(&mut self, position: usize, count: usize) {
        self.clusters[position].count += count;
    }

    pub(crate) fn at(&self, position: usize) -> &Cluster {
        &self.clusters[position]
    }

    pub fn get(&self, representative: &str) -> Option<&Cluster> {
        self.positions.get(representative).map(|&pos| &self.clusters[pos])
    }

    pub fn attributes(&self, representative: &str) -> Option<&RecordAttributes> {
        self.get(representative).map(|c| &c.attributes)
    }

    pub fn count(&self, representative: &str) -> Option<usize> {
        self.get(representative).map(|c| c.count)
    }

    pub fn contains_key(&self, representative: &str) -> bool {
        self.positions.contains_key(representative)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.clusters.iter().map(|c| c.representative.as_str())
    }

    /// `(representative, count)` in creation order.
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.clusters.iter().map(|c| (c.representative.as_str(), c.count))
    }

    pub fn total_count(&self) -> usize {
        self.clusters.iter().map(|c| c.count).sum()
    }
}

impl<'a> IntoIterator for &'a ClusterSet {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
