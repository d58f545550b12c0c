// cluster/grouping.rs
use std::fmt;
use log::{debug, info, trace};

use crate::config::RdCleanConfig;
use crate::config::subsystems::matcher::{CountPolicy, MatcherConfig};
use crate::error::Result;
use crate::matcher::observer::{Assignment, CloseCallCollector, GroupingObserver};
use crate::matcher::similarity::SimilarityCalculator;
use crate::matcher::types::Grouping;
use super::index::RawIndex;
use super::set::ClusterSet;
use super::summary::{summarize, Summary};

/// Greedy single-pass clustering over `raw` in index order.
///
/// Each key is compared against the existing representatives in creation
/// order and joins the first one it is similar to; with no match it founds a
/// new cluster. Earlier keys therefore shape later decisions, and the same
/// index always yields the same clusters.
///
/// Cost is one comparison per (key, cluster-so-far) pair, O(n^2) when nothing
/// merges. There is no blocking or candidate pruning.
pub fn group_records(
    raw: &RawIndex,
    similarity: &SimilarityCalculator,
    count_policy: CountPolicy,
    observer: &mut dyn GroupingObserver,
) -> Result<ClusterSet> {
    let mut clusters = ClusterSet::new();
    info!("Grouping {} raw keys", raw.len());

    for (key, attributes) in raw.iter() {
        let weight = match count_policy {
            CountPolicy::Occurrences => raw.occurrences(key),
            CountPolicy::PerKey => 1,
        };

        let mut matched = None;
        for (position, representative) in clusters.keys().enumerate() {
            let comparison = similarity.compare(key, representative, raw, &clusters)?;
            trace!("{} vs {}: {:.4}", key, representative, comparison.score);
            if let Some(event) = &comparison.close_call {
                observer.on_close_call(event);
            }
            if comparison.similar {
                matched = Some(position);
                break;
            }
        }

        match matched {
            Some(position) => {
                clusters.absorb(position, weight);
                let representative = clusters.at(position).representative.as_str();
                debug!("{} absorbed into {}", key, representative);
                observer.on_key_assigned(key, Assignment::Absorbed { representative });
            }
            None => {
                clusters.insert_new(key, attributes.clone(), weight);
                debug!("{} starts cluster #{}", key, clusters.len());
                observer.on_key_assigned(key, Assignment::NewCluster);
            }
        }
    }

    info!("Grouped {} raw keys into {} clusters", raw.len(), clusters.len());
    Ok(clusters)
}

/// Owns a raw index and the settings needed to cluster it.
#[derive(Debug, Clone)]
pub struct Clusterer {
    raw: RawIndex,
    similarity: SimilarityCalculator,
}

impl Clusterer {
    pub fn new(raw: RawIndex, config: MatcherConfig, join_date_field: usize) -> Result<Self> {
        let similarity = SimilarityCalculator::new(config, join_date_field)?;
        let clusterer = Self { raw, similarity };
        info!("{}", clusterer);
        Ok(clusterer)
    }

    pub fn from_config(raw: RawIndex, config: &RdCleanConfig) -> Result<Self> {
        Self::new(raw, config.matcher.clone(), config.input.layout.join_date_field)
    }

    pub fn raw_index(&self) -> &RawIndex {
        &self.raw
    }

    pub fn similarity(&self) -> &SimilarityCalculator {
        &self.similarity
    }

    pub fn is_similar(&self, raw_key: &str, representative: &str, clusters: &ClusterSet) -> Result<bool> {
        self.similarity.is_similar(raw_key, representative, &self.raw, clusters)
    }

    /// Runs the pass and returns the clusters with every close call seen.
    pub fn group(&self) -> Result<Grouping> {
        let mut collector = CloseCallCollector::new();
        let clusters = self.group_with_observer(&mut collector)?;
        Ok(Grouping {
            clusters,
            close_calls: collector.into_events(),
        })
    }

    pub fn group_with_observer(&self, observer: &mut dyn GroupingObserver) -> Result<ClusterSet> {
        group_records(&self.raw, &self.similarity, self.similarity.get_config().count_policy, observer)
    }

    pub fn summarize(&self, clusters: &ClusterSet) -> Summary {
        summarize(&self.raw, clusters)
    }
}

impl fmt::Display for Clusterer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Cleaning Analysis Setup **")?;
        writeln!(f, "Start with {} records", self.raw.total_occurrences())?;
        writeln!(f, "similarity threshold = {:.2}", self.similarity.threshold())?;
        write!(f, "similarity mode = {}", self.similarity.mode())
    }
}
