use ahash::AHashMap;
use log::{debug, trace};

use crate::config::subsystems::matcher::{MatcherConfig, SimilarityMode};
use crate::error::{Error, Result};
use crate::types::RecordAttributes;
use super::cluster::{ClusterSet, RawIndex};
use super::types::{CloseCall, Comparison, Verdict};

// Sequences at least this long drop "popular" elements from the match index
const POPULAR_MIN_LEN: usize = 200;

/// Similarity ratio in `[0, 1]` between two strings: `2 * M / T`, where `M` is
/// the total length of the longest-matching-blocks decomposition and `T` the
/// combined length. Two empty strings score 1.0.
///
/// Not symmetric in general; `b` is the side the match index is built on.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = SequenceMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b2j: AHashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: AHashMap<char, Vec<usize>> = AHashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        let n = b.len();
        if n >= POPULAR_MIN_LEN {
            let limit = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given ranges,
    /// earliest in `a` then earliest in `b` on ties.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);
        let mut j2len: AHashMap<usize, usize> = AHashMap::new();

        for i in alo..ahi {
            let mut next: AHashMap<usize, usize> = AHashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular elements are missing from b2j; extend across them
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }

    fn matched_len(&self) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }
}

/// Scores a raw key against a cluster representative and decides whether
/// they belong together. Threshold, tolerance and mode are fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct SimilarityCalculator {
    config: MatcherConfig,
    join_date_field: usize,
    upper_band: f64,
    lower_band: f64,
}

impl SimilarityCalculator {
    pub fn new(config: MatcherConfig, join_date_field: usize) -> Result<Self> {
        config.validate()?;

        let upper_band = config.threshold + config.tolerance;
        let lower_band = config.threshold - config.tolerance;
        debug!(
            "Similarity: mode = {}, threshold = {:.2}, close-call band = ({:.2}, {:.2})",
            config.mode, config.threshold, lower_band, upper_band
        );

        Ok(Self {
            config,
            join_date_field,
            upper_band,
            lower_band,
        })
    }

    pub fn get_config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn mode(&self) -> SimilarityMode {
        self.config.mode
    }

    /// Final score for `raw_key` against `representative`. In full-record mode
    /// the raw side's join date comes from `raw`, the representative's from
    /// `clusters`.
    pub fn score(&self, raw_key: &str, representative: &str, raw: &RawIndex, clusters: &ClusterSet) -> Result<f64> {
        let ratio = sequence_ratio(raw_key, representative);

        if self.config.mode != SimilarityMode::FullRecord {
            return Ok(ratio);
        }

        let raw_attrs = raw.get(raw_key).ok_or_else(|| Error::unknown_key(raw_key))?;
        let cluster_attrs = clusters
            .attributes(representative)
            .ok_or_else(|| Error::unknown_key(representative))?;
        let joined_a = self.join_date(raw_key, raw_attrs)?;
        let joined_b = self.join_date(representative, cluster_attrs)?;

        if joined_a.is_empty() || joined_b.is_empty() {
            return Ok(ratio);
        }

        let date_score = if joined_a == joined_b { 1.0 } else { 0.0 };
        trace!(
            "{} / {}: name ratio {:.4}, join dates {:?} vs {:?}",
            raw_key, representative, ratio, joined_a, joined_b
        );
        Ok((ratio + date_score) / 2.0)
    }

    fn join_date<'r>(&self, key: &str, attrs: &'r RecordAttributes) -> Result<&'r str> {
        attrs
            .get(self.join_date_field)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingAttribute {
                key: key.to_string(),
                field: self.join_date_field,
            })
    }

    /// Where `score` falls relative to the threshold and its close-call band.
    pub fn classify(&self, score: f64) -> (bool, Option<Verdict>) {
        if score > self.config.threshold {
            let close = (score < self.upper_band).then_some(Verdict::Similar);
            (true, close)
        } else {
            let close = (score > self.lower_band).then_some(Verdict::NotSimilar);
            (false, close)
        }
    }

    /// Scores the pair and builds the close-call event when the score lands
    /// near the threshold.
    pub fn compare(&self, raw_key: &str, representative: &str, raw: &RawIndex, clusters: &ClusterSet) -> Result<Comparison> {
        let score = self.score(raw_key, representative, raw, clusters)?;
        let (similar, verdict) = self.classify(score);

        let close_call = verdict.map(|verdict| CloseCall {
            raw_key: raw_key.to_string(),
            representative: representative.to_string(),
            raw_attributes: raw.get(raw_key).cloned().unwrap_or_default(),
            representative_attributes: clusters.attributes(representative).cloned().unwrap_or_default(),
            score,
            verdict,
        });

        Ok(Comparison { score, similar, close_call })
    }

    pub fn is_similar(&self, raw_key: &str, representative: &str, raw: &RawIndex, clusters: &ClusterSet) -> Result<bool> {
        Ok(self.compare(raw_key, representative, raw, clusters)?.similar)
    }
}
