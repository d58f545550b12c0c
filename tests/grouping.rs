//! End-to-end grouping behaviour over small vendor lists.

use proptest::prelude::*;
use rdclean::matcher::{group_records, summarize, Verdict};
use rdclean::{
    Clusterer, CountPolicy, MatcherConfig, Normalizer, RawIndex, RecordAttributes, SimilarityCalculator,
    SimilarityMode,
};

fn attrs(join_date: &str) -> RecordAttributes {
    vec![
        "alt".to_string(),
        "1 Main St".to_string(),
        "Springfield".to_string(),
        "555-0100".to_string(),
        "V-1".to_string(),
        join_date.to_string(),
    ]
}

fn index(entries: &[(&str, &str)]) -> RawIndex {
    entries.iter().map(|(k, d)| (k.to_string(), attrs(d))).collect()
}

fn clusterer(raw: RawIndex, threshold: f64, mode: SimilarityMode) -> Clusterer {
    Clusterer::new(raw, MatcherConfig::new(threshold, mode), 5).unwrap()
}

#[test]
fn acme_variants_collapse_and_beta_stays() {
    let raw = index(&[("acme", ""), ("acmeinc", ""), ("beta", "")]);
    let grouping = clusterer(raw, 0.7, SimilarityMode::Name).group().unwrap();

    let counts: Vec<(&str, usize)> = grouping.clusters.counts().collect();
    assert_eq!(counts, vec![("acme", 2), ("beta", 1)]);

    // 8/11 sits just above 0.7
    assert_eq!(grouping.close_calls.len(), 1);
    assert_eq!(grouping.close_calls[0].raw_key, "acmeinc");
    assert_eq!(grouping.close_calls[0].verdict, Verdict::Similar);
}

#[test]
fn summary_lists_absorbed_keys() {
    let raw = index(&[("acme", ""), ("acmeinc", ""), ("beta", "")]);
    let clusterer = clusterer(raw, 0.7, SimilarityMode::Name);
    let grouping = clusterer.group().unwrap();
    let summary = clusterer.summarize(&grouping.clusters);

    assert_eq!(summary.raw_count, 3);
    assert_eq!(summary.clean_count, 2);
    assert_eq!(summary.removed_keys, vec!["acmeinc"]);
}

#[test]
fn join_date_mismatch_splits_close_names() {
    // name ratio 0.875 clears 0.8 on its own
    let raw = index(&[("acmecorp", "2014-01-01"), ("acmecorq", "2015-06-30")]);

    let by_name = clusterer(raw.clone(), 0.8, SimilarityMode::Name).group().unwrap();
    assert_eq!(by_name.clusters.len(), 1);

    let full = clusterer(raw, 0.8, SimilarityMode::FullRecord).group().unwrap();
    assert_eq!(full.clusters.keys().collect::<Vec<_>>(), vec!["acmecorp", "acmecorq"]);
}

#[test]
fn matching_join_date_keeps_names_together() {
    let raw = index(&[("acmecorp", "2014-01-01"), ("acmecorq", "2014-01-01"), ("acmecorx", "")]);
    let grouping = clusterer(raw, 0.8, SimilarityMode::FullRecord).group().unwrap();
    assert_eq!(grouping.clusters.count("acmecorp"), Some(3));
}

#[test]
fn empty_index_groups_to_nothing() {
    let grouping = clusterer(RawIndex::new(), 0.9, SimilarityMode::Name).group().unwrap();
    assert!(grouping.clusters.is_empty());
    assert_eq!(grouping.clusters.counts().count(), 0);
    assert!(grouping.close_calls.is_empty());
}

#[test]
fn score_at_threshold_starts_a_new_cluster() {
    // ratio("ac", "ab") is exactly 0.5
    let raw = index(&[("ab", ""), ("ac", "")]);
    assert_eq!(clusterer(raw.clone(), 0.5, SimilarityMode::Name).group().unwrap().clusters.len(), 2);
    assert_eq!(clusterer(raw, 0.49, SimilarityMode::Name).group().unwrap().clusters.len(), 1);
}

#[test]
fn count_policy_decides_how_collisions_are_counted() {
    let rows = vec![
        ("Acme".to_string(), attrs("")),
        ("ACME".to_string(), attrs("")),
        ("acme.".to_string(), attrs("")),
        ("Beta".to_string(), attrs("")),
    ];
    let raw = RawIndex::from_pairs(rows, &Normalizer::default());
    assert_eq!(raw.occurrences("acme"), 3);

    let per_key = MatcherConfig::new(0.9, SimilarityMode::Name).with_count_policy(CountPolicy::PerKey);
    let clusters = Clusterer::new(raw.clone(), per_key, 5).unwrap().group().unwrap().clusters;
    assert_eq!(clusters.count("acme"), Some(1));
    assert_eq!(clusters.total_count(), 2);

    let occurrences = MatcherConfig::new(0.9, SimilarityMode::Name);
    let clusters = Clusterer::new(raw, occurrences, 5).unwrap().group().unwrap().clusters;
    assert_eq!(clusters.count("acme"), Some(3));
    assert_eq!(clusters.total_count(), 4);
}

#[test]
fn invalid_settings_are_rejected_up_front() {
    assert!(Clusterer::new(RawIndex::new(), MatcherConfig::new(1.5, SimilarityMode::Name), 5).is_err());
    assert!(Clusterer::new(RawIndex::new(), MatcherConfig::new(0.0, SimilarityMode::Name), 5).is_err());
}

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc]{1,5}", 0..30)
}

fn build(names: &[String]) -> RawIndex {
    names.iter().map(|n| (n.clone(), attrs(""))).collect()
}

proptest! {
    #[test]
    fn counts_are_conserved(names in names(), threshold in 0.05f64..0.95) {
        let raw = build(&names);
        let calc = SimilarityCalculator::new(MatcherConfig::new(threshold, SimilarityMode::Name), 5).unwrap();

        let clusters = group_records(&raw, &calc, CountPolicy::Occurrences, &mut ()).unwrap();
        prop_assert_eq!(clusters.total_count(), raw.total_occurrences());
        prop_assert_eq!(clusters.total_count(), names.len());

        let per_key = group_records(&raw, &calc, CountPolicy::PerKey, &mut ()).unwrap();
        prop_assert_eq!(per_key.total_count(), raw.len());
    }

    #[test]
    fn representatives_come_from_the_raw_index(names in names(), threshold in 0.05f64..0.95) {
        let raw = build(&names);
        let grouping = clusterer(raw.clone(), threshold, SimilarityMode::Name).group().unwrap();
        for key in grouping.clusters.keys() {
            prop_assert!(raw.contains_key(key));
        }
        let summary = summarize(&raw, &grouping.clusters);
        prop_assert_eq!(summary.clean_count + summary.removed_keys.len(), summary.raw_count);
    }

    #[test]
    fn grouping_is_deterministic(names in names(), threshold in 0.05f64..0.95) {
        let raw = build(&names);
        let c = clusterer(raw, threshold, SimilarityMode::Name);
        let first = c.group().unwrap();
        let second = c.group().unwrap();
        prop_assert_eq!(first.clusters, second.clusters);
        prop_assert_eq!(first.close_calls, second.close_calls);
    }
}
