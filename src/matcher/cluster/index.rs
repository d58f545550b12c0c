// cluster/index.rs
use ahash::AHashMap;
use log::{debug, info};

use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::types::{FieldLayout, RecordAttributes, SourceRow};

/// Raw records keyed by normalized name.
///
/// Iterates in first-insertion order of keys. Inserting an existing key
/// replaces its attributes (last row wins) and bumps its occurrence count,
/// but keeps the key's original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawIndex {
    entries: Vec<(String, RecordAttributes)>,
    occurrences: Vec<usize>,
    positions: AHashMap<String, usize>,
}

impl RawIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes each name and indexes its attributes.
    pub fn from_pairs<I>(pairs: I, normalizer: &Normalizer) -> Self
    where
        I: IntoIterator<Item = (String, RecordAttributes)>,
    {
        let mut index = Self::new();
        let mut rows = 0usize;
        for (name, attributes) in pairs {
            index.insert(normalizer.normalize(&name), attributes);
            rows += 1;
        }
        info!("Indexed {} rows under {} normalized names", rows, index.len());
        index
    }

    /// Pulls name and attributes out of each row per `layout`. Fails on the
    /// first row missing a column the layout needs.
    pub fn from_rows<I>(rows: I, layout: &FieldLayout, normalizer: &Normalizer) -> Result<Self>
    where
        I: IntoIterator<Item = SourceRow>,
    {
        let pairs = rows
            .into_iter()
            .map(|row| layout.extract(&row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_pairs(pairs, normalizer))
    }

    pub fn insert(&mut self, key: String, attributes: RecordAttributes) {
        match self.positions.get(&key) {
            Some(&pos) => {
                debug!("Name collision on {:?}; keeping latest attributes", key);
                self.entries[pos].1 = attributes;
                self.occurrences[pos] += 1;
            }
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, attributes));
                self.occurrences.push(1);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&RecordAttributes> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Number of source rows that normalized to `key`; 0 when absent.
    pub fn occurrences(&self, key: &str) -> usize {
        self.positions.get(key).map_or(0, |&pos| self.occurrences[pos])
    }

    pub fn total_occurrences(&self) -> usize {
        self.occurrences.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordAttributes)> {
        self.entries.iter().map(|(key, attrs)| (key.as_str(), attrs))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(key, occurrences)` in index order.
    pub fn occurrence_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.keys().zip(self.occurrences.iter().copied())
    }

    /// The first `n` entries, for a quick look at what was loaded.
    pub fn head(&self, n: usize) -> impl Iterator<Item = (&str, &RecordAttributes)> {
        self.iter().take(n)
    }
}

/// Collects already-normalized keys.
impl FromIterator<(String, RecordAttributes)> for RawIndex {
    fn from_iter<T: IntoIterator<Item = (String, RecordAttributes)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (key, attributes) in iter {
            index.insert(key, attributes);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(tag: &str) -> RecordAttributes {
        vec![tag.to_string()]
    }

    #[test]
    fn collisions_keep_position_and_latest_attributes() {
        let index: RawIndex = vec![
            ("acme".to_string(), attrs("first")),
            ("beta".to_string(), attrs("beta")),
            ("acme".to_string(), attrs("second")),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.len(), 2);
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["acme", "beta"]);
        assert_eq!(index.get("acme"), Some(&attrs("second")));
        assert_eq!(index.occurrences("acme"), 2);
        assert_eq!(index.occurrences("beta"), 1);
        assert_eq!(index.occurrences("gamma"), 0);
        assert_eq!(index.total_occurrences(), 3);
    }

    #[test]
    fn pairs_are_normalized_before_indexing() {
        let normalizer = Normalizer::default();
        let index = RawIndex::from_pairs(
            vec![
                ("Acme, Inc.".to_string(), attrs("a")),
                ("ACME INC".to_string(), attrs("b")),
            ],
            &normalizer,
        );
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["acmeinc"]);
        assert_eq!(index.occurrences("acmeinc"), 2);
    }

    #[test]
    fn rows_missing_columns_fail_the_build() {
        let layout = FieldLayout {
            name_column: 0,
            attribute_columns: vec![1, 2],
            join_date_field: 1,
        };
        let rows = vec![
            SourceRow::new(0, vec!["Acme".into(), "x".into(), "2014".into()]),
            SourceRow::new(1, vec!["Beta".into(), "y".into()]),
        ];
        let err = RawIndex::from_rows(rows, &layout, &Normalizer::default()).unwrap_err();
        assert!(matches!(err, crate::Error::MissingField { row: 1, column: 2 }));
    }

    #[test]
    fn head_is_bounded() {
        let index: RawIndex = (0..10).map(|i| (format!("k{}", i), attrs("v"))).collect();
        assert_eq!(index.head(5).count(), 5);
        assert_eq!(index.head(50).count(), 10);
    }
}
