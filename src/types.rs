use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

/// Attribute fields carried alongside a normalized name, in layout order.
pub type RecordAttributes = Vec<String>;

/// One row as produced by the input layer, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    /// Zero-based position of the row in its source.
    pub row_number: usize,
    pub fields: Vec<String>,
}

impl SourceRow {
    pub fn new(row_number: usize, fields: Vec<String>) -> Self {
        Self { row_number, fields }
    }

    pub fn field(&self, column: usize) -> Result<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| Error::missing_field(self.row_number, column))
    }
}

/// Where the name and attribute fields live in a source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub name_column: usize,
    pub attribute_columns: Vec<usize>,
    /// Index into the attribute list (not the row) of the join-date field.
    pub join_date_field: usize,
}

impl Default for FieldLayout {
    fn default() -> Self {
        // vendor name, then alt name, address, city, phone, id, join date
        Self {
            name_column: 1,
            attribute_columns: vec![2, 3, 4, 5, 7, 8],
            join_date_field: 5,
        }
    }
}

impl FieldLayout {
    pub fn validate(&self) -> Result<()> {
        if self.attribute_columns.is_empty() {
            return Err(Error::config("attribute_columns must name at least one column"));
        }
        if self.join_date_field >= self.attribute_columns.len() {
            return Err(Error::config(format!(
                "join_date_field {} is out of range for {} attribute columns",
                self.join_date_field,
                self.attribute_columns.len()
            )));
        }
        Ok(())
    }

    pub fn attribute_count(&self) -> usize {
        self.attribute_columns.len()
    }

    /// Splits a row into its raw name and attribute fields.
    pub fn extract(&self, row: &SourceRow) -> Result<(String, RecordAttributes)> {
        let name = row.field(self.name_column)?.to_string();
        let attributes = self
            .attribute_columns
            .iter()
            .map(|&column| row.field(column).map(str::to_string))
            .collect::<Result<RecordAttributes>>()?;
        Ok((name, attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> SourceRow {
        SourceRow::new(3, fields.iter().map(|f| f.to_string()).collect())
    }

    #[test]
    fn extract_follows_default_layout() {
        let layout = FieldLayout::default();
        let r = row(&["0", "Acme", "ACME", "1 Main", "Springfield", "555", "skip", "V1", "2014-01-01"]);
        let (name, attrs) = layout.extract(&r).unwrap();
        assert_eq!(name, "Acme");
        assert_eq!(attrs, vec!["ACME", "1 Main", "Springfield", "555", "V1", "2014-01-01"]);
        assert_eq!(attrs[layout.join_date_field], "2014-01-01");
    }

    #[test]
    fn short_row_reports_missing_column() {
        let layout = FieldLayout::default();
        let r = row(&["0", "Acme", "ACME"]);
        match layout.extract(&r) {
            Err(Error::MissingField { row, column }) => {
                assert_eq!(row, 3);
                assert_eq!(column, 3);
            }
            other => panic!("expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn join_date_must_be_an_attribute() {
        let layout = FieldLayout {
            name_column: 0,
            attribute_columns: vec![1, 2],
            join_date_field: 2,
        };
        assert!(layout.validate().is_err());
    }
}
