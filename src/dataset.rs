//! Completed benchmark records and the column-addressable dataset built from them
//!
//! A [`Dataset`] is an ordered table: one row per completed run, one column per
//! field name seen in any row. Rows keep the order in which their blocks were
//! completed in the log. A field absent from a run is a missing cell, never a
//! zero.

use std::collections::{BTreeSet, HashMap};

use crate::error::{BenchError, Result};
use crate::schema::FieldValue;

/// One completed run: field name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: HashMap<String, FieldValue>,
}

impl Record {
    pub(crate) fn from_values(values: HashMap<String, FieldValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of populated fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Populated field names, unordered
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (S, FieldValue)>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Ordered, column-addressable collection of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Rows in completion order
    pub fn rows(&self) -> &[Record] {
        &self.records
    }

    /// Value of `name` in row `row`, if both exist
    pub fn get(&self, row: usize, name: &str) -> Option<FieldValue> {
        self.records.get(row)?.get(name)
    }

    /// Per-run series for one column, `None` where the run lacked the field
    ///
    /// Returns `None` when no row has the column.
    pub fn column(&self, name: &str) -> Option<Vec<Option<FieldValue>>> {
        if !self.has_column(name) {
            return None;
        }
        Some(self.records.iter().map(|r| r.get(name)).collect())
    }

    /// Same as [`Dataset::column`], widened to `f64` for plotting
    pub fn column_f64(&self, name: &str) -> Option<Vec<Option<f64>>> {
        self.column(name)
            .map(|series| series.into_iter().map(|v| v.map(|v| v.as_f64())).collect())
    }

    /// Project the dataset onto the given columns, in the given order
    ///
    /// Every name must be a column of this dataset.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Dataset> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if !self.has_column(name) {
                return Err(BenchError::UnknownColumn(name.to_string()));
            }
            if !columns.iter().any(|c: &String| c == name) {
                columns.push(name.to_string());
            }
        }

        let records = self
            .records
            .iter()
            .map(|r| {
                let values = columns
                    .iter()
                    .filter_map(|c| r.get(c).map(|v| (c.clone(), v)))
                    .collect();
                Record::from_values(values)
            })
            .collect();

        Ok(Dataset { columns, records })
    }
}

/// Assembles records into a [`Dataset`]
///
/// Columns follow the preferred field order (normally the schema's declaration
/// order); field names outside that order are appended alphabetically.
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    field_order: Vec<String>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred column order
    pub fn with_field_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_order = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(&self, records: Vec<Record>) -> Dataset {
        let seen: BTreeSet<&str> = records.iter().flat_map(|r| r.field_names()).collect();

        let mut columns: Vec<String> = self
            .field_order
            .iter()
            .filter(|name| seen.contains(name.as_str()))
            .cloned()
            .collect();
        // BTreeSet iteration is sorted, which orders the extras alphabetically
        for name in &seen {
            if !self.field_order.iter().any(|f| f == name) {
                columns.push((*name).to_string());
            }
        }

        Dataset { columns, records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, FieldValue)]) -> Record {
        pairs.iter().copied().collect()
    }

    fn sample_dataset() -> Dataset {
        DatasetBuilder::new()
            .with_field_order(["file_size", "hash_send_time", "total_time"])
            .build(vec![
                record(&[
                    ("file_size", FieldValue::Integer(1024)),
                    ("hash_send_time", FieldValue::Float(0.5)),
                    ("total_time", FieldValue::Float(12.5)),
                ]),
                record(&[
                    ("file_size", FieldValue::Integer(2048)),
                    ("total_time", FieldValue::Float(20.0)),
                ]),
            ])
    }

    #[test]
    fn test_row_count_and_columns() {
        let dataset = sample_dataset();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            dataset.column_names(),
            &["file_size", "hash_send_time", "total_time"]
        );
    }

    #[test]
    fn test_column_has_gap_for_missing_field() {
        let dataset = sample_dataset();
        assert_eq!(
            dataset.column("hash_send_time"),
            Some(vec![Some(FieldValue::Float(0.5)), None])
        );
        assert_eq!(dataset.get(1, "hash_send_time"), None);
    }

    #[test]
    fn test_unknown_column_is_none() {
        let dataset = sample_dataset();
        assert!(dataset.column("encryption_time").is_none());
        assert!(dataset.get(5, "file_size").is_none());
    }

    #[test]
    fn test_column_f64_widens() {
        let dataset = sample_dataset();
        assert_eq!(
            dataset.column_f64("file_size"),
            Some(vec![Some(1024.0), Some(2048.0)])
        );
    }

    #[test]
    fn test_extra_fields_appended_alphabetically() {
        let dataset = DatasetBuilder::new()
            .with_field_order(["total_time"])
            .build(vec![record(&[
                ("zeta", FieldValue::Integer(1)),
                ("total_time", FieldValue::Float(1.0)),
                ("alpha", FieldValue::Integer(2)),
            ])]);
        assert_eq!(dataset.column_names(), &["total_time", "alpha", "zeta"]);
    }

    #[test]
    fn test_declared_but_unseen_fields_are_not_columns() {
        let dataset = DatasetBuilder::new()
            .with_field_order(["file_size", "total_time"])
            .build(vec![record(&[("total_time", FieldValue::Float(3.0))])]);
        assert_eq!(dataset.column_names(), &["total_time"]);
    }

    #[test]
    fn test_empty_build() {
        let dataset = DatasetBuilder::new().build(Vec::new());
        assert!(dataset.is_empty());
        assert!(dataset.column_names().is_empty());
    }

    #[test]
    fn test_select_projects_columns() {
        let dataset = sample_dataset();
        let selected = dataset.select(&["total_time", "file_size"]).unwrap();
        assert_eq!(selected.column_names(), &["total_time", "file_size"]);
        assert_eq!(selected.row_count(), 2);
        assert!(!selected.rows()[0].contains("hash_send_time"));
        assert_eq!(selected.get(0, "file_size"), Some(FieldValue::Integer(1024)));
    }

    #[test]
    fn test_select_unknown_column() {
        let dataset = sample_dataset();
        let err = dataset.select(&["bogus"]).unwrap_err();
        assert!(matches!(err, BenchError::UnknownColumn(ref c) if c == "bogus"));
    }
}
