//! JSON export of a reconstructed dataset
//!
//! Records keep column order and only carry the fields their run logged.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::dataset::{Dataset, Record};
use crate::error::Result;

/// Top-level JSON document
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// sendbench version
    pub version: String,
    /// Document format marker
    pub format: String,
    pub row_count: usize,
    pub columns: &'a [String],
    pub records: Vec<JsonRecord<'a>>,
}

/// One record, serialized as an object in column order
#[derive(Debug)]
pub struct JsonRecord<'a> {
    columns: &'a [String],
    record: &'a Record,
}

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len()))?;
        for column in self.columns {
            if let Some(value) = self.record.get(column) {
                map.serialize_entry(column, &value)?;
            }
        }
        map.end()
    }
}

impl<'a> JsonOutput<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        let columns = dataset.column_names();
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "sendbench-json-v1".to_string(),
            row_count: dataset.row_count(),
            columns,
            records: dataset
                .rows()
                .iter()
                .map(|record| JsonRecord { columns, record })
                .collect(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
