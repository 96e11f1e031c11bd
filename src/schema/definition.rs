use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BenchError, Result};

/// Numeric kind a captured field value is converted to
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Unsigned byte counts and other whole numbers
    Integer,
    /// Durations in milliseconds
    Float,
}

impl ValueKind {
    /// Convert captured text into a value of this kind
    pub fn parse(self, field: &str, text: &str) -> Result<FieldValue> {
        let malformed = || BenchError::MalformedValue {
            field: field.to_string(),
            text: text.to_string(),
            kind: self,
        };

        match self {
            ValueKind::Integer => text
                .parse::<u64>()
                .map(FieldValue::Integer)
                .map_err(|_| malformed()),
            ValueKind::Float => text
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|_| malformed()),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Float => write!(f, "float"),
        }
    }
}

/// A single extracted field value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(u64),
    Float(f64),
}

impl FieldValue {
    /// Widen to f64 for plotting
    pub fn as_f64(&self) -> f64 {
        match *self {
            FieldValue::Integer(v) => v as f64,
            FieldValue::Float(v) => v,
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Integer(_) => ValueKind::Integer,
            FieldValue::Float(_) => ValueKind::Float,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// One named field of the log schema
///
/// # Example TOML
/// ```toml
/// [[field]]
/// name = "file_size"
/// description = "Bytes in the file about to be sent"
/// pattern = '^SendFile\(\): Size of file: (\d+) bytes'
/// kind = "integer"
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Unique field name, used as the column name
    pub name: String,

    /// Regular expression with exactly one capture group holding the value
    pub pattern: String,

    pub kind: ValueKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            kind,
            description: None,
        }
    }

    /// Compile the pattern, requiring exactly one capture group
    pub fn compile(&self) -> Result<Regex> {
        let regex = Regex::new(&self.pattern).map_err(|source| BenchError::InvalidPattern {
            field: self.name.clone(),
            source,
        })?;

        // captures_len counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(BenchError::InvalidSchema(format!(
                "pattern for field '{}' must have exactly one capture group, found {}",
                self.name, groups
            )));
        }

        Ok(regex)
    }
}
