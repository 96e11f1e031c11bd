//! Error type shared by the schema, reconstruction, export and harness code

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::ValueKind;

/// Errors raised by sendbench library operations
#[derive(Error, Debug)]
pub enum BenchError {
    /// A pattern captured text that does not convert to the field's kind.
    ///
    /// This points at a bad schema, not at bad log data.
    #[error("Malformed {kind} value for field '{field}': {text:?}")]
    MalformedValue {
        field: String,
        text: String,
        kind: ValueKind,
    },

    #[error("Invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid field schema: {0}")]
    InvalidSchema(String),

    #[error("Failed to parse field schema: {0}")]
    SchemaParse(#[from] toml::de::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BenchError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for sendbench operations
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_value_message_names_field() {
        let err = BenchError::MalformedValue {
            field: "total_time".to_string(),
            text: "1.2.3".to_string(),
            kind: ValueKind::Float,
        };
        let msg = err.to_string();
        assert!(msg.contains("total_time"));
        assert!(msg.contains("float"));
        assert!(msg.contains("1.2.3"));
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = BenchError::io(
            "logs/send.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("logs/send.txt"));
    }
}
