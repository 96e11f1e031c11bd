use crate::error::{BenchError, Result};
use crate::schema::FieldSpec;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Embedded schema for the file sender's log output
const DEFAULT_TOML: &str = include_str!("../../fields-default.toml");

#[derive(serde::Deserialize)]
struct SchemaFile {
    terminator: String,
    #[serde(default)]
    field: Vec<FieldSpec>,
}

/// Ordered field table plus the completion rule for a log block
///
/// Every `FieldSchema` is validated on construction: field names are unique,
/// every pattern compiles with exactly one capture group, and the terminator
/// names a declared field.
///
/// # Example Usage
/// ```
/// use sendbench::schema::FieldSchema;
///
/// let schema = FieldSchema::default_send_log()?;
/// assert_eq!(schema.terminator(), "total_time");
/// assert_eq!(schema.field_names().next(), Some("file_size"));
/// # Ok::<(), sendbench::BenchError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
    terminator: String,
}

impl FieldSchema {
    /// Build a schema from field specs and a terminator field name
    pub fn new(fields: Vec<FieldSpec>, terminator: impl Into<String>) -> Result<Self> {
        let schema = Self {
            fields,
            terminator: terminator.into(),
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Load the schema for the file sender's log, compiled into the binary
    pub fn default_send_log() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TOML)
    }

    /// Load a schema from a TOML file
    ///
    /// # Example TOML
    /// ```toml
    /// terminator = "total_time"
    ///
    /// [[field]]
    /// name = "total_time"
    /// pattern = '^SendFile\(\): Complete sending operation\s+- ([\d.]+) ms'
    /// kind = "float"
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SchemaFile = toml::from_str(content)?;
        Self::new(file.field, file.terminator)
    }

    /// Replace the terminator field, keeping the field table
    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Result<Self> {
        self.terminator = terminator.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(BenchError::InvalidSchema(
                "schema declares no fields".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(BenchError::InvalidSchema(format!(
                    "duplicate field '{}'",
                    field.name
                )));
            }
            field.compile()?;
        }

        if !seen.contains(self.terminator.as_str()) {
            return Err(BenchError::InvalidSchema(format!(
                "terminator '{}' is not a declared field",
                self.terminator
            )));
        }

        Ok(())
    }

    /// Get a field spec by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Name of the field that completes a block
    pub fn terminator(&self) -> &str {
        &self.terminator
    }
}
