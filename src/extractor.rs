//! Per-line field extraction against a compiled [`FieldSchema`]
//!
//! Extraction is stateless: each call looks at one line and reports every
//! field whose pattern matches it. Most log lines match nothing, which is not
//! an error.

use regex::Regex;

use crate::error::Result;
use crate::schema::{FieldSchema, FieldSpec, FieldValue};

/// Compiled matcher for one schema field
#[derive(Debug, Clone)]
struct CompiledField {
    spec: FieldSpec,
    regex: Regex,
}

/// Matches log lines against every field pattern of a schema
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    fields: Vec<CompiledField>,
}

impl FieldExtractor {
    /// Compile all patterns of the schema
    pub fn new(schema: &FieldSchema) -> Result<Self> {
        let fields = schema
            .fields()
            .iter()
            .map(|spec| {
                Ok(CompiledField {
                    spec: spec.clone(),
                    regex: spec.compile()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { fields })
    }

    /// Extract `(field name, value)` pairs from one line, in schema order
    ///
    /// Surrounding whitespace is ignored. A capture that does not convert to
    /// the field's kind is a schema bug and fails with
    /// [`BenchError::MalformedValue`](crate::BenchError::MalformedValue).
    pub fn extract<'a>(&'a self, line: &str) -> Result<Vec<(&'a str, FieldValue)>> {
        let line = line.trim();
        let mut matches = Vec::new();

        for field in &self.fields {
            let Some(caps) = field.regex.captures(line) else {
                continue;
            };
            // compile() guarantees group 1 exists; it can still be unset for
            // an optional group like `(\d+)?`
            let text = caps.get(1).map_or("", |m| m.as_str());
            let value = field.spec.kind.parse(&field.spec.name, text)?;
            matches.push((field.spec.name.as_str(), value));
        }

        Ok(matches)
    }

    /// Number of compiled field patterns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
