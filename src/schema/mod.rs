// Declarative field schema for benchmark log lines
//
// The schema is a table of (field name, line pattern, value kind) plus the name
// of the terminator field whose line closes a block. It is loaded from TOML so
// new log signatures can be recognised without recompiling, and it is tested
// independently of the record accumulator that consumes it.

mod definition;
mod registry;

pub use definition::{FieldSpec, FieldValue, ValueKind};
pub use registry::FieldSchema;

#[cfg(test)]
mod tests;
