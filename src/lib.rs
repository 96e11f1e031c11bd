//! sendbench - benchmark record reconstruction for a file-transfer sender
//!
//! The sender writes several timing and size lines to its log for every file
//! it transfers. This library folds those lines back into one record per
//! transfer and exposes the result as a column-addressable dataset for
//! plotting. It also ships the two chores around a benchmark run: writing
//! input files of increasing size, and verifying that the receiver got every
//! file intact.
//!
//! ## Example
//!
//! ```
//! use sendbench::{reconstruct, FieldSchema, FieldValue};
//!
//! let log = "SendFile(): Size of file: 1024 bytes\n\
//!            SendFile(): Complete sending operation - 12.5 ms\n";
//! let schema = FieldSchema::default_send_log()?;
//! let (dataset, _stats) = reconstruct(log.as_bytes(), &schema)?;
//!
//! assert_eq!(dataset.row_count(), 1);
//! assert_eq!(dataset.get(0, "file_size"), Some(FieldValue::Integer(1024)));
//! # Ok::<(), sendbench::BenchError>(())
//! ```

pub mod accumulator;
pub mod cli;
pub mod csv_output;
pub mod dataset;
pub mod error;
pub mod extractor;
pub mod fixtures;
pub mod json_output;
pub mod schema;
pub mod text_output;
pub mod verify;

pub use accumulator::{
    reconstruct, reconstruct_file, AccumulatorState, ReconstructionStats, RecordAccumulator,
};
pub use dataset::{Dataset, DatasetBuilder, Record};
pub use error::{BenchError, Result};
pub use extractor::FieldExtractor;
pub use fixtures::{generate_fixtures, FixtureConfig, SizeUnit};
pub use schema::{FieldSchema, FieldSpec, FieldValue, ValueKind};
pub use verify::{verify_transfer, CheckOutcome, FileCheck, FileFilter, VerifyReport};
