//! Record reconstruction from a benchmark log
//!
//! The sender logs several lines per file it sends, always finishing with the
//! terminator line (`total_time` in the default schema). The accumulator folds
//! lines into a partial record and seals it into a [`Record`] as soon as a line
//! sets the terminator field.
//!
//! ```text
//! EMPTY --field--> ACCUMULATING --terminator--> (seal, emit) --> EMPTY
//! ```
//!
//! Lines are processed strictly in order with no lookahead. A block that never
//! reaches its terminator before the input ends is dropped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::mem;
use std::path::Path;

use crate::dataset::{Dataset, DatasetBuilder, Record};
use crate::error::{BenchError, Result};
use crate::extractor::FieldExtractor;
use crate::schema::{FieldSchema, FieldValue};

/// Where the accumulator is within the current block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    /// No field seen since the last seal
    Empty,
    /// At least one field set, terminator not yet seen
    Accumulating,
}

/// Counters gathered while folding a log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconstructionStats {
    pub lines_read: usize,
    /// Lines that set at least one field
    pub lines_matched: usize,
    pub records_sealed: usize,
    /// Whether an unterminated trailing block was discarded by `finish`
    pub incomplete_dropped: bool,
}

/// In-progress fields of the current block
#[derive(Debug, Default)]
struct PartialRecord {
    values: HashMap<String, FieldValue>,
}

impl PartialRecord {
    /// Last write wins for a field set twice within one block
    fn set(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn seal(self) -> Record {
        Record::from_values(self.values)
    }
}

/// Folds log lines into completed records
#[derive(Debug)]
pub struct RecordAccumulator {
    extractor: FieldExtractor,
    terminator: String,
    field_order: Vec<String>,
    current: PartialRecord,
    records: Vec<Record>,
    stats: ReconstructionStats,
}

impl RecordAccumulator {
    pub fn new(schema: &FieldSchema) -> Result<Self> {
        Ok(Self {
            extractor: FieldExtractor::new(schema)?,
            terminator: schema.terminator().to_string(),
            field_order: schema.field_names().map(str::to_string).collect(),
            current: PartialRecord::default(),
            records: Vec::new(),
            stats: ReconstructionStats::default(),
        })
    }

    /// Process one log line
    pub fn consume(&mut self, line: &str) -> Result<()> {
        self.stats.lines_read += 1;

        let matches = self.extractor.extract(line)?;
        if matches.is_empty() {
            return Ok(());
        }
        self.stats.lines_matched += 1;

        let mut terminated = false;
        for (name, value) in matches {
            terminated |= name == self.terminator;
            self.current.set(name, value);
        }

        if terminated {
            let record = mem::take(&mut self.current).seal();
            tracing::debug!(
                row = self.records.len(),
                fields = record.len(),
                "sealed benchmark record"
            );
            self.records.push(record);
            self.stats.records_sealed += 1;
        }

        Ok(())
    }

    pub fn state(&self) -> AccumulatorState {
        if self.current.is_empty() {
            AccumulatorState::Empty
        } else {
            AccumulatorState::Accumulating
        }
    }

    /// Records sealed so far, in completion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn stats(&self) -> &ReconstructionStats {
        &self.stats
    }

    /// End the stream, dropping any unterminated block, and build the dataset
    pub fn finish(self) -> Dataset {
        self.finish_with_stats().0
    }

    /// Like [`RecordAccumulator::finish`], also returning the fold counters
    pub fn finish_with_stats(mut self) -> (Dataset, ReconstructionStats) {
        if !self.current.is_empty() {
            let mut lost: Vec<&str> = self.current.values.keys().map(String::as_str).collect();
            lost.sort_unstable();
            tracing::warn!(
                terminator = %self.terminator,
                fields = ?lost,
                "log ended inside an unterminated block; discarding partial record"
            );
            self.stats.incomplete_dropped = true;
        }

        let dataset = DatasetBuilder::new()
            .with_field_order(self.field_order)
            .build(self.records);
        (dataset, self.stats)
    }
}

/// Reconstruct a dataset from any line-oriented reader
pub fn reconstruct<R: BufRead>(
    reader: R,
    schema: &FieldSchema,
) -> Result<(Dataset, ReconstructionStats)> {
    reconstruct_labeled(reader, schema, Path::new("<input>"))
}

/// Reconstruct a dataset from a log file on disk
///
/// The file is read line by line and closed when reading ends. A missing or
/// unreadable file, or a line that is not valid UTF-8, fails the whole run.
pub fn reconstruct_file<P: AsRef<Path>>(
    path: P,
    schema: &FieldSchema,
) -> Result<(Dataset, ReconstructionStats)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BenchError::io(path, e))?;
    reconstruct_labeled(BufReader::new(file), schema, path)
}

fn reconstruct_labeled<R: BufRead>(
    reader: R,
    schema: &FieldSchema,
    label: &Path,
) -> Result<(Dataset, ReconstructionStats)> {
    let mut accumulator = RecordAccumulator::new(schema)?;
    for line in reader.lines() {
        let line = line.map_err(|e| BenchError::io(label, e))?;
        accumulator.consume(&line)?;
    }

    let (dataset, stats) = accumulator.finish_with_stats();
    tracing::info!(
        source = %label.display(),
        lines = stats.lines_read,
        matched = stats.lines_matched,
        records = stats.records_sealed,
        "reconstructed benchmark dataset"
    );
    Ok((dataset, stats))
}
