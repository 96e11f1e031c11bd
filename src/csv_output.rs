//! CSV export of a reconstructed dataset
//!
//! One header row of column names, one row per record. Missing cells are left
//! empty so spreadsheet and plotting tools read them as gaps.

use std::io::Write;

use crate::dataset::Dataset;
use crate::error::Result;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput<'a> {
    dataset: &'a Dataset,
    include_header: bool,
}

impl<'a> CsvOutput<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            include_header: true,
        }
    }

    /// Skip the header row
    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    /// Write CSV to any writer
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let columns = self.dataset.column_names();
        // A zero-column dataset has nothing to write, not even a header
        if columns.is_empty() {
            return Ok(());
        }

        let mut wtr = csv::WriterBuilder::new().from_writer(writer);

        if self.include_header {
            wtr.write_record(columns)?;
        }

        for record in self.dataset.rows() {
            let cells: Vec<String> = columns
                .iter()
                .map(|c| record.get(c).map(|v| v.to_string()).unwrap_or_default())
                .collect();
            wtr.write_record(&cells)?;
        }

        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> Result<String> {
        let mut buf = Vec::with_capacity(self.dataset.row_count() * 64);
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
