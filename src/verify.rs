//! Transfer verification: compare the sent directory against the received one
//!
//! Every file on the sent side that passes the name filter gets exactly one
//! verdict. A missing or differing file is reported, never raised as an error,
//! so one bad transfer does not hide the rest of the report.

use colored::Colorize;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{BenchError, Result};

/// Selects which sent files are checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub prefix: String,
    pub suffix: String,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            prefix: "perftest_".to_string(),
            suffix: ".txt".to_string(),
        }
    }
}

impl FileFilter {
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.prefix) && file_name.ends_with(&self.suffix)
    }
}

/// Verdict for a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Byte-for-byte identical
    Match,
    /// Present on both sides but contents differ
    Mismatch,
    /// Not present on the received side
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    pub file_name: String,
    pub outcome: CheckOutcome,
}

impl FileCheck {
    pub fn passed(&self) -> bool {
        self.outcome == CheckOutcome::Match
    }
}

/// Per-file verdicts for one sent/received directory pair
#[derive(Debug, Clone)]
pub struct VerifyReport {
    received_dir: PathBuf,
    checks: Vec<FileCheck>,
}

impl VerifyReport {
    /// Verdicts in file name order
    pub fn checks(&self) -> &[FileCheck] {
        &self.checks
    }

    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.checks.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Report line for one check, coloured green or red for compared files
    pub fn line(&self, check: &FileCheck) -> String {
        match check.outcome {
            CheckOutcome::Missing => format!(
                "Missing file in {}/: {}",
                dir_label(&self.received_dir),
                check.file_name
            ),
            CheckOutcome::Match => format!("{} matches", check.file_name)
                .green()
                .to_string(),
            CheckOutcome::Mismatch => format!("{} does not match", check.file_name)
                .red()
                .to_string(),
        }
    }

    /// One-line tally printed after the per-file lines
    pub fn summary(&self) -> String {
        format!("{} checked, {} passed", self.checks.len(), self.passed())
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            writeln!(f, "{}", self.line(check))?;
        }
        writeln!(f, "{}", self.summary())
    }
}

fn dir_label(dir: &Path) -> String {
    let label = dir.display().to_string();
    match label.trim_end_matches('/') {
        "" => label,
        trimmed => trimmed.to_string(),
    }
}

/// Check every filtered file of `sent` against its namesake in `received`
pub fn verify_transfer(sent: &Path, received: &Path, filter: &FileFilter) -> Result<VerifyReport> {
    let mut names = Vec::new();
    for entry in fs::read_dir(sent).map_err(|e| BenchError::io(sent, e))? {
        let entry = entry.map_err(|e| BenchError::io(sent, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %path.display(), "skipping non UTF-8 file name");
            continue;
        };
        if filter.matches(&name) {
            names.push(name);
        }
    }
    names.sort();

    let mut checks = Vec::with_capacity(names.len());
    for name in names {
        let sent_path = sent.join(&name);
        let recv_path = received.join(&name);

        let outcome = if !recv_path.is_file() {
            CheckOutcome::Missing
        } else if files_identical(&sent_path, &recv_path)? {
            CheckOutcome::Match
        } else {
            CheckOutcome::Mismatch
        };

        tracing::debug!(file = %name, ?outcome, "verified transfer");
        checks.push(FileCheck {
            file_name: name,
            outcome,
        });
    }

    Ok(VerifyReport {
        received_dir: received.to_path_buf(),
        checks,
    })
}

/// Byte-for-byte comparison, short-circuiting on differing lengths
pub fn files_identical(a: &Path, b: &Path) -> Result<bool> {
    let len_a = fs::metadata(a).map_err(|e| BenchError::io(a, e))?.len();
    let len_b = fs::metadata(b).map_err(|e| BenchError::io(b, e))?.len();
    if len_a != len_b {
        return Ok(false);
    }

    let mut reader_a = BufReader::new(File::open(a).map_err(|e| BenchError::io(a, e))?);
    let mut reader_b = BufReader::new(File::open(b).map_err(|e| BenchError::io(b, e))?);

    loop {
        let (n, equal) = {
            let buf_a = reader_a.fill_buf().map_err(|e| BenchError::io(a, e))?;
            let buf_b = reader_b.fill_buf().map_err(|e| BenchError::io(b, e))?;
            if buf_a.is_empty() || buf_b.is_empty() {
                return Ok(buf_a.is_empty() && buf_b.is_empty());
            }
            let n = buf_a.len().min(buf_b.len());
            (n, buf_a[..n] == buf_b[..n])
        };
        if !equal {
            return Ok(false);
        }
        reader_a.consume(n);
        reader_b.consume(n);
    }
}
