//! Benchmark input files of increasing size
//!
//! File `i` (1-based) holds `i * unit` random alphanumeric bytes and is named
//! `{prefix}{i}{unit suffix}.txt`, e.g. `perftest_3KB.txt`. The content is not
//! reproducible; only the sizes matter to the benchmark.

use clap::ValueEnum;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fs;
use std::path::PathBuf;

use crate::error::{BenchError, Result};

/// Size step between consecutive fixture files
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SizeUnit {
    /// 1 byte
    #[value(name = "b")]
    Bytes,
    /// 1024 bytes
    #[value(name = "kb")]
    KiB,
    /// 1024 * 1024 bytes
    #[value(name = "mb")]
    MiB,
}

impl SizeUnit {
    pub fn bytes(self) -> u64 {
        match self {
            SizeUnit::Bytes => 1,
            SizeUnit::KiB => 1024,
            SizeUnit::MiB => 1024 * 1024,
        }
    }

    /// Suffix embedded in fixture file names
    pub fn suffix(self) -> &'static str {
        match self {
            SizeUnit::Bytes => "B",
            SizeUnit::KiB => "KB",
            SizeUnit::MiB => "MB",
        }
    }
}

/// Fixture generation settings
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Output directory, created if missing
    pub dir: PathBuf,
    pub count: usize,
    pub unit: SizeUnit,
    pub prefix: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("send"),
            count: 15,
            unit: SizeUnit::KiB,
            prefix: "perftest_".to_string(),
        }
    }
}

impl FixtureConfig {
    /// File name for the `index`-th fixture (1-based)
    pub fn file_name(&self, index: usize) -> String {
        format!("{}{}{}.txt", self.prefix, index, self.unit.suffix())
    }

    /// Byte length of the `index`-th fixture (1-based)
    pub fn file_len(&self, index: usize) -> u64 {
        index as u64 * self.unit.bytes()
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(BenchError::InvalidConfig(
                "fixture count must be at least 1".to_string(),
            ));
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(BenchError::InvalidConfig(format!(
                "fixture prefix must not contain path separators: {:?}",
                self.prefix
            )));
        }
        Ok(())
    }
}

/// Write `config.count` fixture files and return their paths in size order
pub fn generate_fixtures(config: &FixtureConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;
    fs::create_dir_all(&config.dir).map_err(|e| BenchError::io(&config.dir, e))?;

    let mut rng = rand::thread_rng();
    let mut paths = Vec::with_capacity(config.count);

    for index in 1..=config.count {
        let path = config.dir.join(config.file_name(index));
        let len = config.file_len(index) as usize;
        let data: Vec<u8> = (&mut rng).sample_iter(&Alphanumeric).take(len).collect();

        fs::write(&path, &data).map_err(|e| BenchError::io(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = len, "wrote fixture");
        paths.push(path);
    }

    tracing::info!(
        dir = %config.dir.display(),
        files = paths.len(),
        "generated benchmark fixtures"
    );
    Ok(paths)
}
