//! CLI argument parsing for sendbench

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::fixtures::SizeUnit;

/// Output format for reconstructed datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis and plotting
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "sendbench")]
#[command(version)]
#[command(about = "Reconstruct file-transfer benchmark records from sender logs", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rebuild one record per sent file from a sender log
    Parse(ParseArgs),
    /// Write benchmark input files of increasing size
    Generate(GenerateArgs),
    /// Compare sent files against received files byte for byte
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Sender log to read
    #[arg(value_name = "LOG")]
    pub log: PathBuf,

    /// Field schema TOML file (default: built-in sender schema)
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Field whose line completes a record (overrides the schema)
    #[arg(long, value_name = "FIELD")]
    pub terminator: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Only export these columns (comma separated, in this order)
    #[arg(long, value_name = "COLUMNS", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Write output to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory to write fixtures into
    #[arg(long, value_name = "DIR", default_value = "send")]
    pub dir: PathBuf,

    /// Number of files to write
    #[arg(short = 'n', long, value_name = "N", default_value = "15")]
    pub count: usize,

    /// Size step between files
    #[arg(long, value_enum, default_value = "kb")]
    pub unit: SizeUnit,

    /// File name prefix
    #[arg(long, value_name = "PREFIX", default_value = "perftest_")]
    pub prefix: String,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Directory holding the files that were sent
    #[arg(long, value_name = "DIR", default_value = "send")]
    pub sent: PathBuf,

    /// Directory holding the files that were received
    #[arg(long = "recv", value_name = "DIR", default_value = "recv")]
    pub received: PathBuf,

    /// Only check files whose name starts with PREFIX
    #[arg(long, value_name = "PREFIX", default_value = "perftest_")]
    pub prefix: String,

    /// Only check files whose name ends with SUFFIX
    #[arg(long, value_name = "SUFFIX", default_value = ".txt")]
    pub suffix: String,

    /// Exit with an error if any file is missing or differs
    #[arg(long)]
    pub strict: bool,

    /// Disable coloured output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
