use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Detect distribution drift between training and scoring CSV data",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare a reference CSV with a current CSV and report per-column PSI
    Compare(CompareArgs),
    /// Produce column statistics for a single CSV file
    Profile(ProfileArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum ReportFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum ZeroShareArg {
    /// Terms with an empty bucket or category contribute nothing
    Skip,
    /// Empty buckets or categories are floored to --epsilon
    Smooth,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Reference (training-time) CSV file
    #[arg(short = 'r', long = "reference")]
    pub reference: PathBuf,
    /// Current (scoring-time) CSV file
    #[arg(short = 'c', long = "current")]
    pub current: PathBuf,
    /// Report destination (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Report serialization format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    /// YAML engine configuration file
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// How PSI terms with a zero share are resolved
    #[arg(long = "zero-share", value_enum)]
    pub zero_share: Option<ZeroShareArg>,
    /// Share substituted for empty buckets or categories when smoothing
    #[arg(long)]
    pub epsilon: Option<f64>,
    /// Count exact zeros in continuous buckets instead of leaving them out
    #[arg(long = "include-zeros")]
    pub include_zeros: bool,
    /// Run the reference and current passes concurrently
    #[arg(long)]
    pub parallel: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of both input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Print a PSI summary table to stderr
    #[arg(long = "table")]
    pub table: bool,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Input CSV file to profile
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Statistics destination (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Statistics serialization format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    /// YAML engine configuration file
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Count exact zeros in continuous buckets instead of leaving them out
    #[arg(long = "include-zeros")]
    pub include_zeros: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Print a column summary table to stderr
    #[arg(long = "table")]
    pub table: bool,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
