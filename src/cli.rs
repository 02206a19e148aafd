use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::infer::{DEFAULT_NULL_THRESHOLD_PCT, DEFAULT_SNIFF_ROW_LIMIT, NullGate};

#[derive(Debug, Parser)]
#[command(author, version, about = "Tokenize CSV files and infer column types", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Probe a CSV file and report inferred column types, widths, and null counts
    Probe(ProbeArgs),
    /// Re-emit a CSV file with every row padded or truncated to a fixed width
    Normalize(NormalizeArgs),
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Input CSV file to inspect ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Optional destination .meta file for the inferred profile report
    #[arg(short, long)]
    pub meta: Option<PathBuf>,
    /// Emit the profile report as JSON to stdout instead of a table
    #[arg(long)]
    pub json: bool,
    /// Treat the first row as data rather than a header
    #[arg(long = "no-header")]
    pub no_header: bool,
    /// Tolerated percentage of empty values per column (0-100)
    #[arg(long = "null-threshold", default_value_t = DEFAULT_NULL_THRESHOLD_PCT)]
    pub null_threshold: f64,
    /// Number of leading rows used to sniff column types
    #[arg(long = "sniff-rows", default_value_t = DEFAULT_SNIFF_ROW_LIMIT)]
    pub sniff_rows: usize,
    /// Behaviour when a column's empty-value percentage exceeds the threshold
    #[arg(long = "null-gate", value_enum, default_value = "force-string")]
    pub null_gate: NullGateArg,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum NullGateArg {
    /// Demote the column to string outright
    ForceString,
    /// Keep the merge-rule result
    MergeOnly,
}

impl From<NullGateArg> for NullGate {
    fn from(arg: NullGateArg) -> Self {
        match arg {
            NullGateArg::ForceString => NullGate::ForceString,
            NullGateArg::MergeOnly => NullGate::MergeOnly,
        }
    }
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Input CSV file to normalize ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Target column count (defaults to the width of the first row)
    #[arg(long)]
    pub width: Option<usize>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}
