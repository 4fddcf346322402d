//! CLI argument definitions for the slate engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "slate",
    version,
    about = "Schema fingerprinting and template aggregation for extracted tables",
    long_about = "Fingerprint extracted table schemas, cluster compatible schemas\n\
                  across source files, and merge their rows into a single virtual\n\
                  table with per-row provenance."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Cluster schemas across a set of extract files and summarize them.
    Preview(PreviewArgs),

    /// Merge all rows matching one schema fingerprint into a virtual table.
    Aggregate(AggregateArgs),
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Directory containing extract dumps (one JSON document per source file).
    #[arg(value_name = "EXTRACT_DIR")]
    pub extract_dir: PathBuf,

    /// Restrict to these file ids (comma-separated). Defaults to every
    /// file found in the extract directory.
    #[arg(long = "files", value_delimiter = ',', value_name = "FILE_ID")]
    pub files: Vec<String>,

    /// Minimum overall similarity for two schemas to land in one cluster.
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Emit the full preview response as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct AggregateArgs {
    /// Directory containing extract dumps (one JSON document per source file).
    #[arg(value_name = "EXTRACT_DIR")]
    pub extract_dir: PathBuf,

    /// Schema fingerprint to aggregate (64 hex characters).
    #[arg(long = "fingerprint", value_name = "HEX")]
    pub fingerprint: String,

    /// Restrict to these file ids (comma-separated). Defaults to every
    /// file found in the extract directory.
    #[arg(long = "files", value_delimiter = ',', value_name = "FILE_ID")]
    pub files: Vec<String>,

    /// Minimum overall similarity for two schemas to land in one cluster.
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Write the merged rows to a CSV file instead of printing them.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Maximum number of rows to print (ignored with --output).
    #[arg(long = "limit", value_name = "N", default_value_t = 20)]
    pub limit: usize,

    /// Emit the full aggregate response as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
