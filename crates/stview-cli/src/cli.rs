//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

/// Print the tensor index and metadata stored in a SafeTensors header.
#[derive(Parser, Debug, Clone)]
#[command(name = "stview")]
#[command(about = "Inspect the header of a SafeTensors file")]
#[command(version)]
pub struct Cli {
    /// Path to a .safetensors file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Emit the decoded header as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Check tensor offsets against the file size and dtype sizes
    #[arg(long)]
    pub strict: bool,

    /// Largest header length to accept, in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_header_bytes: Option<u64>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn format(&self) -> OutputFormat {
        if self.json { OutputFormat::Json } else { OutputFormat::Text }
    }

    /// Log level implied by `--quiet` / `--verbose`.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
