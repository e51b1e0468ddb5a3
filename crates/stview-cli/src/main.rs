//! stview: print the header of a SafeTensors file.
//!
//! # Usage
//!
//! ```bash
//! # Table of tensors, sorted by name, plus metadata if present
//! stview model.safetensors
//!
//! # Decoded header as JSON
//! stview model.safetensors --json
//!
//! # Also check offsets against the file size and dtype sizes
//! stview model.safetensors --strict
//! ```

use clap::Parser;
use stview_cli::exit::code_for_error;
use stview_cli::{Cli, run};
use tracing::error;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.log_level());

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run(&cli, &mut stdout) {
        error!("{}", e);

        let mut source = e.source();
        while let Some(err) = source {
            error!("  Caused by: {}", err);
            source = err.source();
        }

        std::process::exit(code_for_error(&e));
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over the CLI level.
fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
