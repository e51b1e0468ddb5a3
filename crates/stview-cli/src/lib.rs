//! stview CLI library
//!
//! Argument parsing, configuration resolution, and rendering, exposed so the
//! binary stays thin and the pieces can be tested directly.

pub mod cli;
pub mod exit;
pub mod output;

use std::io::Write;

use anyhow::{Context, Result};
use stview_header::InspectConfig;
use tracing::{debug, info};

pub use cli::Cli;
pub use output::{OutputFormat, render};

/// Resolve settings: defaults, then the TOML file, then `STVIEW_*`
/// environment variables, then command-line flags.
pub fn resolve_config(cli: &Cli) -> Result<InspectConfig> {
    let mut config = match &cli.config {
        Some(path) => InspectConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => InspectConfig::from_env()?,
    };

    if let Some(max) = cli.max_header_bytes {
        config.max_header_len = max;
    }
    if cli.strict {
        config.strict = true;
    }
    config.validate()?;

    debug!("max header length: {} bytes, strict: {}", config.max_header_len, config.strict);
    Ok(config)
}

/// Inspect `cli.file` and write the rendered header to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let config = resolve_config(cli)?;

    let inspection = stview_header::open(&cli.file, &config)
        .with_context(|| format!("Failed to read SafeTensors header: {}", cli.file.display()))?;
    info!(
        "{}: {} tensors, header {} bytes, data section {} bytes",
        inspection.path.display(),
        inspection.header.len(),
        inspection.header_len,
        inspection.data_section_len()
    );

    let rendered = render(&inspection.header, cli.format())?;
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}
