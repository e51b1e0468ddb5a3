//! Rendering of a decoded header as a text table or JSON.

use std::fmt::Write as _;

use stview_header::Header;

/// Output format for the inspected header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table (default).
    #[default]
    Text,
    /// The header JSON, pretty-printed.
    Json,
}

pub const METADATA_BANNER: &str =
    "------------------------ Metadata Information ------------------------";
pub const TENSOR_BANNER: &str =
    "------------------------ Tensor Information -------------------------";

const NAME_WIDTH: usize = 40;
const RULE_WIDTH: usize = 92;
// Names longer than this are cut to `NAME_KEEP` chars plus "...".
const NAME_MAX: usize = 37;
const NAME_KEEP: usize = 34;

/// Shorten a tensor name to fit the name column.
pub fn display_name(name: &str) -> String {
    if name.chars().count() > NAME_MAX {
        let head: String = name.chars().take(NAME_KEEP).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

fn row(name: &str, dtype: &str, shape: &str, offsets: &str) -> String {
    format!("{name:<NAME_WIDTH$} {dtype:<8} {shape:<20} {offsets:<20}").trim_end().to_string()
}

/// Render the metadata block (if any), the tensor table, and a summary line.
pub fn render_text(header: &Header) -> anyhow::Result<String> {
    let mut out = String::new();

    if let Some(meta) = header.metadata() {
        writeln!(out, "\n{METADATA_BANNER}")?;
        writeln!(out, "{}", serde_json::to_string_pretty(meta)?)?;
    }

    writeln!(out, "\n{TENSOR_BANNER}")?;
    writeln!(out, "{}", row("Tensor Name", "Dtype", "Shape", "Data Offsets"))?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for (name, info) in header.tensors() {
        let line =
            row(&display_name(name), &info.dtype, &info.shape_string(), &info.offsets_string());
        writeln!(out, "{line}")?;
    }

    writeln!(out, "\n{} tensors, {} data bytes", header.len(), header.data_len())?;
    Ok(out)
}

/// Render the header in its on-disk JSON shape.
pub fn render_json(header: &Header) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(header)?;
    json.push('\n');
    Ok(json)
}

/// Render `header` in the requested format.
pub fn render(header: &Header, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => render_text(header),
        OutputFormat::Json => render_json(header),
    }
}
