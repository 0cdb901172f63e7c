//! Command module structure for the reqctl CLI

pub mod check;
pub mod daemon;
pub mod event;
pub mod normalize;
pub mod stats;

use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use serde::Serialize;

use reqctl::config::OutputFormat;
use reqctl::model::Requisition;

/// Read an input document from a path, `-` meaning stdin.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("Reading requisition from stdin, finish with Ctrl-D");
        }
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
    }
}

/// Parse a requisition document. YAML is the native format; JSON parses
/// too since YAML is a superset.
pub fn parse_requisition(content: &str) -> Result<Requisition> {
    serde_yaml::from_str(content).context("Failed to parse requisition document")
}

/// Serialize `value` in the requested output format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to render JSON")
        }
    }
}
