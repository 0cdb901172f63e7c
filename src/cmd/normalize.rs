//! Normalize a requisition document and emit it.

use anyhow::Result;

use reqctl::config::OutputFormat;
use reqctl::validate::Validator;

use super::{parse_requisition, read_input, render};

/// Validate one document and print its normalized form on stdout.
pub fn cmd_normalize(file: &str, format: OutputFormat, validator: &Validator) -> Result<()> {
    let content = read_input(file)?;
    let requisition = parse_requisition(&content)?;
    let normalized = validator.validate(&requisition)?;
    println!("{}", render(&normalized, format)?.trim_end());
    Ok(())
}
