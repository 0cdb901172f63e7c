//! Summarize requisition documents.

use anyhow::Result;
use colored::Colorize;

use reqctl::model::{RequisitionStats, RequisitionsList};

use super::{parse_requisition, read_input};

/// Print node counts and foreign IDs for each document, followed by a
/// name summary when more than one is given.
pub fn cmd_stats(files: &[String]) -> Result<()> {
    let mut names = Vec::new();
    for file in files {
        let content = read_input(file)?;
        let requisition = parse_requisition(&content)?;
        let stats = RequisitionStats::for_requisition(&requisition);

        println!("{}", stats.name.cyan());
        println!("  nodes: {}", stats.count);
        if !stats.foreign_ids.is_empty() {
            println!("  foreign IDs: {}", stats.foreign_ids.join(", "));
        }
        if let Some(last_import) = stats.last_import {
            println!("  last import: {}", last_import.to_rfc3339());
        }
        names.push(stats.name);
    }

    if names.len() > 1 {
        let list = RequisitionsList::new(names);
        println!();
        println!(
            "{} requisitions: {}",
            list.count,
            list.foreign_sources.join(", ")
        );
    }
    Ok(())
}
