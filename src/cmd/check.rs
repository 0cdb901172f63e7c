//! Validate requisition documents and report per-file verdicts.

use anyhow::Result;
use colored::Colorize;

use reqctl::model::Requisition;
use reqctl::validate::Validator;

use super::{parse_requisition, read_input};

/// Tally of per-file outcomes, for the summary line and the exit code.
#[derive(Debug, Default)]
struct CheckReport {
    passed: usize,
    failed: usize,
}

impl CheckReport {
    fn pass(&mut self, file: &str, requisition: &Requisition) {
        self.passed += 1;
        let nodes = requisition.nodes.len();
        println!(
            "{} {}: requisition {} is valid ({} node{})",
            "✓".green(),
            file,
            requisition.name,
            nodes,
            if nodes == 1 { "" } else { "s" },
        );
    }

    fn fail(&mut self, file: &str, message: &str) {
        self.failed += 1;
        println!("{} {}: {}", "✗".red(), file, message);
    }

    fn display_summary(&self) {
        let total = self.passed + self.failed;
        println!();
        print!("{} file{} checked", total, if total == 1 { "" } else { "s" });
        if self.passed > 0 {
            print!(", {} {}", self.passed, "passed".green());
        }
        if self.failed > 0 {
            print!(", {} {}", self.failed, "failed".red());
        }
        println!();
    }

    fn exit_if_failed(&self) -> Result<()> {
        if self.failed > 0 {
            std::process::exit(1);
        }
        Ok(())
    }
}

/// Validate each file, printing one verdict per file and a final summary.
/// Exits non-zero when any file fails.
pub fn cmd_check(files: &[String], validator: &Validator) -> Result<()> {
    let mut report = CheckReport::default();
    for file in files {
        match check_file(file, validator) {
            Ok((requisition, rewrites)) => {
                report.pass(file, &requisition);
                for (declared, resolved) in rewrites {
                    println!("  {} resolves to {}", declared, resolved);
                }
            }
            Err(err) => report.fail(file, &format!("{:#}", err)),
        }
    }
    report.display_summary();
    report.exit_if_failed()
}

fn check_file(
    file: &str,
    validator: &Validator,
) -> Result<(Requisition, Vec<(String, String)>)> {
    let content = read_input(file)?;
    let requisition = parse_requisition(&content)?;
    let normalized = validator.validate(&requisition)?;
    let rewrites = address_rewrites(&requisition, &normalized);
    Ok((normalized, rewrites))
}

/// Hostname rewrites performed during normalization, as
/// `(declared, resolved)` pairs. Normalization never reorders the tree, so
/// positions line up.
fn address_rewrites(original: &Requisition, normalized: &Requisition) -> Vec<(String, String)> {
    let mut rewrites = Vec::new();
    for (node, normalized_node) in original.nodes.iter().zip(&normalized.nodes) {
        for (interface, normalized_interface) in
            node.interfaces.iter().zip(&normalized_node.interfaces)
        {
            if interface.ip_address != normalized_interface.ip_address {
                rewrites.push((
                    interface.ip_address.clone(),
                    normalized_interface.ip_address.clone(),
                ));
            }
        }
    }
    rewrites
}
