//! Build outbound event documents from command-line fields.

use anyhow::{Context, Result};

use reqctl::config::OutputFormat;
use reqctl::model::{Event, Severity};

use super::render;

/// Assemble an event from its fields, validate it, and print it.
#[allow(clippy::too_many_arguments)]
pub fn cmd_event_build(
    uei: &str,
    node_id: Option<i64>,
    interface: Option<String>,
    service: Option<String>,
    if_index: Option<i32>,
    description: Option<String>,
    severity: Option<Severity>,
    host: Option<String>,
    parameters: &[String],
    format: OutputFormat,
) -> Result<()> {
    let mut event = Event::new(uei);
    event.node_id = node_id;
    event.interface = interface.unwrap_or_default();
    event.service = service.unwrap_or_default();
    event.if_index = if_index;
    event.description = description.unwrap_or_default();
    event.severity = severity;
    event.host = host.unwrap_or_default();
    for parameter in parameters {
        let (name, value) = split_parameter(parameter)?;
        event.add_parameter(name, value);
    }
    event.validate()?;
    println!("{}", render(&event, format)?.trim_end());
    Ok(())
}

/// Split a `name=value` parameter argument on its first `=`.
fn split_parameter(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .with_context(|| format!("Invalid parameter {:?}, expected name=value", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_parameter() {
        assert_eq!(split_parameter("owner=neteng").unwrap(), ("owner", "neteng"));
        // Only the first `=` splits; values may contain more.
        assert_eq!(split_parameter("filter=a=b").unwrap(), ("filter", "a=b"));
        assert!(split_parameter("no-equals").is_err());
    }
}
