//! Daemon registry listing and reload-request building.

use anyhow::Result;

use reqctl::config::OutputFormat;
use reqctl::daemon;

use super::render;

/// List the daemons that accept configuration reloads.
pub fn cmd_daemon_list() -> Result<()> {
    for name in daemon::reloadable() {
        println!("{}", name);
    }
    Ok(())
}

/// Build the reload-request event for a daemon and print it.
pub fn cmd_daemon_reload(
    name: &str,
    config_file: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let event = daemon::reload_event(name, config_file)
        .ok_or_else(|| anyhow::anyhow!("Invalid daemon name {}", name))?;
    event.validate()?;
    println!("{}", render(&event, format)?.trim_end());
    Ok(())
}
