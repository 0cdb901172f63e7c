//! CLI entry point and command dispatch for reqctl.

mod cmd;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use reqctl::config::{Config, OutputFormat};
use reqctl::model::Severity;
use reqctl::resolver::DnsResolver;
use reqctl::validate::Validator;

#[derive(Parser)]
#[command(name = "reqctl")]
#[command(version)]
#[command(about = "Validate and normalize provisioning requisitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate requisition documents
    Check {
        /// Documents to validate (`-` reads stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
        /// Reject hostnames instead of resolving them
        #[arg(long)]
        no_fqdn: bool,
    },
    /// Validate one document and print its normalized form
    Normalize {
        /// Document to normalize (`-` reads stdin)
        #[arg(short, long, default_value = "-")]
        file: String,
        /// Output format (overrides the configured default)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Reject hostnames instead of resolving them
        #[arg(long)]
        no_fqdn: bool,
    },
    /// Summarize requisition documents
    Stats {
        /// Documents to summarize (`-` reads stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
    },
    /// Inspect the reloadable daemon registry
    Daemon {
        #[command(subcommand)]
        command: DaemonCommands,
    },
    /// Build outbound event documents
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information
    Version {
        /// Include commit and build date
        #[arg(long)]
        verbose: bool,
    },
}

#[derive(Subcommand)]
enum DaemonCommands {
    /// List daemons that accept configuration reloads
    List,
    /// Build a reload-request event for a daemon
    Reload {
        /// Daemon registry name (e.g. pollerd, or correlation:ENGINE)
        name: String,
        /// Configuration file parameter, for daemons that take one
        #[arg(short = 'f', long)]
        config_file: Option<String>,
        /// Output format (overrides the configured default)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
enum EventCommands {
    /// Assemble an event from fields and print it
    Build {
        /// Event UEI
        uei: String,
        /// Node identifier
        #[arg(long)]
        node_id: Option<i64>,
        /// Interface address
        #[arg(long)]
        interface: Option<String>,
        /// Service name
        #[arg(long)]
        service: Option<String>,
        /// Interface index
        #[arg(long)]
        if_index: Option<i32>,
        /// Event description
        #[arg(long)]
        description: Option<String>,
        /// Event severity
        #[arg(long, value_enum)]
        severity: Option<Severity>,
        /// Originating host
        #[arg(long)]
        host: Option<String>,
        /// Event parameter as name=value; repeatable
        #[arg(short = 'p', long = "parm", value_name = "NAME=VALUE")]
        parameters: Vec<String>,
        /// Output format (overrides the configured default)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { files, no_fqdn } => {
            let config = Config::load()?;
            let validator = build_validator(&config, no_fqdn);
            cmd::check::cmd_check(&files, &validator)
        }
        Commands::Normalize {
            file,
            format,
            no_fqdn,
        } => {
            let config = Config::load()?;
            let validator = build_validator(&config, no_fqdn);
            cmd::normalize::cmd_normalize(&file, output_format(&config, format), &validator)
        }
        Commands::Stats { files } => cmd::stats::cmd_stats(&files),
        Commands::Daemon { command } => match command {
            DaemonCommands::List => cmd::daemon::cmd_daemon_list(),
            DaemonCommands::Reload {
                name,
                config_file,
                format,
            } => {
                let config = Config::load()?;
                cmd::daemon::cmd_daemon_reload(
                    &name,
                    config_file.as_deref(),
                    output_format(&config, format),
                )
            }
        },
        Commands::Event { command } => match command {
            EventCommands::Build {
                uei,
                node_id,
                interface,
                service,
                if_index,
                description,
                severity,
                host,
                parameters,
                format,
            } => {
                let config = Config::load()?;
                cmd::event::cmd_event_build(
                    &uei,
                    node_id,
                    interface,
                    service,
                    if_index,
                    description,
                    severity,
                    host,
                    &parameters,
                    output_format(&config, format),
                )
            }
        },
        Commands::Completion { shell } => cmd_completion(shell),
        Commands::Version { verbose } => cmd_version(verbose),
    }
}

/// Validator honoring the config plus any per-invocation override.
fn build_validator(config: &Config, no_fqdn: bool) -> Validator {
    let mut options = config.validator_options();
    if no_fqdn {
        options.allow_fqdn = false;
    }
    Validator::with_resolver(
        options,
        Box::new(DnsResolver::new(config.resolve_timeout())),
    )
}

/// A command-line flag wins over the configured output format.
fn output_format(config: &Config, flag: Option<OutputFormat>) -> OutputFormat {
    flag.unwrap_or(config.output.format)
}

fn cmd_completion(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    generate(shell, &mut command, "reqctl", &mut io::stdout());
    Ok(())
}

fn cmd_version(verbose: bool) -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    println!("reqctl {}", VERSION);

    if verbose {
        const GIT_SHA: &str = env!("GIT_SHA");
        const BUILD_DATE: &str = env!("BUILD_DATE");
        println!("commit: {}", GIT_SHA);
        println!("built: {}", BUILD_DATE);
    }

    Ok(())
}
