//! Command-line interface for gonzo
//!
//! Parses the command line, resolves the configuration once and hands the
//! resulting record on. Without a subcommand the effective configuration is
//! printed as YAML.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{self, FlagArgs};
use crate::domain::Config;

mod version;

const LONG_ABOUT: &str = "\
Gonzo - a real-time log analysis terminal UI.

Settings are resolved from command-line flags, then GONZO_* environment
variables (e.g. GONZO_MEMORY_SIZE, GONZO_VMLOGS_USER), then the config file
($HOME/.config/gonzo/config.yml unless --config is given), then built-in
defaults.";

/// Real-time log analysis terminal UI
#[derive(Parser)]
#[command(name = "gonzo")]
#[command(long_about = LONG_ABOUT)]
#[command(disable_version_flag = true, args_override_self = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    flags: FlagArgs,

    /// Print version information
    #[arg(short = 'v', long)]
    version: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version information
    Version,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if cli.version || matches!(cli.command, Some(Commands::Version)) {
        print!("{}", version::version_info());
        return Ok(());
    }

    let config = config::resolve(&cli.flags)?;
    launch(&config)
}

/// Entry point for everything that runs on top of the resolved configuration.
fn launch(config: &Config) -> Result<()> {
    tracing::info!(
        memory_size = config.memory_size,
        log_buffer = config.log_buffer,
        files = config.files.len(),
        otlp = config.otlp_enabled,
        vmlogs_auth = config.has_vmlogs_credentials(),
        "Configuration resolved"
    );

    let rendered = serde_yaml::to_string(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
