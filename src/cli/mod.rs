//! # Command Line Interface
//!
//! A minimal plugin host: renders an inbound listener from a scenario file so
//! the health check filters a proxy would receive can be inspected offline.

pub mod output;
pub mod scenario;

use crate::config::AppConfig;
use crate::health::HealthCheckPlugin;
use crate::observability::init_logging;
use anyhow::Context;
use clap::{Parser, Subcommand};
use output::{print_output, OutputFormat};
use scenario::Scenario;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "sidecar-health")]
#[command(about = "Sidecar health check bypass plugin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the plugin over a scenario and print the resulting filter chains
    Render {
        /// Scenario file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        output: OutputFormat,
    },

    /// Print the effective configuration
    Config {
        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        output: OutputFormat,
    },
}

/// Run CLI commands
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.observability.log_level = "debug".to_string();
    }
    init_logging(&config.observability);

    match cli.command {
        Commands::Render { scenario, output } => {
            let loaded = Scenario::load(&scenario)?;
            info!(scenario = %scenario.display(), "Rendering inbound listener");

            let rendered = loaded
                .render(&[&HealthCheckPlugin::new()])
                .with_context(|| format!("Failed to render '{}'", scenario.display()))?;
            print_output(&rendered, output)?;
        }
        Commands::Config { output } => print_output(&config, output)?,
    }

    Ok(())
}
