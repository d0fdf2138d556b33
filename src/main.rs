//! Binary entry point for ring-designer.
//!
//! This binary provides the CLI interface for the ring collection, trash and
//! design archive.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::{
    AlreadyReported, CollectionAction, ConfigAction, DesignAction, PreviewAction, TrashAction,
};
use ring_designer::config::RingConfig;
use ring_designer::observability;
use ring_designer::services::ServiceContainer;

/// Environment variable naming a config file.
const CONFIG_PATH_ENV: &str = "RING_DESIGNER_CONFIG_PATH";

/// Ring Designer - curated and generated rings, collection, trash and restore.
#[derive(Parser)]
#[command(name = "ring-designer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print results as `{success, data, error}` JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Show configuration and local design status.
    Status,

    /// Configuration management.
    Config {
        /// Config action.
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// The active ring collection.
    Collection {
        /// Collection action.
        #[command(subcommand)]
        action: CollectionAction,
    },

    /// Trashed rings.
    Trash {
        /// Trash action.
        #[command(subcommand)]
        action: TrashAction,
    },

    /// Designs: local, archived, and the confirm flow.
    Design {
        /// Design action.
        #[command(subcommand)]
        action: DesignAction,
    },

    /// Term preview images.
    Previews {
        /// Preview action.
        #[command(subcommand)]
        action: PreviewAction,
    },

    /// Generate a ring image from a description.
    Generate {
        /// Ring description.
        description: String,

        /// Reference image URL to refine.
        #[arg(long)]
        reference: Option<String>,
    },
}

fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is::<AlreadyReported>() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &RingConfig) -> commands::CommandResult {
    let services = ServiceContainer::from_config(config);
    let json = cli.json;

    match cli.command {
        Commands::Status => commands::cmd_status(config, &services, json),
        Commands::Config { action } => commands::cmd_config(config, action, json),
        Commands::Collection { action } => commands::cmd_collection(&services, action, json),
        Commands::Trash { action } => commands::cmd_trash(&services, action, json),
        Commands::Design { action } => commands::cmd_design(config, &services, action, json),
        Commands::Previews { action } => commands::cmd_previews(config, &services, action, json),
        Commands::Generate {
            description,
            reference,
        } => commands::cmd_generate(config, &description, reference, json),
    }
}

/// Loads configuration.
///
/// Order: `--config`, then `RING_DESIGNER_CONFIG_PATH`, then the default
/// location. Environment overrides apply on top of whichever file was read.
fn load_config(path: Option<&str>) -> Result<RingConfig, Box<dyn std::error::Error>> {
    let config = if let Some(config_path) = path {
        RingConfig::load_from_file(std::path::Path::new(config_path))?
    } else {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(config_path) if !config_path.trim().is_empty() => {
                RingConfig::load_from_file(std::path::Path::new(config_path.trim()))?
            },
            _ => RingConfig::load_default(),
        }
    };

    Ok(config.with_env_overrides())
}
