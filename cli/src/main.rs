//! # dirzip Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the dirzip CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Pack a directory
//! dirzip create ./clean_publish -o ./clean_deploy.zip
//!
//! # Inspect the result, with info-level logs
//! dirzip -v list ./clean_deploy.zip
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration and route to the command handler
//! 4. Format and display any errors that occur
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (create, list)
mod common; // Shared utilities (archive, fs)
mod core; // Core infrastructure (errors, config)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "dirzip",
    about = "Pack a directory tree into a deflate-compressed ZIP archive",
    long_about = "Walks a source directory and stores every regular file in a ZIP archive\n\
                  under its path relative to the source, using deflate compression.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of .dirzip.toml and the user config.
    #[arg(long, env = "DIRZIP_CONFIG", global = true)]
    config: Option<PathBuf>,
}

/// Enum defining all available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a ZIP archive from a directory tree
    #[command(alias = "c")]
    Create(commands::create::CreateArgs),
    /// List the entries of a ZIP archive
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> crate::core::error::Result<()> {
    match cli.command {
        Commands::Create(args) => {
            let config = crate::core::config::load_config(cli.config.as_deref())?;
            commands::create::handle_create(args, &config)
        }
        Commands::List(args) => commands::list::handle_list(args),
    }
}
