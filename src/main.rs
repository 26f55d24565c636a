//! ClipKit
//!
//! Twitch clip harvester and re-upload toolkit.
//!
//! # Usage
//!
//! ```bash
//! clipkit download somestreamer --window 7d --limit 10 --metadata
//! clipkit process resize --input clip.mp4 --platform tiktok
//! clipkit batch --config batch.json
//! clipkit check
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clipkit::cli::{commands, Cli, Commands};
use clipkit::config_initialization::initialize_configuration_hierarchy;

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Main entry point for the ClipKit CLI application
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli);
    let level = match &config {
        Ok(config) => config.log_level.clone(),
        Err(_) => cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
    };
    init_tracing(&level.to_lowercase(), &cli.log_format);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting ClipKit");
    let result = match cli.command {
        Commands::Download(args) => commands::download(args, &config).await,
        Commands::Process(args) => commands::process(args, &config).await,
        Commands::Batch(args) => commands::batch(args, &config).await,
        Commands::Check => commands::check(&config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
