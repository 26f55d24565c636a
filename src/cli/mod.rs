//! CLI module for ClipKit
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// ClipKit
///
/// Downloads a streamer's most viewed Twitch clips and prepares them for
/// re-upload to other platforms.
#[derive(Parser, Debug)]
#[command(name = "clipkit")]
#[command(about = "ClipKit - Twitch clip harvester and re-upload toolkit")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, default_value = "text", global = true, value_parser = ["text", "json"])]
    pub log_format: String,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Path to the ffmpeg binary
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the yt-dlp binary
    #[arg(long, global = true)]
    pub ytdlp: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a streamer's top clips
    Download(args::DownloadArgs),
    /// Apply one processing operation to a video or a directory
    Process(args::ProcessArgs),
    /// Run an operation chain described in a batch file
    Batch(args::BatchArgs),
    /// Report whether yt-dlp and ffmpeg can be found
    Check,
}
