//! ClipKit Library
//!
//! Finds a streamer's most viewed public Twitch clips, downloads them with
//! yt-dlp and prepares them for re-upload: metadata sidecars, an upload
//! checklist, and ffmpeg-based trim / watermark / intro / convert / resize.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    ClipRecord, DownloadResult, HarvestRequest, OperationSpec, OutputFormat, Platform, RunStatus,
    RunSummary, TimeWindow,
};
pub use error::{ClipKitError, ClipKitResult};
