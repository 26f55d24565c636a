//! yt-dlp execution adapter
//!
//! Lists a channel's clips through the flat-playlist JSON dump and downloads
//! single clips. Both go through the same binary.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::run_captured;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::{channel_clips_url, escape_output_template};
use crate::ports::*;

/// Default binary name looked up on `PATH`
pub const YTDLP_BINARY: &str = "yt-dlp";

/// yt-dlp based listing and download adapter
pub struct YtDlpAdapter {
    binary: PathBuf,
}

impl YtDlpAdapter {
    /// Create adapter for an explicit binary
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    /// Arguments for listing clips
    pub fn listing_args(request: &ListingRequest) -> Vec<String> {
        let mut args = vec![
            "--flat-playlist".to_string(),
            "--dump-json".to_string(),
            channel_clips_url(&request.channel),
            "--match-filter".to_string(),
            format!("view_count >= {}", request.min_views),
            "--playlist-end".to_string(),
            request.limit.to_string(),
        ];
        if let Some(date) = &request.date_after {
            args.push("--dateafter".to_string());
            args.push(date.clone());
        }
        args
    }

    /// Arguments for downloading one clip
    pub fn fetch_args(request: &FetchRequest) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            escape_output_template(&request.output),
            "-f".to_string(),
            "best".to_string(),
        ];
        if let Some(location) = &request.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(location.to_string_lossy().into_owned());
        }
        args.push(request.url.clone());
        args
    }
}

#[async_trait]
impl ClipSourcePort for YtDlpAdapter {
    async fn list_clips(&self, request: &ListingRequest) -> Result<ToolOutput, DomainError> {
        debug!("Listing clips for {}", request.channel);
        run_captured(&self.binary, Self::listing_args(request)).await
    }
}

#[async_trait]
impl FetchPort for YtDlpAdapter {
    async fn fetch(&self, request: &FetchRequest) -> Result<ToolOutput, DomainError> {
        debug!("Fetching {}", request.url);
        run_captured(&self.binary, Self::fetch_args(request)).await
    }
}
