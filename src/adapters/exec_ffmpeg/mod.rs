//! FFmpeg execution adapter
//!
//! Runs one transcode job per call; the job already carries the full
//! argument list.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::run_captured;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Default binary name looked up on `PATH`
pub const FFMPEG_BINARY: &str = "ffmpeg";

/// FFmpeg-based transcode adapter
pub struct FFmpegAdapter {
    binary: PathBuf,
}

impl FFmpegAdapter {
    /// Create adapter for an explicit (usually discovered) binary
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }
}

#[async_trait]
impl TranscodePort for FFmpegAdapter {
    async fn transcode(&self, job: &TranscodeJob) -> Result<ToolOutput, DomainError> {
        let args = job.to_args();
        debug!("ffmpeg {}", args.join(" "));
        run_captured(&self.binary, args).await
    }
}
