// Ports - Interface definitions (contracts)

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for listing a channel's public clips
#[async_trait]
pub trait ClipSourcePort: Send + Sync {
    /// Run the listing tool and capture its output.
    ///
    /// A non-zero exit is reported through `ToolOutput`, not as an error;
    /// `Err` means the tool could not be started at all.
    async fn list_clips(&self, request: &ListingRequest) -> Result<ToolOutput, DomainError>;
}

/// Port for downloading a single clip to a file
#[async_trait]
pub trait FetchPort: Send + Sync {
    /// Run the download tool for one clip and capture its output
    async fn fetch(&self, request: &FetchRequest) -> Result<ToolOutput, DomainError>;
}

/// Port for the external transcoder
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Run one transcode job and capture its output
    async fn transcode(&self, job: &TranscodeJob) -> Result<ToolOutput, DomainError>;
}

/// Append-only sink for user-facing status lines.
///
/// Implementations must serialize concurrent writers.
pub trait LogPort: Send + Sync {
    /// Log info message
    fn info(&self, message: &str);

    /// Log warning message
    fn warn(&self, message: &str);

    /// Log error message
    fn error(&self, message: &str);
}

/// Observer for per-clip progress; purely informational
pub trait ProgressPort: Send + Sync {
    /// Called before clip `index` (1-based) of `total` is downloaded
    fn clip_started(&self, index: usize, total: usize);
}

/// Progress observer that ignores every event
pub struct NoProgress;

impl ProgressPort for NoProgress {
    fn clip_started(&self, _index: usize, _total: usize) {}
}
