// Download interactor - Saves one clip, skipping files already on disk

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the single-clip download use case
pub struct DownloadInteractor {
    fetch_port: Arc<dyn FetchPort>,
    log_port: Arc<dyn LogPort>,
}

impl DownloadInteractor {
    /// Create new download interactor with injected ports
    pub fn new(fetch_port: Arc<dyn FetchPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            fetch_port,
            log_port,
        }
    }

    /// Where `clip` is saved inside `output_dir`
    pub fn destination(clip: &ClipRecord, output_dir: &Path, format: OutputFormat) -> PathBuf {
        output_dir.join(clip_filename(clip, format))
    }

    /// Download `clip` into `output_dir`.
    ///
    /// An existing destination file short-circuits without running the tool.
    pub async fn download(
        &self,
        clip: &ClipRecord,
        output_dir: &Path,
        format: OutputFormat,
        ffmpeg_location: Option<&Path>,
    ) -> Result<FetchOutcome, DomainError> {
        if !clip.has_url() {
            self.log_port
                .error(&format!("No URL found for clip: {}", clip.title));
            return Err(DomainError::NoUrl(clip.title.clone()));
        }

        let destination = Self::destination(clip, output_dir, format);
        if destination.exists() {
            self.log_port.info(&format!(
                "Clip already exists: {}",
                destination.display()
            ));
            return Ok(FetchOutcome::AlreadyPresent(destination));
        }

        self.log_port.info(&format!("Downloading: {}", clip.title));
        let request = FetchRequest {
            url: clip.url.clone(),
            output: destination.clone(),
            ffmpeg_location: ffmpeg_location.map(Path::to_path_buf),
        };

        let output = match self.fetch_port.fetch(&request).await {
            Ok(output) => output,
            Err(e @ DomainError::DependencyMissing(_)) => {
                self.log_port.error(&e.to_string());
                return Err(e);
            }
            Err(e) => {
                self.log_port
                    .error(&format!("Error downloading clip {}: {}", clip.title, e));
                return Err(DomainError::DownloadFailed(e.to_string()));
            }
        };

        if !output.success() {
            let detail = output.failure_detail();
            self.log_port
                .error(&format!("Error downloading clip: {}", detail));
            return Err(DomainError::DownloadFailed(detail));
        }

        if !destination.exists() {
            let detail = format!("file not found after download: {}", destination.display());
            self.log_port
                .error(&format!("Download failed, {}", detail));
            return Err(DomainError::DownloadFailed(detail));
        }

        self.log_port
            .info(&format!("Successfully downloaded: {}", destination.display()));
        Ok(FetchOutcome::Downloaded(destination))
    }
}
