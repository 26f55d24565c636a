// Harvest interactor - List, rank, download and describe a channel's clips

use std::sync::Arc;

use crate::app::download_interactor::DownloadInteractor;
use crate::app::listing_interactor::ListingInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::output::{InstructionsWriter, MetadataWriter};
use crate::ports::*;
use crate::utils::path::absolute_path;

/// Interactor for the full harvest run
pub struct HarvestInteractor {
    lister: Arc<ListingInteractor>,
    downloader: Arc<DownloadInteractor>,
    metadata: MetadataWriter,
    instructions: InstructionsWriter,
    log_port: Arc<dyn LogPort>,
}

impl HarvestInteractor {
    /// Create new harvest interactor
    pub fn new(
        lister: Arc<ListingInteractor>,
        downloader: Arc<DownloadInteractor>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            lister,
            downloader,
            metadata: MetadataWriter::new(),
            instructions: InstructionsWriter::new(),
            log_port,
        }
    }

    /// Run without a progress observer
    pub async fn execute(&self, request: &HarvestRequest) -> Result<RunSummary, DomainError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Run the pipeline, reporting each clip to `progress` before it downloads.
    ///
    /// Only a missing tool or an unusable output directory is returned as an
    /// error; every other failure is folded into the summary.
    pub async fn execute_with_progress(
        &self,
        request: &HarvestRequest,
        progress: &dyn ProgressPort,
    ) -> Result<RunSummary, DomainError> {
        std::fs::create_dir_all(&request.output_dir).map_err(|e| {
            DomainError::FsFail(format!(
                "cannot create {}: {}",
                request.output_dir.display(),
                e
            ))
        })?;

        let listing = self
            .lister
            .list(
                &request.channel,
                request.window,
                request.limit,
                request.min_views,
            )
            .await;

        let listing = match listing {
            Ok(listing) => listing,
            Err(DomainError::ListingFailed(detail)) => {
                return Ok(RunSummary::empty(
                    RunStatus::ListingFailed(detail),
                    request.output_dir.clone(),
                ));
            }
            Err(e) => return Err(e),
        };

        if listing.clips.is_empty() {
            self.log_port
                .info(&format!("No clips found for {}", request.channel));
            return Ok(RunSummary::empty(
                RunStatus::NothingFound,
                request.output_dir.clone(),
            ));
        }

        let ranked = rank_clips(listing.clips);
        let total = ranked.len();
        let mut results = Vec::with_capacity(total);
        let mut downloaded = 0;

        for (index, clip) in ranked.into_iter().enumerate() {
            progress.clip_started(index + 1, total);
            self.log_port
                .info(&format!("Processing clip {}/{}: {}", index + 1, total, clip.title));

            let fetched = self
                .downloader
                .download(
                    &clip,
                    &request.output_dir,
                    request.format,
                    request.ffmpeg_location.as_deref(),
                )
                .await;

            match fetched {
                Ok(outcome) => {
                    let path = outcome.into_path();
                    if request.emit_metadata {
                        match self.metadata.write(&clip, &path) {
                            Ok(sidecar) => self.log_port.info(&format!(
                                "Created metadata file: {}",
                                sidecar.display()
                            )),
                            Err(e) => self.log_port.error(&e.to_string()),
                        }
                    }
                    downloaded += 1;
                    results.push(DownloadResult::succeeded(clip, path));
                }
                Err(DomainError::DependencyMissing(detail)) => {
                    return Err(DomainError::DependencyMissing(detail));
                }
                Err(_) => results.push(DownloadResult::failed(clip)),
            }
        }

        let mut instructions_path = None;
        if request.emit_instructions {
            match self.instructions.write(&results, &request.output_dir) {
                Ok(Some(path)) => {
                    self.log_port.info(&format!(
                        "Created upload instructions: {}",
                        path.display()
                    ));
                    instructions_path = Some(path);
                }
                Ok(None) => {}
                Err(e) => self.log_port.warn(&e.to_string()),
            }
        }

        self.log_port.info(&format!(
            "Downloaded {}/{} clips to {}",
            downloaded,
            total,
            absolute_path(&request.output_dir).display()
        ));

        Ok(RunSummary {
            status: RunStatus::Completed,
            found: total,
            downloaded,
            failed: total - downloaded,
            output_dir: request.output_dir.clone(),
            results,
            instructions_path,
        })
    }
}
