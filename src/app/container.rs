use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, YtDlpAdapter};
use crate::app::{
    download_interactor::DownloadInteractor, harvest_interactor::HarvestInteractor,
    listing_interactor::ListingInteractor,
};
use crate::engine::{BatchRunner, MediaProcessor};
use crate::ports::{ClipSourcePort, FetchPort, LogPort, TranscodePort};

pub trait AppContainer: Send + Sync {
    fn download_interactor(&self) -> Arc<DownloadInteractor>;
    fn harvest_interactor(&self) -> Arc<HarvestInteractor>;
    fn media_processor(&self) -> Arc<MediaProcessor>;
    fn batch_runner(&self) -> Arc<BatchRunner>;
}

pub struct DefaultAppContainer {
    download_interactor: Arc<DownloadInteractor>,
    harvest_interactor: Arc<HarvestInteractor>,
    media_processor: Arc<MediaProcessor>,
    batch_runner: Arc<BatchRunner>,
}

impl DefaultAppContainer {
    /// Wire the process adapters for the given binaries
    pub fn new(ytdlp: PathBuf, ffmpeg: PathBuf, log_port: Arc<dyn LogPort>) -> Self {
        let ytdlp_port = Arc::new(YtDlpAdapter::with_binary(ytdlp));
        let ffmpeg_port = Arc::new(FFmpegAdapter::with_binary(ffmpeg));

        Self::with_ports(
            Arc::clone(&ytdlp_port) as Arc<dyn ClipSourcePort>,
            Arc::clone(&ytdlp_port) as Arc<dyn FetchPort>,
            ffmpeg_port as Arc<dyn TranscodePort>,
            log_port,
        )
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        source_port: Arc<dyn ClipSourcePort>,
        fetch_port: Arc<dyn FetchPort>,
        transcode_port: Arc<dyn TranscodePort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        let listing_interactor = Arc::new(ListingInteractor::new(
            source_port,
            Arc::clone(&log_port),
        ));

        let download_interactor = Arc::new(DownloadInteractor::new(
            fetch_port,
            Arc::clone(&log_port),
        ));

        let harvest_interactor = Arc::new(HarvestInteractor::new(
            listing_interactor,
            Arc::clone(&download_interactor),
            Arc::clone(&log_port),
        ));

        let media_processor = Arc::new(MediaProcessor::new(
            transcode_port,
            Arc::clone(&log_port),
        ));

        let batch_runner = Arc::new(BatchRunner::new(
            Arc::clone(&media_processor),
            Arc::clone(&log_port),
        ));

        Self {
            download_interactor,
            harvest_interactor,
            media_processor,
            batch_runner,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn download_interactor(&self) -> Arc<DownloadInteractor> {
        Arc::clone(&self.download_interactor)
    }

    fn harvest_interactor(&self) -> Arc<HarvestInteractor> {
        Arc::clone(&self.harvest_interactor)
    }

    fn media_processor(&self) -> Arc<MediaProcessor> {
        Arc::clone(&self.media_processor)
    }

    fn batch_runner(&self) -> Arc<BatchRunner> {
        Arc::clone(&self.batch_runner)
    }
}
