//! Command implementations

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::exec_ytdlp::YTDLP_BINARY;
use crate::adapters::{AppConfig, DependencyReport, ToolInfo, ToolLocator, TracingLogAdapter};
use crate::app::{AppContainer, DefaultAppContainer, PipelineWorker};
use crate::cli::args::{BatchArgs, DownloadArgs, ProcessArgs};
use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::engine::{BatchConfig, BatchRunner};
use crate::error::ClipKitError;
use crate::ports::{LogPort, ProgressPort};
use crate::utils::path::absolute_path;
use crate::utils::Utils;

/// Prints one line per clip as the harvest advances
struct ConsoleProgress;

impl ProgressPort for ConsoleProgress {
    fn clip_started(&self, index: usize, total: usize) {
        println!("[{}/{}] downloading...", index, total);
    }
}

fn log_port() -> Arc<dyn LogPort> {
    Arc::new(TracingLogAdapter::new())
}

fn locator(config: &AppConfig) -> ToolLocator {
    ToolLocator::new()
        .with_ytdlp(config.ytdlp_path.clone())
        .with_ffmpeg(config.ffmpeg_path.clone())
}

/// Container for the processing commands; ffmpeg is mandatory there
async fn processing_container(config: &AppConfig) -> Result<DefaultAppContainer> {
    let ffmpeg: ToolInfo = locator(config).locate_ffmpeg().await.ok_or_else(|| {
        ClipKitError::DependencyMissing {
            name: "ffmpeg (install it from https://ffmpeg.org/download.html)".to_string(),
        }
    })?;
    info!("Using {} ({})", ffmpeg.path.display(), ffmpeg.version);

    let ytdlp = config
        .ytdlp_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(YTDLP_BINARY));
    Ok(DefaultAppContainer::new(ytdlp, ffmpeg.path, log_port()))
}

/// Execute the download command
pub async fn download(args: DownloadArgs, config: &AppConfig) -> Result<()> {
    let report = locator(config).discover().await;
    let ytdlp = report.ytdlp.clone().ok_or_else(|| ClipKitError::DependencyMissing {
        name: "yt-dlp (install it with: pip install yt-dlp)".to_string(),
    })?;
    let ffmpeg = report.ffmpeg.clone().ok_or_else(|| ClipKitError::DependencyMissing {
        name: "ffmpeg (install it from https://ffmpeg.org/download.html)".to_string(),
    })?;
    info!("Using {} ({})", ytdlp.path.display(), ytdlp.version);
    info!("Using {} ({})", ffmpeg.path.display(), ffmpeg.version);

    let request = HarvestRequest {
        channel: args.streamer.clone(),
        window: TimeWindow::parse(&config.window)?,
        limit: config.limit,
        min_views: config.min_views,
        output_dir: config.output_dir.clone(),
        format: OutputFormat::parse(&config.format)?,
        emit_metadata: config.metadata,
        emit_instructions: config.instructions,
        ffmpeg_location: report.ffmpeg_location(),
    };

    let container = DefaultAppContainer::new(ytdlp.path, ffmpeg.path, log_port());

    let worker = PipelineWorker::spawn(container.harvest_interactor(), Arc::new(ConsoleProgress));
    let outcome = worker.run(request).await;
    worker.shutdown().await;
    let summary = outcome.context("Harvest failed")?;

    print_summary(&summary);
    match summary.status {
        RunStatus::ListingFailed(detail) => {
            Err(DomainError::ListingFailed(detail)).context("Could not list clips")
        }
        _ => Ok(()),
    }
}

fn print_summary(summary: &RunSummary) {
    match &summary.status {
        RunStatus::NothingFound => {
            println!("No clips found matching the criteria.");
            return;
        }
        RunStatus::ListingFailed(_) => return,
        RunStatus::Completed => {}
    }

    for result in &summary.results {
        let clip = &result.clip;
        let marker = if result.is_success() { "ok  " } else { "FAIL" };
        let size = result
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| Utils::format_file_size(m.len()))
            .unwrap_or_default();
        println!(
            "{} {:>10} views  {}  {}  {}",
            marker,
            Utils::format_views(clip.view_count),
            Utils::format_duration(clip.duration),
            clip.title,
            size
        );
    }

    println!(
        "\nDownloaded {}/{} clips to {}",
        summary.downloaded,
        summary.found,
        absolute_path(&summary.output_dir).display()
    );
    if let Some(path) = &summary.instructions_path {
        println!("Upload instructions: {}", path.display());
    }
}

/// Execute the process command
pub async fn process(args: ProcessArgs, config: &AppConfig) -> Result<()> {
    let target = args.operation.target().clone();
    let operation = args.operation.spec();

    if !target.input.exists() {
        return Err(ClipKitError::InputNotFound {
            path: target.input.display().to_string(),
        }
        .into());
    }

    let container = processing_container(config).await?;

    if target.batch {
        let processed = container
            .batch_runner()
            .run(&target.input, &[operation], target.output.as_deref())
            .await
            .context("Batch processing failed")?;
        println!("Processed {} files", processed.len());
        return Ok(());
    }

    let output = container
        .media_processor()
        .apply(&operation, &target.input, target.output.as_deref())
        .await
        .with_context(|| format!("{} failed", operation.name()))?;
    println!("{}", output.display());
    Ok(())
}

/// Execute the batch command
pub async fn batch(args: BatchArgs, config: &AppConfig) -> Result<()> {
    if !args.config.is_file() {
        return Err(ClipKitError::InputNotFound {
            path: args.config.display().to_string(),
        }
        .into());
    }
    let batch = BatchConfig::load(&args.config)?;
    let input_dir = batch.input_dir.clone().ok_or_else(|| ClipKitError::BatchConfigError {
        path: args.config.display().to_string(),
        message: "missing input_dir".to_string(),
    })?;

    let container = processing_container(config).await?;

    let output_dir = batch
        .output_dir
        .clone()
        .unwrap_or_else(|| BatchRunner::default_output_dir(&input_dir));
    let processed = container
        .batch_runner()
        .run(&input_dir, &batch.operations, Some(&output_dir))
        .await
        .context("Batch processing failed")?;

    println!("Processed {} files", processed.len());
    Ok(())
}

/// Execute the check command
pub async fn check(config: &AppConfig) -> Result<()> {
    let report = locator(config).discover().await;
    print_report(&report);
    if report.is_complete() {
        Ok(())
    } else {
        Err(ClipKitError::DependencyMissing {
            name: report.missing().join(", "),
        }
        .into())
    }
}

fn print_report(report: &DependencyReport) {
    for (name, info) in [("yt-dlp", &report.ytdlp), ("ffmpeg", &report.ffmpeg)] {
        match info {
            Some(info) => println!("{:<7} {}  ({})", name, info.path.display(), info.version),
            None => println!("{:<7} not found", name),
        }
    }
}
