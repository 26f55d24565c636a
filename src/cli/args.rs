//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::domain::model::OperationSpec;

/// Arguments for the download command
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Twitch channel name
    pub streamer: String,

    /// How far back to look: 24h, 7d, 30d or all
    #[arg(short, long)]
    pub window: Option<String>,

    /// Look-back in hours, mapped onto the closest window
    #[arg(long, conflicts_with = "window")]
    pub hours: Option<u32>,

    /// Maximum number of clips to fetch
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Minimum view count
    #[arg(long)]
    pub min_views: Option<u64>,

    /// Directory the clips are saved to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Container for downloaded clips (mp4 or mov)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write a JSON metadata file next to each clip
    #[arg(long)]
    pub metadata: bool,

    /// Skip the upload instructions file
    #[arg(long)]
    pub no_instructions: bool,
}

/// Input and output shared by every processing operation
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Input video file, or directory with --batch
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file, or directory with --batch
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Process every video in the input directory
    #[arg(short, long)]
    pub batch: bool,
}

/// Arguments for the process command
#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    #[command(subcommand)]
    pub operation: ProcessOperation,
}

/// Processing operations
#[derive(Subcommand, Debug, Clone)]
pub enum ProcessOperation {
    /// Cut a section without re-encoding
    Trim {
        #[command(flatten)]
        target: TargetArgs,

        /// Start time in seconds
        #[arg(long, default_value_t = 0.0)]
        start: f64,

        /// Duration in seconds (default: to the end)
        #[arg(long)]
        duration: Option<f64>,
    },
    /// Burn a text watermark into the video
    Watermark {
        #[command(flatten)]
        target: TargetArgs,

        /// Watermark text
        #[arg(long)]
        text: String,

        /// Anchor for the text
        #[arg(long, default_value = "bottomright",
              value_parser = ["topleft", "topright", "bottomleft", "bottomright", "center"])]
        position: String,

        /// Font size
        #[arg(long, default_value_t = 24)]
        fontsize: u32,
    },
    /// Prepend an intro video
    Intro {
        #[command(flatten)]
        target: TargetArgs,

        /// Path to the intro video
        #[arg(long)]
        intro_file: PathBuf,
    },
    /// Re-encode into another container
    Convert {
        #[command(flatten)]
        target: TargetArgs,

        /// Target container extension (mp4, mov, ...)
        #[arg(long)]
        format: String,
    },
    /// Scale and pad to a platform's frame size
    Resize {
        #[command(flatten)]
        target: TargetArgs,

        /// Target platform
        #[arg(long, value_parser = ["tiktok", "instagram", "instagram_story", "youtube"])]
        platform: String,
    },
}

impl ProcessOperation {
    pub fn target(&self) -> &TargetArgs {
        match self {
            ProcessOperation::Trim { target, .. }
            | ProcessOperation::Watermark { target, .. }
            | ProcessOperation::Intro { target, .. }
            | ProcessOperation::Convert { target, .. }
            | ProcessOperation::Resize { target, .. } => target,
        }
    }

    /// The operation as it would appear in a batch file
    pub fn spec(&self) -> OperationSpec {
        match self {
            ProcessOperation::Trim {
                start, duration, ..
            } => OperationSpec::Trim {
                start_time: *start,
                duration: *duration,
            },
            ProcessOperation::Watermark {
                text,
                position,
                fontsize,
                ..
            } => OperationSpec::Watermark {
                text: text.clone(),
                position: position.clone(),
                fontsize: *fontsize,
            },
            ProcessOperation::Intro { intro_file, .. } => OperationSpec::Intro {
                intro_path: intro_file.clone(),
            },
            ProcessOperation::Convert { format, .. } => OperationSpec::Convert {
                format: format.clone(),
            },
            ProcessOperation::Resize { platform, .. } => OperationSpec::Resize {
                platform: platform.clone(),
            },
        }
    }
}

/// Arguments for the batch command
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Batch description (JSON, or YAML by extension)
    #[arg(short, long)]
    pub config: PathBuf,
}
