// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

#[cfg(test)]
mod tests;

/// A publicly visible clip as reported by the listing tool.
///
/// Produced once by the lister and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    pub view_count: u64,
    pub duration: f64,
    pub created_at: String,
    pub broadcaster_name: String,
}

impl ClipRecord {
    /// Title used when the listing entry carries none
    pub const UNTITLED: &'static str = "Untitled Clip";

    /// Build a record from one decoded listing entry, applying field defaults.
    ///
    /// Returns `None` when the entry is not a JSON object.
    pub fn from_listing_entry(entry: &serde_json::Value, broadcaster: &str) -> Option<Self> {
        let object = entry.as_object()?;
        let text = |key: &str| {
            object
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let view_count = match object.get("view_count") {
            Some(v) => v
                .as_u64()
                .or_else(|| v.as_f64().map(|f| f.max(0.0) as u64))
                .unwrap_or(0),
            None => 0,
        };

        Some(Self {
            id: match object.get("id") {
                Some(serde_json::Value::Number(n)) => n.to_string(),
                _ => text("id"),
            },
            title: object
                .get("title")
                .and_then(|v| v.as_str())
                .unwrap_or(Self::UNTITLED)
                .to_string(),
            url: text("webpage_url"),
            thumbnail_url: text("thumbnail"),
            view_count,
            duration: object.get("duration").and_then(|v| v.as_f64()).unwrap_or(0.0),
            created_at: text("upload_date"),
            broadcaster_name: broadcaster.to_string(),
        })
    }

    /// Whether the record can be handed to the downloader
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Result of one listing pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingOutcome {
    pub clips: Vec<ClipRecord>,
    /// Non-empty lines that could not be decoded
    pub skipped: usize,
}

/// A clip paired with where it landed on disk, if anywhere
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadResult {
    pub clip: ClipRecord,
    pub path: Option<PathBuf>,
}

impl DownloadResult {
    pub fn succeeded(clip: ClipRecord, path: PathBuf) -> Self {
        Self { clip, path: Some(path) }
    }

    pub fn failed(clip: ClipRecord) -> Self {
        Self { clip, path: None }
    }

    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }
}

/// What a successful download call did
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The download tool ran and the file now exists
    Downloaded(PathBuf),
    /// The destination already existed; the tool was not invoked
    AlreadyPresent(PathBuf),
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::Downloaded(path) | FetchOutcome::AlreadyPresent(path) => path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            FetchOutcome::Downloaded(path) | FetchOutcome::AlreadyPresent(path) => path,
        }
    }
}

/// How far back the listing looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "all")]
    AllTime,
}

impl TimeWindow {
    /// Parse a window token (24h, 7d, 30d, all)
    pub fn parse(token: &str) -> Result<Self, DomainError> {
        match token.trim().to_lowercase().as_str() {
            "24h" | "day" => Ok(TimeWindow::Last24Hours),
            "7d" | "week" => Ok(TimeWindow::Last7Days),
            "30d" | "month" => Ok(TimeWindow::Last30Days),
            "all" | "all-time" => Ok(TimeWindow::AllTime),
            other => Err(DomainError::BadArgs(format!(
                "Invalid time window: {}. Valid windows: 24h, 7d, 30d, all",
                other
            ))),
        }
    }

    /// Map a look-back in hours onto the closest window that covers it
    pub fn from_hours(hours: u32) -> Self {
        match hours {
            0..=24 => TimeWindow::Last24Hours,
            25..=168 => TimeWindow::Last7Days,
            169..=720 => TimeWindow::Last30Days,
            _ => TimeWindow::AllTime,
        }
    }

    /// Look-back span, or `None` for all-time
    pub fn span(&self) -> Option<Duration> {
        match self {
            TimeWindow::Last24Hours => Some(Duration::hours(24)),
            TimeWindow::Last7Days => Some(Duration::days(7)),
            TimeWindow::Last30Days => Some(Duration::days(30)),
            TimeWindow::AllTime => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Last24Hours => "24h",
            TimeWindow::Last7Days => "7d",
            TimeWindow::Last30Days => "30d",
            TimeWindow::AllTime => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container the downloaded clips are saved as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Mp4,
    Mov,
}

impl OutputFormat {
    pub fn parse(token: &str) -> Result<Self, DomainError> {
        match token.trim().to_lowercase().as_str() {
            "mp4" => Ok(OutputFormat::Mp4),
            "mov" => Ok(OutputFormat::Mov),
            other => Err(DomainError::BadArgs(format!(
                "Invalid output format: {}. Valid formats: mp4, mov",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Mov => "mov",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Request handed to the listing tool
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    /// Normalized (trimmed, lowercase) channel name
    pub channel: String,
    pub limit: u32,
    pub min_views: u64,
    /// Earliest creation date as `YYYYMMDD`, absent for all-time
    pub date_after: Option<String>,
}

/// Request handed to the download tool
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub url: String,
    pub output: PathBuf,
    /// Transcoder location hint for the download tool
    pub ffmpeg_location: Option<PathBuf>,
}

/// Captured result of an external tool invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Best short description of why the tool failed
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// One transcoder invocation: `[input_args] -i <input> [output_args] <output> -y`
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeJob {
    pub input_args: Vec<String>,
    pub input: PathBuf,
    pub output_args: Vec<String>,
    pub output: PathBuf,
}

impl TranscodeJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input_args: Vec::new(),
            input: input.into(),
            output_args: Vec::new(),
            output: output.into(),
        }
    }

    /// Add arguments placed before `-i`
    pub fn input_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add arguments placed after the input
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a video filter
    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_args(["-vf".to_string(), filter.into()])
    }

    /// Full argument vector, overwrite flag last
    pub fn to_args(&self) -> Vec<String> {
        let mut args = self.input_args.clone();
        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().into_owned());
        args.extend(self.output_args.iter().cloned());
        args.push(self.output.to_string_lossy().into_owned());
        args.push("-y".to_string());
        args
    }
}

/// Anchor for the watermark text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl WatermarkPosition {
    pub const NAMES: [&'static str; 5] = ["topleft", "topright", "bottomleft", "bottomright", "center"];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "topleft" => Some(WatermarkPosition::TopLeft),
            "topright" => Some(WatermarkPosition::TopRight),
            "bottomleft" => Some(WatermarkPosition::BottomLeft),
            "bottomright" => Some(WatermarkPosition::BottomRight),
            "center" => Some(WatermarkPosition::Center),
            _ => None,
        }
    }

    /// drawtext coordinates
    pub fn coordinates(&self) -> &'static str {
        match self {
            WatermarkPosition::TopLeft => "x=10:y=10",
            WatermarkPosition::TopRight => "x=w-tw-10:y=10",
            WatermarkPosition::BottomLeft => "x=10:y=h-th-10",
            WatermarkPosition::BottomRight => "x=w-tw-10:y=h-th-10",
            WatermarkPosition::Center => "x=(w-tw)/2:y=(h-th)/2",
        }
    }
}

impl Default for WatermarkPosition {
    fn default() -> Self {
        WatermarkPosition::BottomRight
    }
}

/// Re-upload target with a fixed frame size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    TikTok,
    Instagram,
    InstagramStory,
    YouTube,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::TikTok,
        Platform::Instagram,
        Platform::InstagramStory,
        Platform::YouTube,
    ];

    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let wanted = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownPlatform {
                requested: name.to_string(),
                valid: Self::ALL.iter().map(|p| p.as_str().to_string()).collect(),
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::InstagramStory => "instagram_story",
            Platform::YouTube => "youtube",
        }
    }

    /// Target frame size as (width, height)
    pub fn resolution(&self) -> (u32, u32) {
        match self {
            Platform::TikTok | Platform::InstagramStory => (1080, 1920),
            Platform::Instagram => (1080, 1080),
            Platform::YouTube => (1920, 1080),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Platform::TikTok => "TikTok (vertical 9:16)",
            Platform::Instagram => "Instagram (square 1:1)",
            Platform::InstagramStory => "Instagram Story (vertical 9:16)",
            Platform::YouTube => "YouTube (horizontal 16:9)",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_position() -> String {
    "bottomright".to_string()
}

fn default_fontsize() -> u32 {
    24
}

fn default_convert_format() -> String {
    "mp4".to_string()
}

fn default_platform() -> String {
    "youtube".to_string()
}

/// One step of a processing chain, as found in batch config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationSpec {
    Trim {
        #[serde(default)]
        start_time: f64,
        #[serde(default)]
        duration: Option<f64>,
    },
    Watermark {
        #[serde(default)]
        text: String,
        #[serde(default = "default_position")]
        position: String,
        #[serde(default = "default_fontsize")]
        fontsize: u32,
    },
    Intro {
        #[serde(default)]
        intro_path: PathBuf,
    },
    Convert {
        #[serde(default = "default_convert_format")]
        format: String,
    },
    Resize {
        #[serde(default = "default_platform")]
        platform: String,
    },
}

impl OperationSpec {
    pub fn name(&self) -> &'static str {
        match self {
            OperationSpec::Trim { .. } => "trim",
            OperationSpec::Watermark { .. } => "watermark",
            OperationSpec::Intro { .. } => "intro",
            OperationSpec::Convert { .. } => "convert",
            OperationSpec::Resize { .. } => "resize",
        }
    }
}

/// Inputs for one harvest run
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestRequest {
    pub channel: String,
    pub window: TimeWindow,
    pub limit: u32,
    pub min_views: u64,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub emit_metadata: bool,
    pub emit_instructions: bool,
    /// Located transcoder, passed through to the download tool
    pub ffmpeg_location: Option<PathBuf>,
}

/// How a harvest run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    /// Clips were listed and the download loop ran
    Completed,
    /// The listing succeeded but returned nothing
    NothingFound,
    /// The listing tool failed; carries its error text
    ListingFailed(String),
}

/// Final report of a harvest run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub status: RunStatus,
    pub found: usize,
    pub downloaded: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
    pub results: Vec<DownloadResult>,
    pub instructions_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn empty(status: RunStatus, output_dir: PathBuf) -> Self {
        Self {
            status,
            found: 0,
            downloaded: 0,
            failed: 0,
            output_dir,
            results: Vec::new(),
            instructions_path: None,
        }
    }
}
