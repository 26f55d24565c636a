//! External tool discovery
//!
//! Finds the downloader and the transcoder, runs each once with its version
//! flag and keeps the first line of output as the reported version.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::adapters::exec_ffmpeg::FFMPEG_BINARY;
use crate::adapters::exec_ytdlp::YTDLP_BINARY;
use crate::adapters::run_captured;

/// A located, runnable tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInfo {
    pub path: PathBuf,
    pub version: String,
}

/// Outcome of probing both tools
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyReport {
    pub ytdlp: Option<ToolInfo>,
    pub ffmpeg: Option<ToolInfo>,
}

impl DependencyReport {
    /// Both tools were found and answered their version flag
    pub fn is_complete(&self) -> bool {
        self.ytdlp.is_some() && self.ffmpeg.is_some()
    }

    /// Names of the tools that could not be located
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.ytdlp.is_none() {
            missing.push(YTDLP_BINARY);
        }
        if self.ffmpeg.is_none() {
            missing.push(FFMPEG_BINARY);
        }
        missing
    }

    /// Transcoder path handed to the downloader as a location hint
    pub fn ffmpeg_location(&self) -> Option<PathBuf> {
        self.ffmpeg.as_ref().map(|info| info.path.clone())
    }
}

/// Locates external tools from explicit paths, `PATH` and well-known
/// install directories
#[derive(Debug, Clone)]
pub struct ToolLocator {
    ytdlp_path: Option<PathBuf>,
    ffmpeg_path: Option<PathBuf>,
    system_search: bool,
}

impl Default for ToolLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolLocator {
    pub fn new() -> Self {
        Self {
            ytdlp_path: None,
            ffmpeg_path: None,
            system_search: true,
        }
    }

    pub fn with_ytdlp(mut self, path: Option<PathBuf>) -> Self {
        self.ytdlp_path = path;
        self
    }

    pub fn with_ffmpeg(mut self, path: Option<PathBuf>) -> Self {
        self.ffmpeg_path = path;
        self
    }

    /// Only consider explicitly configured paths
    pub fn without_system_search(mut self) -> Self {
        self.system_search = false;
        self
    }

    /// Candidate transcoder paths, in probe order
    pub fn ffmpeg_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = &self.ffmpeg_path {
            candidates.push(path.clone());
        }
        if !self.system_search {
            return candidates;
        }
        if let Ok(path) = which::which(FFMPEG_BINARY) {
            candidates.push(path);
        }
        candidates.extend(common_ffmpeg_paths());
        unique_paths(candidates)
    }

    /// Candidate downloader paths, in probe order
    pub fn ytdlp_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = &self.ytdlp_path {
            candidates.push(path.clone());
        }
        if self.system_search {
            match which::which(YTDLP_BINARY) {
                Ok(path) => candidates.push(path),
                Err(_) => candidates.push(PathBuf::from(YTDLP_BINARY)),
            }
        }
        candidates
    }

    /// First transcoder candidate that answers `-version`
    pub async fn locate_ffmpeg(&self) -> Option<ToolInfo> {
        for candidate in self.ffmpeg_candidates() {
            if let Some(info) = probe(&candidate, "-version").await {
                return Some(info);
            }
        }
        warn!("FFmpeg not found; downloads fall back to the downloader's own lookup");
        None
    }

    /// First downloader candidate that answers `--version`
    pub async fn locate_ytdlp(&self) -> Option<ToolInfo> {
        for candidate in self.ytdlp_candidates() {
            if let Some(info) = probe(&candidate, "--version").await {
                return Some(info);
            }
        }
        warn!("yt-dlp not found");
        None
    }

    /// Probe both tools
    pub async fn discover(&self) -> DependencyReport {
        DependencyReport {
            ytdlp: self.locate_ytdlp().await,
            ffmpeg: self.locate_ffmpeg().await,
        }
    }
}

/// Run `path flag`; a zero exit yields the first line of stdout as the version
pub async fn probe(path: &Path, flag: &str) -> Option<ToolInfo> {
    let output = match run_captured(path, [flag]).await {
        Ok(output) => output,
        Err(e) => {
            debug!("Probe of {} failed: {}", path.display(), e);
            return None;
        }
    };
    if !output.success() {
        debug!(
            "Probe of {} exited unsuccessfully: {}",
            path.display(),
            output.failure_detail()
        );
        return None;
    }
    let version = output
        .stdout
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    debug!("Found {} ({})", path.display(), version);
    Some(ToolInfo {
        path: path.to_path_buf(),
        version,
    })
}

/// Drop repeated paths, keeping the first occurrence of each
fn unique_paths(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths.retain(|p| seen.insert(p.clone()));
    paths
}

fn common_ffmpeg_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(r"C:\ffmpeg\bin\ffmpeg.exe"),
        PathBuf::from(r"C:\Program Files\ffmpeg\bin\ffmpeg.exe"),
        PathBuf::from(r"C:\Program Files (x86)\ffmpeg\bin\ffmpeg.exe"),
    ];
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    if let Some(home) = home {
        let bin = PathBuf::from(home).join("ffmpeg").join("bin");
        paths.push(bin.join("ffmpeg.exe"));
        paths.push(bin.join("ffmpeg"));
    }
    paths.extend([
        PathBuf::from("/usr/bin/ffmpeg"),
        PathBuf::from("/usr/local/bin/ffmpeg"),
        PathBuf::from("/opt/homebrew/bin/ffmpeg"),
    ]);
    paths.retain(|p| p.exists());
    paths
}
