// TOML config adapter - Configuration file, environment overrides, validation

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::model::{OutputFormat, TimeWindow};
use crate::error::{ClipKitError, ClipKitResult};

/// Resolved application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Explicit downloader binary
    pub ytdlp_path: Option<PathBuf>,
    /// Explicit transcoder binary; also handed to the downloader
    pub ffmpeg_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub format: String,
    pub limit: u32,
    pub min_views: u64,
    pub window: String,
    pub metadata: bool,
    pub instructions: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            ffmpeg_path: None,
            output_dir: PathBuf::from("downloads"),
            format: "mp4".to_string(),
            limit: 5,
            min_views: 0,
            window: "24h".to_string(),
            metadata: false,
            instructions: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Check values that are free-form strings in the file
    pub fn validate(&self) -> ClipKitResult<()> {
        OutputFormat::parse(&self.format).map_err(|e| ClipKitError::ConfigError {
            message: e.to_string(),
        })?;
        TimeWindow::parse(&self.window).map_err(|e| ClipKitError::ConfigError {
            message: e.to_string(),
        })?;
        if self.limit == 0 {
            return Err(ClipKitError::ConfigError {
                message: "limit must be at least 1".to_string(),
            });
        }
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ClipKitError::ConfigError {
                message: format!(
                    "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                    other
                ),
            }),
        }
    }
}

/// On-disk layout: everything lives under a `[clipkit]` table
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    clipkit: AppConfig,
}

/// Environment variables and the setting each one overrides
pub const ENV_OVERRIDES: [(&str, &str); 8] = [
    ("CLIPKIT_YTDLP_PATH", "ytdlp_path"),
    ("CLIPKIT_FFMPEG_PATH", "ffmpeg_path"),
    ("CLIPKIT_OUTPUT_DIR", "output_dir"),
    ("CLIPKIT_FORMAT", "format"),
    ("CLIPKIT_LIMIT", "limit"),
    ("CLIPKIT_MIN_VIEWS", "min_views"),
    ("CLIPKIT_WINDOW", "window"),
    ("CLIPKIT_LOG_LEVEL", "log_level"),
];

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a config document
    pub fn parse(content: &str) -> ClipKitResult<AppConfig> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.clipkit)
    }

    /// Load a config file
    pub fn load(path: &Path) -> ClipKitResult<AppConfig> {
        if !path.exists() {
            return Err(ClipKitError::ConfigError {
                message: format!("Config file does not exist: {}", path.display()),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Per-user config location
    pub fn default_config_path() -> PathBuf {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("clipkit").join("config.toml");
        }
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("clipkit").join("config.toml");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("clipkit")
                .join("config.toml");
        }
        PathBuf::from("clipkit.toml")
    }

    /// Files searched when no explicit config is given, in order
    pub fn candidate_paths() -> Vec<PathBuf> {
        vec![PathBuf::from("clipkit.toml"), Self::default_config_path()]
    }

    /// Apply `CLIPKIT_*` overrides using `lookup` to read variables.
    ///
    /// Returns how many overrides were applied.
    pub fn apply_env_with<F>(config: &mut AppConfig, lookup: F) -> ClipKitResult<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;
        for (var, key) in ENV_OVERRIDES {
            let Some(value) = lookup(var) else {
                continue;
            };
            debug!("Environment override: {} = {}", var, value);
            match key {
                "ytdlp_path" => config.ytdlp_path = Some(PathBuf::from(value)),
                "ffmpeg_path" => config.ffmpeg_path = Some(PathBuf::from(value)),
                "output_dir" => config.output_dir = PathBuf::from(value),
                "format" => config.format = value,
                "limit" => config.limit = parse_number(var, &value)?,
                "min_views" => config.min_views = parse_number(var, &value)?,
                "window" => config.window = value,
                "log_level" => config.log_level = value,
                _ => continue,
            }
            applied += 1;
        }
        Ok(applied)
    }
}

fn parse_number<T: std::str::FromStr>(var: &str, value: &str) -> ClipKitResult<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ClipKitError::ConfigError {
        message: format!("Invalid value for {}: {}", var, e),
    })
}
