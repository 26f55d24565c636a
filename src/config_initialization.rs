//! Configuration initialization and hierarchy management

use std::path::Path;

use tracing::{debug, info};

use crate::adapters::{AppConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::domain::model::TimeWindow;
use crate::error::ClipKitResult;

/// Resolve settings following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> ClipKitResult<AppConfig> {
    resolve_configuration(cli, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration_hierarchy`] with an explicit
/// environment lookup
pub fn resolve_configuration<F>(cli: &Cli, env: F) -> ClipKitResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = load_config_file(cli.settings.as_deref())?;

    let env_overrides = TomlConfigAdapter::apply_env_with(&mut config, env)?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    let cli_overrides = apply_cli_overrides(&mut config, cli);
    if cli_overrides > 0 {
        debug!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config.validate()?;
    Ok(config)
}

/// Explicit file must exist; otherwise the first existing candidate, or defaults
fn load_config_file(explicit: Option<&Path>) -> ClipKitResult<AppConfig> {
    if let Some(path) = explicit {
        return TomlConfigAdapter::load(path);
    }
    for path in TomlConfigAdapter::candidate_paths() {
        if path.is_file() {
            return TomlConfigAdapter::load(&path);
        }
    }
    debug!("No settings file found, using defaults");
    Ok(AppConfig::default())
}

fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut overrides = 0;

    if let Some(path) = &cli.ffmpeg {
        config.ffmpeg_path = Some(path.clone());
        overrides += 1;
    }
    if let Some(path) = &cli.ytdlp {
        config.ytdlp_path = Some(path.clone());
        overrides += 1;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
        overrides += 1;
    }

    if let Commands::Download(args) = &cli.command {
        if let Some(window) = &args.window {
            config.window = window.clone();
            overrides += 1;
        }
        if let Some(hours) = args.hours {
            config.window = TimeWindow::from_hours(hours).as_str().to_string();
            overrides += 1;
        }
        if let Some(limit) = args.limit {
            config.limit = limit;
            overrides += 1;
        }
        if let Some(min_views) = args.min_views {
            config.min_views = min_views;
            overrides += 1;
        }
        if let Some(dir) = &args.output_dir {
            config.output_dir = dir.clone();
            overrides += 1;
        }
        if let Some(format) = &args.format {
            config.format = format.clone();
            overrides += 1;
        }
        if args.metadata {
            config.metadata = true;
            overrides += 1;
        }
        if args.no_instructions {
            config.instructions = false;
            overrides += 1;
        }
    }

    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = dir.path().join("clipkit.toml");
        std::fs::write(&settings, "[clipkit]\nlimit = 3\nmin_views = 10\nformat = \"mov\"\n").unwrap();

        let cli = Cli::parse_from([
            "clipkit",
            "--settings",
            settings.to_str().unwrap(),
            "download",
            "foo",
            "--limit",
            "8",
        ]);
        let config = resolve_configuration(&cli, |key| {
            (key == "CLIPKIT_MIN_VIEWS" || key == "CLIPKIT_LIMIT").then(|| "50".to_string())
        })
        .unwrap();

        assert_eq!(config.limit, 8);
        assert_eq!(config.min_views, 50);
        assert_eq!(config.format, "mov");
    }

    #[test]
    fn hours_map_to_window() {
        let cli = Cli::parse_from(["clipkit", "download", "foo", "--hours", "100"]);
        let config = resolve_configuration(&cli, no_env).unwrap();
        assert_eq!(config.window, "7d");
    }

    #[test]
    fn download_flags_toggle_outputs() {
        let cli = Cli::parse_from([
            "clipkit",
            "--ffmpeg",
            "/opt/ffmpeg",
            "download",
            "foo",
            "--metadata",
            "--no-instructions",
            "--output-dir",
            "clips",
        ]);
        let config = resolve_configuration(&cli, no_env).unwrap();
        assert!(config.metadata);
        assert!(!config.instructions);
        assert_eq!(config.output_dir, PathBuf::from("clips"));
        assert_eq!(config.ffmpeg_path, Some(PathBuf::from("/opt/ffmpeg")));
    }

    #[test]
    fn invalid_window_is_rejected() {
        let cli = Cli::parse_from(["clipkit", "download", "foo", "--window", "1y"]);
        assert!(resolve_configuration(&cli, no_env).is_err());
    }

    #[test]
    fn missing_explicit_settings_file_is_an_error() {
        let cli = Cli::parse_from(["clipkit", "--settings", "/nonexistent/clipkit.toml", "check"]);
        assert!(resolve_configuration(&cli, no_env).is_err());
    }
}
