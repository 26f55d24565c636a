//! Command-line surface tests for paths that fail before any external tool runs

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ENV_KEYS: [&str; 8] = [
    "CLIPKIT_YTDLP_PATH",
    "CLIPKIT_FFMPEG_PATH",
    "CLIPKIT_OUTPUT_DIR",
    "CLIPKIT_FORMAT",
    "CLIPKIT_LIMIT",
    "CLIPKIT_MIN_VIEWS",
    "CLIPKIT_WINDOW",
    "CLIPKIT_LOG_LEVEL",
];

/// Binary with an empty settings file and no `CLIPKIT_*` overrides
fn clipkit(dir: &Path) -> Command {
    let settings = dir.join("settings.toml");
    std::fs::write(&settings, "").unwrap();

    let mut cmd = Command::cargo_bin("clipkit").unwrap();
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd.env_remove("RUST_LOG");
    cmd.arg("--settings").arg(settings);
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    clipkit(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("download")
                .and(predicate::str::contains("process"))
                .and(predicate::str::contains("batch"))
                .and(predicate::str::contains("check")),
        );
}

#[test]
fn process_lists_operations() {
    let dir = TempDir::new().unwrap();
    clipkit(dir.path())
        .args(["process", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("trim")
                .and(predicate::str::contains("watermark"))
                .and(predicate::str::contains("intro"))
                .and(predicate::str::contains("convert"))
                .and(predicate::str::contains("resize")),
        );
}

#[test]
fn process_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.mp4");
    clipkit(dir.path())
        .args(["process", "trim", "--duration", "5", "-i"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input not found"));
}

#[test]
fn resize_rejects_unknown_platform_at_parse_time() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "clip.mp4", "video");
    clipkit(dir.path())
        .args(["process", "resize", "--platform", "myspace", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("myspace"));
}

#[test]
fn batch_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    clipkit(dir.path())
        .args(["batch", "--config"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input not found"));
}

#[test]
fn batch_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "batch.json", "{not json");
    clipkit(dir.path())
        .args(["batch", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid batch config"));
}

#[test]
fn batch_without_input_dir_fails() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "batch.yaml",
        "operations:\n  - type: convert\n    format: mp4\n",
    );
    clipkit(dir.path())
        .args(["batch", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing input_dir"));
}

#[test]
fn download_rejects_unknown_window() {
    let dir = TempDir::new().unwrap();
    clipkit(dir.path())
        .args(["download", "somestreamer", "--window", "1y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn download_window_and_hours_conflict() {
    let dir = TempDir::new().unwrap();
    clipkit(dir.path())
        .args(["download", "somestreamer", "--window", "7d", "--hours", "12"])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn download_requires_ffmpeg() {
    // `true` answers any version flag, which is all discovery asks of yt-dlp
    let downloader = Path::new("/bin/true");
    let system_ffmpeg = ["/usr/bin/ffmpeg", "/usr/local/bin/ffmpeg", "/opt/homebrew/bin/ffmpeg"];
    if !downloader.is_file() || system_ffmpeg.iter().any(|p| Path::new(p).exists()) {
        return;
    }

    let dir = TempDir::new().unwrap();
    let empty_path = TempDir::new().unwrap();
    clipkit(dir.path())
        .env("CLIPKIT_YTDLP_PATH", downloader)
        .env("CLIPKIT_FFMPEG_PATH", "/nonexistent/ffmpeg")
        .env("CLIPKIT_OUTPUT_DIR", dir.path().join("clips"))
        .env("PATH", empty_path.path())
        .env("HOME", dir.path())
        .args(["download", "somestreamer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing dependency: ffmpeg"));
    assert!(!dir.path().join("clips").exists());
}

#[test]
fn missing_settings_file_is_reported() {
    let mut cmd = Command::cargo_bin("clipkit").unwrap();
    cmd.args(["--settings", "/nonexistent/clipkit.toml", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file does not exist"));
}

#[test]
fn bad_settings_value_is_reported() {
    let dir = TempDir::new().unwrap();
    let settings = write(dir.path(), "bad.toml", "[clipkit]\nformat = \"avi\"\n");
    let mut cmd = Command::cargo_bin("clipkit").unwrap();
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd.arg("--settings")
        .arg(settings)
        .args(["download", "somestreamer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid output format: avi"));
}
