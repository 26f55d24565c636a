// Adapters - External system implementations

use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::ToolOutput;

pub mod env_tools;
pub mod exec_ffmpeg;
pub mod exec_ytdlp;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use env_tools::{DependencyReport, ToolInfo, ToolLocator};
pub use exec_ffmpeg::FFmpegAdapter;
pub use exec_ytdlp::YtDlpAdapter;
pub use toml_config::{AppConfig, TomlConfigAdapter};
pub use tracing_log::{FanoutLogAdapter, MemoryLogAdapter, TracingLogAdapter};

/// Run an external program to completion and capture both output streams.
///
/// Only a failure to start the program is an error; exit status is left to
/// the caller.
pub(crate) async fn run_captured<I, S>(program: &Path, args: I) -> Result<ToolOutput, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("Running {:?}", command.as_std());

    let output = command.output().await.map_err(|e| {
        DomainError::DependencyMissing(format!("failed to run {}: {}", program.display(), e))
    })?;

    Ok(ToolOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
