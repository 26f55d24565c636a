//! Post-processing operations
//!
//! Every operation is a single transcoder run. Failures are logged here and
//! returned to the caller, never panicked on.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::{LogPort, TranscodePort};
use crate::utils::path::absolute_path;

/// Runs trim / watermark / intro / convert / resize through the transcoder
pub struct MediaProcessor {
    transcoder: Arc<dyn TranscodePort>,
    log_port: Arc<dyn LogPort>,
}

impl MediaProcessor {
    pub fn new(transcoder: Arc<dyn TranscodePort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            transcoder,
            log_port,
        }
    }

    /// Apply one operation; without `output` the result lands next to `input`
    pub async fn apply(
        &self,
        operation: &OperationSpec,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf, DomainError> {
        match operation {
            OperationSpec::Trim {
                start_time,
                duration,
            } => self.trim(input, *start_time, *duration, output).await,
            OperationSpec::Watermark {
                text,
                position,
                fontsize,
            } => self.watermark(input, text, position, *fontsize, output).await,
            OperationSpec::Intro { intro_path } => self.add_intro(input, intro_path, output).await,
            OperationSpec::Convert { format } => self.convert(input, format, output).await,
            OperationSpec::Resize { platform } => self.resize(input, platform, output).await,
        }
    }

    /// Cut from `start_time`, for `duration` seconds or to the end, without re-encoding
    pub async fn trim(
        &self,
        input: &Path,
        start_time: f64,
        duration: Option<f64>,
        output: Option<&Path>,
    ) -> Result<PathBuf, DomainError> {
        self.require_input(input)?;
        if start_time < 0.0 || duration.map_or(false, |d| d <= 0.0) {
            return Err(self.reject(DomainError::BadArgs(
                "trim needs a non-negative start and a positive duration".to_string(),
            )));
        }
        let operation = OperationSpec::Trim {
            start_time,
            duration,
        };
        let output = resolve_output(&operation, input, output);
        self.require_distinct(input, &output)?;

        let mut args = vec!["-ss".to_string(), start_time.to_string()];
        if let Some(duration) = duration {
            args.push("-t".to_string());
            args.push(duration.to_string());
        }
        args.extend(["-c".to_string(), "copy".to_string()]);

        let job = TranscodeJob::new(input, &output).output_args(args);
        self.run("trimming video", "Trimmed video", job).await
    }

    /// Burn a boxed text label into the video
    pub async fn watermark(
        &self,
        input: &Path,
        text: &str,
        position: &str,
        fontsize: u32,
        output: Option<&Path>,
    ) -> Result<PathBuf, DomainError> {
        self.require_input(input)?;
        let anchor = WatermarkPosition::parse(position).unwrap_or_else(|| {
            self.log_port.warn(&format!(
                "Unknown watermark position '{}', using bottomright",
                position
            ));
            WatermarkPosition::default()
        });
        let output = resolve_output(
            &OperationSpec::Watermark {
                text: text.to_string(),
                position: position.to_string(),
                fontsize,
            },
            input,
            output,
        );
        self.require_distinct(input, &output)?;

        let job = TranscodeJob::new(input, &output)
            .video_filter(watermark_filter(text, anchor, fontsize))
            .output_args(["-codec:a", "copy"]);
        self.run("adding watermark", "Watermarked video", job).await
    }

    /// Prepend `intro` using the concat demuxer.
    ///
    /// The list file is a temporary that is removed when this call returns,
    /// whatever the transcoder did.
    pub async fn add_intro(
        &self,
        input: &Path,
        intro: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf, DomainError> {
        self.require_input(input)?;
        if !intro.is_file() {
            return Err(self.reject(DomainError::FileNotFound(format!(
                "Intro file not found: {}",
                intro.display()
            ))));
        }
        let output = resolve_output(
            &OperationSpec::Intro {
                intro_path: intro.to_path_buf(),
            },
            input,
            output,
        );
        self.require_distinct(input, &output)?;

        let intro_abs = absolute_path(intro);
        let input_abs = absolute_path(input);
        let list = write_concat_list(&[&intro_abs, &input_abs]).map_err(|e| {
            self.reject(DomainError::FsFail(format!("concat list: {}", e)))
        })?;
        debug!("Concat list at {}", list.path().display());

        let job = TranscodeJob::new(list.path(), &output)
            .input_args(["-f", "concat", "-safe", "0"])
            .output_args(["-c", "copy"]);
        let result = self.run("adding intro", "Video with intro", job).await;
        drop(list);
        result
    }

    /// Re-encode into another container with H.264 video and AAC audio
    pub async fn convert(
        &self,
        input: &Path,
        format: &str,
        output: Option<&Path>,
    ) -> Result<PathBuf, DomainError> {
        self.require_input(input)?;
        let format = format.trim().trim_start_matches('.').to_lowercase();
        if format.is_empty() || !format.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(self.reject(DomainError::BadArgs(format!(
                "Invalid target format: '{}'",
                format
            ))));
        }
        let output = resolve_output(&OperationSpec::Convert { format }, input, output);
        self.require_distinct(input, &output)?;

        let job = TranscodeJob::new(input, &output).output_args(["-c:v", "libx264", "-c:a", "aac"]);
        self.run("converting video", "Converted video", job).await
    }

    /// Scale and pad to a platform's frame size
    pub async fn resize(
        &self,
        input: &Path,
        platform: &str,
        output: Option<&Path>,
    ) -> Result<PathBuf, DomainError> {
        self.require_input(input)?;
        let target = Platform::parse(platform).map_err(|e| self.reject(e))?;
        let output = resolve_output(
            &OperationSpec::Resize {
                platform: target.as_str().to_string(),
            },
            input,
            output,
        );
        self.require_distinct(input, &output)?;

        let job = TranscodeJob::new(input, &output)
            .video_filter(scale_pad_filter(target))
            .output_args(["-c:a", "copy"]);
        let label = format!("Resized video for {}", target.description());
        self.run("resizing video", &label, job).await
    }

    fn require_input(&self, input: &Path) -> Result<(), DomainError> {
        if input.is_file() {
            Ok(())
        } else {
            Err(self.reject(DomainError::FileNotFound(input.display().to_string())))
        }
    }

    /// ffmpeg cannot read and overwrite the same file
    fn require_distinct(&self, input: &Path, output: &Path) -> Result<(), DomainError> {
        if output == input {
            return Err(self.reject(DomainError::BadArgs(format!(
                "Output would overwrite the input: {}",
                input.display()
            ))));
        }
        Ok(())
    }

    fn reject(&self, error: DomainError) -> DomainError {
        self.log_port.error(&error.to_string());
        error
    }

    async fn run(
        &self,
        action: &str,
        label: &str,
        job: TranscodeJob,
    ) -> Result<PathBuf, DomainError> {
        let output = match self.transcoder.transcode(&job).await {
            Ok(output) => output,
            Err(e) => return Err(self.reject(e)),
        };
        if !output.success() {
            let detail = output.failure_detail();
            self.log_port
                .error(&format!("Error {}: {}", action, detail));
            return Err(DomainError::OperationFailed(format!("{}: {}", action, detail)));
        }
        self.log_port
            .info(&format!("{} saved to: {}", label, job.output.display()));
        Ok(job.output)
    }
}

fn resolve_output(operation: &OperationSpec, input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => operation_output(operation, input, &sibling_dir(input)),
    }
}

fn write_concat_list(paths: &[&Path]) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("clipkit-concat-")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(concat_list(paths).as_bytes())?;
    file.flush()?;
    Ok(file)
}
