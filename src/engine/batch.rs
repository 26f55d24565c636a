//! Batch runner: one operation chain over every video in a directory

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::domain::model::OperationSpec;
use crate::domain::rules::operation_output;
use crate::engine::processor::MediaProcessor;
use crate::error::{ClipKitError, ClipKitResult};
use crate::ports::LogPort;
use crate::utils::path::list_video_files;

/// Batch description read from a JSON or YAML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub operations: Vec<OperationSpec>,
}

impl BatchConfig {
    /// Load a batch file; `.yaml`/`.yml` are read as YAML, anything else as JSON
    pub fn load(path: &Path) -> ClipKitResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ClipKitError::BatchConfigError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let is_yaml = path
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                ext == "yaml" || ext == "yml"
            })
            .unwrap_or(false);

        let config = if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        };
        config.map_err(|e| ClipKitError::BatchConfigError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_json(content: &str) -> ClipKitResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> ClipKitResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Threads each video in a directory through an operation list
pub struct BatchRunner {
    processor: Arc<MediaProcessor>,
    log_port: Arc<dyn LogPort>,
}

impl BatchRunner {
    pub fn new(processor: Arc<MediaProcessor>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            processor,
            log_port,
        }
    }

    /// `<input_dir>/processed`
    pub fn default_output_dir(input_dir: &Path) -> PathBuf {
        input_dir.join("processed")
    }

    /// Process every video in `input_dir`, returning the final output of each
    /// file whose whole chain succeeded.
    ///
    /// A failing step drops that file and moves on; only a missing
    /// transcoder stops the batch.
    pub async fn run(
        &self,
        input_dir: &Path,
        operations: &[OperationSpec],
        output_dir: Option<&Path>,
    ) -> Result<Vec<PathBuf>, DomainError> {
        if !input_dir.is_dir() {
            return Err(DomainError::FileNotFound(format!(
                "Input directory not found: {}",
                input_dir.display()
            )));
        }
        if operations.is_empty() {
            self.log_port.warn("No operations given; nothing to do");
            return Ok(Vec::new());
        }

        let output_dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| Self::default_output_dir(input_dir));
        std::fs::create_dir_all(&output_dir)?;

        let files = list_video_files(input_dir);
        info!("Batch: {} video file(s) in {}", files.len(), input_dir.display());

        let mut processed = Vec::new();
        'files: for file in &files {
            let mut current = file.clone();
            for operation in operations {
                let target = operation_output(operation, file, &output_dir);
                match self.processor.apply(operation, &current, Some(&target)).await {
                    Ok(path) => current = path,
                    Err(e @ DomainError::DependencyMissing(_)) => return Err(e),
                    Err(e) => {
                        debug!(
                            "Dropping {} after failed {}: {}",
                            file.display(),
                            operation.name(),
                            e
                        );
                        continue 'files;
                    }
                }
            }
            processed.push(current);
        }

        self.log_port
            .info(&format!("Processed {} files", processed.len()));
        Ok(processed)
    }
}
