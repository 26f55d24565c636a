//! Recording fakes for the external-tool ports

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use clipkit::domain::model::*;
use clipkit::ports::*;
use clipkit::DomainError;

pub fn ok(stdout: &str) -> ToolOutput {
    ToolOutput {
        exit_code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn failed(stderr: &str) -> ToolOutput {
    ToolOutput {
        exit_code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// Listing tool returning a canned output, optionally held until released
pub struct FakeSource {
    output: ToolOutput,
    gate: Option<Arc<Notify>>,
    pub calls: Mutex<Vec<ListingRequest>>,
}

impl FakeSource {
    pub fn new(output: ToolOutput) -> Self {
        Self {
            output,
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(output: ToolOutput, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(output)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ClipSourcePort for FakeSource {
    async fn list_clips(&self, request: &ListingRequest) -> Result<ToolOutput, DomainError> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.output.clone())
    }
}

/// Download tool that creates the requested file unless the URL is marked
/// as failing
pub struct FakeFetcher {
    failing_urls: HashSet<String>,
    skip_file: bool,
    pub calls: Mutex<Vec<FetchRequest>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self {
            failing_urls: HashSet::new(),
            skip_file: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(urls: &[&str]) -> Self {
        Self {
            failing_urls: urls.iter().map(|u| u.to_string()).collect(),
            ..Self::new()
        }
    }

    /// Report success without writing anything
    pub fn lying() -> Self {
        Self {
            skip_file: true,
            ..Self::new()
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|r| r.url.clone()).collect()
    }
}

#[async_trait]
impl FetchPort for FakeFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<ToolOutput, DomainError> {
        self.calls.lock().unwrap().push(request.clone());
        if self.failing_urls.contains(&request.url) {
            return Ok(failed("ERROR: Unable to download clip"));
        }
        if !self.skip_file {
            std::fs::write(&request.output, b"clip").unwrap();
        }
        Ok(ok(""))
    }
}

/// One recorded transcoder call
#[derive(Debug, Clone)]
pub struct TranscodeCall {
    pub job: TranscodeJob,
    /// Whether the job's input existed while the call ran
    pub input_existed: bool,
    /// Contents of the job's input if it was a text file (concat lists)
    pub input_text: Option<String>,
}

/// Transcoder that writes the output file, failing for inputs whose file
/// name contains one of the given markers
pub struct FakeTranscoder {
    failing_markers: Vec<String>,
    pub calls: Mutex<Vec<TranscodeCall>>,
}

impl FakeTranscoder {
    pub fn new() -> Self {
        Self {
            failing_markers: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_for(markers: &[&str]) -> Self {
        Self {
            failing_markers: markers.iter().map(|m| m.to_string()).collect(),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<TranscodeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn outputs(&self) -> Vec<PathBuf> {
        self.calls().into_iter().map(|c| c.job.output).collect()
    }
}

#[async_trait]
impl TranscodePort for FakeTranscoder {
    async fn transcode(&self, job: &TranscodeJob) -> Result<ToolOutput, DomainError> {
        let input_existed = job.input.exists();
        let input_text = if job.input.extension().map_or(false, |e| e == "txt") {
            std::fs::read_to_string(&job.input).ok()
        } else {
            None
        };
        self.calls.lock().unwrap().push(TranscodeCall {
            job: job.clone(),
            input_existed,
            input_text,
        });

        let name = job
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing_markers.iter().any(|m| name.contains(m.as_str())) {
            return Ok(failed("Conversion failed!"));
        }
        std::fs::write(&job.output, b"video").unwrap();
        Ok(ok(""))
    }
}

/// Progress observer that records every event
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<(usize, usize)>>,
}

impl ProgressPort for RecordingProgress {
    fn clip_started(&self, index: usize, total: usize) {
        self.events.lock().unwrap().push((index, total));
    }
}
