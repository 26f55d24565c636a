// Log sinks - Status lines to tracing, to an in-memory buffer, or both

use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::{error, info, warn};

use crate::ports::*;

/// Forwards status lines to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl LogPort for TracingLogAdapter {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}

/// Timestamped, append-only buffer of status lines.
///
/// This is the display buffer an interactive shell reads from while the
/// pipeline runs on its own lane.
#[derive(Debug, Default)]
pub struct MemoryLogAdapter {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&self, level: Option<&str>, message: &str) {
        let stamp = Local::now().format("%H:%M:%S");
        let line = match level {
            Some(level) => format!("[{}] {}: {}", stamp, level, message),
            None => format!("[{}] {}", stamp, message),
        };
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line);
    }

    /// Snapshot of every line appended so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether any appended line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|line| line.contains(needle))
    }
}

impl LogPort for MemoryLogAdapter {
    fn info(&self, message: &str) {
        self.append(None, message);
    }

    fn warn(&self, message: &str) {
        self.append(Some("warning"), message);
    }

    fn error(&self, message: &str) {
        self.append(Some("error"), message);
    }
}

/// Duplicates each line to every wrapped sink, in order
#[derive(Clone, Default)]
pub struct FanoutLogAdapter {
    sinks: Vec<Arc<dyn LogPort>>,
}

impl FanoutLogAdapter {
    pub fn new(sinks: Vec<Arc<dyn LogPort>>) -> Self {
        Self { sinks }
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogPort>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl LogPort for FanoutLogAdapter {
    fn info(&self, message: &str) {
        for sink in &self.sinks {
            sink.info(message);
        }
    }

    fn warn(&self, message: &str) {
        for sink in &self.sinks {
            sink.warn(message);
        }
    }

    fn error(&self, message: &str) {
        for sink in &self.sinks {
            sink.error(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn memory_log_timestamps_and_levels() {
        let log = MemoryLogAdapter::new();
        log.info("hello");
        log.warn("careful");
        log.error("broken");

        let lines = log.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('[') && lines[0].ends_with("] hello"));
        assert!(lines[1].ends_with("warning: careful"));
        assert!(lines[2].ends_with("error: broken"));
    }

    #[test]
    fn memory_log_serializes_concurrent_writers() {
        let log = Arc::new(MemoryLogAdapter::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..50 {
                        log.info(&format!("writer {} line {}", t, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = log.lines();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|l| l.contains("writer ") && l.contains(" line ")));
    }

    #[test]
    fn fanout_reaches_every_sink() {
        let first = Arc::new(MemoryLogAdapter::new());
        let second = Arc::new(MemoryLogAdapter::new());
        let fanout = FanoutLogAdapter::new(vec![first.clone() as Arc<dyn LogPort>])
            .with_sink(second.clone())
            .with_sink(Arc::new(TracingLogAdapter::new()));

        fanout.info("both");
        assert!(first.contains("both"));
        assert!(second.contains("both"));
    }
}
