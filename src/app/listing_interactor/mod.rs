// Listing interactor - Turns the listing tool's JSON lines into clip records

use std::sync::Arc;

use chrono::Local;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the clip listing use case
pub struct ListingInteractor {
    source_port: Arc<dyn ClipSourcePort>,
    log_port: Arc<dyn LogPort>,
}

impl ListingInteractor {
    /// Create new listing interactor with injected ports
    pub fn new(source_port: Arc<dyn ClipSourcePort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            source_port,
            log_port,
        }
    }

    /// Build the request for `channel` with the date filter taken from now
    pub fn request(channel: &str, window: TimeWindow, limit: u32, min_views: u64) -> ListingRequest {
        ListingRequest {
            channel: normalize_channel(channel),
            limit,
            min_views,
            date_after: date_after(window, Local::now()),
        }
    }

    /// List clips for a channel.
    ///
    /// A non-zero exit from the tool fails the whole listing with its stderr
    /// text; undecodable lines are skipped and counted.
    pub async fn list(
        &self,
        channel: &str,
        window: TimeWindow,
        limit: u32,
        min_views: u64,
    ) -> Result<ListingOutcome, DomainError> {
        let request = Self::request(channel, window, limit, min_views);
        self.log_port.info(&format!(
            "Fetching up to {} clips for {} (window: {}, min views: {})",
            limit, request.channel, window, min_views
        ));

        let output = self.source_port.list_clips(&request).await?;
        if !output.success() {
            let detail = output.failure_detail();
            self.log_port
                .error(&format!("Error fetching clips: {}", detail));
            return Err(DomainError::ListingFailed(detail));
        }

        let outcome = parse_listing(&output.stdout, &request.channel);
        if outcome.skipped > 0 {
            self.log_port.warn(&format!(
                "Skipped {} malformed listing line(s)",
                outcome.skipped
            ));
        }
        self.log_port
            .info(&format!("Found {} clips", outcome.clips.len()));
        Ok(outcome)
    }
}

/// Decode one listing line
pub fn parse_listing_line(line: &str, broadcaster: &str) -> Result<ClipRecord, DomainError> {
    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| DomainError::RecordMalformed(e.to_string()))?;
    ClipRecord::from_listing_entry(&value, broadcaster)
        .ok_or_else(|| DomainError::RecordMalformed("entry is not a JSON object".to_string()))
}

/// Decode the listing tool's stdout, one record per non-empty line
pub fn parse_listing(stdout: &str, broadcaster: &str) -> ListingOutcome {
    let mut outcome = ListingOutcome::default();
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_listing_line(line, broadcaster) {
            Ok(clip) => outcome.clips.push(clip),
            Err(e) => {
                tracing::debug!("Skipping listing line: {}", e);
                outcome.skipped += 1;
            }
        }
    }
    outcome
}
