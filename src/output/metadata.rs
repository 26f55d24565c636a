//! Metadata sidecar writer

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::ClipRecord;
use crate::domain::rules::BASE_TAGS;

/// Upload descriptor stored as `<clip>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub visibility: String,
    pub original_url: String,
    pub views: u64,
    pub clip_created_at: String,
    pub downloaded_at: String,
}

impl ClipMetadata {
    /// Describe `clip`, stamped with `downloaded_at`
    pub fn describe(clip: &ClipRecord, downloaded_at: String) -> Self {
        let broadcaster = &clip.broadcaster_name;
        let mut tags = vec![broadcaster.to_lowercase()];
        tags.extend(BASE_TAGS.iter().map(|t| t.to_string()));

        Self {
            title: format!("{} - {}", broadcaster, clip.title),
            description: format!(
                "Clip from {} on Twitch\n\nOriginal clip: {}",
                broadcaster, clip.url
            ),
            tags,
            category: "Gaming".to_string(),
            visibility: "public".to_string(),
            original_url: clip.url.clone(),
            views: clip.view_count,
            clip_created_at: clip.created_at.clone(),
            downloaded_at,
        }
    }
}

/// Writes one JSON sidecar per downloaded clip
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataWriter;

impl MetadataWriter {
    pub fn new() -> Self {
        Self
    }

    /// Sidecar location: the video path with its extension replaced
    pub fn sidecar_path(video: &Path) -> PathBuf {
        video.with_extension("json")
    }

    /// Write the sidecar for `clip`, returning its path
    pub fn write(&self, clip: &ClipRecord, video: &Path) -> Result<PathBuf, DomainError> {
        let stamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        let metadata = ClipMetadata::describe(clip, stamp);
        let path = Self::sidecar_path(video);

        let body = serde_json::to_string_pretty(&metadata)
            .map_err(|e| DomainError::MetadataWriteFailed(e.to_string()))?;
        std::fs::write(&path, body).map_err(|e| {
            DomainError::MetadataWriteFailed(format!("{}: {}", path.display(), e))
        })?;

        debug!("Wrote metadata sidecar {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn clip() -> ClipRecord {
        ClipRecord {
            id: "1".to_string(),
            title: "Big Play".to_string(),
            url: "https://clips.twitch.tv/abc".to_string(),
            thumbnail_url: String::new(),
            view_count: 1200,
            duration: 28.0,
            created_at: "20240301".to_string(),
            broadcaster_name: "Foo".to_string(),
        }
    }

    #[test]
    fn describe_composes_fields() {
        let meta = ClipMetadata::describe(&clip(), "now".to_string());
        assert_eq!(meta.title, "Foo - Big Play");
        assert_eq!(
            meta.description,
            "Clip from Foo on Twitch\n\nOriginal clip: https://clips.twitch.tv/abc"
        );
        assert_eq!(meta.tags, vec!["foo", "twitch", "gaming", "clip", "highlights"]);
        assert_eq!(meta.category, "Gaming");
        assert_eq!(meta.visibility, "public");
        assert_eq!(meta.views, 1200);
        assert_eq!(meta.clip_created_at, "20240301");
    }

    #[test]
    fn write_replaces_extension() {
        let dir = TempDir::new().unwrap();
        let video = dir.path().join("Foo - Big Play.mp4");
        std::fs::write(&video, b"video").unwrap();

        let path = MetadataWriter::new().write(&clip(), &video).unwrap();
        assert_eq!(path, dir.path().join("Foo - Big Play.json"));

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("\n  \"title\": \"Foo - Big Play\""));
        let parsed: ClipMetadata = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.original_url, "https://clips.twitch.tv/abc");
        assert!(chrono::NaiveDateTime::parse_from_str(&parsed.downloaded_at, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let err = MetadataWriter::new()
            .write(&clip(), Path::new("/nonexistent/dir/clip.mp4"))
            .unwrap_err();
        assert!(matches!(err, DomainError::MetadataWriteFailed(_)));
    }
}
