//! Upload checklist written once per harvest

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::DownloadResult;
use crate::utils::path::absolute_path;

/// File name of the checklist inside the output directory
pub const INSTRUCTIONS_FILE: &str = "upload_instructions.txt";

const PLATFORM_STEPS: [(&str, &[&str]); 3] = [
    (
        "YouTube",
        &[
            "1. Go to https://studio.youtube.com/",
            "2. Click 'CREATE' > 'Upload video'",
            "3. Select the downloaded clip file",
            "4. Use the metadata file (JSON) to fill in title, description, and tags",
            "5. Set visibility to Public",
            "6. Click 'NEXT' through the screens and then 'PUBLISH'",
        ],
    ),
    (
        "TikTok",
        &[
            "1. Open the TikTok app on your device",
            "2. Tap the '+' button to create a new video",
            "3. Tap 'Upload' and select the downloaded clip",
            "4. Ensure the clip is under 60 seconds (TikTok's limit)",
            "5. Add relevant text, effects, and hashtags",
            "6. Tap 'Next' and then 'Post'",
        ],
    ),
    (
        "Instagram",
        &[
            "1. Open the Instagram app on your device",
            "2. Tap the '+' button at the bottom and select 'Post'",
            "3. Select the downloaded clip",
            "4. Apply filters if desired",
            "5. Write a caption including attribution to the original creator",
            "6. Add relevant hashtags and location",
            "7. Tap 'Share'",
        ],
    ),
];

const NOTES: [&str; 4] = [
    "1. Always give credit to the original content creator",
    "2. Follow each platform's community guidelines",
    "3. Consider adding your own branding/intro if reusing content regularly",
    "4. Check each platform's specific size/length/format requirements",
];

/// Writes the per-platform upload checklist
#[derive(Debug, Default, Clone, Copy)]
pub struct InstructionsWriter;

impl InstructionsWriter {
    pub fn new() -> Self {
        Self
    }

    /// Checklist text for `count` clips stored in `dir`
    pub fn render(dir: &Path, count: usize) -> String {
        let mut text = String::from("==== UPLOAD INSTRUCTIONS ====\n\n");
        let _ = writeln!(text, "Downloaded clips directory: {}", dir.display());
        let _ = writeln!(text, "Number of clips: {}\n", count);

        for (platform, steps) in PLATFORM_STEPS {
            let _ = writeln!(text, "=== {} Instructions ===", platform);
            for step in steps {
                let _ = writeln!(text, "{}", step);
            }
            text.push('\n');
        }

        text.push_str("==== IMPORTANT NOTES ====\n");
        for note in NOTES {
            let _ = writeln!(text, "{}", note);
        }
        text
    }

    /// Write the checklist for the successful downloads in `results`.
    ///
    /// Returns `Ok(None)` without touching the disk when nothing succeeded.
    pub fn write(
        &self,
        results: &[DownloadResult],
        output_dir: &Path,
    ) -> Result<Option<PathBuf>, DomainError> {
        let count = results.iter().filter(|r| r.is_success()).count();
        if count == 0 {
            return Ok(None);
        }

        let dir = absolute_path(output_dir);
        let path = output_dir.join(INSTRUCTIONS_FILE);
        std::fs::write(&path, Self::render(&dir, count)).map_err(|e| {
            DomainError::InstructionsWriteFailed(format!("{}: {}", path.display(), e))
        })?;

        debug!("Wrote upload instructions {}", path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ClipRecord;
    use tempfile::TempDir;

    fn result(dir: &Path, title: &str) -> DownloadResult {
        let clip = ClipRecord {
            id: title.to_string(),
            title: title.to_string(),
            url: format!("https://clips.twitch.tv/{}", title),
            thumbnail_url: String::new(),
            view_count: 1,
            duration: 0.0,
            created_at: String::new(),
            broadcaster_name: "foo".to_string(),
        };
        DownloadResult::succeeded(clip, dir.join(format!("foo - {}.mp4", title)))
    }

    #[test]
    fn render_layout() {
        let text = InstructionsWriter::render(Path::new("/clips"), 2);
        assert!(text.starts_with(
            "==== UPLOAD INSTRUCTIONS ====\n\nDownloaded clips directory: /clips\nNumber of clips: 2\n\n=== YouTube Instructions ===\n"
        ));
        let youtube = text.find("=== YouTube").unwrap();
        let tiktok = text.find("=== TikTok").unwrap();
        let instagram = text.find("=== Instagram").unwrap();
        let notes = text.find("==== IMPORTANT NOTES ====").unwrap();
        assert!(youtube < tiktok && tiktok < instagram && instagram < notes);
        assert!(text.contains("7. Tap 'Share'\n\n"));
        assert!(text.ends_with("4. Check each platform's specific size/length/format requirements\n"));
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let written = InstructionsWriter::new().write(&[], dir.path()).unwrap();
        assert!(written.is_none());
        assert!(!dir.path().join(INSTRUCTIONS_FILE).exists());
    }

    #[test]
    fn failed_downloads_are_not_counted() {
        let dir = TempDir::new().unwrap();
        let ok = result(dir.path(), "a");
        let failed = DownloadResult::failed(result(dir.path(), "b").clip);

        let path = InstructionsWriter::new()
            .write(&[ok, failed], dir.path())
            .unwrap()
            .unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("Number of clips: 1\n"));
    }
}
