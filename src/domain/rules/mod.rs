// Domain rules - Naming, ordering and filter-string policies

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::domain::model::*;


/// Characters that are not allowed in downloaded clip filenames
pub const FORBIDDEN_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Base tags attached to every metadata sidecar, after the broadcaster tag
pub const BASE_TAGS: [&str; 4] = ["twitch", "gaming", "clip", "highlights"];

/// Trim and lowercase a channel name
pub fn normalize_channel(channel: &str) -> String {
    channel.trim().to_lowercase()
}

/// Public clip listing URL for a channel
pub fn channel_clips_url(channel: &str) -> String {
    format!("https://www.twitch.tv/{}/clips", normalize_channel(channel))
}

/// Replace every forbidden filename character with `_`
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if FORBIDDEN_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// `"{broadcaster} - {sanitized title}.{format}"`
pub fn clip_filename(clip: &ClipRecord, format: OutputFormat) -> String {
    let broadcaster = if clip.broadcaster_name.is_empty() {
        "unknown"
    } else {
        clip.broadcaster_name.as_str()
    };
    format!(
        "{} - {}.{}",
        broadcaster,
        sanitize_title(&clip.title),
        format.extension()
    )
}

/// Order clips by view count, highest first, keeping listing order on ties
pub fn rank_clips(mut clips: Vec<ClipRecord>) -> Vec<ClipRecord> {
    // sort_by is stable
    clips.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    clips
}

/// `YYYYMMDD` of `now - window`, or `None` for all-time
pub fn date_after<Tz: TimeZone>(window: TimeWindow, now: DateTime<Tz>) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    window
        .span()
        .map(|span| (now - span).format("%Y%m%d").to_string())
}

/// `dir/{stem}{suffix}{ext}` where stem and ext come from `source`
pub fn with_suffix(source: &Path, dir: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    dir.join(format!("{}{}{}", stem, suffix, ext))
}

/// `dir/{stem}.{extension}` where stem comes from `source`
pub fn with_extension(source: &Path, dir: &Path, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.join(format!("{}.{}", stem, extension.trim_start_matches('.')))
}

/// Output path of `operation` for a file named after `source`, placed in `dir`
pub fn operation_output(operation: &OperationSpec, source: &Path, dir: &Path) -> PathBuf {
    match operation {
        OperationSpec::Trim { .. } => with_suffix(source, dir, "_trimmed"),
        OperationSpec::Watermark { .. } => with_suffix(source, dir, "_watermarked"),
        OperationSpec::Intro { .. } => with_suffix(source, dir, "_with_intro"),
        OperationSpec::Convert { format } => with_extension(source, dir, format.trim()),
        OperationSpec::Resize { platform } => with_suffix(
            source,
            dir,
            &format!("_for_{}", platform.trim().to_lowercase()),
        ),
    }
}

/// Directory a default output lands in: next to the input
pub fn sibling_dir(source: &Path) -> PathBuf {
    source
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Escape text for the drawtext `text` option.
///
/// Two layers: drawtext's own expansion (`\\` and `%`), then the filter
/// option parser (`\\`, `'` and `:`). The result still has to be quoted for
/// the filtergraph with [`quote_filter_value`].
pub fn escape_drawtext(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => expanded.push_str("\\\\"),
            '%' => expanded.push_str("\\%"),
            _ => expanded.push(c),
        }
    }

    let mut escaped = String::with_capacity(expanded.len());
    for c in expanded.chars() {
        if matches!(c, '\\' | '\'' | ':') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Single-quote a value for the filtergraph parser; an embedded `'` closes
/// the quote, is backslash-escaped, and reopens it
pub fn quote_filter_value(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// drawtext filter for a boxed white text watermark
pub fn watermark_filter(text: &str, position: WatermarkPosition, fontsize: u32) -> String {
    format!(
        "drawtext=text={}:fontcolor=white:fontsize={}:box=1:boxcolor=black@0.5:boxborderw=5:{}",
        quote_filter_value(&escape_drawtext(text)),
        fontsize,
        position.coordinates()
    )
}

/// Aspect-preserving scale followed by centered padding to the platform frame
pub fn scale_pad_filter(platform: Platform) -> String {
    let (width, height) = platform.resolution();
    let target = format!("{}:{}", width, height);
    format!(
        "scale={}:force_original_aspect_ratio=decrease,pad={}:(ow-iw)/2:(oh-ih)/2",
        target, target
    )
}

/// Concat demuxer list: one `file '<path>'` line per entry
pub fn concat_list(paths: &[&Path]) -> String {
    paths
        .iter()
        .map(|p| format!("file '{}'\n", p.to_string_lossy().replace('\'', "'\\''")))
        .collect()
}

/// Escape `%` so a literal path survives the downloader's output template
pub fn escape_output_template(path: &Path) -> String {
    path.to_string_lossy().replace('%', "%%")
}
