// Unit tests for domain models

use super::*;
use serde_json::json;

#[test]
fn test_clip_record_from_full_entry() {
    let entry = json!({
        "id": "AwkwardHelplessSalamander",
        "title": "Huge play",
        "webpage_url": "https://clips.twitch.tv/AwkwardHelplessSalamander",
        "thumbnail": "https://example.invalid/thumb.jpg",
        "view_count": 1234,
        "duration": 28.5,
        "upload_date": "20240105"
    });

    let clip = ClipRecord::from_listing_entry(&entry, "somestreamer").unwrap();
    assert_eq!(clip.id, "AwkwardHelplessSalamander");
    assert_eq!(clip.title, "Huge play");
    assert_eq!(clip.url, "https://clips.twitch.tv/AwkwardHelplessSalamander");
    assert_eq!(clip.thumbnail_url, "https://example.invalid/thumb.jpg");
    assert_eq!(clip.view_count, 1234);
    assert_eq!(clip.duration, 28.5);
    assert_eq!(clip.created_at, "20240105");
    assert_eq!(clip.broadcaster_name, "somestreamer");
}

#[test]
fn test_clip_record_defaults() {
    let clip = ClipRecord::from_listing_entry(&json!({}), "b").unwrap();
    assert_eq!(clip.title, ClipRecord::UNTITLED);
    assert_eq!(clip.view_count, 0);
    assert_eq!(clip.duration, 0.0);
    assert_eq!(clip.url, "");
    assert_eq!(clip.created_at, "");
    assert!(!clip.has_url());
}

#[test]
fn test_clip_record_wrong_types_fall_back() {
    let entry = json!({"title": 5, "view_count": "lots", "duration": null});
    let clip = ClipRecord::from_listing_entry(&entry, "b").unwrap();
    assert_eq!(clip.title, ClipRecord::UNTITLED);
    assert_eq!(clip.view_count, 0);
    assert_eq!(clip.duration, 0.0);
}

#[test]
fn test_clip_record_fractional_and_negative_views() {
    let clip = ClipRecord::from_listing_entry(&json!({"view_count": 12.9}), "b").unwrap();
    assert_eq!(clip.view_count, 12);
    let clip = ClipRecord::from_listing_entry(&json!({"view_count": -3}), "b").unwrap();
    assert_eq!(clip.view_count, 0);
}

#[test]
fn test_clip_record_rejects_non_object() {
    assert!(ClipRecord::from_listing_entry(&json!([1, 2]), "b").is_none());
    assert!(ClipRecord::from_listing_entry(&json!("text"), "b").is_none());
}

#[test]
fn test_time_window_parse() {
    assert_eq!(TimeWindow::parse("24h").unwrap(), TimeWindow::Last24Hours);
    assert_eq!(TimeWindow::parse("7D").unwrap(), TimeWindow::Last7Days);
    assert_eq!(TimeWindow::parse("30d").unwrap(), TimeWindow::Last30Days);
    assert_eq!(TimeWindow::parse("all").unwrap(), TimeWindow::AllTime);
    assert!(TimeWindow::parse("1y").is_err());
}

#[test]
fn test_time_window_from_hours() {
    assert_eq!(TimeWindow::from_hours(24), TimeWindow::Last24Hours);
    assert_eq!(TimeWindow::from_hours(168), TimeWindow::Last7Days);
    assert_eq!(TimeWindow::from_hours(720), TimeWindow::Last30Days);
    assert_eq!(TimeWindow::from_hours(2160), TimeWindow::AllTime);
}

#[test]
fn test_time_window_span() {
    assert_eq!(TimeWindow::Last7Days.span(), Some(Duration::days(7)));
    assert_eq!(TimeWindow::AllTime.span(), None);
}

#[test]
fn test_output_format_parse() {
    assert_eq!(OutputFormat::parse("MP4").unwrap(), OutputFormat::Mp4);
    assert_eq!(OutputFormat::parse("mov").unwrap().extension(), "mov");
    assert!(OutputFormat::parse("avi").is_err());
}

#[test]
fn test_platform_parse_and_resolution() {
    assert_eq!(Platform::parse("tiktok").unwrap().resolution(), (1080, 1920));
    assert_eq!(Platform::parse("Instagram").unwrap().resolution(), (1080, 1080));
    assert_eq!(Platform::parse("instagram_story").unwrap().resolution(), (1080, 1920));
    assert_eq!(Platform::parse("youtube").unwrap().resolution(), (1920, 1080));
}

#[test]
fn test_platform_unknown_lists_valid_names() {
    match Platform::parse("unknown") {
        Err(DomainError::UnknownPlatform { requested, valid }) => {
            assert_eq!(requested, "unknown");
            assert_eq!(valid, vec!["tiktok", "instagram", "instagram_story", "youtube"]);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_transcode_job_args_order() {
    let job = TranscodeJob::new("in.mp4", "out.mp4")
        .input_args(["-f", "concat"])
        .output_args(["-c", "copy"]);
    assert_eq!(
        job.to_args(),
        vec!["-f", "concat", "-i", "in.mp4", "-c", "copy", "out.mp4", "-y"]
    );
}

#[test]
fn test_operation_spec_deserialize_with_defaults() {
    let ops: Vec<OperationSpec> = serde_json::from_str(
        r#"[
            {"type": "trim", "duration": 10},
            {"type": "watermark", "text": "@me"},
            {"type": "resize"},
            {"type": "convert", "format": "mov"}
        ]"#,
    )
    .unwrap();

    assert_eq!(ops[0], OperationSpec::Trim { start_time: 0.0, duration: Some(10.0) });
    assert_eq!(
        ops[1],
        OperationSpec::Watermark {
            text: "@me".to_string(),
            position: "bottomright".to_string(),
            fontsize: 24
        }
    );
    assert_eq!(ops[2], OperationSpec::Resize { platform: "youtube".to_string() });
    assert_eq!(ops[3].name(), "convert");
}

#[test]
fn test_tool_output_failure_detail() {
    let output = ToolOutput { exit_code: Some(2), stdout: String::new(), stderr: "  boom \n".into() };
    assert!(!output.success());
    assert_eq!(output.failure_detail(), "boom");

    let output = ToolOutput { exit_code: Some(3), ..Default::default() };
    assert_eq!(output.failure_detail(), "exit code 3");
}
