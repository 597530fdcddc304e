use std::io::Write;

use aris_core::{testing::RecordingBuilder, FrameCountMode};
use aris_inspect::{
    render, run_frame, run_header, run_stats, InspectConfig, InspectError, OutputFormat,
};
use tempfile::{NamedTempFile, TempDir};

fn write_temp(b: &RecordingBuilder) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(&b.build()).unwrap();
    tmp.flush().unwrap();
    tmp
}

#[test]
fn test_stats_text_and_json() {
    let tmp = write_temp(&RecordingBuilder::new(1, 500).frames(1));
    let config = InspectConfig::default();

    let report = run_stats(tmp.path(), &config).unwrap();
    assert_eq!(
        (report.samples_per_beam, report.num_beams, report.num_frames),
        (500, 48, 1)
    );

    let text = render(&report, OutputFormat::Text).unwrap();
    assert!(text.contains("Samples per beam : 500"), "{text}");

    let json: serde_json::Value =
        serde_json::from_str(&render(&report, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json["num_frames"], 1);
    assert_eq!(json["frame_count_mode"], "corrected");
}

#[test]
fn test_stats_legacy_mode() {
    let tmp = write_temp(&RecordingBuilder::new(1, 10).frames(10));
    let config = InspectConfig {
        frame_count_mode: FrameCountMode::Legacy,
        ..InspectConfig::default()
    };

    let report = run_stats(tmp.path(), &config).unwrap();
    assert_eq!(report.num_frames, 31);
    assert_eq!(report.recorded_frame_count, 10);
}

#[test]
fn test_frame_writes_raw_samples() {
    let b = RecordingBuilder::new(6, 30).frames(3);
    let tmp = write_temp(&b);
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("frame2.bin");

    let report = run_frame(tmp.path(), 2, Some(out.as_path()), &InspectConfig::default()).unwrap();

    assert_eq!(report.index, 2);
    assert_eq!(report.sample_period, 4 + 2);
    assert_eq!(report.output.as_deref(), Some(out.as_path()));
    assert_eq!(std::fs::read(&out).unwrap(), b.frame_samples(2));
}

#[test]
fn test_frame_out_of_range_exit_status() {
    let tmp = write_temp(&RecordingBuilder::new(1, 10).frames(2));

    let err = run_frame(tmp.path(), 2, None, &InspectConfig::default()).unwrap_err();

    assert!(matches!(err, InspectError::Aris(_)), "{err}");
    assert_eq!(err.exit_status(), 5);
}

#[test]
fn test_frame_unwritable_output() {
    let tmp = write_temp(&RecordingBuilder::new(1, 10).frames(1));
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("missing").join("frame.bin");

    let err = run_frame(tmp.path(), 0, Some(out.as_path()), &InspectConfig::default()).unwrap_err();

    assert!(matches!(err, InspectError::Output { .. }), "{err}");
    assert_eq!(err.exit_status(), 3);
}

#[test]
fn test_header_dump() {
    let tmp = write_temp(&RecordingBuilder::new(3, 10).frames(2));
    let config = InspectConfig::default();

    let file = run_header(tmp.path(), None, &config).unwrap();
    assert_eq!(file.header, "ArisFileHeader");
    assert!(file.fields.iter().any(|e| e.name == "NumRawBeams"));

    let frame = run_header(tmp.path(), Some(1), &config).unwrap();
    assert_eq!(frame.frame, Some(1));
    let ping = frame
        .fields
        .iter()
        .find(|e| e.name == "PingMode")
        .unwrap();
    assert_eq!(ping.offset, 436);
    assert_eq!(ping.value.as_u32(), Some(3));

    let json: serde_json::Value =
        serde_json::from_str(&render(&frame, OutputFormat::JsonPretty).unwrap()).unwrap();
    assert_eq!(json["frame"], 1);
    assert!(json["fields"].as_array().unwrap().len() > 100);
}

#[test]
fn test_not_aris_file() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(&[0u8; 4096]).unwrap();

    let err = run_stats(tmp.path(), &InspectConfig::default()).unwrap_err();
    assert_eq!(err.exit_status(), 4);

    let err = run_stats(std::path::Path::new("/no/such.aris"), &InspectConfig::default())
        .unwrap_err();
    assert_eq!(err.exit_status(), 2);
}
