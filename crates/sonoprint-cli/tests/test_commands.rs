//! Command tests against temporary directories.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

use sonoprint_cli::commands::{aggregate, animate, render};
use sonoprint_render::{BreathingAnimation, MusicProfile, SynthesisReport};

const PROFILE: &str = r#"{
    "energy": 0.629,
    "valence": 0.428,
    "danceability": 0.795,
    "acousticness": 0.017,
    "topGenres": ["electronic"],
    "uniqueScore": 62,
    "colorPalette": ["hsl(200,80%,50%)", "hsl(280,70%,45%)", "hsl(340,75%,55%)", "hsl(40,60%,40%)"],
    "imageSeed": 123456789
}"#;

fn write_profile(dir: &Path) -> String {
    let path = dir.join("profile.json");
    fs::write(&path, PROFILE).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_render_writes_identical_pngs() {
    let dir = tempfile::tempdir().unwrap();
    let profile = write_profile(dir.path());
    let first = dir.path().join("a.png");
    let second = dir.path().join("b.png");

    render::run(&profile, first.to_str().unwrap(), 64, "standard", None).unwrap();
    render::run(&profile, second.to_str().unwrap(), 64, "standard", None).unwrap();

    let a = fs::read(&first).unwrap();
    assert_eq!(&a[1..4], b"PNG");
    assert_eq!(a, fs::read(&second).unwrap());
}

#[test]
fn test_render_appends_telemetry() {
    let dir = tempfile::tempdir().unwrap();
    let profile = write_profile(dir.path());
    let out = dir.path().join("out.png");
    let log = dir.path().join("reports.jsonl");
    let log_str = log.to_str().unwrap();

    render::run(&profile, out.to_str().unwrap(), 32, "high", Some(log_str)).unwrap();
    render::run(&profile, out.to_str().unwrap(), 32, "high", Some(log_str)).unwrap();

    let text = fs::read_to_string(&log).unwrap();
    let reports: Vec<SynthesisReport> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].size, 32);
    assert_eq!(reports[0].parameters.octaves, 5);
    assert_eq!(reports[0].png_hash, reports[1].png_hash);
}

#[test]
fn test_render_reports_bad_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    fs::write(&path, PROFILE.replace(", \"hsl(40,60%,40%)\"", "")).unwrap();
    let out = dir.path().join("out.png");

    assert!(render::run(path.to_str().unwrap(), out.to_str().unwrap(), 32, "standard", None).is_err());
    assert!(!out.exists());
}

#[test]
fn test_animate_writes_numbered_frames() {
    let profile: MusicProfile = serde_json::from_str(PROFILE).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let frames_dir = dir.path().join("frames");

    let animation = BreathingAnimation::new(profile, 24);
    let written = animate::write_frames(&animation, &frames_dir, 3).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["frame_0000.png", "frame_0001.png", "frame_0002.png"]);
    assert!(written.iter().all(|p| p.exists()));
}

#[test]
fn test_aggregate_output_renders() {
    let dir = tempfile::tempdir().unwrap();
    let features = dir.path().join("features.json");
    fs::write(
        &features,
        r#"{
            "tracks": [
                {"energy": 0.8, "valence": 0.7, "danceability": 0.9, "acousticness": 0.1, "tempo": 124},
                {"energy": 0.6, "valence": 0.5, "danceability": 0.7, "acousticness": 0.2, "tempo": 118}
            ],
            "artists": [{"name": "A", "genres": ["house"]}],
            "listener": {"id": "listener", "timestamp": 1700000000123}
        }"#,
    )
    .unwrap();
    let profile_out = dir.path().join("profile.json");
    let png_out = dir.path().join("out.png");

    aggregate::run(features.to_str().unwrap(), profile_out.to_str().unwrap()).unwrap();
    let profile: MusicProfile =
        serde_json::from_str(&fs::read_to_string(&profile_out).unwrap()).unwrap();
    assert_eq!(profile.top_genres, vec!["house"]);

    render::run(
        profile_out.to_str().unwrap(),
        png_out.to_str().unwrap(),
        32,
        "standard",
        None,
    )
    .unwrap();
    assert!(png_out.exists());
}
