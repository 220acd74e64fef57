use std::fs;
use std::path::{Path, PathBuf};

use rfpulse_core::{CodecConfig, ReceiveReport, receive_file};

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn load_expected_report(name: &str) -> ReceiveReport {
    let expected_path = repo_root()
        .join("tests")
        .join("captures")
        .join(format!("{name}.expected.json"));
    let expected_json = fs::read_to_string(&expected_path).expect("read expected report");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(name: &str) {
    let input = repo_root()
        .join("tests")
        .join("captures")
        .join(format!("{name}.txt"));
    let expected = load_expected_report(name);

    let mut actual = receive_file(&input, &CodecConfig::default(), None).expect("receive capture");
    actual.input = expected.input.clone();

    assert_eq!(actual, expected, "golden mismatch in {name}");
}

#[test]
fn golden_mcvoice() {
    run_golden("mcvoice");
}

#[test]
fn golden_noise() {
    run_golden("noise");
}

#[test]
fn golden_mcvoice_reports_truncated_frame_as_rejected() {
    let report = load_expected_report("mcvoice");
    assert_eq!(report.frames_rejected(), 1);
}
