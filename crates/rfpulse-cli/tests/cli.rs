use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rfpulse"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn capture(name: &str) -> std::path::PathBuf {
    repo_root().join("tests").join("captures").join(name)
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(stdout.trim()).expect("valid json")
}

#[test]
fn help_supports_decode_and_receive() {
    cmd().arg("decode").arg("--help").assert().success();
    cmd().arg("receive").arg("--help").assert().success();
}

#[test]
fn protocols_list_names_mcvoice() {
    cmd()
        .arg("protocols")
        .arg("list")
        .assert()
        .success()
        .stdout(contains("mcvoice_rm1011b").and(contains("McVoice Smoke Alarm")));
}

#[test]
fn describe_outputs_metadata_json() {
    let assert = cmd()
        .arg("protocols")
        .arg("describe")
        .arg("mcvoice_rm1011b")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["tx_repeats"], 35);
    assert_eq!(value["min_gap_len"], 15_300);
}

#[test]
fn describe_honors_pulse_div_override() {
    let assert = cmd()
        .arg("protocols")
        .arg("describe")
        .arg("mcvoice_rm1011b")
        .arg("--pulse-div")
        .arg("10")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["max_gap_len"], 5_000);
}

#[test]
fn describe_help_options_lists_send_flags() {
    cmd()
        .arg("protocols")
        .arg("describe")
        .arg("mcvoice_rm1011b")
        .arg("--help-options")
        .assert()
        .success()
        .stdout(contains("--unitcode").and(contains("--off")).and(contains("readonly").not()));
}

#[test]
fn unknown_protocol_shows_error_and_hint() {
    cmd()
        .arg("send")
        .arg("-p")
        .arg("nope")
        .arg("-u")
        .arg("1234567")
        .arg("--on")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn decode_outputs_report_json() {
    let assert = cmd()
        .arg("decode")
        .arg(capture("mcvoice.txt"))
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["frames_total"], 3);
    assert_eq!(value["frames_decoded"], 2);
    assert_eq!(value["messages"][0]["message"]["unitcode"], 1234567);
    assert_eq!(value["messages"][0]["message"]["state"], "off");
}

#[test]
fn decode_reads_stdin() {
    let sent = cmd()
        .arg("send")
        .arg("-p")
        .arg("mcvoice_rm1011b")
        .arg("-u")
        .arg("7654321")
        .arg("--off")
        .arg("--raw")
        .assert()
        .success();
    let raw = String::from_utf8(sent.get_output().stdout.clone()).expect("utf8 stdout");
    let captured: Vec<&str> = raw.split_whitespace().skip(1).collect();

    let assert = cmd()
        .arg("decode")
        .arg("-")
        .write_stdin(captured.join(" "))
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["messages"][0]["message"]["unitcode"], 7654321);
}

#[test]
fn decode_writes_report_file() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("decode")
        .arg(capture("mcvoice.txt"))
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let json = std::fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["frames_decoded"], 2);
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(capture("mcvoice.txt"))
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn strict_fails_when_nothing_decodes() {
    cmd()
        .arg("decode")
        .arg(capture("noise.txt"))
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("no frames decoded"));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .arg("decode")
        .arg(temp.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn send_outputs_full_frame() {
    let assert = cmd()
        .arg("send")
        .arg("-p")
        .arg("mcvoice_rm1011b")
        .arg("-u")
        .arg("1234567")
        .arg("--on")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["protocol"], "mcvoice_rm1011b");
    assert_eq!(value["message"]["state"], "on");
    assert_eq!(value["repeats"], 35);
    let pulses = value["pulses"].as_array().expect("pulses array");
    assert_eq!(pulses.len(), 52);
    assert_eq!(pulses[0], 475 * 17);
    assert_eq!(pulses[51], 475 * 34);
}

#[test]
fn send_accepts_gateway_json() {
    let assert = cmd()
        .arg("send")
        .arg("-p")
        .arg("mcvoice_rm1011b")
        .arg("--json")
        .arg(r#"{"unitcode":1234567,"off":1}"#)
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["message"]["state"], "off");
}

#[test]
fn send_without_state_reports_missing_field() {
    cmd()
        .arg("send")
        .arg("-p")
        .arg("mcvoice_rm1011b")
        .arg("-u")
        .arg("1234567")
        .assert()
        .failure()
        .stderr(contains("insufficient number of arguments").and(contains("--on or --off")));
}

#[test]
fn send_rejects_unitcode_not_matching_pattern() {
    cmd()
        .arg("send")
        .arg("-p")
        .arg("mcvoice_rm1011b")
        .arg("-u")
        .arg("123")
        .arg("--on")
        .assert()
        .failure()
        .stderr(contains("invalid unitcode").and(contains("[0-9]{7}")));
}

#[test]
fn on_and_off_conflict() {
    cmd()
        .arg("send")
        .arg("-p")
        .arg("mcvoice_rm1011b")
        .arg("-u")
        .arg("1234567")
        .arg("--on")
        .arg("--off")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn config_file_sets_pulse_div() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("rfpulse.json");
    std::fs::write(&config, r#"{ "pulse_div": 20 }"#).expect("write config");

    let assert = cmd()
        .arg("protocols")
        .arg("describe")
        .arg("mcvoice_rm1011b")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value["min_gap_len"], 9_000);
}

#[test]
fn bad_config_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("rfpulse.json");
    std::fs::write(&config, r#"{ "pulse_div": 0 }"#).expect("write config");

    cmd()
        .arg("protocols")
        .arg("list")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("invalid pulse_div").and(contains("hint:")));
}
