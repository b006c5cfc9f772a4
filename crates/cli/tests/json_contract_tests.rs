// Integration tests for the `idtrust` shell contract.
//
// These tests guarantee that:
//   1. stdout from --json commands is exactly one JSON value of the right shape
//   2. exit codes follow the verdict (0 PASS, 3 REVIEW, 4 FAIL)
//   3. malformed input and bad config fail with their registry codes
//
// Run with: cargo test -p idtrust-cli --test json_contract_tests -- --nocapture

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Record fixtures are shared with the engine crate's integration tests.
fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../recon/tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Binary with an isolated home so no user scoring config leaks in.
fn idtrust(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_idtrust"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env("HOME", home.path());
    cmd.env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd.env_remove("IDTRUST_CONFIG");
    cmd.env_remove("IDTRUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    let home = tempfile::tempdir().unwrap();
    idtrust(&home).args(args).output().expect("run idtrust")
}

/// Assert stdout is a single, parseable JSON value with no extra lines.
fn assert_single_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.trim();
    assert!(!trimmed.is_empty(), "stdout should not be empty");
    serde_json::from_str(trimmed).unwrap_or_else(|e| {
        panic!("stdout must be valid JSON.\nParse error: {}\nstdout:\n{}", e, trimmed)
    })
}

// ===========================================================================
// idtrust decide
// ===========================================================================

#[test]
fn decide_ocr_qr_passes_with_score_7() {
    let ocr = fixture("ocr.json");
    let qr = fixture("qr.json");
    let output = run(&["decide", "--ocr", &ocr, "--qr", &qr, "--json"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let val = assert_single_json(&output);
    assert_eq!(val["verdict"], "PASS");
    assert_eq!(val["score"], 7);
    assert_eq!(
        val["reasons"],
        serde_json::json!([
            "identifier matches across sources.",
            "checksum valid.",
            "name match high (100).",
            "birth date/year differs across sources."
        ])
    );
    assert_eq!(val["preview"]["identifier"], "XXXX-XXXX-2346");
    assert!(val["preview"]["name_xml"].is_null());

    // Key order is part of the contract.
    let keys: Vec<&String> = val.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["verdict", "score", "reasons", "preview"]);
}

#[test]
fn decide_without_json_keeps_stdout_empty() {
    let qr = fixture("qr.json");
    let output = run(&["decide", "--qr", &qr]);

    // Identifier (3) + checksum (2) = 5 → REVIEW
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("REVIEW: score 5/8"), "stderr: {stderr}");
    assert!(!stderr.contains("error:"), "verdict exit must not print an error: {stderr}");
}

#[test]
fn decide_with_no_records_fails_with_score_0() {
    let output = run(&["decide", "--json"]);
    assert_eq!(output.status.code(), Some(4));
    let val = assert_single_json(&output);
    assert_eq!(val["verdict"], "FAIL");
    assert_eq!(val["score"], 0);
    assert!(val["preview"]["identifier"].is_null());
}

#[test]
fn decide_stdin_envelope() {
    let home = tempfile::tempdir().unwrap();
    let envelope = std::fs::read_to_string(fixture("submission_tampered.json")).unwrap();

    let mut child = idtrust(&home)
        .args(["decide", "--stdin", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn idtrust");
    child.stdin.take().unwrap().write_all(envelope.as_bytes()).unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(4));
    let val = assert_single_json(&output);
    assert_eq!(val["score"], 2);
    assert_eq!(val["reasons"][0], "identifier mismatch across sources.");
    assert_eq!(val["preview"]["identifier"], "XXXX-XXXX-2346");
}

#[test]
fn decide_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("verdict.json");
    let ocr = fixture("ocr.json");
    let qr = fixture("qr.json");
    let xml = fixture("xml.json");

    let output = run(&[
        "decide", "--ocr", &ocr, "--qr", &qr, "--xml", &xml, "--output", out.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(0));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["verdict"], "PASS");
    assert_eq!(written["preview"]["name_xml"], "Sharma Aarav");
}

#[test]
fn decide_malformed_record_exits_6() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"identifier": 234123412346}"#).unwrap();

    let output = run(&["decide", "--ocr", bad.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(6));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ocr record is malformed"), "stderr: {stderr}");
    assert!(stderr.contains("hint:"), "stderr: {stderr}");
}

#[test]
fn decide_missing_file_exits_8() {
    let output = run(&["decide", "--qr", "does-not-exist.json"]);
    assert_eq!(output.status.code(), Some(8));
}

#[test]
fn decide_stdin_conflicts_with_paths() {
    let qr = fixture("qr.json");
    let output = run(&["decide", "--stdin", "--qr", &qr]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn decide_honours_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("strict.toml");
    std::fs::write(&cfg, "[thresholds]\npass = 8\nreview = 5\n").unwrap();
    let ocr = fixture("ocr.json");
    let qr = fixture("qr.json");

    let output = run(&["decide", "--ocr", &ocr, "--qr", &qr, "--config", cfg.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(3));
    let val = assert_single_json(&output);
    assert_eq!(val["verdict"], "REVIEW");
    assert_eq!(val["score"], 7);
}

#[test]
fn decide_reads_config_from_env() {
    let home = tempfile::tempdir().unwrap();
    let cfg = home.path().join("env.toml");
    std::fs::write(&cfg, "[thresholds]\npass = 8\nreview = 5\n").unwrap();
    let ocr = fixture("ocr.json");
    let qr = fixture("qr.json");

    let output = idtrust(&home)
        .env("IDTRUST_CONFIG", &cfg)
        .args(["decide", "--ocr", ocr.as_str(), "--qr", qr.as_str()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn decide_invalid_config_exits_7() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("bad.toml");
    std::fs::write(&cfg, "[thresholds]\npass = 20\n").unwrap();

    let output = run(&["decide", "--config", cfg.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(7));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unreachable"), "stderr: {stderr}");
}

// ===========================================================================
// idtrust checksum
// ===========================================================================

#[test]
fn checksum_valid_numbers_exit_0() {
    let output = run(&["checksum", "234123412346", "2341 2341 2346"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.lines().all(|l| l == "XXXX-XXXX-2346\tvalid"), "stdout: {stdout}");
}

#[test]
fn checksum_invalid_number_exits_5() {
    let output = run(&["checksum", "234123412346", "234123412347", "--json"]);
    assert_eq!(output.status.code(), Some(5));
    let val = assert_single_json(&output);
    assert_eq!(
        val,
        serde_json::json!([
            {"number": "XXXX-XXXX-2346", "valid": true},
            {"number": "XXXX-XXXX-2347", "valid": false}
        ])
    );
}

#[test]
fn checksum_requires_argument() {
    let output = run(&["checksum"]);
    assert_eq!(output.status.code(), Some(2));
}

// ===========================================================================
// idtrust config
// ===========================================================================

#[test]
fn config_show_prints_defaults() {
    let output = run(&["config", "show"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# source: built-in defaults"), "stdout: {stdout}");
    assert!(stdout.contains("name_similarity = 85"));
    assert!(stdout.contains("algorithm = \"token_set\""));
}

#[test]
fn config_validate_accepts_and_rejects() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.toml");
    std::fs::write(&good, "[similarity]\nalgorithm = \"levenshtein\"\n").unwrap();
    let output = run(&["config", "validate", good.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let bad = dir.path().join("bad.toml");
    std::fs::write(&bad, "[weights]\nchecksum = \"two\"\n").unwrap();
    let output = run(&["config", "validate", bad.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn user_config_dir_is_picked_up() {
    let home = tempfile::tempdir().unwrap();
    // Linux resolves $XDG_CONFIG_HOME; macOS resolves ~/Library/Application Support.
    for base in [
        home.path().join(".config"),
        home.path().join("Library/Application Support"),
    ] {
        let dir = base.join("idtrust");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("scoring.toml"), "[thresholds]\nname_similarity = 95\n").unwrap();
    }

    let output = idtrust(&home).args(["config", "show"]).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("scoring.toml"), "stdout: {stdout}");
    assert!(stdout.contains("name_similarity = 95"), "stdout: {stdout}");
}
