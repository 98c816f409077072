use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hydrogen-cloud"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should run")
}

fn parse_stdout(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn sample_writes_requested_point_count() {
    let output = run_cli(&[
        "sample", "-n", "2", "-l", "1", "-m", "-1", "--count", "250", "--seed", "7",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let doc = parse_stdout(&output);
    assert_eq!(doc["count"], 250);
    assert_eq!(doc["m"], -1);
    assert_eq!(doc["scheme"], "redBlue");
    assert_eq!(doc["positions"].as_array().unwrap().len(), 750);
    assert_eq!(doc["colors"].as_array().unwrap().len(), 1000);
    for chunk in doc["positions"].as_array().unwrap().chunks(3) {
        let dist: f64 = chunk.iter().map(|v| v.as_f64().unwrap().powi(2)).sum::<f64>().sqrt();
        assert!(dist < 10.0 + 1e-4);
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let args = ["sample", "-n", "3", "-l", "2", "--count", "64", "--seed", "99"];
    let first = run_cli(&args);
    let second = run_cli(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let par_args = [
        "sample", "-n", "3", "-l", "2", "--count", "5000", "--seed", "99", "--parallel",
    ];
    let first = run_cli(&par_args);
    let second = run_cli(&par_args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn invalid_quantum_numbers_are_rejected() {
    let output = run_cli(&["sample", "-n", "1", "-l", "1", "--count", "10"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("l < n"), "stderr: {stderr}");
}

#[test]
fn request_file_is_merged_with_flags() {
    let temp = TempDir::new().expect("tempdir should be created");
    let request = temp.path().join("request.json");
    let out = temp.path().join("cloud.json");
    write_file(
        &request,
        r#"{ "n": 2, "l": 1, "m": 1, "points": 40, "colorSet": "greenTransparency" }"#,
    );

    let output = run_cli(&[
        "sample",
        "--request",
        request.to_str().unwrap(),
        "--count",
        "12",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let doc: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["count"], 12);
    assert_eq!(doc["label"], "2p (m=1)");
    assert_eq!(doc["scheme"], "greenTransparency");
    for rgba in doc["colors"].as_array().unwrap().chunks(4) {
        assert_eq!(rgba[0], 0.0);
        assert_eq!(rgba[2], 0.0);
        assert_eq!(rgba[1], rgba[3]);
    }
}

#[test]
fn negative_count_and_unknown_scheme_are_tolerated() {
    let output = run_cli(&["sample", "--count", "-3", "--scheme", "plaid"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let doc = parse_stdout(&output);
    assert_eq!(doc["count"], 0);
    assert_eq!(doc["scheme"], "redBlue");
    assert!(doc["positions"].as_array().unwrap().is_empty());
}

#[test]
fn eval_prints_wavefunction_parts() {
    let output = run_cli(&["eval", "-n", "1", "--r", "0"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1s (m=0)"));
    assert!(stdout.contains("radial     2.000000e0"), "stdout: {stdout}");
}

#[test]
fn heatmap_writes_png() {
    let temp = TempDir::new().expect("tempdir should be created");
    let out = temp.path().join("slice.png");
    let output = run_cli(&[
        "heatmap", "-n", "3", "-l", "2", "-m", "0", "--size", "32", "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent should be created");
    }
    fs::write(path, content).expect("file should be written");
}
