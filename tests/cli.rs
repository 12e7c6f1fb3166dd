mod common;

use std::fs;

use assert_cmd::Command;
use common::{TestWorkspace, to_csv};
use predicates::str::contains;
use serde_json::Value;

const REFERENCE: &[&[&str]] = &[
    &["age", "city"],
    &["25", "NY"],
    &["30", "LA"],
    &["25", "NY"],
    &["40", "SF"],
];

const CURRENT: &[&[&str]] = &[
    &["age", "city"],
    &["25", "NY"],
    &["25", "NY"],
    &["25", "NY"],
    &["25", "NY"],
];

fn drift_monitor() -> Command {
    Command::cargo_bin("drift-monitor").expect("binary exists")
}

fn write_pair(workspace: &TestWorkspace) -> (std::path::PathBuf, std::path::PathBuf) {
    (
        workspace.write("reference.csv", &to_csv(REFERENCE)),
        workspace.write("current.csv", &to_csv(CURRENT)),
    )
}

#[test]
fn compare_writes_json_report_to_stdout() {
    let workspace = TestWorkspace::new();
    let (reference, current) = write_pair(&workspace);

    let output = drift_monitor()
        .args(["compare", "-r"])
        .arg(&reference)
        .arg("-c")
        .arg(&current)
        .output()
        .expect("run compare");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert!(report["OriginalData"]["age"].is_object());
    assert!(report["CurrentData"]["city"].is_object());
    assert_eq!(report["OriginalData"]["city"]["VariableType"], "Categorical");
    let psi = report["StabilityIndexValues"]["city"]
        .as_f64()
        .expect("city PSI");
    assert!(psi > 0.0);
}

#[test]
fn compare_writes_yaml_report_to_file() {
    let workspace = TestWorkspace::new();
    let (reference, current) = write_pair(&workspace);
    let output_path = workspace.path().join("report.yaml");

    drift_monitor()
        .args(["compare", "--format", "yaml", "-r"])
        .arg(&reference)
        .arg("-c")
        .arg(&current)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let contents = fs::read_to_string(&output_path).expect("read report");
    assert!(contents.contains("OriginalData:"));
    assert!(contents.contains("CurrentData:"));
    assert!(contents.contains("StabilityIndexValues:"));
}

#[test]
fn compare_table_goes_to_stderr() {
    let workspace = TestWorkspace::new();
    let (reference, current) = write_pair(&workspace);

    drift_monitor()
        .args(["compare", "--table", "-r"])
        .arg(&reference)
        .arg("-c")
        .arg(&current)
        .assert()
        .success()
        .stdout(contains("StabilityIndexValues"))
        .stderr(contains("column"))
        .stderr(contains("categorical/non-unique"));
}

#[test]
fn schema_mismatch_exits_with_error() {
    let workspace = TestWorkspace::new();
    let reference = workspace.write("reference.csv", &to_csv(REFERENCE));
    let current = workspace.write(
        "current.csv",
        &to_csv(&[&["city", "age"], &["NY", "25"]]),
    );

    drift_monitor()
        .args(["compare", "-r"])
        .arg(&reference)
        .arg("-c")
        .arg(&current)
        .assert()
        .failure()
        .stderr(contains("error:"))
        .stderr(contains("do not match"));
}

#[test]
fn config_file_selects_skip_policy() {
    let workspace = TestWorkspace::new();
    let (reference, current) = write_pair(&workspace);
    let config = workspace.write("engine.yaml", "zero_share:\n  policy: skip\n");

    let output = drift_monitor()
        .args(["compare", "--config"])
        .arg(&config)
        .arg("-r")
        .arg(&reference)
        .arg("-c")
        .arg(&current)
        .output()
        .expect("run compare");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let psi = report["StabilityIndexValues"]["city"]
        .as_f64()
        .expect("city PSI");
    // Only the NY term survives: (0.5 - 1.0) * ln(0.5).
    assert!((psi - 0.5 * std::f64::consts::LN_2).abs() < 1e-12);
}

#[test]
fn unknown_config_key_is_rejected() {
    let workspace = TestWorkspace::new();
    let (reference, current) = write_pair(&workspace);
    let config = workspace.write("engine.yaml", "bucket_count: 10\n");

    drift_monitor()
        .args(["compare", "--config"])
        .arg(&config)
        .arg("-r")
        .arg(&reference)
        .arg("-c")
        .arg(&current)
        .assert()
        .failure()
        .stderr(contains("Parsing engine config"));
}

#[test]
fn semicolon_delimiter_is_honoured() {
    let workspace = TestWorkspace::new();
    let reference = workspace.write("reference.csv", &to_csv(REFERENCE).replace(',', ";"));
    let current = workspace.write("current.csv", &to_csv(CURRENT).replace(',', ";"));

    let output = drift_monitor()
        .args(["compare", "--delimiter", ";", "-r"])
        .arg(&reference)
        .arg("-c")
        .arg(&current)
        .output()
        .expect("run compare");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert!(report["OriginalData"]["city"].is_object());
}

#[test]
fn profile_reports_single_dataset_statistics() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("reference.csv", &to_csv(REFERENCE));

    let output = drift_monitor()
        .args(["profile", "-i"])
        .arg(&input)
        .output()
        .expect("run profile");
    assert!(output.status.success());

    let stats: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(stats["city"]["RowCount"], 4);
    assert_eq!(stats["city"]["UniqueItemCountAndValues"]["NY"], 2);
    assert_eq!(stats["age"]["Datatype"], "int64");
    assert!(stats.get("StabilityIndexValues").is_none());
}

#[test]
fn both_inputs_from_stdin_are_rejected() {
    drift_monitor()
        .args(["compare", "-r", "-", "-c", "-"])
        .write_stdin(to_csv(REFERENCE))
        .assert()
        .failure()
        .stderr(contains("cannot both read from stdin"));
}
