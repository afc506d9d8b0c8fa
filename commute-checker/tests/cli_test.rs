//! Runs the built binary against files that are not valid claim workbooks

use std::process::Command;

fn checker() -> Command {
    Command::new(env!("CARGO_BIN_EXE_commute-checker"))
}

#[test]
fn test_unreadable_workbook_fails_with_json_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a workbook").unwrap();
    let config = dir.path().join("commute.toml");
    std::fs::write(
        &config,
        format!("errors_log = {:?}\n", dir.path().join("errors.log").display().to_string()),
    )
    .unwrap();

    let output = checker()
        .arg("--json")
        .arg("--config")
        .arg(&config)
        .arg(&path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_end = stdout.rfind(']').unwrap();
    let results: serde_json::Value = serde_json::from_str(&stdout[..=json_end]).unwrap();
    assert_eq!(results[0]["name"], "broken.xlsx");
    assert!(results[0]["error"].as_str().unwrap().contains("broken.xlsx"));
    assert!(dir.path().join("errors.log").exists());
}

#[test]
fn test_non_workbook_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"hello").unwrap();

    let output = checker().arg(&path).output().unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No .xlsx or .xls files"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("commute.toml");
    std::fs::write(&config, "[amount_bounds]\nmin = 900.0\nmax = 100.0\n").unwrap();

    let output = checker()
        .arg("--config")
        .arg(&config)
        .arg(dir.path().join("claim.xlsx"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("amount_bounds.min"));
}
