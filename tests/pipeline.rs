use ignition_verify::api::{ConfigManager, IgnitionVerify, ManifestFormat};
use ignition_verify::JournalError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const INIT_F1: &str = r#"{"type":"DEPLOYMENT_EXECUTION_STATE_INITIALIZE","futureId":"F1","contractName":"Token","constructorArgs":[]}"#;
const COMPLETE_F1: &str = r#"{"type":"DEPLOYMENT_EXECUTION_STATE_COMPLETE","futureId":"F1","result":{"type":"SUCCESS","address":"0xABC"}}"#;
const INIT_F2: &str = r#"{"type":"DEPLOYMENT_EXECUTION_STATE_INITIALIZE","futureId":"F2","contractName":"Voter","constructorArgs":["0xABC",{"_kind":"bigint","value":"100"}]}"#;
const INIT_F3: &str = r#"{"type":"DEPLOYMENT_EXECUTION_STATE_INITIALIZE","futureId":"F3","contractName":"Minter","constructorArgs":[]}"#;
const FAIL_F3: &str = r#"{"type":"DEPLOYMENT_EXECUTION_STATE_COMPLETE","futureId":"F3","result":{"type":"FAILURE"}}"#;

fn write_journal(dir: &TempDir, lines: &[&str]) -> PathBuf {
    let chain_dir = dir.path().join("deployments").join("chain-7000");
    fs::create_dir_all(&chain_dir).unwrap();
    let path = chain_dir.join("journal.jsonl");
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn verifier(dir: &TempDir, output: &Path) -> IgnitionVerify {
    let config = ConfigManager::builder()
        .deployments_dir(dir.path().join("deployments"))
        .output(output)
        .build();
    IgnitionVerify::with_config(config)
}

#[test]
fn test_successful_deployment_yields_command() {
    let dir = tempdir().unwrap();
    write_journal(&dir, &[INIT_F1, COMPLETE_F1]);
    let output = dir.path().join("verify.bash");

    let summary = verifier(&dir, &output).run().unwrap();

    assert_eq!(summary.records, 1);
    assert_eq!(summary.commands, 1);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "verify 0xABC  --network zetachain --verbose # F1 Token\n"
    );
}

#[test]
fn test_unfinished_deployment_is_left_out() {
    let dir = tempdir().unwrap();
    write_journal(
        &dir,
        &[
            INIT_F1,
            r#"{"type":"NETWORK_INTERACTION_REQUEST","futureId":"F1","networkInteractionId":1}"#,
            INIT_F2,
            COMPLETE_F1,
        ],
    );
    let output = dir.path().join("verify.bash");

    let summary = verifier(&dir, &output).run().unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.commands, 1);
    let script = fs::read_to_string(&output).unwrap();
    assert!(!script.contains("F2"));
}

#[test]
fn test_failed_deployment_writes_nothing() {
    let dir = tempdir().unwrap();
    write_journal(&dir, &[INIT_F1, COMPLETE_F1, INIT_F3, FAIL_F3]);
    let output = dir.path().join("verify.bash");
    fs::write(&output, "previous run\n").unwrap();

    let err = verifier(&dir, &output).run().unwrap_err();

    assert!(matches!(err, JournalError::DeploymentFailed { ref future_id, .. } if future_id == "F3"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous run\n");
}

#[test]
fn test_failed_deployment_does_not_create_output() {
    let dir = tempdir().unwrap();
    write_journal(&dir, &[INIT_F3, FAIL_F3]);
    let output = dir.path().join("verify.bash");

    assert!(verifier(&dir, &output).run().is_err());
    assert!(!output.exists());
}

#[test]
fn test_order_and_arguments() {
    let dir = tempdir().unwrap();
    let complete_f2 = r#"{"type":"DEPLOYMENT_EXECUTION_STATE_COMPLETE","futureId":"F2","result":{"type":"SUCCESS","address":"0xDEF"}}"#;
    write_journal(&dir, &[INIT_F2, INIT_F1, COMPLETE_F1, complete_f2]);
    let output = dir.path().join("verify.bash");

    verifier(&dir, &output).run().unwrap();

    let script = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = script.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"verify 0xDEF "[\"0xABC\",{\"_kind\":\"bigint\",\"value\":\"100\"}]" --network zetachain --verbose # F2 Voter"#,
            "verify 0xABC  --network zetachain --verbose # F1 Token",
        ]
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = tempdir().unwrap();
    write_journal(&dir, &[INIT_F2, INIT_F1, COMPLETE_F1]);
    let output = dir.path().join("verify.bash");
    let verifier = verifier(&dir, &output);

    verifier.run().unwrap();
    let first = fs::read(&output).unwrap();
    verifier.run().unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_missing_journal() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("verify.bash");

    let err = verifier(&dir, &output).run().unwrap_err();

    assert!(matches!(err, JournalError::MissingJournal { .. }));
    assert!(!output.exists());
}

#[test]
fn test_malformed_line_aborts() {
    let dir = tempdir().unwrap();
    write_journal(&dir, &[INIT_F1, "{not json", COMPLETE_F1]);
    let output = dir.path().join("verify.bash");

    let err = verifier(&dir, &output).run().unwrap_err();

    assert!(matches!(err, JournalError::MalformedEvent { line: 2, .. }));
    assert!(!output.exists());
}

#[test]
fn test_inspect_renders_records() {
    let dir = tempdir().unwrap();
    write_journal(&dir, &[INIT_F1, COMPLETE_F1, INIT_F2]);
    let output = dir.path().join("verify.bash");

    let json = verifier(&dir, &output).render(ManifestFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["F1"]["complete"]["result"]["address"], "0xABC");
    assert_eq!(value["F2"]["initialize"]["contractName"], "Voter");
    assert!(value["F2"].get("complete").is_none());
    assert!(!output.exists());
}

#[cfg(unix)]
#[test]
fn test_rerun_keeps_executable_script() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    write_journal(&dir, &[INIT_F1, COMPLETE_F1]);
    let output = dir.path().join("verify.bash");
    fs::write(&output, "previous run\n").unwrap();
    fs::set_permissions(&output, fs::Permissions::from_mode(0o755)).unwrap();

    verifier(&dir, &output).run().unwrap();

    let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o755);
}
