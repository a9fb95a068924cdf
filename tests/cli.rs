use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vault(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vault").unwrap();
    cmd.env("VAULT_DATA_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn balance_on_fresh_install_shows_defaults() {
    let dir = TempDir::new().unwrap();

    vault(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inactive"))
        .stdout(predicate::str::contains("R5000.00"));
}

#[test]
fn transfer_then_release_scenario() {
    let dir = TempDir::new().unwrap();

    vault(&dir)
        .args(["transfer", "1000", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Transfer successful! R1000.00 moved to Budget Vault for 5 days. Daily budget: R200.00.",
        ));

    vault(&dir)
        .args(["release", "--date", "2025-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R200.00 released (100% of available R200.00)"))
        .stdout(predicate::str::contains("Remaining vault balance: R800.00."));

    vault(&dir)
        .args(["release", "--date", "2025-03-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already withdrawn"));
}

#[test]
fn release_catches_up_missed_days() {
    let dir = TempDir::new().unwrap();

    vault(&dir).args(["transfer", "1000", "10"]).assert().success();
    vault(&dir)
        .args(["release", "--date", "2025-03-01"])
        .assert()
        .success();

    vault(&dir)
        .args(["release", "--date", "2025-03-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R400.00 released"))
        .stdout(predicate::str::contains("Caught up 3 missed day(s)"));
}

#[test]
fn withdraw_refused_while_days_remain() {
    let dir = TempDir::new().unwrap();

    vault(&dir).args(["transfer", "500", "2"]).assert().success();
    vault(&dir)
        .arg("withdraw")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot withdraw funds"));
}

#[test]
fn json_output_reports_status_and_state() {
    let dir = TempDir::new().unwrap();

    vault(&dir)
        .args(["--json", "transfer", "9000", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"error\""))
        .stdout(predicate::str::contains("Insufficient funds"));

    vault(&dir)
        .args(["--json", "release", "--percentage", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active budget cycle"))
        .stdout(predicate::str::contains("\"main_account\": 5000.0"));
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();

    vault(&dir)
        .args(["transfer", "lots", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount format"));

    vault(&dir)
        .args(["transfer", "100", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transfer amount or duration"));
}

#[test]
fn negative_amount_reaches_validation() {
    let dir = TempDir::new().unwrap();

    vault(&dir)
        .args(["transfer", "-5", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transfer amount or duration"));

    vault(&dir)
        .args(["--json", "transfer", "-5", "-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"error\""))
        .stdout(predicate::str::contains("Invalid transfer amount or duration"));
}

#[test]
fn corrupt_record_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("data").join("vault_data.json"), "garbage").unwrap();

    vault(&dir)
        .args(["--json", "balance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"budget_cycle_active\": false"));
}

#[test]
fn export_yaml_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("snapshot.yaml");

    vault(&dir)
        .args(["export", "--format", "yaml", "--output"])
        .arg(&out)
        .assert()
        .success();

    let yaml = std::fs::read_to_string(&out).unwrap();
    assert!(yaml.starts_with("# Budget Vault Export"));
    assert!(yaml.contains("main_account: 5000.0"));
}

#[test]
fn init_writes_settings_and_record() {
    let dir = TempDir::new().unwrap();

    vault(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("vault_data.json").exists());
}
