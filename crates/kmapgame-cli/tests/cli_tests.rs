//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kmapgame() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("kmapgame").unwrap()
}

#[test]
fn help_output() {
    kmapgame()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("K-map boolean simplification quiz"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("attack"))
        .stdout(predicate::str::contains("leaderboard"));
}

#[test]
fn version_output() {
    kmapgame()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kmapgame"));
}

#[test]
fn play_requires_a_name() {
    kmapgame().arg("play").assert().failure();
}

#[test]
fn unknown_difficulty_is_rejected() {
    kmapgame()
        .arg("play")
        .arg("--name")
        .arg("adel")
        .arg("--difficulty")
        .arg("nightmare")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));
}

#[test]
fn unknown_attack_tier_is_rejected() {
    kmapgame()
        .arg("attack")
        .arg("--name")
        .arg("adel")
        .arg("--tier")
        .arg("timed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown time-attack tier"));
}

#[test]
fn init_creates_a_config() {
    let dir = TempDir::new().unwrap();

    kmapgame()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created kmapgame.toml"));

    assert!(dir.path().join("kmapgame.toml").exists());
}

#[test]
fn init_skips_an_existing_config() {
    let dir = TempDir::new().unwrap();

    kmapgame()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    kmapgame()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn missing_config_file_is_an_error() {
    kmapgame()
        .arg("leaderboard")
        .arg("daily")
        .arg("--config")
        .arg("no-such-config.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
