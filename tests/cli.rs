use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn zxb(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zxb").unwrap();
    cmd.env("ZXB_HOME", home)
        .env("EDITOR", "true")
        .env_remove("ZXB_LOG");
    cmd
}

fn home_with_script(slug: &str) -> TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    let scripts = temp_dir.path().join("scripts");
    fs::create_dir_all(&scripts).unwrap();
    fs::write(scripts.join(format!("{}.mjs", slug)), "#!/usr/bin/env zx\n").unwrap();
    temp_dir
}

#[test]
fn test_no_command_prints_help() {
    let temp_dir = tempfile::tempdir().unwrap();

    zxb(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: zxb"))
        .stdout(predicate::str::contains("add_source <dir>"))
        .stdout(predicate::str::contains("install <url>"));

    // help never creates the tool home
    assert!(!temp_dir.path().join("config.json").exists());
}

#[test]
fn test_help_word_and_flag() {
    let temp_dir = tempfile::tempdir().unwrap();

    zxb(temp_dir.path())
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"));

    zxb(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_first_run_creates_home() {
    let temp_dir = tempfile::tempdir().unwrap();

    zxb(temp_dir.path()).arg("list").assert().success();

    assert!(temp_dir.path().join("config.json").exists());
    assert!(temp_dir.path().join("bin").is_dir());
    assert!(temp_dir.path().join("scripts").is_dir());
}

#[cfg(unix)]
#[test]
fn test_link_is_idempotent() {
    let temp_dir = home_with_script("zxbtestlink");

    zxb(temp_dir.path())
        .arg("link")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done!"));

    let bin = temp_dir.path().join("bin").join("zxbtestlink");
    assert_eq!(
        fs::read_link(&bin).unwrap(),
        temp_dir.path().join("scripts").join("zxbtestlink.mjs")
    );

    zxb(temp_dir.path())
        .arg("link")
        .assert()
        .success()
        .stdout(predicate::str::contains("All executables are already linked."));
}

#[cfg(unix)]
#[test]
fn test_list_shows_link_state() {
    let temp_dir = home_with_script("zxbtestlist");

    zxb(temp_dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("zxbtestlist"))
        .stdout(predicate::str::contains("script executable missing"));

    zxb(temp_dir.path()).arg("link").assert().success();

    zxb(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("zxbtestlist"))
        .stdout(predicate::str::contains("script executable missing").not());
}

#[cfg(unix)]
#[test]
fn test_implicit_create_then_remove() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("scripts").join("zxbtestnew.mjs");
    let bin = temp_dir.path().join("bin").join("zxbtestnew");

    zxb(temp_dir.path())
        .arg("zxbtestnew")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    assert!(file.exists());
    assert!(bin.symlink_metadata().is_ok());

    zxb(temp_dir.path())
        .arg("rm")
        .arg("zxbtestnew")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed zxbtestnew"));

    assert!(!file.exists());
    assert!(bin.symlink_metadata().is_err());
}

#[cfg(unix)]
#[test]
fn test_remove_defaults_to_no() {
    let temp_dir = home_with_script("zxbtestkeep");

    zxb(temp_dir.path())
        .arg("remove")
        .arg("zxbtestkeep")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    let script = temp_dir.path().join("scripts").join("zxbtestkeep.mjs");
    assert!(script.exists());
}

#[cfg(unix)]
#[test]
fn test_collision_with_system_command_exits_1() {
    let temp_dir = tempfile::tempdir().unwrap();

    zxb(temp_dir.path())
        .arg("create")
        .arg("sh")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already aliased"));

    assert!(!temp_dir.path().join("scripts").join("sh.mjs").exists());
}

#[test]
fn test_command_errors_exit_0() {
    let temp_dir = tempfile::tempdir().unwrap();

    zxb(temp_dir.path())
        .arg("remove")
        .assert()
        .success()
        .stderr(predicate::str::contains("Usage: zxb remove <name>"));
}

#[cfg(unix)]
#[test]
fn test_clean_removes_orphans() {
    let temp_dir = tempfile::tempdir().unwrap();
    zxb(temp_dir.path()).arg("list").assert().success();
    let orphan = temp_dir.path().join("bin").join("leftover");
    fs::write(&orphan, "").unwrap();

    zxb(temp_dir.path())
        .arg("clean")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bins directory is clean!"));

    assert!(!orphan.exists());
}

#[cfg(unix)]
#[test]
fn test_add_source_registers_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let extra = temp_dir.path().join("extra");
    fs::create_dir_all(&extra).unwrap();
    fs::write(extra.join("zxbtestextra.mjs"), "#!/usr/bin/env zx\n").unwrap();

    zxb(temp_dir.path())
        .arg("add_source")
        .arg(&extra)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added source"));

    let config = fs::read_to_string(temp_dir.path().join("config.json")).unwrap();
    assert!(config.contains("extra"));
    assert!(temp_dir.path().join("bin").join("zxbtestextra").exists());
}

#[cfg(unix)]
#[test]
fn test_edit_without_name_links_sources() {
    let temp_dir = tempfile::tempdir().unwrap();

    zxb(temp_dir.path()).arg("edit").assert().success();

    let link = temp_dir.path().join("sources").join("scripts");
    assert_eq!(fs::read_link(link).unwrap(), temp_dir.path().join("scripts"));
}
