//! Integration tests for the OpenSesame CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  The
//! master password comes from `OPENSESAME_MASTER_PASSWORD` so nothing
//! prompts; item passwords are piped through stdin.

use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "Tr0ub4dor&3";

/// Helper: get a Command pointing at the opensesame binary.
fn opensesame() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("opensesame").expect("binary should exist")
}

/// Helper: a command run inside `dir` with the master password set.
fn in_dir(dir: &TempDir, password: &str) -> Command {
    let mut cmd = opensesame();
    cmd.current_dir(dir.path())
        .env("OPENSESAME_MASTER_PASSWORD", password)
        .env_remove("RUST_LOG");
    cmd
}

fn login(dir: &TempDir) {
    in_dir(dir, PASSWORD)
        .args(["login", "--email", "a@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as a@x.com"));
}

fn add(dir: &TempDir, title: &str, password: &str) {
    in_dir(dir, PASSWORD)
        .args(["add", "--title", title, "--username", "alice"])
        .write_stdin(format!("{password}\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Added '{title}'")));
}

/// Ids of the stored records, read straight from the store file.
fn stored_ids(dir: &TempDir) -> Vec<String> {
    let data = fs::read_to_string(dir.path().join(".opensesame/vault.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&data).unwrap();
    records
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn help_flag_shows_usage() {
    opensesame()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Client-side encrypted password vault"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn no_args_shows_help() {
    opensesame()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn status_when_signed_out() {
    let tmp = TempDir::new().unwrap();
    opensesame()
        .arg("status")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn list_requires_login() {
    let tmp = TempDir::new().unwrap();
    in_dir(&tmp, PASSWORD)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn login_add_list_show() {
    let tmp = TempDir::new().unwrap();
    login(&tmp);
    add(&tmp, "GitHub", "hunter2-but-longer");

    in_dir(&tmp, PASSWORD)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("hunter2").not());

    let ids = stored_ids(&tmp);
    assert_eq!(ids.len(), 1);

    in_dir(&tmp, PASSWORD)
        .args(["show", &ids[0], "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2-but-longer"));

    // The store holds only the title in plaintext.
    let raw = fs::read_to_string(tmp.path().join(".opensesame/vault.json")).unwrap();
    assert!(raw.contains("GitHub"));
    assert!(!raw.contains("hunter2"));
    assert!(!raw.contains("alice"));
}

#[test]
fn wrong_master_password_is_reported() {
    let tmp = TempDir::new().unwrap();
    login(&tmp);
    add(&tmp, "GitHub", "hunter2-but-longer");

    in_dir(&tmp, "not-the-password")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("master password"));
}

#[test]
fn export_prints_plaintext_json() {
    let tmp = TempDir::new().unwrap();
    login(&tmp);
    add(&tmp, "Bank", "0123456789");

    let output = in_dir(&tmp, PASSWORD).arg("export").output().unwrap();
    assert!(output.status.success());

    let items: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Bank");
    assert_eq!(items[0]["password"], "0123456789");
}

#[test]
fn import_adds_items() {
    let tmp = TempDir::new().unwrap();
    login(&tmp);

    let backup = tmp.path().join("backup.json");
    fs::write(
        &backup,
        r#"[{"title": "Imported", "password": "imported-pw"}, {"title": "Skipped"}]"#,
    )
    .unwrap();

    in_dir(&tmp, PASSWORD)
        .args(["import", backup.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 item(s)"));

    assert_eq!(stored_ids(&tmp).len(), 1);
}

#[test]
fn delete_with_force_removes_item() {
    let tmp = TempDir::new().unwrap();
    login(&tmp);
    add(&tmp, "Temp", "temporary-pw");
    let ids = stored_ids(&tmp);

    in_dir(&tmp, PASSWORD)
        .args(["delete", &ids[0], "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 'Temp'"));

    assert!(stored_ids(&tmp).is_empty());
}

#[test]
fn logout_then_status() {
    let tmp = TempDir::new().unwrap();
    login(&tmp);

    in_dir(&tmp, PASSWORD)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as a@x.com"));

    in_dir(&tmp, PASSWORD)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    in_dir(&tmp, PASSWORD)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn short_master_password_rejected_on_first_login() {
    let tmp = TempDir::new().unwrap();
    in_dir(&tmp, "short")
        .args(["login", "--email", "a@x.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn completions_bash() {
    opensesame()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("opensesame"));
}

#[test]
fn corrupted_first_item_does_not_block_list() {
    let tmp = TempDir::new().unwrap();
    login(&tmp);
    add(&tmp, "First", "first-password");
    add(&tmp, "Second", "second-password");

    let store = tmp.path().join(".opensesame/vault.json");
    let mut records: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    records[0]["iv"] = serde_json::Value::from("AAAA");
    fs::write(&store, serde_json::to_string(&records).unwrap()).unwrap();

    in_dir(&tmp, PASSWORD)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Second"))
        .stdout(predicate::str::contains("<cannot decrypt>"))
        .stderr(predicate::str::contains("1 item(s) could not be decrypted"));
}

#[test]
fn edit_title_and_password() {
    let tmp = TempDir::new().unwrap();
    login(&tmp);
    add(&tmp, "GitHub", "old-password-123");
    let ids = stored_ids(&tmp);

    in_dir(&tmp, PASSWORD)
        .args(["edit", &ids[0], "--title", "GitHub Work", "--password"])
        .write_stdin("new-password-456\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 'GitHub Work'"));

    in_dir(&tmp, PASSWORD)
        .args(["show", &ids[0], "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub Work"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("new-password-456"))
        .stdout(predicate::str::contains("old-password-123").not());
}

#[test]
fn edit_without_changes_fails() {
    let tmp = TempDir::new().unwrap();
    login(&tmp);
    add(&tmp, "GitHub", "old-password-123");
    let ids = stored_ids(&tmp);

    in_dir(&tmp, PASSWORD)
        .args(["edit", &ids[0]])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[cfg(unix)]
#[test]
fn export_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    login(&tmp);
    add(&tmp, "Bank", "0123456789");

    let dest = tmp.path().join("backup.json");
    in_dir(&tmp, PASSWORD)
        .args(["export", "-o", dest.to_str().unwrap()])
        .assert()
        .success();

    let mode = fs::metadata(&dest).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert!(fs::read_to_string(&dest).unwrap().contains("0123456789"));
}
