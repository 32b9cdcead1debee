use crate::common::{make_temp_dir, read_log_contents, run, seeded_dir, stderr_of, stdout_of};

#[test]
fn no_command_prints_overview() {
    let dir = seeded_dir("bin-help", true);
    let output = run(&dir, &[]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("remove"));
}

#[test]
fn unknown_command_exits_non_zero() {
    let dir = seeded_dir("bin-unknown", true);
    let output = run(&dir, &["invite"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Unknown command: invite"));
}

#[test]
fn unknown_flag_fails_before_startup() {
    let dir = make_temp_dir("bin-flag");
    let output = run(&dir, &["list", "--verbose"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Unknown argument: --verbose"));
}

#[test]
fn find_prints_detail_table() {
    let dir = seeded_dir("bin-find", true);
    let output = run(&dir, &["find", "--email", "EXT@example.com"]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("ext@example.com"));
    assert!(stdout.contains("2.1 (310)"));
    assert!(stdout.contains("03/07/24 09:05"));
    assert!(stdout.contains("2 Devices"));
    assert!(stdout.contains("\u{2022} iPhone 15, iOS 17.4"));
    assert!(stdout.contains("\u{2022} iPad Air, iOS 17.2"));
}

#[test]
fn find_missing_tester_reports_not_found() {
    let dir = seeded_dir("bin-find-missing", true);
    let output = run(&dir, &["find", "--email", "nobody@example.com"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Tester nobody@example.com not found"));
}

#[test]
fn add_creates_tester_in_default_group_and_logs() {
    let dir = seeded_dir("bin-add", true);
    let output = run(
        &dir,
        &["add", "-e", "fresh@example.com", "--first-name", "Fay", "-a", "42"],
    );
    assert!(output.status.success(), "{}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Successfully added tester: fresh@example.com to your account"));
    assert!(stdout.contains("Successfully added tester to app Beta in group(s) Everyone"));

    let log = read_log_contents(&dir).expect("session log should exist");
    assert!(log.contains("OK"));
    assert!(log.contains("fresh@example.com"));
}

#[test]
fn add_without_app_asks_for_a_filter() {
    let dir = seeded_dir("bin-add-noapp", true);
    let output = run(&dir, &["add", "--email", "fresh@example.com"]);
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("--apple-id"));
    assert!(stderr.contains("--app-identifier"));
}

#[test]
fn list_by_app_omits_device_columns() {
    let dir = seeded_dir("bin-list-app", true);
    let output = run(&dir, &["list", "--app-identifier", "com.example.beta"]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Internal Testers"));
    assert!(stdout.contains("staff@example.com"));
    assert!(stdout.contains("QA"));
    assert!(!stdout.contains("Device Count"));
}

#[test]
fn global_list_includes_device_columns() {
    let dir = seeded_dir("bin-list-all", true);
    let output = run(&dir, &["list"]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Device Count"));
    assert!(stdout.contains("Latest Version"));
}

#[test]
fn global_list_without_permission_prints_nothing() {
    let dir = seeded_dir("bin-list-denied", false);
    let output = run(&dir, &["list"]);
    assert!(!output.status.success());
    assert!(!stdout_of(&output).contains("Internal Testers"));
    assert!(stderr_of(&output).contains("provide an app identifier"));
}

#[test]
fn help_flag_after_command_prints_usage() {
    let dir = seeded_dir("bin-usage", true);
    let output = run(&dir, &["remove", "-h"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("Usage: pilot remove"));
}

#[cfg(target_os = "linux")]
#[test]
fn failed_stdout_write_exits_non_zero() {
    use std::fs::OpenOptions;
    use std::process::{Command, Stdio};

    let dir = seeded_dir("bin-full", true);
    let full = OpenOptions::new().write(true).open("/dev/full").unwrap();
    let output = Command::new(crate::common::binary_path())
        .arg("--config")
        .arg(dir.join("config.json"))
        .arg("--logs")
        .arg(dir.join("logs"))
        .args(["list", "--apple-id", "42"])
        .stdout(Stdio::from(full))
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(1));
}
