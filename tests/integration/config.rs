use pilot::config::Config;

use crate::common::{make_temp_dir, read_store, run, seeded_dir, stdout_of};

#[test]
fn config_command_prints_items() {
    let dir = seeded_dir("config-show", true);
    let output = run(&dir, &["config"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("STORE_PATH"));
    assert!(stdout.contains("store.json"));
    assert!(stdout.contains("COLORED_TITLES"));
}

#[test]
fn config_set_writes_the_file() {
    let dir = make_temp_dir("config-set");
    let output = run(&dir, &["config", "--set", "STORE_PATH=data/testers.json"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Changed STORE_PATH from pilot-store.json to data/testers.json"));

    let cfg = Config::load_from(dir.join("config.json")).expect("config should reload");
    assert_eq!(cfg.store_path(), dir.join("data/testers.json"));
}

#[test]
fn invalid_config_stops_startup() {
    let dir = make_temp_dir("config-bad");
    std::fs::write(dir.join("config.json"), "{ not json").unwrap();
    let output = run(&dir, &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid JSON"));
}

#[test]
fn broken_store_only_stops_tester_commands() {
    let dir = seeded_dir("config-broken-store", true);
    std::fs::write(dir.join("store.json"), "{ broken").unwrap();

    let output = run(&dir, &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid store document"));

    let output = run(&dir, &["help"]);
    assert!(output.status.success());

    let output = run(&dir, &["config", "--set", "STORE_PATH=fresh.json"]);
    assert!(output.status.success());

    let output = run(&dir, &["list"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("No testers."));
}

#[test]
fn disabled_file_logging_leaves_no_log() {
    let dir = seeded_dir("config-nolog", true);
    let output = run(&dir, &["config", "--set", "file_logging_enabled=no"]);
    assert!(output.status.success());
    let output = run(&dir, &["add", "-e", "quiet@example.com", "-a", "42"]);
    assert!(output.status.success());
    assert!(!dir.join("logs").exists());
    assert!(
        read_store(&dir)
            .state()
            .testers
            .iter()
            .any(|t| t.email == "quiet@example.com")
    );
}
