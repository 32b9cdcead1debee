use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

use pilot::client::store::FileStore;
use pilot::config::Config;
use pilot::core::context::AppContext;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_pilot"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Plain titles so assertions can match table text directly.
pub fn write_config(dir: &Path) {
    let cfg = r#"{
      "store_path": { "value": "store.json", "description": "store" },
      "file_logging_enabled": { "value": "True", "description": "file logging" },
      "colored_titles": { "value": "False", "description": "colors" }
    }"#;
    fs::write(dir.join("config.json"), cfg).unwrap();
}

/// One app (Apple ID 42) with a default and a QA group, an internal tester
/// with access and an external tester in QA with two devices.
pub fn write_store(dir: &Path, team_listing_allowed: bool) {
    let store = format!(
        r#"{{
      "team_listing_allowed": {team_listing_allowed},
      "apps": [ {{ "apple_id": 42, "bundle_id": "com.example.beta", "name": "Beta" }} ],
      "groups": [
        {{ "app_id": 42, "name": "Everyone", "is_default": true, "testers": [] }},
        {{ "app_id": 42, "name": "QA", "is_default": false, "testers": ["ext@example.com"] }}
      ],
      "testers": [
        {{ "kind": "internal", "email": "staff@example.com", "first_name": "Sam", "last_name": "Staff" }},
        {{
          "kind": "external", "email": "ext@example.com", "first_name": "Eli", "last_name": "Ext",
          "devices": [
            {{ "model": "iPhone 15", "os_version": "17.4" }},
            {{ "model": "iPad Air", "os_version": "17.2" }}
          ],
          "latest_install": {{
            "short_version": "2.1", "build_version": "310",
            "installed_at": "2024-03-07T09:05:00Z"
          }}
        }}
      ],
      "app_access": [ {{ "app_id": 42, "email": "staff@example.com" }} ]
    }}"#
    );
    fs::write(dir.join("store.json"), store).unwrap();
}

pub fn seeded_dir(prefix: &str, team_listing_allowed: bool) -> PathBuf {
    let dir = make_temp_dir(prefix);
    write_config(&dir);
    write_store(&dir, team_listing_allowed);
    dir
}

pub fn run(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("config.json");
    let logs = dir.join("logs");
    Command::new(binary_path())
        .current_dir(dir)
        .arg("--config")
        .arg(&config)
        .arg("--logs")
        .arg(&logs)
        .args(args)
        .output()
        .expect("failed to run binary")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn build_context(dir: &Path) -> AppContext {
    let config = Config::load_from(dir.join("config.json")).expect("config should load");
    let store = FileStore::open(config.store_path()).expect("store should open");
    AppContext::with_client(config, Box::new(store), dir.join("logs"))
}

pub fn read_store(dir: &Path) -> FileStore {
    FileStore::open(dir.join("store.json")).expect("store should reopen")
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let mut entries = fs::read_dir(dir.join("logs")).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
