//! Shared test helpers for integration tests
//!
//! Every command runs against its own temporary home so tests never touch
//! the real configuration or each other.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Helper to get an mxf command bound to `home`
pub fn mxf(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("mxf"));
    cmd.env("MXF_HOME", home.path())
        .env_remove("MXF_BASE_URL")
        .env_remove("MXF_PASSWORD")
        .env_remove("MXF_LOG");
    cmd
}

/// Fresh, empty home directory
pub fn setup_home() -> TempDir {
    TempDir::new().unwrap()
}

/// Write `config.yaml` into the home directory
pub fn write_config(home: &TempDir, yaml: &str) {
    fs::write(home.path().join("config.yaml"), yaml).unwrap();
}

/// Read the local store, or an empty string if nothing was written yet
pub fn read_store(home: &TempDir) -> String {
    fs::read_to_string(home.path().join("data/store.yaml")).unwrap_or_default()
}

/// Seed a logged-in session without talking to a backend
pub fn write_session(home: &TempDir, token: &str) {
    let dir = home.path().join("data");
    fs::create_dir_all(&dir).unwrap();
    let session = format!(
        r#"{{"username":"maxadmin","password":"maxadmin","sessionCookie":"{}"}}"#,
        token
    );
    let store = format!("userData: '{}'\n", session);
    fs::write(dir.join("store.yaml"), store).unwrap();
}
