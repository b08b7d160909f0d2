//! CLI and basic command tests

mod common;

use common::{mxf, read_store, setup_home, write_config, write_session};
use predicates::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let home = setup_home();
    mxf(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Maximo work orders"));
}

#[test]
fn test_version_displays() {
    let home = setup_home();
    mxf(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mxf"));
}

#[test]
fn test_unknown_command_fails() {
    let home = setup_home();
    mxf(&home)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_generate() {
    let home = setup_home();
    mxf(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mxf"));
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let home = setup_home();
    mxf(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:9080/maximo/oslc"))
        .stdout(predicate::str::contains("MXWO"));
}

#[test]
fn test_config_set_and_reset_url() {
    let home = setup_home();

    mxf(&home)
        .args(["config", "set-url", "https://mx.example.com/maximo/oslc/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base URL set"));
    assert!(read_store(&home).contains("https://mx.example.com/maximo/oslc"));

    mxf(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://mx.example.com/maximo/oslc"));

    mxf(&home).args(["config", "reset-url"]).assert().success();
    mxf(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:9080/maximo/oslc"));
}

#[test]
fn test_config_set_url_rejects_invalid_url() {
    let home = setup_home();
    mxf(&home)
        .args(["config", "set-url", "ftp://mx.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme"));
    assert!(!read_store(&home).contains("baseUrl"));
}

#[test]
fn test_base_url_precedence() {
    let home = setup_home();
    write_config(&home, "base_url: http://from-file:9080/maximo/oslc\n");

    mxf(&home)
        .args(["config", "set-url", "http://from-store:9080/maximo/oslc"])
        .assert()
        .success();

    let output = mxf(&home)
        .env("MXF_BASE_URL", "http://from-env:9080/maximo/oslc")
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["data"]["base_url"],
        "http://from-env:9080/maximo/oslc"
    );

    let output = mxf(&home)
        .env("MXF_BASE_URL", "http://from-env:9080/maximo/oslc")
        .args(["--base-url", "http://from-flag:9080/maximo/oslc"])
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    assert_eq!(
        stdout_json(&output)["data"]["base_url"],
        "http://from-flag:9080/maximo/oslc"
    );

    let output = mxf(&home)
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    assert_eq!(
        stdout_json(&output)["data"]["base_url"],
        "http://from-store:9080/maximo/oslc"
    );
}

#[test]
fn test_config_file_settings_are_loaded() {
    let home = setup_home();
    write_config(
        &home,
        "object_structure: AQWO\npage_size: 50\nfetch_policy: best-effort\n",
    );

    let output = mxf(&home)
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    let data = &stdout_json(&output)["data"];
    assert_eq!(data["object_structure"], "AQWO");
    assert_eq!(data["page_size"], 50);
    assert_eq!(data["fetch_policy"], "best-effort");
}

#[test]
fn test_malformed_config_is_reported() {
    let home = setup_home();
    write_config(&home, "page_size: [not, a, number\n");
    mxf(&home).args(["config", "show"]).assert().failure();
}

#[test]
fn test_config_path() {
    let home = setup_home();
    mxf(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"))
        .stdout(predicate::str::contains("store.yaml"));
}

// ============================================================================
// Session Command Tests
// ============================================================================

#[test]
fn test_whoami_not_logged_in() {
    let home = setup_home();
    mxf(&home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_whoami_shows_stored_user_without_password() {
    let home = setup_home();
    write_session(&home, "abc123");
    mxf(&home)
        .args(["whoami", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maxadmin"))
        .stdout(predicate::str::contains("abc123").not());
}

#[test]
fn test_login_without_credentials_fails() {
    let home = setup_home();
    mxf(&home)
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username and password are both required"));
}

#[test]
fn test_logout_clears_session_when_server_unreachable() {
    let home = setup_home();
    write_session(&home, "abc123");
    assert!(read_store(&home).contains("userData"));

    mxf(&home)
        .args(["--base-url", "http://127.0.0.1:9/maximo/oslc", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!read_store(&home).contains("userData"));
}

#[test]
fn test_logout_clears_session_despite_malformed_config() {
    let home = setup_home();
    write_config(&home, "page_size: many\n");
    write_session(&home, "tok");

    mxf(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!read_store(&home).contains("userData"));
    assert!(!read_store(&home).contains("tok"));
}

#[test]
fn test_logout_discards_damaged_store() {
    let home = setup_home();
    let data = home.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(
        data.join("store.yaml"),
        "userData: '{\"username\":\"maxadmin\",\"password\":\"maxadmin\"\n",
    )
    .unwrap();

    mxf(&home)
        .args(["--base-url", "http://127.0.0.1:9/maximo/oslc", "logout"])
        .assert()
        .success();
    assert!(!read_store(&home).contains("maxadmin"));
}

#[test]
fn test_comment_only_config_is_accepted() {
    let home = setup_home();
    write_config(&home, "# base_url: http://mx.example.com/maximo/oslc\n");
    mxf(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:9080/maximo/oslc"));
}

#[test]
fn test_command_requires_login() {
    let home = setup_home();
    mxf(&home)
        .args(["wo", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session expired or not logged in"));
}

#[test]
fn test_json_failure_envelope() {
    let home = setup_home();
    let output = mxf(&home)
        .args(["worklog", "list", "1", "-o", "json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let envelope = stdout_json(&output);
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["kind"], "session_expired");
    assert!(envelope.get("data").is_none());
}

// ============================================================================
// Against a mock backend
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_list_work_orders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/maximo/oslc/login"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "JSESSIONID=s3ss; Path=/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maximo/oslc/os/MXWO"))
        .and(header("cookie", "JSESSIONID=s3ss"))
        .and(query_param("pageno", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "member": [
                {"workorderid": 11, "wonum": "1001", "description": "Pump leak", "status": "INPRG"},
                {"workorderid": 12, "wonum": "1002", "description": "Filter", "status": "WAPPR"}
            ]
        })))
        .mount(&server)
        .await;

    let home = setup_home();
    let base = format!("{}/maximo/oslc", server.uri());
    mxf(&home)
        .args(["config", "set-url", &base])
        .assert()
        .success();
    mxf(&home)
        .args(["login", "-u", "maxadmin", "-p", "maxadmin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as"));

    mxf(&home)
        .args(["wo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pump leak"))
        .stdout(predicate::str::contains("2 work orders found"));

    let output = mxf(&home)
        .args(["wo", "list", "--status", "wappr", "-o", "json"])
        .output()
        .unwrap();
    let envelope = stdout_json(&output);
    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["data"].as_array().unwrap().len(), 1);
    assert_eq!(envelope["data"][0]["wonum"], "1002");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_worklog_add_reports_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/maximo/oslc/os/MXWO/7"))
        .and(header("patchtype", "MERGE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let home = setup_home();
    write_session(&home, "abc123");
    mxf(&home)
        .args(["--base-url", &format!("{}/maximo/oslc", server.uri())])
        .args(["worklog", "add", "7", "-d", "Checked seals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added work log to work order"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_message_reaches_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "oslc:Error": {"oslc:message": "BMXAA4195E - Labor code is not valid."}
        })))
        .mount(&server)
        .await;

    let home = setup_home();
    write_session(&home, "abc123");
    mxf(&home)
        .args(["--base-url", &format!("{}/maximo/oslc", server.uri())])
        .args(["labtrans", "add", "7", "-l", "NOBODY", "--orgid", "EAGLENA", "--hours", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BMXAA4195E - Labor code is not valid."));
}
