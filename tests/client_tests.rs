//! Client tests against a mock OSLC backend

use chrono::NaiveDate;
use mxfield::client::MaximoClient;
use mxfield::core::error::{ClientError, ErrorKind, GENERIC_SERVER_MESSAGE};
use mxfield::core::outcome::Outcome;
use mxfield::core::resource::{FetchPolicy, ResourceKind};
use mxfield::core::session::Session;
use mxfield::core::store::{load_session, save_session, KeyValueStore, MemoryStore};
use mxfield::core::WorkOrderStatus;
use mxfield::entities::{AttachmentUpload, NewWorkLog, WorkOrder};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OS_ROOT: &str = "/maximo/oslc/os/MXWO";
const TOKEN: &str = "tok";

fn client_for(server: &MockServer) -> MaximoClient {
    MaximoClient::new(&format!("{}/maximo/oslc", server.uri()), "MXWO").unwrap()
}

fn detail_link(server: &MockServer, n: u32) -> String {
    format!("{}{}/1/worklog/0-{}", server.uri(), OS_ROOT, n)
}

async fn mount_worklog_collection(server: &MockServer, links: &[String]) {
    let members: Vec<Value> = links.iter().map(|l| json!({ "localref": l })).collect();
    Mock::given(method("GET"))
        .and(path(format!("{}/1/worklog", OS_ROOT)))
        .and(query_param("lean", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "member": members })))
        .mount(server)
        .await;
}

async fn mount_worklog_detail(server: &MockServer, n: u32, status: u16) {
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({
            "worklogid": n,
            "description": format!("entry {}", n),
            "logtype": "WORK"
        }))
    } else {
        ResponseTemplate::new(status)
    };
    Mock::given(method("GET"))
        .and(path(format!("{}/1/worklog/0-{}", OS_ROOT, n)))
        .respond_with(template)
        .mount(server)
        .await;
}

// =========================================================================
// Login / logout
// =========================================================================

#[tokio::test]
async fn test_login_stores_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/maximo/oslc/login"))
        .and(header("maxauth", "bWF4YWRtaW46bWF4YWRtaW4="))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "JSESSIONID=abc123; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = MemoryStore::new();
    let session = client_for(&server)
        .login(&mut store, "maxadmin", "maxadmin")
        .await
        .unwrap();

    assert_eq!(session.token, "abc123");
    let stored = load_session(&store).unwrap().unwrap();
    assert_eq!(stored.username, "maxadmin");
    assert_eq!(stored.token, "abc123");
}

#[tokio::test]
async fn test_login_rejected_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/maximo/oslc/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "Error": {"message": "BMXAA7901E - You cannot log in at this time."}
        })))
        .mount(&server)
        .await;

    let mut store = MemoryStore::new();
    let err = client_for(&server)
        .login(&mut store, "maxadmin", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "BMXAA7901E - You cannot log in at this time.");
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(load_session(&store).unwrap().is_none());
}

#[tokio::test]
async fn test_login_requires_credentials_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = MemoryStore::new();
    let err = client_for(&server)
        .login(&mut store, "  ", "secret")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingCredentials));
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/maximo/oslc/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = MemoryStore::new();
    save_session(&mut store, &Session::new("maxadmin", "maxadmin", "abc123")).unwrap();
    store.set("baseUrl", "http://other:9080/maximo/oslc").unwrap();

    client_for(&server).logout(&mut store).await.unwrap();

    assert!(load_session(&store).unwrap().is_none());
    // Only the session goes away
    assert!(store.get("baseUrl").unwrap().is_some());
}

// =========================================================================
// Collection expansion
// =========================================================================

#[tokio::test]
async fn test_expanded_collection_fetches_every_detail() {
    let server = MockServer::start().await;
    let links: Vec<String> = (1..=3).map(|n| detail_link(&server, n)).collect();
    mount_worklog_collection(&server, &links).await;
    for n in 1..=3 {
        mount_worklog_detail(&server, n, 200).await;
    }

    let logs = client_for(&server).work_logs(TOKEN, "1").await.unwrap();

    assert!(logs.is_complete());
    assert_eq!(logs.items.len(), 3);
    let descriptions: Vec<_> = logs
        .items
        .iter()
        .map(|l| l.description.clone().unwrap())
        .collect();
    assert_eq!(descriptions, vec!["entry 1", "entry 2", "entry 3"]);
}

#[tokio::test]
async fn test_empty_collection_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/1/worklog", OS_ROOT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let logs = client_for(&server).work_logs(TOKEN, "1").await.unwrap();
    assert!(logs.items.is_empty());
    assert!(logs.is_complete());
}

#[tokio::test]
async fn test_collection_401_is_auth_failure_without_detail_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/1/worklog", OS_ROOT)))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/1/worklog/0-1", OS_ROOT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).work_logs(TOKEN, "1").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.kind(), ErrorKind::SessionExpired);
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_failed_detail_fails_whole_listing_by_default() {
    let server = MockServer::start().await;
    let links: Vec<String> = (1..=2).map(|n| detail_link(&server, n)).collect();
    mount_worklog_collection(&server, &links).await;
    mount_worklog_detail(&server, 1, 200).await;
    mount_worklog_detail(&server, 2, 404).await;

    let client = client_for(&server);
    assert_eq!(client.policy(), FetchPolicy::AllOrNothing);
    let err = client.work_logs(TOKEN, "1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_best_effort_keeps_successful_details() {
    let server = MockServer::start().await;
    let links: Vec<String> = (1..=2).map(|n| detail_link(&server, n)).collect();
    mount_worklog_collection(&server, &links).await;
    mount_worklog_detail(&server, 1, 200).await;
    mount_worklog_detail(&server, 2, 500).await;

    let logs = client_for(&server)
        .with_policy(FetchPolicy::BestEffort)
        .work_logs(TOKEN, "1")
        .await
        .unwrap();

    assert_eq!(logs.items.len(), 1);
    assert_eq!(logs.failures.len(), 1);
    assert!(logs.failures[0].url.ends_with("/worklog/0-2"));
    assert_eq!(logs.failures[0].error.status(), Some(500));
}

async fn mount_malformed_worklog_detail(server: &MockServer, n: u32) {
    Mock::given(method("GET"))
        .and(path(format!("{}/1/worklog/0-{}", OS_ROOT, n)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "worklogid": {"x": 1}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_best_effort_reports_undecodable_detail_as_failure() {
    let server = MockServer::start().await;
    let links: Vec<String> = (1..=2).map(|n| detail_link(&server, n)).collect();
    mount_worklog_collection(&server, &links).await;
    mount_worklog_detail(&server, 1, 200).await;
    mount_malformed_worklog_detail(&server, 2).await;

    let logs = client_for(&server)
        .with_policy(FetchPolicy::BestEffort)
        .work_logs(TOKEN, "1")
        .await
        .unwrap();

    assert_eq!(logs.items.len(), 1);
    assert_eq!(logs.items[0].description.as_deref(), Some("entry 1"));
    assert_eq!(logs.failures.len(), 1);
    assert!(logs.failures[0].url.ends_with("/worklog/0-2"));
    assert_eq!(logs.failures[0].error.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn test_all_or_nothing_fails_on_undecodable_detail() {
    let server = MockServer::start().await;
    let links: Vec<String> = (1..=2).map(|n| detail_link(&server, n)).collect();
    mount_worklog_collection(&server, &links).await;
    mount_worklog_detail(&server, 1, 200).await;
    mount_malformed_worklog_detail(&server, 2).await;

    let err = client_for(&server).work_logs(TOKEN, "1").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_loopback_links_are_rebased_onto_base_url() {
    let server = MockServer::start().await;
    let loopback = format!("http://localhost:9080{}/1/worklog/0-7", OS_ROOT);
    mount_worklog_collection(&server, &[loopback]).await;
    mount_worklog_detail(&server, 7, 200).await;

    let logs = client_for(&server).work_logs(TOKEN, "1").await.unwrap();
    assert_eq!(logs.items.len(), 1);
    assert_eq!(logs.items[0].description.as_deref(), Some("entry 7"));
}

#[tokio::test]
async fn test_requests_carry_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/1/wplabor", OS_ROOT)))
        .and(header("cookie", "JSESSIONID=tok"))
        .and(query_param("oslc.select", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "member": [{"wplaborid": 99, "laborcode": "WILSON", "laborhrs": 2.5}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let planned = client_for(&server).planned_labor(TOKEN, "1").await.unwrap();
    assert_eq!(planned.len(), 1);
    assert_eq!(planned[0].wplaborid.as_deref(), Some("99"));
    assert_eq!(planned[0].laborhrs, Some(2.5));
}

// =========================================================================
// Work orders
// =========================================================================

#[tokio::test]
async fn test_list_work_orders_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OS_ROOT))
        .and(query_param("oslc.where", "woclass=\"WORKORDER\""))
        .and(query_param("pageno", "2"))
        .and(query_param("oslc.pageSize", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "member": [
                {"workorderid": 11, "wonum": "1001", "status": "INPRG", "wopriority": 1},
                {"workorderid": 12, "wonum": "1002", "status": "WAPPR"}
            ]
        })))
        .mount(&server)
        .await;

    let page = client_for(&server).list_work_orders(TOKEN, 2).await.unwrap();
    assert_eq!(page.page, 2);
    assert!(page.has_more);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].workorderid.as_deref(), Some("11"));
    assert_eq!(page.items[0].status, Some(WorkOrderStatus::InProgress));
}

#[tokio::test]
async fn test_update_status_sends_patch_override() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/123", OS_ROOT)))
        .and(query_param("properties", "status"))
        .and(header("x-method-override", "PATCH"))
        .and(body_json(json!({"status": "INPRG"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let wo: WorkOrder =
        serde_json::from_value(json!({"workorderid": 123, "status": "WAPPR"})).unwrap();
    let result = client_for(&server)
        .update_status(TOKEN, &wo, &WorkOrderStatus::InProgress)
        .await;

    let outcome = Outcome::from_optional(result);
    assert!(outcome.is_success());
    assert!(outcome.data.is_none());
}

#[tokio::test]
async fn test_rejected_mutation_carries_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/123", OS_ROOT)))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Error": {"message": "BMXAA4590E - Status INPRG is not a valid transition."}
        })))
        .mount(&server)
        .await;

    let wo: WorkOrder =
        serde_json::from_value(json!({"workorderid": 123, "status": "CLOSE"})).unwrap();
    let err = client_for(&server)
        .update_status(TOKEN, &wo, &WorkOrderStatus::InProgress)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "BMXAA4590E - Status INPRG is not a valid transition."
    );
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_rejected_mutation_without_body_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let log = NewWorkLog {
        description: "Checked".to_string(),
        logtype: None,
        clientviewable: false,
    };
    let err = client_for(&server)
        .add_record(TOKEN, "1", &log)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), GENERIC_SERVER_MESSAGE);
}

#[tokio::test]
async fn test_add_work_log_merges_child_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/1", OS_ROOT)))
        .and(header("x-method-override", "PATCH"))
        .and(header("patchtype", "MERGE"))
        .and(body_json(json!({
            "worklog": [{"description": "Replaced gasket", "logtype": "WORK", "clientviewable": false}]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let log = NewWorkLog {
        description: "Replaced gasket".to_string(),
        logtype: Some("WORK".to_string()),
        clientviewable: false,
    };
    let result = client_for(&server).add_record(TOKEN, "1", &log).await.unwrap();
    assert!(result.is_none());
}

// =========================================================================
// Attachments
// =========================================================================

#[tokio::test]
async fn test_upload_attachment_sends_base64_with_document_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{}/1/doclinks", OS_ROOT)))
        .and(header("x-document-meta", "FILE/Attachments"))
        .and(header("x-document-description", "Pump photo"))
        .and(header("slug", "pump.txt"))
        .and(header("content-type", "text/plain"))
        .and(body_string("aGVsbG8gcHVtcA=="))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("pump.txt");
    std::fs::write(&file, "hello pump").unwrap();

    let upload = AttachmentUpload {
        path: file,
        name: "pump.txt".to_string(),
        description: "Pump photo".to_string(),
    };
    client_for(&server)
        .upload_attachment(TOKEN, "1", &upload)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_missing_file_is_local_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let upload = AttachmentUpload {
        path: "/nonexistent/pump.txt".into(),
        name: "pump.txt".to_string(),
        description: "Pump photo".to_string(),
    };
    let err = client_for(&server)
        .upload_attachment(TOKEN, "1", &upload)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Local);
}

#[tokio::test]
async fn test_list_attachments_reads_described_by() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/1/doclinks", OS_ROOT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "member": [{
                "href": format!("{}{}/1/doclinks/77", server.uri(), OS_ROOT),
                "describedBy": {"fileName": "pump.jpg", "docType": "Attachments"}
            }]
        })))
        .mount(&server)
        .await;

    let attachments = client_for(&server).list_attachments(TOKEN, "1").await.unwrap();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].file_name.as_deref(), Some("pump.jpg"));
    assert_eq!(attachments[0].doclink_id().as_deref(), Some("77"));
}

// =========================================================================
// Prediction
// =========================================================================

#[tokio::test]
async fn test_prediction_input_and_recommendation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OS_ROOT))
        .and(query_param("oslc.where", "workorderid=42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "member": [{
                "failurecode": "PUMPS",
                "problemcode": "LEAK",
                "wopriority": 2,
                "asset": [{
                    "assetnum": "11430",
                    "assettype": "PUMP",
                    "status": "OPERATING",
                    "installdate": "2015-06-01"
                }]
            }]
        })))
        .mount(&server)
        .await;

    let expected = json!({
        "ASSETTYPE": "PUMP",
        "FAILURECODE": "PUMPS",
        "PROBLEMCODE": "LEAK",
        "FREQUENCE_PANNE": 2,
        "AGE_EQUIPMENT": 8,
        "PRIORITY": "2"
    });
    Mock::given(method("POST"))
        .and(path("/model/predict"))
        .and(body_json(expected.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"action": "Replace seal"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_predict_url(Some(format!("{}/model", server.uri())));
    let today = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
    let input = client
        .prediction_input_on(TOKEN, "42", today)
        .await
        .unwrap();
    assert_eq!(serde_json::to_value(&input).unwrap(), expected);

    let recommendation = client.predict(&input).await.unwrap().unwrap();
    assert_eq!(recommendation.action.as_deref(), Some("Replace seal"));
}

#[tokio::test]
async fn test_prediction_service_error_field_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": "unknown asset type"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).with_predict_url(Some(server.uri()));
    let input = serde_json::from_value(json!({
        "ASSETTYPE": "ROBOT",
        "FAILURECODE": null,
        "PROBLEMCODE": null,
        "FREQUENCE_PANNE": 2,
        "AGE_EQUIPMENT": 3,
        "PRIORITY": ""
    }))
    .unwrap();
    let err = client.predict(&input).await.unwrap_err();
    assert_eq!(err.to_string(), "unknown asset type");
}

#[tokio::test]
async fn test_predict_without_service_is_none() {
    let server = MockServer::start().await;
    let input = serde_json::from_value(json!({
        "ASSETTYPE": "PUMP",
        "FAILURECODE": null,
        "PROBLEMCODE": null,
        "FREQUENCE_PANNE": 2,
        "AGE_EQUIPMENT": 3,
        "PRIORITY": "1"
    }))
    .unwrap();
    assert!(client_for(&server).predict(&input).await.unwrap().is_none());
}

#[tokio::test]
async fn test_direct_collections_are_not_expanded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_records::<Value>(TOKEN, "1", ResourceKind::PlannedLabor)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Local);
}
