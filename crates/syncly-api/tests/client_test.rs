#![allow(clippy::unwrap_used)]
// Integration tests for the REST executor and endpoint catalog using wiremock.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use syncly_api::models::Folder;
use syncly_api::query::Query;
use syncly_api::{ApiSession, Client, Error, Method, Payload, TransportConfig};

const API_KEY: &str = "abc123-test-key";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/rest/", server.uri())).unwrap();
    let session = ApiSession::new(base_url, &SecretString::from(API_KEY.to_owned())).unwrap();
    let client = Client::new(session, &TransportConfig::default()).unwrap();
    (server, client)
}

/// Serves back whatever was last PUT to it.
#[derive(Clone, Default)]
struct ResourceStore(Arc<Mutex<Option<serde_json::Value>>>);

impl Respond for ResourceStore {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut stored = self.0.lock().unwrap();
        if request.method.as_str() == "PUT" {
            *stored = Some(serde_json::from_slice(&request.body).unwrap());
            return ResponseTemplate::new(200);
        }
        match stored.as_ref() {
            Some(value) => ResponseTemplate::new(200).set_body_json(value),
            None => ResponseTemplate::new(404),
        }
    }
}

// ── Executor ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_requests_carry_api_key_and_content_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/system/status"))
        .and(header("X-API-Key", API_KEY))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "myID": "P56IOI7-MZJNU2Y-IQGDREY-DM2MGTI-MGL3BXN-PQ6W5BM-TBBZ4TJ-XZWICQ2",
            "uptime": 3600,
            "cpuPercent": 0.5,
            "startTime": "2024-05-01T08:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client.get_system_status().await.unwrap();
    assert_eq!(status.uptime, 3600);
    assert!(status.my_id.starts_with("P56IOI7"));
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/system/version"))
        .respond_with(ResponseTemplate::new(403).set_body_string("CSRF Error"))
        .mount(&server)
        .await;

    let err = client.get_system_version().await.unwrap_err();
    assert!(
        matches!(err, Error::Api { status: 403, .. }),
        "expected Api 403, got: {err:?}"
    );
    assert!(err.is_auth_rejected());
}

#[tokio::test]
async fn test_not_found_is_classified() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/config/folders/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get_config_folder("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_text_body_on_json_endpoint_is_malformed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/system/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let err = client.get_system_ping().await.unwrap_err();
    match err {
        Error::MalformedResponse { body, .. } => assert_eq!(body, "pong"),
        other => panic!("expected MalformedResponse, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_execute_decodes_by_content_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/system/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ping": "pong"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/system/log.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("2024-05-01 INFO: ready\n"))
        .mount(&server)
        .await;

    let json_payload = client
        .execute(Method::GET, &["system", "ping"], &Query::new(), None::<&()>)
        .await
        .unwrap();
    assert_eq!(json_payload, Payload::Json(json!({"ping": "pong"})));

    let text = client.get_system_log_txt(None).await.unwrap();
    assert_eq!(text, "2024-05-01 INFO: ready\n");
}

#[tokio::test]
async fn test_connection_refused_is_transient() {
    let session = ApiSession::new(
        Url::parse("http://127.0.0.1:1/rest/").unwrap(),
        &SecretString::from(API_KEY.to_owned()),
    )
    .unwrap();
    let client = Client::new(session, &TransportConfig::default()).unwrap();

    let err = client.get_health().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_transient());
}

// ── Endpoint shapes ─────────────────────────────────────────────────

#[tokio::test]
async fn test_scan_sends_folder_and_subdirectory() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/db/scan"))
        .and(query_param("folder", "abcd-1234"))
        .and(query_param("sub", "photos/2024"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .post_db_scan(Some("abcd-1234"), Some("photos/2024"), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_absent_optional_params_are_omitted() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/db/completion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"completion": 100})))
        .mount(&server)
        .await;

    let completion = client.get_db_completion(None, None).await.unwrap();
    assert!((completion.completion - 100.0).abs() < f64::EPSILON);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_patch_sends_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/config/folders/abcd-1234"))
        .and(body_json(json!({"paused": true})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .patch_config_folder("abcd-1234", &json!({"paused": true}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_pending_device_delete_uses_query() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/cluster/pending/devices"))
        .and(query_param("device", "AAAA-BBBB"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_cluster_pending_device("AAAA-BBBB").await.unwrap();
}

#[tokio::test]
async fn test_support_bundle_is_binary() {
    let (server, client) = setup().await;
    let zip_magic = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff];

    Mock::given(method("GET"))
        .and(path("/rest/debug/support"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(zip_magic.clone(), "application/zip"),
        )
        .mount(&server)
        .await;

    let bytes = client.get_debug_support().await.unwrap();
    assert_eq!(bytes.as_ref(), zip_magic.as_slice());
}

#[tokio::test]
async fn test_pending_folders_parse() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/cluster/pending/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cpkn4-57ysy": {
                "offeredBy": {
                    "SMAUPFO-UJRMUFB-YQ2X2L2-QZJAMHL-DKTBWOT-SHTYLXZ-JH6LWK2-PWDXGAE": {
                        "time": "2024-05-01T09:00:00Z",
                        "label": "Camera",
                        "receiveEncrypted": false,
                        "remoteEncrypted": false
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let pending = client.get_cluster_pending_folders(None).await.unwrap();
    let offers = &pending["cpkn4-57ysy"].offered_by;
    assert_eq!(offers.len(), 1);
    assert_eq!(offers.values().next().unwrap().label, "Camera");
}

// ── Round trip ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_folder_put_then_get_round_trips() {
    let (server, client) = setup().await;

    Mock::given(path("/rest/config/folders/abcd-1234"))
        .respond_with(ResourceStore::default())
        .mount(&server)
        .await;

    let mut folder: Folder = serde_json::from_value(json!({
        "id": "abcd-1234",
        "label": "Documents",
        "path": "/home/user/Documents",
        "type": "sendreceive",
        "rescanIntervalS": 3600,
        "fsWatcherEnabled": true,
        "fsWatcherDelayS": 10,
        "minDiskFree": {"value": 1, "unit": "%"},
        "versioning": {"type": "simple", "params": {"keep": "5"}, "cleanupIntervalS": 3600},
        "syncXattrs": false
    }))
    .unwrap();
    folder.paused = true;

    client.put_config_folder("abcd-1234", &folder).await.unwrap();
    let fetched = client.get_config_folder("abcd-1234").await.unwrap();

    assert_eq!(fetched, folder);
    assert_eq!(fetched.extra.get("syncXattrs"), Some(&json!(false)));
}
