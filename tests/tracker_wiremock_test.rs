use daiki_sdk::{ClientConfig, Daiki, EventParams, SDK_NAME, SdkError, StatusPolicy, VERSION};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const EVENTS_PATH: &str = "/api/v1/events/";

fn params(value: Value) -> EventParams {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

async fn ingestion_server(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;
    mock_server
}

fn client_for(mock_server: &MockServer, status_policy: StatusPolicy) -> Daiki {
    let config = ClientConfig {
        endpoint: format!("{}{}", mock_server.uri(), EVENTS_PATH),
        status_policy,
        ..Default::default()
    };
    Daiki::with_config(config).unwrap()
}

async fn received_bodies(mock_server: &MockServer) -> Vec<Value> {
    mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.body_json::<Value>().unwrap())
        .collect()
}

#[tokio::test]
async fn test_set_app_id_then_send_uses_that_id() {
    let mock_server = ingestion_server(200, "ok").await;
    let daiki = client_for(&mock_server, StatusPolicy::Lenient);

    daiki.set_app_id("first");
    daiki.send("one", None).await.unwrap();
    daiki.set_app_id("second");
    daiki.send("two", None).await.unwrap();

    let bodies = received_bodies(&mock_server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["appID"], "first");
    assert_eq!(bodies[1]["appID"], "second");
}

#[tokio::test]
async fn test_request_shape_and_headers() {
    let mock_server = ingestion_server(200, r#"{"status":"ok"}"#).await;
    let daiki = client_for(&mock_server, StatusPolicy::Lenient);
    daiki.set_app_id("X");

    let result = daiki
        .send("custom", Some(params(json!({"k": "v"}))))
        .await
        .unwrap();
    assert_eq!(result.status_code, 200);
    assert_eq!(result.body, r#"{"status":"ok"}"#);
    assert!(result.bytes_sent > 0);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json; charset=utf-8"
    );

    let body: Value = request.body_json().unwrap();
    assert_eq!(
        body,
        json!({
            "event": "custom",
            "appID": "X",
            "sdk": SDK_NAME,
            "version": VERSION,
            "params": "{\"k\":\"v\"}"
        })
    );
}

#[tokio::test]
async fn test_missing_app_id_issues_no_request() {
    let mock_server = ingestion_server(200, "ok").await;
    let daiki = client_for(&mock_server, StatusPolicy::Lenient);

    let err = daiki.send("custom", None).await.unwrap_err();
    assert!(matches!(err, SdkError::MissingAppId));

    let err = daiki.app_started(None, None).await.unwrap_err();
    assert!(matches!(err, SdkError::MissingAppId));

    assert!(received_bodies(&mock_server).await.is_empty());
}

#[tokio::test]
async fn test_app_started_sets_id_and_reports_start() {
    let mock_server = ingestion_server(200, "ok").await;
    let daiki = client_for(&mock_server, StatusPolicy::Lenient);

    daiki
        .app_started(Some("abc123"), Some(params(json!({"p": 1}))))
        .await
        .unwrap();
    assert_eq!(daiki.app_id().as_deref(), Some("abc123"));

    daiki.app_started(None, None).await.unwrap();

    let bodies = received_bodies(&mock_server).await;
    assert_eq!(bodies[0]["event"], "app_start");
    assert_eq!(bodies[0]["appID"], "abc123");
    assert_eq!(bodies[0]["params"], "{\"p\":1}");
    assert_eq!(bodies[1]["appID"], "abc123");
    assert_eq!(bodies[1]["params"], "{}");
}

#[tokio::test]
async fn test_event_is_alias_of_send() {
    let mock_server = ingestion_server(200, "ok").await;
    let daiki = client_for(&mock_server, StatusPolicy::Lenient);
    daiki.set_app_id("X");

    daiki
        .event("custom", Some(params(json!({"k": "v"}))))
        .await
        .unwrap();
    daiki
        .send("custom", Some(params(json!({"k": "v"}))))
        .await
        .unwrap();

    let bodies = received_bodies(&mock_server).await;
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_params_field_decodes_to_original_mapping() {
    let mock_server = ingestion_server(200, "ok").await;
    let daiki = client_for(&mock_server, StatusPolicy::Lenient);
    daiki.set_app_id("X");

    let original = params(json!({
        "llm": "chatgpt-o4",
        "mode": "app",
        "nested": {"depth": [1, 2, {"three": 3}]},
        "unicode": "日本語"
    }));
    daiki.event("ai_chat_started", Some(original.clone())).await.unwrap();
    daiki.event("no_params", None).await.unwrap();

    let bodies = received_bodies(&mock_server).await;
    let decoded: EventParams =
        serde_json::from_str(bodies[0]["params"].as_str().unwrap()).unwrap();
    assert_eq!(decoded, original);

    let empty: EventParams = serde_json::from_str(bodies[1]["params"].as_str().unwrap()).unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_lenient_policy_accepts_server_errors() {
    let mock_server = ingestion_server(500, "Internal Server Error").await;
    let daiki = client_for(&mock_server, StatusPolicy::Lenient);
    daiki.set_app_id("X");

    let result = daiki.send("custom", None).await.unwrap();
    assert_eq!(result.status_code, 500);
    assert!(!result.is_success_status());
    assert_eq!(result.body, "Internal Server Error");
}

#[tokio::test]
async fn test_strict_policy_rejects_server_errors() {
    let mock_server = ingestion_server(400, "bad app").await;
    let daiki = client_for(&mock_server, StatusPolicy::Strict);
    daiki.set_app_id("X");

    match daiki.send("custom", None).await.unwrap_err() {
        SdkError::HttpStatus { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "bad app");
        }
        other => panic!("Expected HttpStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_is_reported() {
    let config = ClientConfig {
        endpoint: "http://127.0.0.1:1/api/v1/events/".to_string(),
        ..Default::default()
    };
    let daiki = Daiki::with_config(config).unwrap();
    daiki.set_app_id("X");

    let err = daiki.send("custom", None).await.unwrap_err();
    assert!(matches!(err, SdkError::Transport(_)));

    assert!(err.to_string().starts_with("Transport failure"));
}

#[tokio::test]
async fn test_optional_timeout_is_enforced() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        endpoint: format!("{}{}", mock_server.uri(), EVENTS_PATH),
        timeout: Some(Duration::from_millis(100)),
        ..Default::default()
    };
    let daiki = Daiki::with_config(config).unwrap();
    daiki.set_app_id("X");

    match daiki.send("custom", None).await.unwrap_err() {
        SdkError::Transport(err) => assert!(err.is_timeout()),
        other => panic!("Expected timeout, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_independent_clients_do_not_interfere() {
    let mock_server = ingestion_server(200, "ok").await;
    let first = client_for(&mock_server, StatusPolicy::Lenient);
    let second = client_for(&mock_server, StatusPolicy::Lenient);

    first.set_app_id("first-app");
    let err = second.send("custom", None).await.unwrap_err();
    assert!(matches!(err, SdkError::MissingAppId));

    first.send("custom", None).await.unwrap();
    let bodies = received_bodies(&mock_server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["appID"], "first-app");
}
