use std::time::Duration;

use medimind::{AskClient, AskError, ClientConfig};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> AskClient {
    AskClient::new(&ClientConfig::new(format!("{}/api/ask/", server.uri()))).unwrap()
}

#[tokio::test]
async fn test_ask_posts_json_question() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "question": "What is insulin?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "What is insulin?",
            "answer": "A hormone."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let answer = client.ask("What is insulin?").await.unwrap();
    assert_eq!(answer, "A hormone.");
}

#[tokio::test]
async fn test_missing_or_non_string_answer_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": 7 })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "other": "x" })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.ask("q").await.unwrap(), "");
    assert_eq!(client.ask("q").await.unwrap(), "");
}

#[tokio::test]
async fn test_error_status_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Question is required" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.ask("q").await {
        Err(AskError::Status { status, detail, .. }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(detail.as_deref(), Some("Question is required"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_without_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.ask("q").await.unwrap_err();
    assert!(matches!(err, AskError::Status { .. }));
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn test_malformed_success_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.ask("q").await.unwrap_err();
    assert!(matches!(err, AskError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let client = AskClient::new(&ClientConfig::new("http://127.0.0.1:9/api/ask/")).unwrap();
    let err = client.ask("q").await.unwrap_err();
    assert!(matches!(err, AskError::Transport { .. }));
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "answer": "late" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(format!("{}/api/ask/", server.uri()))
        .with_timeout(Some(Duration::from_millis(100)));
    let client = AskClient::new(&config).unwrap();
    let err = client.ask("q").await.unwrap_err();
    assert!(matches!(err, AskError::Transport { .. }));
}
