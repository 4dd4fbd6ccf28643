//! Integration tests for `kora send` and `kora history` against a mock API.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn text_message(id: &str, session_id: &str, sender: &str, text: &str) -> serde_json::Value {
    json!({
        "id": id,
        "sessionId": session_id,
        "sender": sender,
        "type": "text",
        "text": text,
        "createdAt": "2025-06-01T09:00:00Z"
    })
}

#[tokio::test]
async fn test_send_starts_new_session_and_prints_turn() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(json!({"message": "hello", "type": "text"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                text_message("m1", "s1", "user", "hello"),
                text_message("m2", "s1", "ai", "Hi! How can I help?"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("kora")
        .env("KORA_HOME", home.path())
        .env("KORA_API_URL", server.uri())
        .args(["send", "-m", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started session session_"))
        .stdout(predicate::str::contains("[you] hello"))
        .stdout(predicate::str::contains("[kora] Hi! How can I help?"));
}

#[tokio::test]
async fn test_send_to_existing_session_resyncs_first() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/chat/sessions/s1/messages"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [text_message("m1", "s1", "ai", "Earlier reply")],
            "total": 1,
            "page": 1,
            "limit": 30
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(json!({"sessionId": "s1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                text_message("m2", "s1", "user", "follow-up"),
                text_message("m3", "s1", "ai", "Sure thing."),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("kora")
        .env("KORA_HOME", home.path())
        .env("KORA_API_URL", server.uri())
        .args(["send", "--session", "s1", "-m", "follow-up"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[kora] Earlier reply"))
        .stdout(predicate::str::contains("[you] follow-up"))
        .stdout(predicate::str::contains("[kora] Sure thing."));
}

#[tokio::test]
async fn test_send_failure_reports_server_message() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "model unavailable"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("kora")
        .env("KORA_HOME", home.path())
        .env("KORA_API_URL", server.uri())
        .args(["send", "-m", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("model unavailable"));
}

#[tokio::test]
async fn test_send_attaches_image_url() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(json!({
            "type": "image",
            "imageUrl": "https://cdn.example/receipt.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [text_message("m1", "s1", "ai", "Got the picture.")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("kora")
        .env("KORA_HOME", home.path())
        .env("KORA_API_URL", server.uri())
        .args([
            "send",
            "-m",
            "here you go",
            "--image-url",
            "https://cdn.example/receipt.png",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[kora] Got the picture."));
}

#[tokio::test]
async fn test_history_prints_oldest_first() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    // Newest first, as the API returns them.
    Mock::given(method("GET"))
        .and(path("/chat/sessions/s1/messages"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                text_message("m2", "s1", "ai", "Second"),
                text_message("m1", "s1", "user", "First"),
            ],
            "total": 2,
            "page": 1,
            "limit": 30
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("kora")
        .env("KORA_HOME", home.path())
        .env("KORA_API_URL", server.uri())
        .args(["history", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[you] First\n[kora] Second"));
}

#[tokio::test]
async fn test_history_empty_session() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/chat/sessions/empty/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [],
            "total": 0,
            "page": 1,
            "limit": 30
        })))
        .mount(&server)
        .await;

    cargo_bin_cmd!("kora")
        .env("KORA_HOME", home.path())
        .env("KORA_API_URL", server.uri())
        .args(["history", "empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session 'empty' is empty."));
}

#[tokio::test]
async fn test_history_fetches_multiple_pages() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    let page_one: Vec<serde_json::Value> = (31..=60)
        .rev()
        .map(|n| text_message(&format!("m{n}"), "s1", "user", &format!("msg {n}")))
        .collect();
    let page_two: Vec<serde_json::Value> = (1..=30)
        .rev()
        .map(|n| text_message(&format!("m{n}"), "s1", "user", &format!("msg {n}")))
        .collect();

    Mock::given(method("GET"))
        .and(path("/chat/sessions/s1/messages"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": page_one,
            "total": 60,
            "page": 1,
            "limit": 30
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/chat/sessions/s1/messages"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": page_two,
            "total": 60,
            "page": 2,
            "limit": 30
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("kora")
        .env("KORA_HOME", home.path())
        .env("KORA_API_URL", server.uri())
        .args(["history", "s1", "--pages", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("msg 1"))
        .stdout(predicate::str::contains("msg 60"));
}
