//! `HttpCompleter` against a local mock of an OpenAI-compatible server.
//!
//! The client is blocking, so every call runs on `spawn_blocking`.

mod init_logging;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use text2nodeseq::{CompletionApi, HttpCompleter, InferenceError, TextCompleter};

async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn completions_api_returns_first_choice_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(body_partial_json(json!({
            "model": "codegemma",
            "prompt": "Nodes for: go",
            "max_tokens": 100,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "text": " Navigate" }, { "text": " Click" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v1/", server.uri());
    let out = blocking(move || {
        HttpCompleter::new(base, "codegemma")?.complete("Nodes for: go", 100)
    })
    .await
    .unwrap();

    assert_eq!(out, " Navigate");
}

#[tokio::test(flavor = "multi_thread")]
async fn chat_api_sends_user_message_and_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "messages": [{ "role": "user", "content": "Nodes for: wait" }],
            "max_tokens": 16,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Delay" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v1", server.uri());
    let out = blocking(move || {
        HttpCompleter::new(base, "local-model")?
            .with_api(CompletionApi::Chat)
            .with_api_key(Some("secret".into()))
            .complete("Nodes for: wait", 16)
    })
    .await
    .unwrap();

    assert_eq!(out, "Delay");
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let base = format!("{}/v1", server.uri());
    let err = blocking(move || HttpCompleter::new(base, "m")?.complete("p", 100))
        .await
        .unwrap_err();

    assert!(matches!(err, InferenceError::EmptyResponse));
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/v1", server.uri());
    let err = blocking(move || HttpCompleter::new(base, "m")?.complete("p", 100))
        .await
        .unwrap_err();

    assert!(matches!(err, InferenceError::Http(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn check_connection_counts_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "a" }, { "id": "b" }, { "id": "c" }]
        })))
        .mount(&server)
        .await;

    let base = format!("{}/v1", server.uri());
    let status = blocking(move || HttpCompleter::new(base, "m")?.check_connection())
        .await
        .unwrap();

    assert_eq!(status, "Connected (3 models available)");
}
