use std::sync::Arc;
use std::time::Duration;

use babeo_core::chat::gateway::{
    CONFUSED_REPLY, PERSONA, RESTING_REPLY, SILENCE_REPLY,
};
use babeo_core::chat::{ChatGateway, ChatRole, ChatSession, GeminiClient};
use babeo_core::config::ChatConfig;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/models/gemini-test:generateContent";

fn gateway_for(server: &MockServer) -> ChatGateway {
    let client = GeminiClient::new("test-key", MODEL, server.uri(), Duration::from_secs(5));
    ChatGateway::new(Some(Arc::new(client)))
}

fn mock_gemini_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
    })
}

#[tokio::test]
async fn gemini_reply_is_returned_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "When can I start solids?"}]}],
            "systemInstruction": {"parts": [{"text": PERSONA}]},
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_gemini_response("Most little ones are ready around six months.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway_for(&server).respond("When can I start solids?").await;
    assert_eq!(reply, "Most little ones are ready around six months.");
}

#[tokio::test]
async fn api_error_becomes_silence_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(gateway_for(&server).respond("hi").await, SILENCE_REPLY);
}

#[tokio::test]
async fn malformed_body_becomes_silence_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert_eq!(gateway_for(&server).respond("hi").await, SILENCE_REPLY);
}

#[tokio::test]
async fn unreachable_service_becomes_silence_reply() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = GeminiClient::new("test-key", MODEL, uri, Duration::from_secs(2));
    let gateway = ChatGateway::new(Some(Arc::new(client)));
    assert_eq!(gateway.respond("hi").await, SILENCE_REPLY);
}

#[tokio::test]
async fn empty_candidate_becomes_confused_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_gemini_response("")))
        .mount(&server)
        .await;

    assert_eq!(gateway_for(&server).respond("hi").await, CONFUSED_REPLY);
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_gemini_response("nope")))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = ChatGateway::new(None);
    assert_eq!(gateway.respond("anything").await, RESTING_REPLY);
}

#[tokio::test]
async fn config_key_builds_a_configured_gateway() {
    // Only meaningful when the environment does not already provide a key.
    if std::env::var(babeo_core::config::API_KEY_ENV).is_ok() {
        return;
    }
    let unconfigured = ChatGateway::from_config(&ChatConfig::default());
    assert!(!unconfigured.is_configured());

    let configured = ChatGateway::from_config(&ChatConfig {
        api_key: Some("file-key".into()),
        ..ChatConfig::default()
    });
    assert!(configured.is_configured());
}

#[tokio::test]
async fn session_transcript_grows_to_three_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_gemini_response("It's okay to go slowly."))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let mut chat = ChatSession::new();
    assert_eq!(chat.transcript().len(), 1);

    let pending = chat.submit("When can I start solids?").unwrap();
    assert!(chat.is_loading());
    assert_eq!(chat.transcript().len(), 2);

    let reply = pending.resolve(&gateway).await;
    assert!(chat.complete(reply));
    assert!(!chat.is_loading());

    let roles: Vec<ChatRole> = chat.transcript().iter().map(|m| m.role).collect();
    assert_eq!(roles, [ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]);
    assert_eq!(chat.transcript()[2].text, "It's okay to go slowly.");
}
