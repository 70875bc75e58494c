// ChatCompletionsGateway against a mock completion endpoint.

use legal_guru::gateway::{ChatCompletionsGateway, FailureClass, GatewayError, ResponseGateway};
use pretty_assertions::assert_eq;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INSTRUCTION: &str = "You are a test lawyer.";

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "cmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    }))
}

fn gateway(server: &MockServer, timeout: Duration) -> ChatCompletionsGateway {
    ChatCompletionsGateway::new(
        &format!("{}/v1", server.uri()),
        "test-model",
        Some("test-key".to_owned()),
        INSTRUCTION,
        timeout,
    )
    .unwrap()
}

#[tokio::test]
async fn sends_instruction_and_query_and_trims_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "messages": [
                { "role": "system", "content": INSTRUCTION },
                { "role": "user", "content": "Can my landlord evict me?" }
            ]
        })))
        .respond_with(completion("\n  Usually not without notice.  \n"))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway(&server, Duration::from_secs(5))
        .complete("Can my landlord evict me?")
        .await
        .unwrap();
    assert_eq!(reply, "Usually not without notice.");
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "error": { "message": "overloaded" } })),
        )
        .mount(&server)
        .await;

    let err = gateway(&server, Duration::from_secs(5))
        .complete("hello")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Api {
            status: 503,
            message: "overloaded".to_owned(),
        }
    );
    assert_eq!(err.class(), FailureClass::Unavailable);
}

#[tokio::test]
async fn rate_limit_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_string("Too Many Requests"),
        )
        .mount(&server)
        .await;

    let err = gateway(&server, Duration::from_secs(5))
        .complete("hello")
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::RateLimited);
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion("late").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let err = gateway(&server, Duration::from_millis(200))
        .complete("hello")
        .await
        .unwrap_err();
    assert_eq!(err, GatewayError::Timeout);
}

#[tokio::test]
async fn empty_choices_are_an_empty_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let err = gateway(&server, Duration::from_secs(5))
        .complete("hello")
        .await
        .unwrap_err();
    assert_eq!(err, GatewayError::EmptyReply);
}

#[tokio::test]
async fn whitespace_only_content_is_an_empty_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion("  \n\t "))
        .mount(&server)
        .await;

    let err = gateway(&server, Duration::from_secs(5))
        .complete("hello")
        .await
        .unwrap_err();
    assert_eq!(err, GatewayError::EmptyReply);
    assert_eq!(err.class(), FailureClass::Other);
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("hello"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>oops</html>"),
        )
        .mount(&server)
        .await;

    let err = gateway(&server, Duration::from_secs(5))
        .complete("hello")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let gateway = ChatCompletionsGateway::new(&uri, "m", None, INSTRUCTION, Duration::from_secs(2))
        .unwrap();
    let err = gateway.complete("hello").await.unwrap_err();
    assert!(
        matches!(err, GatewayError::Transport(_) | GatewayError::Timeout),
        "{err:?}"
    );
    assert_eq!(err.class(), FailureClass::Unavailable);
}
