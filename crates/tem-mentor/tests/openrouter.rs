use std::time::Duration;

use serde_json::json;
use tem_core::{
  message::ChatMessage,
  provider::{CompletionProvider, CompletionRequest, ProviderError},
};
use tem_mentor::{OpenRouterProvider, ProviderConfig};
use wiremock::{
  Mock, MockServer, ResponseTemplate,
  matchers::{body_partial_json, header, method, path},
};

fn provider(server: &MockServer, api_key: Option<&str>) -> OpenRouterProvider {
  OpenRouterProvider::new(ProviderConfig {
    api_key:      api_key.map(str::to_owned),
    base_url:     server.uri(),
    model:        "test-model".to_string(),
    temperature:  None,
    timeout_secs: 1,
  })
  .expect("provider")
}

fn request() -> CompletionRequest {
  CompletionRequest {
    messages: vec![ChatMessage::system("be kind"), ChatMessage::user("hello")],
  }
}

#[tokio::test]
async fn complete_posts_context_and_returns_content() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/chat/completions"))
    .and(header("authorization", "Bearer sk-test"))
    .and(body_partial_json(json!({
      "model": "test-model",
      "messages": [
        { "role": "system", "content": "be kind" },
        { "role": "user",   "content": "hello" }
      ]
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "choices": [{ "message": { "role": "assistant", "content": "Hi! How are you?" } }]
    })))
    .expect(1)
    .mount(&server)
    .await;

  let reply = provider(&server, Some("sk-test"))
    .complete(request())
    .await
    .expect("complete");
  assert_eq!(reply, "Hi! How are you?");
}

#[tokio::test]
async fn temperature_is_omitted_unless_configured() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "choices": [{ "message": { "content": "ok" } }]
    })))
    .mount(&server)
    .await;

  provider(&server, Some("sk-test"))
    .complete(request())
    .await
    .unwrap();

  let mut with_temp = ProviderConfig {
    api_key: Some("sk-test".into()),
    base_url: server.uri(),
    ..ProviderConfig::default()
  };
  with_temp.temperature = Some(0.5);
  OpenRouterProvider::new(with_temp)
    .unwrap()
    .complete(request())
    .await
    .unwrap();

  let received = server.received_requests().await.unwrap();
  let first: serde_json::Value = received[0].body_json().unwrap();
  let second: serde_json::Value = received[1].body_json().unwrap();
  assert!(first.get("temperature").is_none(), "{first}");
  assert_eq!(second["temperature"], json!(0.5));
}

#[tokio::test]
async fn non_success_status_is_reported() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
    .mount(&server)
    .await;

  let err = provider(&server, Some("sk-bad"))
    .complete(request())
    .await
    .unwrap_err();
  match err {
    ProviderError::Status { status, body } => {
      assert_eq!(status, 401);
      assert_eq!(body, "invalid key");
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

#[tokio::test]
async fn slow_upstream_times_out() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_delay(Duration::from_secs(3))
        .set_body_json(json!({ "choices": [{ "message": { "content": "late" } }] })),
    )
    .mount(&server)
    .await;

  let err = provider(&server, Some("sk-test"))
    .complete(request())
    .await
    .unwrap_err();
  assert!(matches!(err, ProviderError::Timeout), "{err:?}");
}

#[tokio::test]
async fn empty_choices_is_malformed() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
    .mount(&server)
    .await;

  let err = provider(&server, Some("sk-test"))
    .complete(request())
    .await
    .unwrap_err();
  assert!(matches!(err, ProviderError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn missing_key_never_reaches_the_network() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&server)
    .await;

  for key in [None, Some(""), Some("   ")] {
    let p = provider(&server, key);
    assert!(!p.is_configured());
    let err = p.complete(request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::MissingCredential), "{err:?}");
  }
}
