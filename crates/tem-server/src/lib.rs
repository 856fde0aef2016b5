//! HTTP server assembly for TEM.
//!
//! Mounts the JSON API under `/api`, adds `/health`, optionally serves the
//! static frontend, and wraps everything in CORS and request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Json, Router, routing::get};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tem_core::{provider::CompletionProvider, store::ConversationStore};
use tem_mentor::{MentorService, ProviderConfig, service::DEFAULT_CONTEXT_TURNS};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TEM_*` environment variables (nested keys use `__`, e.g.
/// `TEM_PROVIDER__MODEL`).
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub store_path:    PathBuf,
  /// Directory holding the web frontend; not served when unset.
  pub static_dir:    Option<PathBuf>,
  /// Stored turns replayed to the provider on every chat request.
  pub context_turns: usize,
  pub provider:      ProviderConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "0.0.0.0".to_string(),
      port:          5000,
      store_path:    PathBuf::from("data/conversations.db"),
      static_dir:    None,
      context_turns: DEFAULT_CONTEXT_TURNS,
      provider:      ProviderConfig::default(),
    }
  }
}

/// Layer the optional file at `path` under `TEM_*` environment variables.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(
      config::Environment::with_prefix("TEM")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()?
    .try_deserialize()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application router.
pub fn router<S, P>(service: Arc<MentorService<S, P>>, static_dir: Option<&Path>) -> Router
where
  S: ConversationStore + 'static,
  P: CompletionProvider + 'static,
{
  let mut app = Router::new()
    .nest("/api", tem_api::api_router(service))
    .route("/health", get(health));

  if let Some(dir) = static_dir {
    app = app.fallback_service(ServeDir::new(dir));
  }

  app
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

/// `GET /health`
async fn health() -> Json<Value> {
  Json(json!({
    "status":    "healthy",
    "timestamp": Utc::now().to_rfc3339(),
  }))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tem_mentor::{MentorConfig, OpenRouterProvider};
  use tem_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tem-server-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
  }

  async fn app(static_dir: Option<&Path>) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let provider = OpenRouterProvider::new(ProviderConfig::default()).unwrap();
    let service = MentorService::new(
      Arc::new(store),
      Arc::new(provider),
      MentorConfig::default(),
    );
    router(Arc::new(service), static_dir)
  }

  async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
  }

  #[tokio::test]
  async fn health_reports_healthy() {
    let (status, body) = get_body(app(None).await, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["status"], json!("healthy"));
    assert!(v["timestamp"].is_string());
  }

  #[tokio::test]
  async fn api_is_nested() {
    let (status, body) = get_body(app(None).await, "/api/stats?user_id=nobody").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["conversation_count"], json!(0));
    assert_eq!(v["level"], json!("Beginner"));
  }

  #[tokio::test]
  async fn chat_without_api_key_reports_config_error() {
    let req = Request::builder()
      .method("POST")
      .uri("/api/chat")
      .header("content-type", "application/json")
      .body(Body::from(r#"{"message":"hello"}"#))
      .unwrap();
    let resp = app(None).await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[tokio::test]
  async fn static_frontend_is_served() {
    let dir = scratch_dir("static");
    std::fs::write(dir.join("index.html"), "<h1>TEM</h1>").unwrap();

    let (status, body) = get_body(app(Some(&dir)).await, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("TEM"), "{body}");

    let (status, _) = get_body(app(None).await, "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn config_file_overrides_defaults() {
    let dir = scratch_dir("config");
    let path = dir.join("config.toml");
    std::fs::write(
      &path,
      r#"
port = 8080
context_turns = 6

[provider]
model = "mistralai/mistral-7b-instruct"
api_key = "sk-file"
"#,
    )
    .unwrap();

    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.context_turns, 6);
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.provider.model, "mistralai/mistral-7b-instruct");
    assert_eq!(cfg.provider.api_key.as_deref(), Some("sk-file"));
    assert_eq!(cfg.provider.timeout_secs, 30);

    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn missing_config_file_uses_defaults() {
    let cfg = load_config(Path::new("/nonexistent/tem/config.toml")).unwrap();
    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.context_turns, 10);
    assert_eq!(cfg.store_path, PathBuf::from("data/conversations.db"));
  }
}
