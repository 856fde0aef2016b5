//! tem-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite conversation store, and serves the mentor API over HTTP.
//!
//! ```
//! OPENROUTER_API_KEY=sk-... cargo run -p tem-server -- --static-dir frontend
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use tem_core::provider::CompletionProvider as _;
use tem_mentor::{MentorConfig, MentorService, OpenRouterProvider};
use tem_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "TEM English mentor server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Port to listen on; overrides the configuration file.
  #[arg(long, env = "PORT")]
  port: Option<u16>,

  /// Completion API key; overrides the configuration file.
  #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
  api_key: Option<String>,

  /// Directory holding the web frontend.
  #[arg(long)]
  static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg =
    tem_server::load_config(&cli.config).context("failed to load configuration")?;

  if let Some(port) = cli.port {
    server_cfg.port = port;
  }
  if let Some(key) = cli.api_key.filter(|k| !k.is_empty()) {
    server_cfg.provider.api_key = Some(key);
  }
  if let Some(dir) = cli.static_dir {
    server_cfg.static_dir = Some(dir);
  }

  tracing::debug!(config = ?server_cfg, "configuration loaded");

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let provider = OpenRouterProvider::new(server_cfg.provider.clone())
    .context("failed to build completion client")?;
  if !provider.is_configured() {
    tracing::warn!("no API key configured; chat requests will fail until OPENROUTER_API_KEY is set");
  }

  let service = MentorService::new(
    Arc::new(store),
    Arc::new(provider),
    MentorConfig { context_turns: server_cfg.context_turns },
  );

  let static_dir = server_cfg.static_dir.as_deref().map(expand_tilde);
  let app = tem_server::router(Arc::new(service), static_dir.as_deref());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
