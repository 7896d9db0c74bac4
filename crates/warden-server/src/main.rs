//! Warden server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), overlays
//! `WARDEN_*` environment variables, and serves the JSON API over HTTP.
//!
//! ```text
//! WARDEN_JWT_SECRET=change-me cargo run -p warden-server -- --port 8080
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use warden_server::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Warden resource server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the configured listen port.
  #[arg(short, long)]
  port: Option<u16>,
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

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("WARDEN").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if let Some(port) = cli.port {
    server_cfg.port = port;
  }
  let state =
    warden_server::build_state(&server_cfg).context("invalid configuration")?;
  let app = warden_server::app(state);
  let address = server_cfg.address();

  tracing::info!(
    token_ttl_hours = server_cfg.token_ttl_hours,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
