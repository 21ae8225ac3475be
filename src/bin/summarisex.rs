//! Server entrypoint.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use summarisex::pipeline::model::AnthropicClient;
use summarisex::{router, AppState, Settings};

#[derive(Parser, Debug)]
#[command(name = "summarisex", about = "Summarisation API server", version)]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on; falls back to the PORT variable, then 8000.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("summarisex=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let settings = Settings::from_env();
    if settings.anthropic_api_key.is_empty() {
        tracing::warn!("ANTHROPIC_API_KEY is empty, model calls will fail");
    }

    let port = args.port.unwrap_or(settings.port);
    let settings = Arc::new(settings);

    let model = Arc::new(AnthropicClient::new(&settings));
    let state = AppState::new(settings, model);
    let app = router(state);

    let addr = format!("{}:{}", args.host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .context("server terminated")?;
    Ok(())
}
