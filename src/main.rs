use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use evalboard::api::{self, AppState};
use evalboard_session::{Difficulty, GameSession};
use evalboard_uci::UciEngine;

/// Play chess against a local UCI engine with a live win-probability chart
#[derive(Debug, Parser)]
#[command(name = "evalboard", version, about)]
struct Args {
    /// Path to a UCI engine binary (falls back to $ENGINE_PATH, then "stockfish")
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Address to serve the UI on (falls back to $BIND_ADDR)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Opponent strength: easy, medium or hard
    #[arg(long, default_value = "easy")]
    difficulty: Difficulty,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let engine_path = args
        .engine
        .or_else(|| std::env::var("ENGINE_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("stockfish"));

    let bind = match args.bind {
        Some(addr) => addr,
        None => std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?,
    };

    // Acquire the engine before serving anything; a missing binary
    // should fail the launch, not the first move.
    let engine = UciEngine::launch(&engine_path)
        .await
        .with_context(|| format!("could not start engine {}", engine_path.display()))?;
    tracing::info!(engine = %engine_path.display(), difficulty = %args.difficulty, "engine ready");

    let session = GameSession::new(engine, args.difficulty);
    let state = AppState::new(session);
    let app = api::router(state.clone());

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("could not bind {bind}"))?;
    tracing::info!("serving on http://{bind}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Tell the engine goodbye; kill-on-drop covers one that ignores it.
    if let Some(session) = state.into_session() {
        session.into_engine().quit().await;
    }
    tracing::info!("shut down");

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
