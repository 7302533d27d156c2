use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use party_server::{build_router, ServerArgs};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Star map server for the party Wi-Fi")]
struct Args {
    #[command(flatten)]
    server: ServerArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let addr = args.server.socket_addr()?;

    let state = args.server.app_state();
    info!(
        "Chart font family: {} ({:?})",
        state.renderer.fonts().family(),
        state.renderer.fonts().source()
    );
    info!(
        "Precession to date: {}",
        if state.ephemeris.applies_precession() {
            "on"
        } else {
            "off"
        }
    );

    let app = build_router(Arc::new(state));

    info!("Starting star map server on http://{}/starmap", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
