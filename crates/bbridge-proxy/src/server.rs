//! HTTP server lifecycle.

use anyhow::Context;
use bbridge_core::GatewaySettings;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::bootstrap::bootstrap;
use crate::routes::create_router;
use crate::state::AppState;

/// Compose the gateway from settings, bind and serve until a shutdown signal.
pub async fn run(settings: GatewaySettings) -> anyhow::Result<()> {
    let state = bootstrap(&settings).await?;

    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    serve(listener, state).await
}

/// Serve on a pre-bound listener until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!("bbridge listening on {addr}");
    info!("Point OpenAI clients at: http://{addr}/api/v1");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("bbridge shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
