//! HTTP server lifecycle.

use crate::routes;
use crate::state::AppState;
use tokio::net::TcpListener;

/// The Scorekeeper HTTP server.
pub struct Server {
    listen: String,
    state: AppState,
}

impl Server {
    pub fn new(listen: impl Into<String>, state: AppState) -> Self {
        Self {
            listen: listen.into(),
            state,
        }
    }

    /// Bind the listener and serve until Ctrl-C or SIGTERM.
    pub async fn run(self) -> anyhow::Result<()> {
        let app = routes::create_router(self.state);

        let listener = TcpListener::bind(&self.listen).await?;
        tracing::info!(address = %self.listen, "scorekeeper listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("scorekeeper stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
