//! Process signals that end the sweep loop.

/// Resolve on SIGINT or, on Unix, SIGTERM. An in-flight sweep still runs
/// to completion after this returns.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), stopping after the current sweep");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping after the current sweep");
        }
    }
}
