//! OS signal handling.

use tokio::sync::broadcast;

/// Resolve when Ctrl+C is pressed or `trigger` fires.
///
/// A closed channel (handle dropped) also ends the wait.
pub(crate) async fn shutdown_signal(mut trigger: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                // Fall back to the explicit trigger only.
                let _ = trigger.recv().await;
            }
        }
        _ = trigger.recv() => {}
    }
    tracing::info!("Shutdown signal received");
}
