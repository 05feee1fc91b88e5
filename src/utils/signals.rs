//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::info;

/// Wait for a shutdown signal (SIGTERM, SIGINT, SIGQUIT).
///
/// Resolves on the first signal received; the caller then runs the
/// stop-listening sequence so the wake lock is released before exit.
pub async fn shutdown_signal() {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGQUIT,
    ])
    .expect("failed to install signal handler");

    if let Some(signal) = signals.next().await {
        info!("received signal {}, shutting down", signal);
    }
}
