// Server loop module
// Accepts connections until shutdown is requested

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How long in-flight connections get to finish after shutdown
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Accept loop for the schedule server.
///
/// Must run inside a `LocalSet`: connections are served with `spawn_local`.
/// Returns once `shutdown` is notified and in-flight connections have
/// drained (or the grace period has passed).
pub async fn run_server(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => {
                logger::log_info("[SHUTDOWN] Stopped accepting new connections");
                break;
            }
        }
    }

    // Stop listening before waiting on the connections still in flight
    drop(listener);
    drain_connections(&active_connections).await;
    Ok(())
}

async fn drain_connections(active_connections: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + SHUTDOWN_GRACE;

    while active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "[SHUTDOWN] Grace period elapsed with {} connection(s) still open",
                active_connections.load(Ordering::SeqCst)
            ));
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    logger::log_info("[SHUTDOWN] All connections closed");
}
