//! OS signal handling.
//!
//! Translates Ctrl-C into a cancellation trigger so an interactive
//! submission can be abandoned mid-attempt.

use crate::lifecycle::shutdown::Shutdown;

/// Spawn a task that triggers `shutdown` on the first Ctrl-C.
pub fn trap_interrupt(shutdown: Shutdown) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling submission");
            shutdown.trigger();
        }
    });
}
