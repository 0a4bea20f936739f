// src/signal.rs
// =============================================================================
// Turns Ctrl-C (and SIGTERM on Unix) into a cancelled token.
//
// Running -> Interrupted: the first signal cancels the token. The crawler
// notices at its next node boundary and stops, then main.rs saves the tree
// and exits with EXIT_INTERRUPTED.
//
// A second signal while that is happening exits straight away. The
// checkpoint is written atomically, so the store file is still either the
// old one or the new one.
// =============================================================================

use std::future::Future;
use std::io;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

/// Exit status used whenever a run ends because of a signal.
pub const EXIT_INTERRUPTED: i32 = 1;

pub fn spawn_interrupt_listener(cancel: CancellationToken) -> JoinHandle<()> {
    spawn_listener(cancel, wait_for_signal)
}

// Same as spawn_interrupt_listener, but `next_signal` decides what counts as
// an interrupt. Each call waits for one more signal.
pub(crate) fn spawn_listener<F, Fut>(cancel: CancellationToken, mut next_signal: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = io::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = next_signal().await {
            error!("unable to listen for interrupts: {}", e);
            return;
        }
        warn!("halting...");
        cancel.cancel();

        if next_signal().await.is_ok() {
            error!("interrupted again, exiting without waiting for the checkpoint");
            std::process::exit(EXIT_INTERRUPTED);
        }
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}
