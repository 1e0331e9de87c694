use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;
use tracing::info;

/// Coordinates graceful shutdown between the server loop and the
/// cleanup task spawned by `create_production_app`.
///
/// Shutdown fires once, either from an OS signal (SIGTERM/SIGINT) or a
/// programmatic [`shutdown`](Self::shutdown) call; every waiter parked
/// in [`notified`](Self::notified) is then released.
#[derive(Clone, Default)]
pub struct ShutdownCoordinator {
    notify: Arc<Notify>,
    initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if shutdown has been initiated.
    pub fn is_shutting_down(&self) -> bool {
        self.initiated.load(Ordering::Relaxed)
    }

    /// Initiate shutdown and release all waiters. Later calls are no-ops.
    pub fn shutdown(&self) {
        if self
            .initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            self.notify.notify_waiters();
        }
    }

    /// Resolve once shutdown has been initiated.
    ///
    /// Registers with the notifier before checking the flag, so a
    /// concurrent `shutdown` call cannot slip between check and wait.
    pub async fn notified(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }

    /// Resolve when shutdown is due: an OS signal arrives or another
    /// task calls [`shutdown`](Self::shutdown). Drives the signal into
    /// the coordinator so cleanup waiters wake too.
    pub async fn listen_for_signals(&self) {
        tokio::select! {
            _ = os_signal() => self.shutdown(),
            _ = self.notified() => {}
        }
    }
}

/// Wait for SIGTERM or SIGINT.
async fn os_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
