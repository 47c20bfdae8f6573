//! Graceful shutdown fan-out.
//!
//! One trigger, any number of listeners. The HTTP server stops accepting and
//! drains when it fires; `main` closes the directory once serving returns.

use std::future::Future;

use tokio::sync::broadcast;

#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Resolves once `trigger` has been called after this future was created.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    pub fn trigger(&self) {
        match self.tx.send(()) {
            Ok(listeners) => tracing::info!(listeners, "Shutdown triggered"),
            Err(_) => tracing::debug!("Shutdown triggered with no listeners"),
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
