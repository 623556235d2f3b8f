//! Stop handle for running servers.
//!
//! `main` and the integration tests each own one `Shutdown`. A server is
//! started with [`Shutdown::wait`] and drains when the handle fires, when
//! the handle is dropped, or on Ctrl+C.

use std::future::Future;

use tokio::sync::broadcast;

use crate::lifecycle::signals::shutdown_signal;

pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Future that completes once this handle fires or Ctrl+C is pressed.
    ///
    /// Subscribes immediately, so a trigger sent before the future is first
    /// polled is not lost.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        shutdown_signal(self.tx.subscribe())
    }

    /// Fire the handle. Returns the number of servers that were waiting.
    pub fn trigger(&self) -> usize {
        let waiting = self.tx.send(()).unwrap_or(0);
        tracing::debug!(waiting, "Shutdown triggered");
        waiting
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
