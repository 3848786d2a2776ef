//! Subcommand implementations.

pub mod catalog;
pub mod products;
pub mod session;

use farmerty_storefront::services::scope::{CancelToken, RequestScope};
use tokio::task::JoinHandle;

/// Cancellation tied to Ctrl-C for the lifetime of one command.
pub struct Interrupt {
    token: CancelToken,
    watcher: JoinHandle<()>,
}

impl Interrupt {
    /// Start watching for Ctrl-C.
    pub fn install() -> Self {
        let scope = RequestScope::new();
        let token = scope.token();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted");
                scope.cancel();
            }
        });
        Self { token, watcher }
    }

    pub const fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl Drop for Interrupt {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}
