//! Request scopes and cancellation.
//!
//! A view that starts a slow operation owns a [`RequestScope`] and hands a
//! [`CancelToken`] to the operation. Cancelling or dropping the scope (the
//! view going away) aborts the operation before it touches any state.

use std::time::Duration;

use tokio::sync::watch;

/// The operation was abandoned before it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Owner side of a cancellation signal.
#[derive(Debug)]
pub struct RequestScope {
    tx: watch::Sender<bool>,
}

impl RequestScope {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// A token observing this scope.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: Some(self.tx.subscribe()),
        }
    }

    /// Cancel every operation holding a token from this scope.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation signal.
///
/// A token is cancelled once its scope is cancelled or dropped.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelToken {
    /// A token that is never cancelled.
    #[must_use]
    pub const fn never() -> Self {
        Self { rx: None }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.rx
            .as_ref()
            .is_some_and(|rx| *rx.borrow() || rx.has_changed().is_err())
    }

    /// Resolves when the token is cancelled; never resolves for
    /// [`CancelToken::never`].
    pub async fn cancelled(&self) {
        match &self.rx {
            Some(rx) => {
                let mut rx = rx.clone();
                // Err means the scope was dropped, which also cancels.
                let _ = rx.wait_for(|cancelled| *cancelled).await;
            }
            None => std::future::pending().await,
        }
    }
}

/// Wait `delay`, or fail early if `token` is cancelled.
///
/// # Errors
///
/// Returns `Cancelled` if the token fires before the delay elapses or was
/// already cancelled.
pub async fn simulate_latency(delay: Duration, token: &CancelToken) -> Result<(), Cancelled> {
    if token.is_cancelled() {
        return Err(Cancelled);
    }

    tokio::select! {
        () = tokio::time::sleep(delay) => Ok(()),
        () = token.cancelled() => Err(Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_latency_completes() {
        let scope = RequestScope::new();
        let result = simulate_latency(Duration::from_millis(800), &scope.token()).await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_latency() {
        let scope = RequestScope::new();
        let token = scope.token();
        let pending = tokio::spawn(async move {
            simulate_latency(Duration::from_secs(60), &token).await
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        scope.cancel();
        assert_eq!(pending.await.ok(), Some(Err(Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_scope_cancels() {
        let scope = RequestScope::new();
        let token = scope.token();
        drop(scope);

        assert!(token.is_cancelled());
        assert_eq!(
            simulate_latency(Duration::from_millis(800), &token).await,
            Err(Cancelled)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_token() {
        let token = CancelToken::never();
        assert!(!token.is_cancelled());
        assert_eq!(simulate_latency(Duration::from_millis(5), &token).await, Ok(()));
    }
}
