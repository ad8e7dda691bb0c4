//! Cooperative cancellation for a crawl run.
//!
//! A watch channel pair: the hosting environment keeps the [`CancelHandle`],
//! the pagination controller polls and awaits the [`CancelToken`]. The
//! controller checks the token before each fetch and races it against each
//! backoff delay, so cancellation never waits on a sleeping retry.

use tokio::sync::watch;

/// Sender half: signals cancellation to every associated token.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Receiver half: observed by the run loop.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
    // Keeps the channel open for tokens created without a live handle.
    _keepalive: Option<std::sync::Arc<watch::Sender<bool>>>,
}

/// Creates a connected handle/token pair.
#[must_use]
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (
        CancelHandle { tx },
        CancelToken {
            rx,
            _keepalive: None,
        },
    )
}

impl CancelHandle {
    /// Signals cancellation. Idempotent.
    pub fn cancel(&self) {
        // Ignore send errors -- all tokens may have been dropped.
        let _ = self.tx.send(true);
    }
}

impl CancelToken {
    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is signalled.
    ///
    /// Never resolves if the handle is dropped without cancelling, so always
    /// race this against the work being guarded.
    pub async fn cancelled(&mut self) {
        // borrow_and_update marks the current value seen, so changed() below
        // only wakes on a genuine transition.
        if *self.rx.borrow_and_update() {
            return;
        }
        while self.rx.changed().await.is_ok() {
            if *self.rx.borrow() {
                return;
            }
        }
        // Handle dropped without cancelling: park forever, callers race us.
        std::future::pending::<()>().await;
    }

    /// A token that is never cancelled, for runs without external control.
    #[must_use]
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            rx,
            _keepalive: Some(std::sync::Arc::new(tx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn token_starts_uncancelled() {
        let (_handle, token) = cancel_pair();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn cancel_is_observed_and_idempotent() {
        let (handle, token) = cancel_pair();
        handle.cancel();
        handle.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn clones_share_the_signal() {
        let (handle, token) = cancel_pair();
        let clone = token.clone();
        handle.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn never_token_is_never_cancelled() {
        let token = CancelToken::never();
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_after_signal() {
        let (handle, mut token) = cancel_pair();

        let waiter = tokio::spawn(async move {
            token.cancelled().await;
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();

        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn cancelled_resolves_immediately_when_already_cancelled() {
        let (handle, mut token) = cancel_pair();
        handle.cancel();
        // Must not hang.
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .unwrap();
    }
}
