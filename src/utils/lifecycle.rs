//! Mount tracking for work that must not outlive its component.

use tokio::sync::watch;

/// Owned by the component; dropping it counts as unmounting.
#[derive(Debug)]
pub struct MountHandle {
    unmounted_tx: watch::Sender<bool>,
}

/// Cheap observer of a `MountHandle`.
#[derive(Debug, Clone)]
pub struct MountToken {
    unmounted_rx: watch::Receiver<bool>,
}

impl MountHandle {
    pub fn new() -> Self {
        let (unmounted_tx, _) = watch::channel(false);
        Self { unmounted_tx }
    }

    pub fn token(&self) -> MountToken {
        MountToken {
            unmounted_rx: self.unmounted_tx.subscribe(),
        }
    }

    pub fn unmount(&self) {
        self.unmounted_tx.send_replace(true);
    }

    pub fn is_mounted(&self) -> bool {
        !*self.unmounted_tx.borrow()
    }
}

impl Default for MountHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.unmounted_tx.send_replace(true);
    }
}

impl MountToken {
    pub fn is_unmounted(&self) -> bool {
        *self.unmounted_rx.borrow()
    }

    /// Resolves once the owning handle is unmounted or dropped.
    pub async fn unmounted(&self) {
        let mut rx = self.unmounted_rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn token_observes_unmount() {
        let handle = MountHandle::new();
        let token = handle.token();
        assert!(!token.is_unmounted());
        handle.unmount();
        assert!(token.is_unmounted());
        assert!(!handle.is_mounted());
        tokio::time::timeout(Duration::from_secs(1), token.unmounted())
            .await
            .expect("unmounted() should resolve");
    }

    #[tokio::test]
    async fn dropping_handle_wakes_waiters() {
        let handle = MountHandle::new();
        let token = handle.token();
        let waiter = tokio::spawn(async move { token.unmounted().await });
        drop(handle);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
    }

    #[tokio::test]
    async fn mounted_token_stays_pending() {
        let handle = MountHandle::new();
        let token = handle.token();
        let pending = tokio::time::timeout(Duration::from_millis(20), token.unmounted()).await;
        assert!(pending.is_err());
    }
}
