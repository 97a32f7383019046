// Application Lifecycle Signals

use tokio::sync::watch;

/// Inbound signals the addon reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    StartupStarted,
    ShutdownStarted,
}

/// Sender half, held by the host application
pub struct LifecycleSender {
    tx: watch::Sender<Option<LifecycleSignal>>,
}

impl LifecycleSender {
    /// Announce that application startup has begun
    pub fn startup_started(&self) {
        let _ = self.tx.send(Some(LifecycleSignal::StartupStarted));
    }

    /// Announce that application shutdown has begun
    pub fn shutdown_started(&self) {
        let _ = self.tx.send(Some(LifecycleSignal::ShutdownStarted));
    }
}

/// Receiver half, consumed by the addon's listen loop
#[derive(Clone)]
pub struct LifecycleToken {
    rx: watch::Receiver<Option<LifecycleSignal>>,
}

impl LifecycleToken {
    /// Wait for the next signal; None once the sender is dropped
    pub async fn next(&mut self) -> Option<LifecycleSignal> {
        self.rx.changed().await.ok()?;
        *self.rx.borrow()
    }
}

/// Create a lifecycle signal channel
pub fn lifecycle_channel() -> (LifecycleSender, LifecycleToken) {
    let (tx, rx) = watch::channel(None);
    (LifecycleSender { tx }, LifecycleToken { rx })
}
