//! Transient user notifications.

use serde::Serialize;
use tokio::sync::broadcast;

const CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Broadcast channel of toasts shared by every store. Toasts sent while
/// nobody is subscribed are dropped.
#[derive(Clone)]
pub struct Toasts {
    tx: broadcast::Sender<Toast>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(ToastLevel::Error, message.into());
    }

    fn send(&self, level: ToastLevel, message: String) {
        // Err only means there are no subscribers.
        let _ = self.tx.send(Toast { level, message });
    }
}
