//! Toast Notification Service
//!
//! A single-slot "current toast" owned by the store and injected where
//! needed, never ambient global state. Showing a toast replaces whatever
//! is on screen; each toast auto-dismisses after a fixed interval unless
//! a newer one has taken the slot in the meantime.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Visual flavor of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// One visible notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

struct Slot {
    current: Option<Toast>,
    /// Bumped on every show/hide so a stale auto-dismiss timer can tell
    /// its toast has already been replaced
    seq: u64,
}

/// Single-slot notification surface with auto-dismiss
#[derive(Clone)]
pub struct ToastService {
    slot: Arc<Mutex<Slot>>,
    duration: Duration,
}

impl ToastService {
    pub fn new(duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                current: None,
                seq: 0,
            })),
            duration,
        }
    }

    /// Replace the current toast and schedule its auto-dismiss.
    pub async fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let seq = {
            let mut slot = self.slot.lock().await;
            slot.seq += 1;
            slot.current = Some(Toast {
                message: message.into(),
                kind,
            });
            slot.seq
        };

        let slot_handle = Arc::clone(&self.slot);
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut slot = slot_handle.lock().await;
            if slot.seq == seq {
                slot.current = None;
            }
        });
    }

    /// Dismiss immediately.
    pub async fn hide(&self) {
        let mut slot = self.slot.lock().await;
        slot.seq += 1;
        slot.current = None;
    }

    pub async fn current(&self) -> Option<Toast> {
        self.slot.lock().await.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_show_and_hide() {
        let toasts = ToastService::new(Duration::from_secs(60));
        toasts.show("saved", ToastKind::Success).await;
        assert_eq!(toasts.current().await.unwrap().message, "saved");
        toasts.hide().await;
        assert!(toasts.current().await.is_none());
    }

    #[tokio::test]
    async fn test_newer_toast_replaces_older() {
        let toasts = ToastService::new(Duration::from_secs(60));
        toasts.show("first", ToastKind::Info).await;
        toasts.show("second", ToastKind::Error).await;
        let current = toasts.current().await.unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, ToastKind::Error);
    }

    #[tokio::test]
    async fn test_auto_dismiss() {
        let toasts = ToastService::new(Duration::from_millis(20));
        toasts.show("fleeting", ToastKind::Info).await;
        assert!(toasts.current().await.is_some());
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(toasts.current().await.is_none());
    }

    #[tokio::test]
    async fn test_stale_timer_does_not_clear_newer_toast() {
        let toasts = ToastService::new(Duration::from_millis(30));
        toasts.show("first", ToastKind::Info).await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        toasts.show("second", ToastKind::Info).await;
        // first toast's timer fires around 30ms; second should survive it
        tokio::time::sleep(Duration::from_millis(15)).await;
        assert_eq!(toasts.current().await.unwrap().message, "second");
    }
}
