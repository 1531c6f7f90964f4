//! Toast notifications: the seam between the form core and whatever shows
//! transient messages to the user.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient, non-blocking message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Toast {
    /// An error toast with only a title.
    pub fn destructive(title: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            title: title.into(),
            description: None,
        }
    }
}

/// Receives toasts raised by the form.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to the log.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Destructive => warn!(title = %toast.title, "Toast"),
            ToastVariant::Default => info!(title = %toast.title, "Toast"),
        }
    }
}

/// Fans toasts out to every subscriber (one per connected WebSocket client).
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Toast>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, toast: Toast) {
        TracingNotifier.notify(toast.clone());
        // Nobody listening is fine; the toast is transient.
        let _ = self.tx.send(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destructive_toast_serializes() {
        let toast = Toast::destructive("비밀번호가 일치하지 않습니다");
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["variant"], "destructive");
        assert_eq!(json["title"], "비밀번호가 일치하지 않습니다");
        assert!(json.get("description").is_none());
    }

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let notifier = BroadcastNotifier::new();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();

        notifier.notify(Toast::destructive("boom"));

        assert_eq!(a.recv().await.unwrap().title, "boom");
        assert_eq!(b.recv().await.unwrap().title, "boom");
    }

    #[test]
    fn broadcast_without_subscribers_does_not_panic() {
        BroadcastNotifier::new().notify(Toast::destructive("nobody home"));
    }
}
