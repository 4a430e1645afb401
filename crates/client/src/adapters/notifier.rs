//! Notifier adapters
//!
//! - `LogNotifier` writes notifications through the `log` facade
//! - `ChannelNotifier` broadcasts them to any number of UI subscribers

use lendmark_core::TransactionId;
use lendmark_ports::Notifier;
use log::{info, warn};
use tokio::sync::broadcast;

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Pending,
    Success(TransactionId),
    Error(String),
}

/// Notifier that only logs
pub struct LogNotifier {
    label: String,
}

impl LogNotifier {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new("market")
    }
}

impl Notifier for LogNotifier {
    fn pending(&self) {
        info!("[{}] Waiting for transaction to be confirmed...", self.label);
    }

    fn success(&self, transaction_id: &TransactionId) {
        info!("[{}] Transaction successful: {}", self.label, transaction_id);
    }

    fn error(&self, message: &str) {
        warn!("[{}] Transaction failed: {}", self.label, message);
    }
}

/// Notifier publishing on a broadcast channel
pub struct ChannelNotifier {
    tx: broadcast::Sender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and a first subscriber
    pub fn pair(capacity: usize) -> (Self, broadcast::Receiver<Notification>) {
        let (tx, rx) = broadcast::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    fn publish(&self, notification: Notification) {
        // No subscribers is fine, nobody is looking
        let _ = self.tx.send(notification);
    }
}

impl Notifier for ChannelNotifier {
    fn pending(&self) {
        self.publish(Notification::Pending);
    }

    fn success(&self, transaction_id: &TransactionId) {
        self.publish(Notification::Success(*transaction_id));
    }

    fn error(&self, message: &str) {
        self.publish(Notification::Error(message.to_string()));
    }
}
