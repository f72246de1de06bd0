//! # mb-notify-local
//!
//! In-process implementation of `NotificationRelay`. Sessions register by
//! username (one user may hold several live sessions across devices); a
//! like notification fans out to every session of the recipient. Delivery
//! is fire-and-forget: a recipient with no sessions, or a session whose
//! receiver is gone, is not an error.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc;

use mb_core::NotificationRelay;

/// What a connected session receives when someone likes their board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeNotification {
    pub kind: &'static str,
    pub who_liked: String,
}

#[derive(Default)]
pub struct LocalNotifyRelay {
    sessions: DashMap<String, Vec<mpsc::UnboundedSender<LikeNotification>>>,
}

impl LocalNotifyRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a live session for `username` and returns its receiving
    /// end. Dropping the receiver is how a session disconnects; the dead
    /// sender is swept on the next notification.
    pub fn register_session(&self, username: &str) -> mpsc::UnboundedReceiver<LikeNotification> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.sessions.entry(username.to_string()).or_default().push(tx);
        rx
    }
}

#[async_trait]
impl NotificationRelay for LocalNotifyRelay {
    async fn notify_like(&self, from_username: &str, to_username: &str) {
        let Some(mut senders) = self.sessions.get_mut(to_username) else {
            tracing::debug!(to_username, "like notification dropped, recipient not connected");
            return;
        };
        let note = LikeNotification { kind: "like", who_liked: from_username.to_string() };
        senders.retain(|tx| tx.send(note.clone()).is_ok());
    }
}
