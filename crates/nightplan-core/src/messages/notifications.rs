//! Notification-shaped view over the message store.
//!
//! Older screens think in terms of "notifications" (a ping, a message, a
//! plan share) rather than threads. [`NotificationFeed`] adapts the thread
//! store to that vocabulary; it owns no state of its own.

use jiff::Timestamp;
use serde::Serialize;

use super::{MessageStore, MessagesSnapshot};
use crate::{
    models::{MessageThread, MessageType, Participant},
    params::SendMessage,
    registry::Subscription,
};

/// One entry of the notification feed, derived from a thread summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Id of the underlying thread
    pub id: String,
    pub from: Participant,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub timestamp: Timestamp,
    pub read: bool,
}

impl Notification {
    fn from_thread(thread: &MessageThread, me: &Participant) -> Option<Self> {
        let message = thread.last_message.as_ref()?;
        let from = if message.sender_id == me.id {
            me.clone()
        } else {
            thread
                .participants
                .iter()
                .find(|participant| participant.id == message.sender_id)
                .cloned()
                .unwrap_or_else(|| Participant::new(&message.sender_id, &thread.name))
        };

        Some(Self {
            id: thread.id.clone(),
            from,
            content: message.content.clone(),
            message_type: message.message_type,
            timestamp: message.timestamp,
            read: !thread.unread,
        })
    }
}

fn to_notifications(snapshot: &MessagesSnapshot, me: &Participant) -> Vec<Notification> {
    snapshot
        .threads
        .iter()
        .filter_map(|thread| Notification::from_thread(thread, me))
        .collect()
}

/// Legacy notification API backed by a [`MessageStore`].
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    store: MessageStore,
}

impl NotificationFeed {
    pub fn new(store: MessageStore) -> Self {
        Self { store }
    }

    /// Threads with at least one message, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        to_notifications(&self.store.snapshot(), self.store.me())
    }

    pub fn unread_count(&self) -> usize {
        self.store.unread_count()
    }

    pub fn mark_as_read(&self, notification_id: &str) -> Option<()> {
        self.store.mark_thread_read(notification_id)
    }

    pub fn mark_all_as_read(&self) {
        self.store.mark_all_read();
    }

    /// Sends a location ping to a friend.
    pub fn send_ping(&self, friend: &Participant) -> String {
        self.store.send(&SendMessage {
            counterpart_id: friend.id.clone(),
            counterpart_name: friend.name.clone(),
            content: "📍 Ping!".to_string(),
            message_type: MessageType::Ping,
            venue: None,
            plan_id: None,
        })
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        let me = self.store.me().clone();
        self.store
            .subscribe(move |snapshot| listener(&to_notifications(snapshot, &me)))
    }
}
