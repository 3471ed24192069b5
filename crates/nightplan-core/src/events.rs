//! Process-wide event bus.
//!
//! Stores publish one [`AppEvent`] per mutation so that parts of the
//! application without a handle to a store (a friend-location broadcaster,
//! a toast renderer) can react to it. Events travel over a
//! `tokio::sync::broadcast` channel: publishing never blocks and never runs
//! receiver code, receivers see the event on their next `recv`.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::{Plan, ProgressStage, ResponseStatus};

/// Default number of events buffered per receiver.
pub const DEFAULT_CAPACITY: usize = 256;

/// Identity of the store that published an event.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    PlanProgress,
    Messages,
    Invitations,
    FriendRequests,
}

/// Transition applied by the plan progress store.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    Installed,
    NightStarted,
    CheckedIn,
    Departed,
    MovedToNext,
    Completed,
    FriendEnRoute,
    FriendLeft,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanEvent {
    pub action: PlanAction,
    pub plan: Option<Plan>,
    pub stop_index: usize,
    pub state: ProgressStage,
}

/// Mutation applied by the message store.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageAction {
    Sent,
    Received,
    Appended,
    ThreadRead,
    AllRead,
    PinToggled,
    ThreadCreated,
    ThreadUpserted,
    PlanStatusUpdated,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub action: MessageAction,
    pub thread_id: Option<String>,
    pub message_id: Option<String>,
    pub unread_count: usize,
}

/// Mutation applied by an invitation or friend-request inbox.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InboxAction {
    Added,
    Responded,
    AllRead,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InboxEvent {
    pub action: InboxAction,
    pub id: Option<String>,
    pub status: Option<ResponseStatus>,
    pub unread_count: usize,
}

/// Every event published on the bus, one variant per store family.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "source", content = "payload", rename_all = "snake_case")]
pub enum AppEvent {
    Plan(PlanEvent),
    Message(MessageEvent),
    Invitation(InboxEvent),
    FriendRequest(InboxEvent),
}

impl AppEvent {
    pub fn source(&self) -> Source {
        match self {
            AppEvent::Plan(_) => Source::PlanProgress,
            AppEvent::Message(_) => Source::Messages,
            AppEvent::Invitation(_) => Source::Invitations,
            AppEvent::FriendRequest(_) => Source::FriendRequests,
        }
    }
}

/// Cloneable publisher handle; every clone feeds the same receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes `event` to current receivers. Having none is fine.
    pub fn emit(&self, event: AppEvent) {
        if self.sender.send(event).is_err() {
            log::trace!("event dropped: no receivers");
        }
    }

    /// Receiver for events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all() -> InboxEvent {
        InboxEvent {
            action: InboxAction::AllRead,
            id: None,
            status: None,
            unread_count: 0,
        }
    }

    #[test]
    fn test_emit_without_receivers_is_silent() {
        let bus = EventBus::new(4);
        bus.emit(AppEvent::Invitation(read_all()));
        assert_eq!(bus.receiver_count(), 0);
    }

    #[test]
    fn test_receiver_sees_events_in_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.emit(AppEvent::Invitation(read_all()));
        bus.emit(AppEvent::FriendRequest(read_all()));

        assert_eq!(rx.try_recv().unwrap().source(), Source::Invitations);
        assert_eq!(rx.try_recv().unwrap().source(), Source::FriendRequests);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_event_serializes_with_source_tag() {
        let json = serde_json::to_value(AppEvent::FriendRequest(read_all())).unwrap();
        assert_eq!(json["source"], "friend_request");
        assert_eq!(json["payload"]["action"], "all_read");
    }
}
