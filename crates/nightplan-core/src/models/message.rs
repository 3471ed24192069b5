//! Conversation thread and message models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::PlanStatus;

/// Shape of a conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ThreadKind {
    Direct,
    Group,
    MapGroup,
}

/// Where a conversation was started from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThreadContext {
    Direct,
    Plan,
    Map,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Ping,
    #[default]
    Message,
    Plan,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

/// A member of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single message. Messages are appended and never edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub timestamp: Timestamp,
    pub status: DeliveryStatus,
}

/// A conversation with its summary fields and (optionally) full history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageThread {
    /// Derived from participant or plan identity, see [`MessageThread::direct_id`]
    pub id: String,
    pub kind: ThreadKind,
    pub context: ThreadContext,
    /// Display name (friend name, group name or plan name)
    pub name: String,
    pub participants: Vec<Participant>,
    /// Full history, populated by appends from open conversations
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Summary cache shown in thread lists
    pub last_message: Option<Message>,
    /// Last activity
    pub timestamp: Timestamp,
    pub unread: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_status: Option<PlanStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Monotonic activity counter that breaks timestamp ties
    #[serde(skip)]
    pub(crate) activity: u64,
}

impl MessageThread {
    /// Thread id for a one-to-one conversation with `participant_id`.
    pub fn direct_id(participant_id: &str) -> String {
        format!("direct_{participant_id}")
    }

    /// Thread id for the group chat of plan `plan_id`.
    pub fn plan_id_for(plan_id: &str) -> String {
        format!("plan_{plan_id}")
    }

    /// Thread id for a map meetup around `venue_id`.
    pub fn map_id_for(venue_id: &str) -> String {
        format!("map_{venue_id}")
    }

    /// Case-insensitive substring match over name, venue, last message and
    /// participant names. `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

        contains(&self.name)
            || self.venue.as_deref().is_some_and(contains)
            || self
                .last_message
                .as_ref()
                .is_some_and(|message| contains(&message.content))
            || self
                .participants
                .iter()
                .any(|participant| contains(&participant.name))
    }
}
