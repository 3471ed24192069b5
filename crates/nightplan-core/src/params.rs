//! Parameter structures for store operations.
//!
//! These structures are shared by every caller of the stores (the CLI
//! shell, the demo script, the simulated backend). They carry no
//! interface-specific derives beyond serde, so a front-end can wrap them
//! with its own argument types and convert with `into_params()`-style
//! methods:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Shell command  │    │  Core Params    │    │     Stores      │
//! │  (parsed line)  │───▶│ (serde derives) │───▶│ (MessageStore,  │
//! │                 │    │                 │    │  Inbox, ...)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Stores accept any value of these types; `validate()` is for front-ends
//! that want to reject obviously broken input before it reaches a store.

use serde::{Deserialize, Serialize};

use crate::{
    error::{NightplanError, Result},
    models::{Direction, MessageType, Participant, PlanStatus},
};

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NightplanError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}

/// A message exchanged with a single counterpart.
///
/// For [`crate::messages::MessageStore::send`] the counterpart is the
/// recipient, for `receive` it is the sender.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    pub counterpart_id: String,
    pub counterpart_name: String,
    pub content: String,
    #[serde(default, rename = "type")]
    pub message_type: MessageType,
    /// Venue the message refers to
    #[serde(default)]
    pub venue: Option<String>,
    /// Plan the message refers to
    #[serde(default)]
    pub plan_id: Option<String>,
}

impl SendMessage {
    /// Plain text message.
    pub fn text(
        counterpart_id: impl Into<String>,
        counterpart_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            counterpart_id: counterpart_id.into(),
            counterpart_name: counterpart_name.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("counterpart_id", &self.counterpart_id)?;
        if self.message_type != MessageType::Ping {
            require("content", &self.content)?;
        }
        Ok(())
    }
}

/// A message appended to the history of an existing thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendMessage {
    pub thread_id: String,
    /// Author; `None` means the local user
    #[serde(default)]
    pub sender: Option<Participant>,
    pub content: String,
    #[serde(default, rename = "type")]
    pub message_type: MessageType,
}

impl AppendMessage {
    /// Message written by the local user.
    pub fn outgoing(thread_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Message written by `sender`.
    pub fn incoming(
        thread_id: impl Into<String>,
        sender: Participant,
        content: impl Into<String>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            sender: Some(sender),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("thread_id", &self.thread_id)?;
        require("content", &self.content)
    }
}

/// Group thread attached to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanThread {
    pub plan_id: String,
    pub plan_name: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub plan_status: Option<PlanStatus>,
    #[serde(default)]
    pub venue: Option<String>,
}

/// Invitation to join a plan, as received from a friend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvitation {
    pub plan_id: String,
    pub plan_name: String,
    pub from: Participant,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewInvitation {
    pub fn validate(&self) -> Result<()> {
        require("plan_id", &self.plan_id)?;
        require("from.id", &self.from.id)
    }
}

/// Friend request sent or received by the local user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFriendRequest {
    pub counterpart: Participant,
    pub direction: Direction,
    #[serde(default)]
    pub mutual_friends: u32,
}

impl NewFriendRequest {
    pub fn validate(&self) -> Result<()> {
        require("counterpart.id", &self.counterpart.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_validation() {
        assert!(SendMessage::text("f1", "Sam", "hi").validate().is_ok());
        assert!(SendMessage::text("", "Sam", "hi").validate().is_err());
        assert!(SendMessage::text("f1", "Sam", "  ").validate().is_err());

        let ping = SendMessage {
            message_type: MessageType::Ping,
            ..SendMessage::text("f1", "Sam", "")
        };
        assert!(ping.validate().is_ok());
    }

    #[test]
    fn test_append_message_constructors() {
        let outgoing = AppendMessage::outgoing("plan_1", "on my way");
        assert!(outgoing.sender.is_none());

        let incoming = AppendMessage::incoming("plan_1", Participant::new("f2", "Alex"), "same");
        assert_eq!(incoming.sender.unwrap().id, "f2");
    }

    #[test]
    fn test_send_message_deserializes_type_field() {
        let params: SendMessage = serde_json::from_str(
            r#"{"counterpartId": "f1", "counterpartName": "Sam", "content": "", "type": "ping"}"#,
        )
        .unwrap();
        assert_eq!(params.message_type, MessageType::Ping);
    }
}
