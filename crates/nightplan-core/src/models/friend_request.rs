//! Friend request model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Participant, ResponseStatus};

/// Whether the user received or sent a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// A request to become friends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    pub id: String,
    /// The other party: requester for incoming, recipient for outgoing
    pub counterpart: Participant,
    pub direction: Direction,
    #[serde(default)]
    pub mutual_friends: u32,
    pub status: ResponseStatus,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<Timestamp>,
    #[serde(default)]
    pub read: bool,
}
