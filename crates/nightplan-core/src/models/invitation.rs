//! Plan invitation model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Participant, ResponseStatus};

/// A request for the user to join someone's plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: String,
    pub plan_id: String,
    pub plan_name: String,
    /// Who sent the invitation
    pub from: Participant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: ResponseStatus,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<Timestamp>,
    /// Seen by the user; independent from `status`
    #[serde(default)]
    pub read: bool,
}
