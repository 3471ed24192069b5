//! Status enumerations for plans, progress stages and inbox entities.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of plan statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// The plan is happening tonight
    Active,

    /// The plan is scheduled for later
    #[default]
    Planned,

    /// Someone invited the user to this plan
    Invited,

    /// The user answered "maybe" to an invitation
    Maybe,

    /// The night is over
    Completed,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PlanStatus::Active),
            "planned" => Ok(PlanStatus::Planned),
            "invited" => Ok(PlanStatus::Invited),
            "maybe" => Ok(PlanStatus::Maybe),
            "completed" => Ok(PlanStatus::Completed),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Lowercase wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Planned => "planned",
            PlanStatus::Invited => "invited",
            PlanStatus::Maybe => "maybe",
            PlanStatus::Completed => "completed",
        }
    }
}

/// Phase of the active plan's real-time execution.
///
/// `Completed` is terminal: only installing a different plan starts a new
/// progression.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    #[default]
    NotStarted,
    EnRoute,
    CheckedIn,
    MovingToNext,
    Completed,
}

impl ProgressStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStage::NotStarted => "not_started",
            ProgressStage::EnRoute => "en_route",
            ProgressStage::CheckedIn => "checked_in",
            ProgressStage::MovingToNext => "moving_to_next",
            ProgressStage::Completed => "completed",
        }
    }

    /// Get stage with an icon for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nightplan_core::models::ProgressStage;
    ///
    /// assert_eq!(ProgressStage::CheckedIn.with_icon(), "📍 Checked in");
    /// assert_eq!(ProgressStage::Completed.with_icon(), "✓ Completed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ProgressStage::NotStarted => "○ Not started",
            ProgressStage::EnRoute => "➤ En route",
            ProgressStage::CheckedIn => "📍 Checked in",
            ProgressStage::MovingToNext => "↪ Moving to next",
            ProgressStage::Completed => "✓ Completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressStage::Completed)
    }
}

/// Lifecycle of an invitation or friend request.
///
/// Every entity starts `Pending` and is resolved exactly once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Maybe,
    Cancelled,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Pending => "pending",
            ResponseStatus::Accepted => "accepted",
            ResponseStatus::Declined => "declined",
            ResponseStatus::Maybe => "maybe",
            ResponseStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResponseStatus::Pending)
    }

    pub fn is_resolved(&self) -> bool {
        !self.is_pending()
    }
}

/// Answer to a plan invitation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvitationDecision {
    Accept,
    Decline,
    Maybe,
    Cancel,
}

impl From<InvitationDecision> for ResponseStatus {
    fn from(decision: InvitationDecision) -> Self {
        match decision {
            InvitationDecision::Accept => ResponseStatus::Accepted,
            InvitationDecision::Decline => ResponseStatus::Declined,
            InvitationDecision::Maybe => ResponseStatus::Maybe,
            InvitationDecision::Cancel => ResponseStatus::Cancelled,
        }
    }
}

impl FromStr for InvitationDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" | "accepted" => Ok(InvitationDecision::Accept),
            "decline" | "declined" => Ok(InvitationDecision::Decline),
            "maybe" => Ok(InvitationDecision::Maybe),
            "cancel" | "cancelled" => Ok(InvitationDecision::Cancel),
            _ => Err(format!("Invalid invitation decision: {s}")),
        }
    }
}

/// Answer to a friend request. Friend requests have no "maybe".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FriendDecision {
    Accept,
    Decline,
    Cancel,
}

impl From<FriendDecision> for ResponseStatus {
    fn from(decision: FriendDecision) -> Self {
        match decision {
            FriendDecision::Accept => ResponseStatus::Accepted,
            FriendDecision::Decline => ResponseStatus::Declined,
            FriendDecision::Cancel => ResponseStatus::Cancelled,
        }
    }
}

impl FromStr for FriendDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" | "accepted" => Ok(FriendDecision::Accept),
            "decline" | "declined" => Ok(FriendDecision::Decline),
            "cancel" | "cancelled" => Ok(FriendDecision::Cancel),
            _ => Err(format!("Invalid friend request decision: {s}")),
        }
    }
}
