//! Data models for plans, progress, conversations and inbox entities.
//!
//! These are plain serde-friendly values. Stores hand out clones of them as
//! snapshots; nothing outside a store can reach the store's live state.
//! Display implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use nightplan_core::models::{Plan, PlanStatus, Stop};
//!
//! let plan = Plan {
//!     id: "p1".to_string(),
//!     name: "Friday crawl".to_string(),
//!     date: "Tonight".to_string(),
//!     time: "8:00 PM".to_string(),
//!     stops: vec![Stop {
//!         id: "s1".to_string(),
//!         name: "The Anchor".to_string(),
//!         venue_type: "bar".to_string(),
//!         duration_minutes: 90,
//!         cost: 25.0,
//!         address: None,
//!         booking: None,
//!         capacity: None,
//!         location: None,
//!     }],
//!     attendees: 4,
//!     status: PlanStatus::Active,
//!     notes: None,
//!     estimated_cost: None,
//!     duration: None,
//! };
//! assert_eq!(plan.total_minutes(), 90);
//! ```

pub mod friend_request;
pub mod invitation;
pub mod message;
pub mod plan;
pub mod progress;
pub mod status;

#[cfg(test)]
mod tests;

pub use friend_request::{Direction, FriendRequest};
pub use invitation::Invitation;
pub use message::{
    DeliveryStatus, Message, MessageThread, MessageType, Participant, ThreadContext, ThreadKind,
};
pub use plan::{Plan, Stop};
pub use progress::PlanProgress;
pub use status::{
    FriendDecision, InvitationDecision, PlanStatus, ProgressStage, ResponseStatus,
};
