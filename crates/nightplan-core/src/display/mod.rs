//! Markdown formatting for models, collections and events.
//!
//! Domain models implement [`std::fmt::Display`] directly (see
//! [`models`]); collections are wrapped in newtypes from [`collections`]
//! so that empty lists render a placeholder instead of nothing.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Store snapshot │    │ Display impls & │    │    Markdown     │
//! │ (threads, ...)  │───▶│   wrappers      │───▶│ (termimad/plain)│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use nightplan_core::display::OperationStatus;
//!
//! let status = OperationStatus::NotFound("thread direct_x".to_string());
//! assert_eq!(status.to_string(), "Not found: thread direct_x\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod events;
pub mod models;
pub mod status;

pub use collections::{Conversation, FriendRequests, Invitations, Threads};
pub use datetime::{Ago, LocalTime};
pub use status::OperationStatus;
