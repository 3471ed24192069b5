//! Core library for the Nightplan night-out planner.
//!
//! This crate holds the client-side state of the application: the
//! progression of tonight's plan, conversations, plan invitations and
//! friend requests. Each of these lives in its own store:
//!
//! - [`progress::PlanProgressStore`]: the one active plan moving through
//!   `not_started → en_route → checked_in → moving_to_next → completed`
//! - [`messages::MessageStore`]: conversation threads and unread state,
//!   with the [`messages::NotificationFeed`] view on top
//! - [`inbox::invitations::InvitationStore`] and
//!   [`inbox::friend_requests::FriendRequestStore`]: entities waiting for
//!   a single answer
//!
//! # Observing stores
//!
//! Stores can be observed two ways:
//!
//! - **Subscriptions** ([`registry`]): a listener registered with
//!   `subscribe` receives the current snapshot immediately and a fresh
//!   snapshot after every mutation of that store.
//! - **Event bus** ([`events`]): every mutation also publishes a typed
//!   [`events::AppEvent`] on a broadcast channel, for code that has no
//!   handle to the store.
//!
//! Stores never talk to each other. [`AppBuilder`] builds them all around
//! one bus.
//!
//! # Quick Start
//!
//! ```rust
//! use nightplan_core::{params::SendMessage, seed, AppBuilder, Config, ProgressStage};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = AppBuilder::new().with_config(Config::default()).build()?;
//!
//! app.progress.install(&seed::demo_plans());
//! app.progress.start_night();
//! assert_eq!(app.progress.snapshot().stage, ProgressStage::EnRoute);
//!
//! app.messages.receive(&SendMessage::text("f1", "Sam", "almost there"));
//! assert_eq!(app.messages.unread_count(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod geo;
pub mod inbox;
pub mod messages;
pub mod models;
pub mod params;
pub mod progress;
pub mod registry;
pub mod seed;
pub mod simulation;

// Re-export commonly used types
pub use app::{App, AppBuilder};
pub use config::Config;
pub use error::{NightplanError, Result};
pub use events::{AppEvent, EventBus};
pub use inbox::{
    friend_requests::FriendRequestStore, invitations::InvitationStore, Inbox, InboxSnapshot,
};
pub use messages::{MessageStore, MessagesSnapshot, NotificationFeed};
pub use models::{
    FriendDecision, FriendRequest, Invitation, InvitationDecision, MessageThread, Participant,
    Plan, PlanProgress, PlanStatus, ProgressStage, ResponseStatus, Stop,
};
pub use progress::PlanProgressStore;
pub use registry::Subscription;
