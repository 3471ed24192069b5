//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper prints its items one per line and a placeholder line when
//! the collection is empty.

use std::fmt;

use crate::models::{FriendRequest, Invitation, Message, MessageThread};

macro_rules! listing {
    ($(#[$doc:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$doc])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self(items)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    return writeln!(f, $empty);
                }
                for item in &self.0 {
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    };
}

listing!(
    /// Thread list, in the order given (usually most recent first).
    ///
    /// ```rust
    /// use nightplan_core::display::Threads;
    ///
    /// assert_eq!(Threads(vec![]).to_string(), "No conversations yet.\n");
    /// ```
    Threads,
    MessageThread,
    "No conversations yet."
);

listing!(
    /// Invitation list.
    Invitations,
    Invitation,
    "No invitations."
);

listing!(
    /// Friend request list.
    FriendRequests,
    FriendRequest,
    "No friend requests."
);

/// Full history of one conversation.
pub struct Conversation(pub Vec<Message>);

impl fmt::Display for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No messages yet.");
        }
        for message in &self.0 {
            writeln!(f, "> {message}")?;
        }
        Ok(())
    }
}
