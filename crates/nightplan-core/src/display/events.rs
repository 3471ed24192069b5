//! One-line rendering of bus events.

use std::fmt;

use crate::events::AppEvent;

impl fmt::Display for AppEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEvent::Plan(event) => {
                let plan = event
                    .plan
                    .as_ref()
                    .map(|plan| plan.name.as_str())
                    .unwrap_or("no plan");
                write!(
                    f,
                    "[plan] {:?} · {plan} · stop {} · {}",
                    event.action,
                    event.stop_index + 1,
                    event.state
                )
            }
            AppEvent::Message(event) => {
                write!(f, "[messages] {:?}", event.action)?;
                if let Some(thread_id) = &event.thread_id {
                    write!(f, " · {thread_id}")?;
                }
                write!(f, " · {} unread", event.unread_count)
            }
            AppEvent::Invitation(event) | AppEvent::FriendRequest(event) => {
                let label = match self {
                    AppEvent::Invitation(_) => "invitations",
                    _ => "friend requests",
                };
                write!(f, "[{label}] {:?}", event.action)?;
                if let (Some(id), Some(status)) = (&event.id, &event.status) {
                    write!(f, " · {id} {status}")?;
                }
                write!(f, " · {} unread", event.unread_count)
            }
        }
    }
}
