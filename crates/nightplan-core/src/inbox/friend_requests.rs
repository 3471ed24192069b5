//! Friend requests sent and received by the user.

use jiff::Timestamp;

use super::{Inbox, InboxItem};
use crate::{
    events::{AppEvent, InboxEvent},
    models::{Direction, FriendDecision, FriendRequest, ResponseStatus},
    params::NewFriendRequest,
};

impl InboxItem for FriendRequest {
    type Decision = FriendDecision;

    const KIND: &'static str = "friend_requests";
    const ID_PREFIX: &'static str = "fr";

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ResponseStatus {
        self.status
    }

    fn is_read(&self) -> bool {
        self.read
    }

    fn reset(&mut self) {
        self.status = ResponseStatus::Pending;
        self.responded_at = None;
        self.read = false;
    }

    fn resolve(&mut self, status: ResponseStatus, at: Timestamp) {
        self.status = status;
        self.responded_at = Some(at);
    }

    fn mark_read(&mut self) {
        self.read = true;
    }

    /// Only incoming requests wait for the user.
    fn counts_as_unread(&self) -> bool {
        self.direction == Direction::Incoming && self.status.is_pending() && !self.read
    }

    fn envelope(event: InboxEvent) -> AppEvent {
        AppEvent::FriendRequest(event)
    }
}

/// Inbox of friend requests in both directions.
pub type FriendRequestStore = Inbox<FriendRequest>;

impl Inbox<FriendRequest> {
    /// Records a request; it starts pending and unread.
    pub fn add(&self, params: &NewFriendRequest) -> FriendRequest {
        self.insert_with(|id| FriendRequest {
            id,
            counterpart: params.counterpart.clone(),
            direction: params.direction,
            mutual_friends: params.mutual_friends,
            status: ResponseStatus::Pending,
            created_at: Timestamp::now(),
            responded_at: None,
            read: false,
        })
    }

    pub fn incoming(&self) -> Vec<FriendRequest> {
        self.filter(|request| request.direction == Direction::Incoming)
    }

    pub fn outgoing(&self) -> Vec<FriendRequest> {
        self.filter(|request| request.direction == Direction::Outgoing)
    }

    /// Incoming requests still waiting for an answer.
    pub fn awaiting_answer(&self) -> Vec<FriendRequest> {
        self.filter(|request| {
            request.direction == Direction::Incoming && request.status.is_pending()
        })
    }
}
