//! Plan invitations received by the user.

use jiff::Timestamp;

use super::{Inbox, InboxItem};
use crate::{
    events::{AppEvent, InboxEvent},
    models::{Invitation, InvitationDecision, ResponseStatus},
    params::NewInvitation,
};

impl InboxItem for Invitation {
    type Decision = InvitationDecision;

    const KIND: &'static str = "invitations";
    const ID_PREFIX: &'static str = "inv";

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

    fn envelope(event: InboxEvent) -> AppEvent {
        AppEvent::Invitation(event)
    }
}

/// Inbox of plan invitations.
pub type InvitationStore = Inbox<Invitation>;

impl Inbox<Invitation> {
    /// Records an invitation; it starts pending and unread.
    pub fn add(&self, params: &NewInvitation) -> Invitation {
        self.insert_with(|id| Invitation {
            id,
            plan_id: params.plan_id.clone(),
            plan_name: params.plan_name.clone(),
            from: params.from.clone(),
            message: params.message.clone(),
            status: ResponseStatus::Pending,
            created_at: Timestamp::now(),
            responded_at: None,
            read: false,
        })
    }

    /// Invitations to plan `plan_id`.
    pub fn for_plan(&self, plan_id: &str) -> Vec<Invitation> {
        self.filter(|invitation| invitation.plan_id == plan_id)
    }

    /// Invitations the user said yes or maybe to.
    pub fn attending(&self) -> Vec<Invitation> {
        self.filter(|invitation| {
            matches!(
                invitation.status,
                ResponseStatus::Accepted | ResponseStatus::Maybe
            )
        })
    }
}
