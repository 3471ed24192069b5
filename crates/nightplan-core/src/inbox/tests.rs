//! Tests for the invitation and friend-request inboxes.

use std::sync::{Arc, Mutex};

use super::{friend_requests::FriendRequestStore, invitations::InvitationStore, *};
use crate::{
    events::Source,
    models::{Direction, FriendDecision, InvitationDecision, Participant},
    params::{NewFriendRequest, NewInvitation},
};

fn invitation_params(plan_id: &str) -> NewInvitation {
    NewInvitation {
        plan_id: plan_id.to_string(),
        plan_name: "Downtown Friday".to_string(),
        from: Participant::new("f1", "Sam"),
        message: Some("you in?".to_string()),
    }
}

fn request_params(id: &str, direction: Direction) -> NewFriendRequest {
    NewFriendRequest {
        counterpart: Participant::new(id, "Alex"),
        direction,
        mutual_friends: 3,
    }
}

#[test]
fn test_add_forces_pending_and_counts_unread() {
    let store = InvitationStore::new(EventBus::default());
    assert_eq!(store.unread_count(), 0);

    let invitation = store.add(&invitation_params("1"));

    assert_eq!(invitation.status, ResponseStatus::Pending);
    assert!(invitation.id.starts_with("inv_"));
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn test_decline_twice_does_not_double_decrement() {
    let store = InvitationStore::new(EventBus::default());
    let invitation = store.add(&invitation_params("1"));
    assert_eq!(store.unread_count(), 1);

    let declined = store
        .respond(&invitation.id, InvitationDecision::Decline)
        .expect("invitation exists");
    assert_eq!(declined.status, ResponseStatus::Declined);
    assert!(declined.responded_at.is_some());
    assert_eq!(store.unread_count(), 0);

    let again = store
        .respond(&invitation.id, InvitationDecision::Decline)
        .expect("invitation exists");
    assert_eq!(again.status, ResponseStatus::Declined);
    assert_eq!(store.unread_count(), 0);
}

#[test]
fn test_accept_twice_is_idempotent() {
    let store = InvitationStore::new(EventBus::default());
    let first = store.add(&invitation_params("1"));
    store.add(&invitation_params("2"));

    store.respond(&first.id, InvitationDecision::Accept);
    let unread_after_first = store.unread_count();
    store.respond(&first.id, InvitationDecision::Accept);

    assert_eq!(store.get(&first.id).unwrap().status, ResponseStatus::Accepted);
    assert_eq!(store.unread_count(), unread_after_first);
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn test_resolved_entity_keeps_first_answer() {
    let store = InvitationStore::new(EventBus::default());
    let invitation = store.add(&invitation_params("1"));

    store.respond(&invitation.id, InvitationDecision::Maybe);
    let later = store
        .respond(&invitation.id, InvitationDecision::Accept)
        .unwrap();

    assert_eq!(later.status, ResponseStatus::Maybe);
}

#[test]
fn test_second_response_is_silent() {
    let bus = EventBus::default();
    let store = InvitationStore::new(bus.clone());
    let invitation = store.add(&invitation_params("1"));
    store.respond(&invitation.id, InvitationDecision::Accept);

    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let _subscription = store.subscribe(move |_| *counter.lock().unwrap() += 1);
    let mut rx = bus.subscribe();

    store.respond(&invitation.id, InvitationDecision::Decline);

    assert_eq!(*calls.lock().unwrap(), 1);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_respond_unknown_id_returns_none() {
    let store = InvitationStore::new(EventBus::default());
    store.add(&invitation_params("1"));

    assert!(store.respond("inv_999", InvitationDecision::Accept).is_none());
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn test_mark_all_read_keeps_statuses() {
    let store = InvitationStore::new(EventBus::default());
    store.add(&invitation_params("1"));
    store.add(&invitation_params("2"));

    store.mark_all_read();

    assert_eq!(store.unread_count(), 0);
    assert_eq!(store.pending().len(), 2);

    store.add(&invitation_params("3"));
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn test_responding_to_read_invitation_keeps_counter() {
    let store = InvitationStore::new(EventBus::default());
    let invitation = store.add(&invitation_params("1"));
    store.mark_all_read();

    store.respond(&invitation.id, InvitationDecision::Accept);

    assert_eq!(store.unread_count(), 0);
}

#[test]
fn test_invitation_queries() {
    let store = InvitationStore::new(EventBus::default());
    let a = store.add(&invitation_params("1"));
    let b = store.add(&invitation_params("2"));
    store.add(&invitation_params("1"));

    store.respond(&a.id, InvitationDecision::Accept);
    store.respond(&b.id, InvitationDecision::Maybe);

    assert_eq!(store.for_plan("1").len(), 2);
    assert_eq!(store.pending().len(), 1);
    assert_eq!(store.resolved().len(), 2);
    assert_eq!(store.attending().len(), 2);
    assert_eq!(store.items().len(), 3);
}

#[test]
fn test_friend_request_unread_only_counts_incoming() {
    let store = FriendRequestStore::new(EventBus::default());

    store.add(&request_params("f1", Direction::Outgoing));
    assert_eq!(store.unread_count(), 0);

    let incoming = store.add(&request_params("f2", Direction::Incoming));
    assert_eq!(store.unread_count(), 1);
    assert!(incoming.id.starts_with("fr_"));

    assert_eq!(store.incoming().len(), 1);
    assert_eq!(store.outgoing().len(), 1);
    assert_eq!(store.awaiting_answer().len(), 1);
}

#[test]
fn test_friend_request_accept_twice() {
    let store = FriendRequestStore::new(EventBus::default());
    let request = store.add(&request_params("f2", Direction::Incoming));

    store.respond(&request.id, FriendDecision::Accept);
    store.respond(&request.id, FriendDecision::Accept);

    assert_eq!(store.get(&request.id).unwrap().status, ResponseStatus::Accepted);
    assert_eq!(store.unread_count(), 0);
    assert!(store.awaiting_answer().is_empty());
}

#[test]
fn test_outgoing_request_can_be_cancelled() {
    let store = FriendRequestStore::new(EventBus::default());
    let request = store.add(&request_params("f1", Direction::Outgoing));

    let cancelled = store.respond(&request.id, FriendDecision::Cancel).unwrap();

    assert_eq!(cancelled.status, ResponseStatus::Cancelled);
    assert_eq!(store.resolved().len(), 1);
}

#[test]
fn test_stores_do_not_share_listeners() {
    let bus = EventBus::default();
    let invitations = InvitationStore::new(bus.clone());
    let requests = FriendRequestStore::new(bus.clone());

    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let _subscription = invitations.subscribe(move |_| *counter.lock().unwrap() += 1);

    requests.add(&request_params("f2", Direction::Incoming));
    requests.mark_all_read();

    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn test_inbox_events_use_their_own_envelope() {
    let bus = EventBus::default();
    let invitations = InvitationStore::new(bus.clone());
    let requests = FriendRequestStore::new(bus.clone());
    let mut rx = bus.subscribe();

    let invitation = invitations.add(&invitation_params("1"));
    requests.add(&request_params("f2", Direction::Incoming));

    let first = rx.try_recv().unwrap();
    assert_eq!(first.source(), Source::Invitations);
    match first {
        AppEvent::Invitation(event) => {
            assert_eq!(event.action, InboxAction::Added);
            assert_eq!(event.id, Some(invitation.id));
            assert_eq!(event.status, Some(ResponseStatus::Pending));
            assert_eq!(event.unread_count, 1);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(rx.try_recv().unwrap().source(), Source::FriendRequests);
}

#[test]
fn test_subscriber_gets_snapshot_copies() {
    let store = InvitationStore::new(EventBus::default());
    store.add(&invitation_params("1"));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let _subscription = store.subscribe(move |snapshot| {
        sink.lock()
            .unwrap()
            .push((snapshot.items.len(), snapshot.unread_count));
    });
    store.mark_all_read();

    assert_eq!(*seen.lock().unwrap(), vec![(1, 1), (1, 0)]);
}
