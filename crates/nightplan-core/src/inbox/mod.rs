//! Inboxes of entities that wait for a single answer.
//!
//! Invitations and friend requests share one contract, implemented once by
//! the generic [`Inbox`]:
//!
//! - entities enter as `pending` and unread;
//! - [`Inbox::respond`] resolves a pending entity exactly once, answering
//!   an already resolved entity changes nothing;
//! - [`Inbox::mark_all_read`] clears the unread counter without resolving
//!   anything (read and resolved are independent);
//! - the unread counter is recomputed from the entities on every read, so
//!   it can never drift from the [`InboxItem::counts_as_unread`] predicate.
//!
//! The payload-specific parts live in [`invitations`] and
//! [`friend_requests`].

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use jiff::Timestamp;
use log::{debug, warn};
use serde::Serialize;

pub mod friend_requests;
pub mod invitations;

#[cfg(test)]
mod tests;

use crate::{
    events::{AppEvent, EventBus, InboxAction, InboxEvent},
    models::ResponseStatus,
    registry::{Registry, Subscription},
};

/// An entity that can be stored in an [`Inbox`].
pub trait InboxItem: Clone + Send + Sync + 'static {
    /// Answers accepted by [`Inbox::respond`] for this entity type.
    type Decision: Into<ResponseStatus> + Copy + fmt::Debug;

    /// Store name used in logs.
    const KIND: &'static str;

    /// Prefix of generated ids, e.g. `inv` for `inv_1`.
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;

    fn status(&self) -> ResponseStatus;

    fn is_read(&self) -> bool;

    /// Forces the freshly added state: pending and unread.
    fn reset(&mut self);

    fn resolve(&mut self, status: ResponseStatus, at: Timestamp);

    fn mark_read(&mut self);

    /// Whether this entity counts toward the unread counter.
    fn counts_as_unread(&self) -> bool {
        self.status().is_pending() && !self.is_read()
    }

    /// Bus envelope for events of this inbox.
    fn envelope(event: InboxEvent) -> AppEvent;
}

/// What subscribers of an inbox receive.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InboxSnapshot<T> {
    /// Insertion order
    pub items: Vec<T>,
    pub unread_count: usize,
}

struct InboxState<T> {
    items: Vec<T>,
    next_id: u64,
}

impl<T: InboxItem> InboxState<T> {
    fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| item.counts_as_unread()).count()
    }

    fn snapshot(&self) -> InboxSnapshot<T> {
        InboxSnapshot {
            items: self.items.clone(),
            unread_count: self.unread_count(),
        }
    }
}

/// Append-only collection of [`InboxItem`]s with an unread counter.
pub struct Inbox<T: InboxItem> {
    state: Arc<Mutex<InboxState<T>>>,
    registry: Registry<InboxSnapshot<T>>,
    bus: EventBus,
}

impl<T: InboxItem> Clone for Inbox<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            registry: self.registry.clone(),
            bus: self.bus.clone(),
        }
    }
}

impl<T: InboxItem> fmt::Debug for Inbox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inbox")
            .field("kind", &T::KIND)
            .field("items", &self.lock().items.len())
            .finish()
    }
}

impl<T: InboxItem> Inbox<T> {
    pub fn new(bus: EventBus) -> Self {
        Self {
            state: Arc::new(Mutex::new(InboxState {
                items: Vec::new(),
                next_id: 0,
            })),
            registry: Registry::new(T::KIND),
            bus,
        }
    }

    pub fn snapshot(&self) -> InboxSnapshot<T> {
        self.lock().snapshot()
    }

    /// Registers `listener`; it receives the current entities right away.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&InboxSnapshot<T>) + Send + Sync + 'static,
    {
        let subscription = {
            let state = self.lock();
            self.registry.register(listener, state.snapshot())
        };
        self.registry.drain();
        subscription
    }

    /// Adds the entity produced by `build`, which receives a fresh id.
    /// The entity is forced to pending and unread.
    pub(crate) fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(String) -> T,
    {
        let item = {
            let mut state = self.lock();
            state.next_id += 1;
            let mut item = build(format!("{}_{}", T::ID_PREFIX, state.next_id));
            item.reset();
            state.items.push(item.clone());
            self.publish(&state, InboxAction::Added, Some(&item));
            item
        };

        self.registry.drain();
        item
    }

    /// Resolves the entity `id` with `decision`.
    ///
    /// Returns `None` when no such entity exists. An entity that is
    /// already resolved is returned unchanged and nobody is notified.
    pub fn respond(&self, id: &str, decision: T::Decision) -> Option<T> {
        let status: ResponseStatus = decision.into();
        let item = {
            let mut state = self.lock();
            let Some(item) = state.items.iter_mut().find(|item| item.id() == id) else {
                warn!("{}: respond to unknown id {id}", T::KIND);
                return None;
            };
            if item.status().is_resolved() {
                debug!(
                    "{}: {id} already {}, ignoring {decision:?}",
                    T::KIND,
                    item.status().as_str()
                );
                return Some(item.clone());
            }
            item.resolve(status, Timestamp::now());
            let item = item.clone();
            self.publish(&state, InboxAction::Responded, Some(&item));
            item
        };

        self.registry.drain();
        Some(item)
    }

    /// Marks every entity read. Statuses are left alone.
    pub fn mark_all_read(&self) {
        {
            let mut state = self.lock();
            for item in &mut state.items {
                item.mark_read();
            }
            self.publish(&state, InboxAction::AllRead, None);
        }
        self.registry.drain();
    }

    pub fn unread_count(&self) -> usize {
        self.lock().unread_count()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.lock().items.iter().find(|item| item.id() == id).cloned()
    }

    /// Every entity in insertion order.
    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    pub fn pending(&self) -> Vec<T> {
        self.filter(|item| item.status().is_pending())
    }

    pub fn resolved(&self) -> Vec<T> {
        self.filter(|item| item.status().is_resolved())
    }

    pub(crate) fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.lock()
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, InboxState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues the snapshot of `state` and publishes the event. Called with
    /// the state lock held; the caller drains the registry after releasing
    /// it.
    fn publish(&self, state: &InboxState<T>, action: InboxAction, item: Option<&T>) {
        let snapshot = state.snapshot();
        debug!(
            "{}: {action:?} {:?} unread={}",
            T::KIND,
            item.map(|item| item.id()),
            snapshot.unread_count
        );
        let event = InboxEvent {
            action,
            id: item.map(|item| item.id().to_string()),
            status: item.map(|item| item.status()),
            unread_count: snapshot.unread_count,
        };
        self.registry.enqueue(snapshot);
        self.bus.emit(T::envelope(event));
    }
}
