//! Conversation threads and their unread state.
//!
//! [`MessageStore`] keeps every thread the user is part of, keyed by a
//! thread id derived from the counterpart or plan identity. Two write paths
//! exist side by side:
//!
//! - [`MessageStore::send`] / [`MessageStore::receive`] only refresh the
//!   thread summary (last message, timestamp, unread flag), which is all a
//!   thread list needs;
//! - [`MessageStore::append_message`] also appends to the thread's full
//!   history for an open conversation.
//!
//! Thread lists are always returned most recently active first.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use jiff::Timestamp;
use log::debug;
use serde::Serialize;

pub mod notifications;
pub mod threads;


pub use notifications::{Notification, NotificationFeed};

use crate::{
    events::{AppEvent, EventBus, MessageAction, MessageEvent},
    models::{
        DeliveryStatus, Message, MessageThread, Participant, ThreadContext, ThreadKind,
    },
    params::SendMessage,
    registry::{Registry, Subscription},
};

/// What subscribers of the message store receive.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessagesSnapshot {
    /// Most recently active first
    pub threads: Vec<MessageThread>,
    pub unread_count: usize,
}

#[derive(Debug, Default)]
pub(crate) struct MessageState {
    pub(crate) threads: HashMap<String, MessageThread>,
    next_message: u64,
    activity: u64,
}

impl MessageState {
    pub(crate) fn next_message_id(&mut self) -> String {
        self.next_message += 1;
        format!("msg_{}", self.next_message)
    }

    pub(crate) fn next_activity(&mut self) -> u64 {
        self.activity += 1;
        self.activity
    }

    pub(crate) fn sorted_threads(&self) -> Vec<MessageThread> {
        let mut threads: Vec<MessageThread> = self.threads.values().cloned().collect();
        sort_by_recency(&mut threads);
        threads
    }

    pub(crate) fn unread_count(&self) -> usize {
        self.threads.values().filter(|thread| thread.unread).count()
    }
}

/// Most recent first; ties broken by activity order.
pub(crate) fn sort_by_recency(threads: &mut [MessageThread]) {
    threads.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.activity.cmp(&a.activity))
    });
}

/// Ids touched by a mutation, reported on the bus.
#[derive(Debug, Default)]
pub(crate) struct Change {
    pub(crate) thread_id: Option<String>,
    pub(crate) message_id: Option<String>,
}

impl Change {
    pub(crate) fn thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            message_id: None,
        }
    }

    pub(crate) fn message(thread_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            message_id: Some(message_id.into()),
        }
    }
}

/// Store of conversation threads.
#[derive(Debug, Clone)]
pub struct MessageStore {
    me: Participant,
    state: Arc<Mutex<MessageState>>,
    registry: Registry<MessagesSnapshot>,
    bus: EventBus,
}

impl MessageStore {
    /// `me` is the local user; it is the sender of everything sent from
    /// this store.
    pub fn new(bus: EventBus, me: Participant) -> Self {
        Self {
            me,
            state: Arc::new(Mutex::new(MessageState::default())),
            registry: Registry::new("messages"),
            bus,
        }
    }

    pub fn me(&self) -> &Participant {
        &self.me
    }

    pub fn snapshot(&self) -> MessagesSnapshot {
        let state = self.lock();
        MessagesSnapshot {
            threads: state.sorted_threads(),
            unread_count: state.unread_count(),
        }
    }

    /// Registers `listener`; it receives the current threads right away.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&MessagesSnapshot) + Send + Sync + 'static,
    {
        let subscription = {
            let state = self.lock();
            let current = MessagesSnapshot {
                threads: state.sorted_threads(),
                unread_count: state.unread_count(),
            };
            self.registry.register(listener, current)
        };
        self.registry.drain();
        subscription
    }

    /// Sends a message to `params.counterpart_id`, creating the direct
    /// thread if needed. Only the thread summary is updated and the
    /// thread is marked read.
    pub fn send(&self, params: &SendMessage) -> String {
        let recipient_id = params.counterpart_id.clone();
        let sender_id = self.me.id.clone();
        self.record_summary(MessageAction::Sent, params, sender_id, recipient_id, false)
    }

    /// Records a message from `params.counterpart_id`, creating the direct
    /// thread if needed, and marks the thread unread.
    pub fn receive(&self, params: &SendMessage) -> String {
        let sender_id = params.counterpart_id.clone();
        let recipient_id = self.me.id.clone();
        self.record_summary(MessageAction::Received, params, sender_id, recipient_id, true)
    }

    pub fn unread_count(&self) -> usize {
        self.lock().unread_count()
    }

    fn record_summary(
        &self,
        action: MessageAction,
        params: &SendMessage,
        sender_id: String,
        recipient_id: String,
        incoming: bool,
    ) -> String {
        let thread_id = MessageThread::direct_id(&params.counterpart_id);
        let counterpart = Participant::new(&params.counterpart_id, &params.counterpart_name);

        let message_id = self.update(action, |state| {
            let now = Timestamp::now();
            let message_id = state.next_message_id();
            let activity = state.next_activity();
            let message = Message {
                id: message_id.clone(),
                sender_id,
                recipient_id,
                content: params.content.clone(),
                message_type: params.message_type,
                timestamp: now,
                status: if incoming {
                    DeliveryStatus::Delivered
                } else {
                    DeliveryStatus::Sent
                },
            };

            let thread = state
                .threads
                .entry(thread_id.clone())
                .or_insert_with(|| MessageThread {
                    id: thread_id.clone(),
                    kind: ThreadKind::Direct,
                    context: ThreadContext::Direct,
                    name: counterpart.name.clone(),
                    participants: vec![counterpart.clone()],
                    messages: Vec::new(),
                    last_message: None,
                    timestamp: now,
                    unread: false,
                    pinned: false,
                    plan_id: None,
                    plan_status: None,
                    venue: None,
                    activity,
                });

            thread.last_message = Some(message);
            thread.timestamp = now;
            thread.activity = activity;
            thread.unread = incoming;
            if params.venue.is_some() {
                thread.venue = params.venue.clone();
            }
            if params.plan_id.is_some() {
                thread.plan_id = params.plan_id.clone();
            }

            Some((message_id.clone(), Change::message(&thread_id, message_id)))
        });

        // Summary writes always find or create their thread.
        message_id.unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, MessageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `mutate` under the lock. `None` from `mutate` means the
    /// referenced thread does not exist: nothing is notified.
    ///
    /// The snapshot is queued and the event published while the lock is
    /// held; delivery to subscribers happens after it is released.
    pub(crate) fn update<R, F>(&self, action: MessageAction, mutate: F) -> Option<R>
    where
        F: FnOnce(&mut MessageState) -> Option<(R, Change)>,
    {
        let result = {
            let mut state = self.lock();
            let (result, change) = mutate(&mut state)?;
            let snapshot = MessagesSnapshot {
                threads: state.sorted_threads(),
                unread_count: state.unread_count(),
            };
            debug!(
                "messages: {action:?} thread={:?} unread={}",
                change.thread_id, snapshot.unread_count
            );

            let event = MessageEvent {
                action,
                thread_id: change.thread_id,
                message_id: change.message_id,
                unread_count: snapshot.unread_count,
            };
            self.registry.enqueue(snapshot);
            self.bus.emit(AppEvent::Message(event));
            result
        };

        self.registry.drain();
        Some(result)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&MessageState) -> R) -> R {
        f(&self.lock())
    }
}
