//! Thread-level operations: full history, read state, pins, search and
//! plan-linked group threads.

use jiff::Timestamp;
use log::warn;

use super::{sort_by_recency, Change, MessageStore};
use crate::{
    events::MessageAction,
    models::{
        DeliveryStatus, Message, MessageThread, PlanStatus, ThreadContext, ThreadKind,
    },
    params::{AppendMessage, CreatePlanThread},
};

impl MessageStore {
    /// Appends a message to the history of an existing thread.
    ///
    /// A message from someone else marks the thread unread; a message from
    /// the local user marks it read. Returns the new message id, or `None`
    /// when the thread does not exist.
    pub fn append_message(&self, params: &AppendMessage) -> Option<String> {
        let me = self.me().clone();
        let sender = params.sender.clone().unwrap_or_else(|| me.clone());
        let incoming = sender.id != me.id;

        self.update(MessageAction::Appended, |state| {
            if !state.threads.contains_key(&params.thread_id) {
                warn!("append rejected: thread {} not found", params.thread_id);
                return None;
            }
            let message_id = state.next_message_id();
            let activity = state.next_activity();
            let thread = state.threads.get_mut(&params.thread_id)?;

            let recipient_id = match thread.kind {
                ThreadKind::Direct if !incoming => thread
                    .participants
                    .first()
                    .map(|participant| participant.id.clone())
                    .unwrap_or_else(|| thread.id.clone()),
                ThreadKind::Direct => me.id.clone(),
                ThreadKind::Group | ThreadKind::MapGroup => thread.id.clone(),
            };

            let now = Timestamp::now();
            let message = Message {
                id: message_id.clone(),
                sender_id: sender.id.clone(),
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

            if incoming && !thread.participants.iter().any(|p| p.id == sender.id) {
                thread.participants.push(sender.clone());
            }
            thread.messages.push(message.clone());
            thread.last_message = Some(message);
            thread.timestamp = now;
            thread.activity = activity;
            thread.unread = incoming;

            Some((message_id.clone(), Change::message(&params.thread_id, message_id)))
        })
    }

    /// Inserts `thread`, or replaces the thread with the same id.
    pub fn upsert_thread(&self, thread: MessageThread) {
        let thread_id = thread.id.clone();
        self.update(MessageAction::ThreadUpserted, |state| {
            let mut thread = thread;
            thread.activity = state.next_activity();
            state.threads.insert(thread.id.clone(), thread);
            Some(((), Change::thread(thread_id)))
        });
    }

    /// Creates the group thread of a plan. Idempotent: when the plan
    /// already has a thread, its id is returned and nothing changes.
    pub fn create_plan_thread(&self, params: &CreatePlanThread) -> String {
        let thread_id = MessageThread::plan_id_for(&params.plan_id);
        if self.read(|state| state.threads.contains_key(&thread_id)) {
            return thread_id;
        }

        let me = self.me().clone();
        self.update(MessageAction::ThreadCreated, |state| {
            if state.threads.contains_key(&thread_id) {
                return None;
            }
            let mut participants = vec![me];
            for participant in &params.participants {
                if !participants.iter().any(|p| p.id == participant.id) {
                    participants.push(participant.clone());
                }
            }
            let activity = state.next_activity();
            state.threads.insert(
                thread_id.clone(),
                MessageThread {
                    id: thread_id.clone(),
                    kind: ThreadKind::Group,
                    context: ThreadContext::Plan,
                    name: params.plan_name.clone(),
                    participants,
                    messages: Vec::new(),
                    last_message: None,
                    timestamp: Timestamp::now(),
                    unread: false,
                    pinned: false,
                    plan_id: Some(params.plan_id.clone()),
                    plan_status: params.plan_status,
                    venue: params.venue.clone(),
                    activity,
                },
            );
            Some(((), Change::thread(&thread_id)))
        });

        thread_id
    }

    /// Updates the status shown on a plan's thread.
    pub fn update_plan_status(&self, plan_id: &str, status: PlanStatus) -> Option<()> {
        let thread_id = MessageThread::plan_id_for(plan_id);
        self.update(MessageAction::PlanStatusUpdated, |state| {
            let thread = state.threads.get_mut(&thread_id)?;
            thread.plan_status = Some(status);
            Some(((), Change::thread(&thread_id)))
        })
    }

    /// Marks one thread read. Other threads keep their flag.
    pub fn mark_thread_read(&self, thread_id: &str) -> Option<()> {
        self.update(MessageAction::ThreadRead, |state| {
            let thread = state.threads.get_mut(thread_id)?;
            thread.unread = false;
            Some(((), Change::thread(thread_id)))
        })
    }

    pub fn mark_all_read(&self) {
        self.update(MessageAction::AllRead, |state| {
            for thread in state.threads.values_mut() {
                thread.unread = false;
            }
            Some(((), Change::default()))
        });
    }

    /// Flips the pin flag and returns the new value.
    pub fn toggle_pin(&self, thread_id: &str) -> Option<bool> {
        self.update(MessageAction::PinToggled, |state| {
            let thread = state.threads.get_mut(thread_id)?;
            thread.pinned = !thread.pinned;
            Some((thread.pinned, Change::thread(thread_id)))
        })
    }

    pub fn thread(&self, thread_id: &str) -> Option<MessageThread> {
        self.read(|state| state.threads.get(thread_id).cloned())
    }

    /// Full history of a thread in append order.
    pub fn messages(&self, thread_id: &str) -> Option<Vec<Message>> {
        self.read(|state| {
            state
                .threads
                .get(thread_id)
                .map(|thread| thread.messages.clone())
        })
    }

    /// All threads, most recently active first.
    pub fn threads(&self) -> Vec<MessageThread> {
        self.read(|state| state.sorted_threads())
    }

    /// Pinned threads first, each group most recently active first.
    pub fn threads_pinned_first(&self) -> Vec<MessageThread> {
        let mut threads = self.threads();
        // stable: recency order survives within each group
        threads.sort_by_key(|thread| !thread.pinned);
        threads
    }

    /// Case-insensitive substring search over thread name, venue, last
    /// message and participant names. An empty query returns every thread.
    pub fn search(&self, query: &str) -> Vec<MessageThread> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.threads();
        }

        self.read(|state| {
            let mut found: Vec<MessageThread> = state
                .threads
                .values()
                .filter(|thread| thread.matches(&needle))
                .cloned()
                .collect();
            sort_by_recency(&mut found);
            found
        })
    }
}
