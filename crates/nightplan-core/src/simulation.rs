//! Simulated friends.
//!
//! Without a real backend, replies from friends are produced by a
//! [`ReplySource`] and delivered into the [`MessageStore`] after a delay
//! by a [`ReplyScheduler`]. A real backend would implement the same trait
//! and the stores would not notice the difference.
//!
//! Scheduled replies are tokio tasks. [`ReplyScheduler::cancel_all`], or
//! dropping the scheduler, aborts the ones not yet delivered so that a
//! closed conversation never receives late replies.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use log::debug;
use tokio::task::JoinHandle;

use crate::{messages::MessageStore, models::Participant, params::SendMessage};

/// Produces a friend's answer to a message.
pub trait ReplySource: Send + Sync {
    /// `None` means the friend does not answer.
    fn reply_to(&self, friend: &Participant, message: &str) -> Option<String>;
}

/// Cycles through a fixed list of canned answers.
#[derive(Debug)]
pub struct ScriptedReplies {
    lines: Vec<String>,
    cursor: AtomicUsize,
}

impl ScriptedReplies {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl Default for ScriptedReplies {
    fn default() -> Self {
        Self::new([
            "On my way! 🚶",
            "Save me a seat",
            "Running 10 min late",
            "Sounds good!",
            "See you there 🎉",
        ])
    }
}

impl ReplySource for ScriptedReplies {
    fn reply_to(&self, _friend: &Participant, _message: &str) -> Option<String> {
        if self.lines.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.lines.len();
        Some(self.lines[index].clone())
    }
}

/// Delivers delayed replies into a message store.
pub struct ReplyScheduler {
    store: MessageStore,
    source: Arc<dyn ReplySource>,
    delay: Duration,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ReplyScheduler {
    pub fn new(store: MessageStore, source: Arc<dyn ReplySource>, delay: Duration) -> Self {
        Self {
            store,
            source,
            delay,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Asks the source for `friend`'s answer to `message` and delivers it
    /// after the configured delay. Returns whether a reply was scheduled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule_reply(&self, friend: &Participant, message: &str) -> bool {
        let Some(reply) = self.source.reply_to(friend, message) else {
            return false;
        };

        let store = self.store.clone();
        let delay = self.delay;
        let params = SendMessage::text(&friend.id, &friend.name, reply);
        debug!("reply from {} scheduled in {delay:?}", friend.id);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.receive(&params);
        });

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
        true
    }

    /// Replies scheduled but not delivered yet.
    pub fn pending(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Aborts every reply not delivered yet.
    pub fn cancel_all(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        let cancelled = tasks.len();
        for task in tasks.drain(..) {
            task.abort();
        }
        if cancelled > 0 {
            debug!("cancelled {cancelled} scheduled replies");
        }
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
