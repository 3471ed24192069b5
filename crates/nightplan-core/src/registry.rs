//! Listener registry shared by every store.
//!
//! A [`Registry`] keeps the subscribed callbacks of one store and delivers
//! state snapshots to them. Deliveries go through a queue drained by a
//! single loop: when a listener mutates a store while it is being notified,
//! the resulting snapshot is queued and delivered after the current one has
//! reached every listener, so listeners always observe snapshots in
//! mutation order and never run nested inside each other.
//!
//! Stores call [`Registry::enqueue`] (and [`Registry::register`]) while
//! holding their own state lock, so queue order is mutation order even when
//! several threads mutate the same store, and [`Registry::drain`] after
//! releasing it. [`Registry::notify`] and [`Registry::subscribe`] do both
//! steps at once for callers without a lock of their own.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use nightplan_core::registry::Registry;
//!
//! let registry: Registry<u32> = Registry::new("counter");
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let subscription = registry.subscribe(move |value: &u32| sink.lock().unwrap().push(*value), 0);
//! registry.notify(1);
//! subscription.unsubscribe();
//! registry.notify(2);
//! assert_eq!(*seen.lock().unwrap(), vec![0, 1]);
//! ```

use std::{
    any::Any,
    collections::VecDeque,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use log::{debug, error};

type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Entry<S> {
    id: u64,
    /// Sequence number of the initial snapshot; broadcasts queued before
    /// it are not for this listener.
    since: u64,
    listener: Listener<S>,
}

struct Delivery<S> {
    seq: u64,
    snapshot: Arc<S>,
    /// `Some` for the initial snapshot of one listener
    target: Option<u64>,
}

struct Inner<S> {
    next_id: u64,
    next_seq: u64,
    listeners: Vec<Entry<S>>,
    pending: VecDeque<Delivery<S>>,
    draining: bool,
}

impl<S> Inner<S> {
    fn push(&mut self, snapshot: S, target: Option<u64>) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push_back(Delivery {
            seq,
            snapshot: Arc::new(snapshot),
            target,
        });
        seq
    }

    fn recipients(&self, delivery: &Delivery<S>) -> Vec<Listener<S>> {
        self.listeners
            .iter()
            .filter(|entry| match delivery.target {
                Some(target) => entry.id == target,
                None => entry.since < delivery.seq,
            })
            .map(|entry| Arc::clone(&entry.listener))
            .collect()
    }
}

fn lock<S>(inner: &Mutex<Inner<S>>) -> MutexGuard<'_, Inner<S>> {
    // Listeners never run under the lock, so poisoning can only come from
    // a panic inside this module's own bookkeeping.
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Subscriber list plus delivery queue for one store.
pub struct Registry<S> {
    name: &'static str,
    inner: Arc<Mutex<Inner<S>>>,
}

impl<S> Clone for Registry<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("listeners", &lock(&self.inner).listeners.len())
            .finish()
    }
}

impl<S: Send + Sync + 'static> Registry<S> {
    /// Creates an empty registry. `name` identifies the owning store in logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(Inner {
                next_id: 0,
                next_seq: 0,
                listeners: Vec::new(),
                pending: VecDeque::new(),
                draining: false,
            })),
        }
    }

    /// Registers `listener` and immediately hands it `current`.
    pub fn subscribe<F>(&self, listener: F, current: S) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let subscription = self.register(listener, current);
        self.drain();
        subscription
    }

    /// Registers `listener` and queues `current` for it alone, ahead of
    /// any snapshot queued later. Delivery happens on the next [`drain`].
    ///
    /// [`drain`]: Registry::drain
    pub fn register<F>(&self, listener: F, current: S) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            let since = inner.push(current, Some(id));
            inner.listeners.push(Entry {
                id,
                since,
                listener: Arc::new(listener),
            });
            id
        };
        debug!("{}: listener {id} subscribed", self.name);

        let registry: Weak<Mutex<Inner<S>>> = Arc::downgrade(&self.inner);
        let name = self.name;
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(inner) = registry.upgrade() {
                    lock(&inner).listeners.retain(|entry| entry.id != id);
                    debug!("{name}: listener {id} unsubscribed");
                }
            })),
        }
    }

    /// Queues `snapshot` for every listener and drains the queue.
    pub fn notify(&self, snapshot: S) {
        self.enqueue(snapshot);
        self.drain();
    }

    /// Queues `snapshot` for every registered listener without delivering.
    pub fn enqueue(&self, snapshot: S) {
        lock(&self.inner).push(snapshot, None);
    }

    /// Delivers queued snapshots in queue order, unless a drain loop is
    /// already running (further up the stack or on another thread), in
    /// which case that loop picks them up.
    pub fn drain(&self) {
        {
            let mut inner = lock(&self.inner);
            if inner.draining {
                return;
            }
            inner.draining = true;
        }

        loop {
            let (snapshot, listeners) = {
                let mut inner = lock(&self.inner);
                match inner.pending.pop_front() {
                    Some(delivery) => {
                        let listeners = inner.recipients(&delivery);
                        (delivery.snapshot, listeners)
                    }
                    None => {
                        inner.draining = false;
                        return;
                    }
                }
            };

            for listener in &listeners {
                self.invoke(listener, &snapshot);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    fn invoke(&self, listener: &Listener<S>, snapshot: &S) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| listener(snapshot))) {
            error!(
                "{}: listener panicked: {}",
                self.name,
                panic_message(payload.as_ref())
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[must_use = "keep the subscription to be able to unsubscribe later"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Removes the listener. It receives no snapshot after this returns.
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(&u32) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: &u32| sink.lock().unwrap().push(*value))
    }

    #[test]
    fn test_subscribe_delivers_current_snapshot() {
        let registry = Registry::new("test");
        let (seen, listener) = recorder();

        let _subscription = registry.subscribe(listener, 7);

        assert_eq!(*seen.lock().unwrap(), vec![7]);
        assert_eq!(registry.listener_count(), 1);
    }

    #[test]
    fn test_notify_reaches_every_listener_in_order() {
        let registry = Registry::new("test");
        let (first, listener_a) = recorder();
        let (second, listener_b) = recorder();
        let _a = registry.subscribe(listener_a, 0);
        let _b = registry.subscribe(listener_b, 0);

        registry.notify(1);
        registry.notify(2);

        assert_eq!(*first.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(*second.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let registry = Registry::new("test");
        let (seen, listener) = recorder();
        let subscription = registry.subscribe(listener, 0);

        subscription.unsubscribe();
        registry.notify(1);

        assert_eq!(*seen.lock().unwrap(), vec![0]);
        assert_eq!(registry.listener_count(), 0);
    }

    #[test]
    fn test_panicking_listener_does_not_block_others() {
        let registry: Registry<u32> = Registry::new("test");
        let _bad = registry.subscribe(
            |value: &u32| {
                if *value > 0 {
                    panic!("bad subscriber");
                }
            },
            0,
        );
        let (seen, listener) = recorder();
        let _good = registry.subscribe(listener, 0);

        registry.notify(1);
        registry.notify(2);

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_reentrant_notify_is_queued_not_nested() {
        let registry: Registry<u32> = Registry::new("test");
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner_registry = registry.clone();
        let sink = Arc::clone(&log);
        let _echo = registry.subscribe(
            move |value: &u32| {
                sink.lock().unwrap().push(format!("a{value}"));
                if *value == 1 {
                    inner_registry.notify(2);
                }
            },
            0,
        );
        let sink = Arc::clone(&log);
        let _second = registry.subscribe(move |value: &u32| sink.lock().unwrap().push(format!("b{value}")), 0);

        log.lock().unwrap().clear();
        registry.notify(1);

        // b1 is delivered before anyone sees 2
        assert_eq!(*log.lock().unwrap(), vec!["a1", "b1", "a2", "b2"]);
    }

    #[test]
    fn test_enqueue_order_survives_concurrent_drains() {
        let registry: Registry<u32> = Registry::new("test");
        let (seen, listener) = recorder();
        let _subscription = registry.subscribe(listener, 0);
        let counter = Arc::new(Mutex::new(0u32));

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let registry = registry.clone();
                let counter = Arc::clone(&counter);
                scope.spawn(move || {
                    for _ in 0..50 {
                        {
                            let mut value = counter.lock().unwrap();
                            *value += 1;
                            registry.enqueue(*value);
                        }
                        registry.drain();
                    }
                });
            }
        });

        let expected: Vec<u32> = (0..=400).collect();
        assert_eq!(*seen.lock().unwrap(), expected);
    }

    #[test]
    fn test_register_skips_snapshots_queued_before_it() {
        let registry: Registry<u32> = Registry::new("test");
        let (early, listener_a) = recorder();
        let _a = registry.subscribe(listener_a, 0);

        registry.enqueue(1);
        let (late, listener_b) = recorder();
        let _b = registry.register(listener_b, 1);
        registry.enqueue(2);
        registry.drain();

        assert_eq!(*early.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(*late.lock().unwrap(), vec![1, 2]);
    }
}
