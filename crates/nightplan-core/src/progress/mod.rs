//! Real-time progression through the active plan.
//!
//! [`PlanProgressStore`] owns a single [`PlanProgress`] value and moves it
//! through the stages
//!
//! ```text
//! not_started ─▶ en_route ─▶ checked_in ─▶ moving_to_next ─┐
//!                    ▲                                      │
//!                    └────────────── next stop ◀────────────┘
//!                                         │ (last stop)
//!                                         ▼
//!                                     completed
//! ```
//!
//! Every operation delivers the new snapshot to subscribers and then
//! publishes a [`PlanEvent`] on the bus. Operations that need a current
//! plan leave the state untouched when there is none but still notify.
//! Operations that reference a stop that does not exist return `None` and
//! notify nobody.
//!
//! # Example
//!
//! ```rust
//! use nightplan_core::{events::EventBus, progress::PlanProgressStore, seed, ProgressStage};
//!
//! let store = PlanProgressStore::new(EventBus::default(), 75.0);
//! store.install(&seed::demo_plans());
//! store.start_night();
//! store.check_in(None);
//! let progress = store.move_to_next();
//! assert_eq!(progress.stage, ProgressStage::EnRoute);
//! assert_eq!(progress.current_stop_index, 1);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

pub mod transitions;


use crate::{
    events::{AppEvent, EventBus, PlanAction, PlanEvent},
    models::{Plan, PlanProgress, PlanStatus, ProgressStage},
    registry::{Registry, Subscription},
};

/// Result of applying a transition to the locked state.
pub(crate) enum Outcome {
    /// State changed; publish the given action
    Applied(PlanAction),
    /// Nothing changed but subscribers are still notified
    Unchanged,
    /// Invalid reference: no mutation, no notification
    Rejected,
}

/// Store holding the progression of the one active plan.
#[derive(Debug, Clone)]
pub struct PlanProgressStore {
    state: Arc<Mutex<PlanProgress>>,
    registry: Registry<PlanProgress>,
    bus: EventBus,
    proximity_radius_m: f64,
}

impl PlanProgressStore {
    pub fn new(bus: EventBus, proximity_radius_m: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(PlanProgress::default())),
            registry: Registry::new("plan_progress"),
            bus,
            proximity_radius_m,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> PlanProgress {
        self.lock().clone()
    }

    /// Registers `listener`; it receives the current state right away.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&PlanProgress) + Send + Sync + 'static,
    {
        let subscription = {
            let state = self.lock();
            self.registry.register(listener, state.clone())
        };
        self.registry.drain();
        subscription
    }

    /// Makes the first `active` plan in `plans` the current plan.
    ///
    /// Installing a different plan (or the first one) resets the
    /// progression to `not_started` at stop 0. Installing the plan that is
    /// already current refreshes its data and keeps the progress.
    pub fn install(&self, plans: &[Plan]) -> PlanProgress {
        let active = plans
            .iter()
            .find(|plan| plan.status == PlanStatus::Active)
            .cloned();

        let snapshot = self.update(PlanAction::Installed, |state| {
            let same_plan = match (&state.current_plan, &active) {
                (Some(current), Some(next)) => current.id == next.id,
                (None, None) => return Outcome::Unchanged,
                _ => false,
            };

            if same_plan {
                let last = active
                    .as_ref()
                    .and_then(Plan::last_stop_index)
                    .unwrap_or(0);
                state.current_stop_index = state.current_stop_index.min(last);
                state.current_plan = active;
            } else {
                *state = PlanProgress {
                    current_plan: active,
                    ..PlanProgress::default()
                };
            }
            Outcome::Applied(PlanAction::Installed)
        });

        snapshot.unwrap_or_else(|| self.snapshot())
    }

    fn lock(&self) -> MutexGuard<'_, PlanProgress> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `transition` under the lock, then notifies subscribers and
    /// publishes the resulting event. `fallback` is the action reported
    /// for an unchanged state.
    ///
    /// The snapshot is queued and the event published before the lock is
    /// released, so concurrent mutations are observed in the order they
    /// were applied.
    pub(crate) fn update<F>(&self, fallback: PlanAction, transition: F) -> Option<PlanProgress>
    where
        F: FnOnce(&mut PlanProgress) -> Outcome,
    {
        let snapshot = {
            let mut state = self.lock();
            let action = match transition(&mut state) {
                Outcome::Applied(action) => action,
                Outcome::Unchanged => {
                    debug!("plan progress: {fallback:?} left state unchanged");
                    fallback
                }
                Outcome::Rejected => return None,
            };
            debug!(
                "plan progress: {action:?} -> {} at stop {}",
                state.stage.as_str(),
                state.current_stop_index
            );

            let snapshot = state.clone();
            self.registry.enqueue(snapshot.clone());
            self.bus.emit(AppEvent::Plan(PlanEvent {
                action,
                plan: snapshot.current_plan.clone(),
                stop_index: snapshot.current_stop_index,
                state: snapshot.stage,
            }));
            snapshot
        };

        self.registry.drain();
        Some(snapshot)
    }

    pub(crate) fn proximity_radius_m(&self) -> f64 {
        self.proximity_radius_m
    }
}

/// Whether `stage` still accepts progress transitions for the current plan.
pub(crate) fn accepts_progress(state: &PlanProgress) -> bool {
    state.current_plan.is_some() && state.stage != ProgressStage::Completed
}
