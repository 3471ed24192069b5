//! Stage transitions for the plan progress store.

use jiff::Timestamp;
use log::warn;

use super::{accepts_progress, Outcome, PlanProgressStore};
use crate::{
    events::PlanAction,
    geo::{Coordinates, Proximity},
    models::{PlanProgress, ProgressStage},
};

impl PlanProgressStore {
    /// Leaves for the first stop: `not_started → en_route`.
    pub fn start_night(&self) -> PlanProgress {
        self.update(PlanAction::NightStarted, |state| {
            if state.current_plan.is_none() || state.stage != ProgressStage::NotStarted {
                return Outcome::Unchanged;
            }
            state.stage = ProgressStage::EnRoute;
            state.night_start_time = Some(Timestamp::now());
            Outcome::Applied(PlanAction::NightStarted)
        })
        .unwrap_or_else(|| self.snapshot())
    }

    /// Checks in at `stop_index`, or at the current stop when `None`.
    ///
    /// Returns `None` without touching the state when the index does not
    /// name a stop of the current plan.
    pub fn check_in(&self, stop_index: Option<usize>) -> Option<PlanProgress> {
        self.update(PlanAction::CheckedIn, |state| {
            if !accepts_progress(state) {
                return Outcome::Unchanged;
            }
            let stop_count = state
                .current_plan
                .as_ref()
                .map(|plan| plan.stops.len())
                .unwrap_or(0);
            let index = stop_index.unwrap_or(state.current_stop_index);
            if index >= stop_count {
                warn!("check-in rejected: stop {index} out of {stop_count}");
                return Outcome::Rejected;
            }

            state.stage = ProgressStage::CheckedIn;
            state.current_stop_index = index;
            state.last_check_in_time = Some(Timestamp::now());
            Outcome::Applied(PlanAction::CheckedIn)
        })
    }

    /// Leaves the current stop: `checked_in → moving_to_next`.
    pub fn depart(&self) -> PlanProgress {
        self.update(PlanAction::Departed, |state| {
            if !accepts_progress(state) || state.stage != ProgressStage::CheckedIn {
                return Outcome::Unchanged;
            }
            state.stage = ProgressStage::MovingToNext;
            Outcome::Applied(PlanAction::Departed)
        })
        .unwrap_or_else(|| self.snapshot())
    }

    /// Heads to the next stop, or completes the plan when the current stop
    /// is the last one.
    pub fn move_to_next(&self) -> PlanProgress {
        self.update(PlanAction::MovedToNext, |state| {
            if !accepts_progress(state) || state.stage == ProgressStage::NotStarted {
                return Outcome::Unchanged;
            }
            let last = state
                .current_plan
                .as_ref()
                .and_then(|plan| plan.last_stop_index());

            match last {
                Some(last) if state.current_stop_index < last => {
                    state.current_stop_index += 1;
                    state.stage = ProgressStage::EnRoute;
                    Outcome::Applied(PlanAction::MovedToNext)
                }
                _ => {
                    state.stage = ProgressStage::Completed;
                    Outcome::Applied(PlanAction::Completed)
                }
            }
        })
        .unwrap_or_else(|| self.snapshot())
    }

    /// Ends the night. Terminal until another plan is installed.
    pub fn complete(&self) -> PlanProgress {
        self.update(PlanAction::Completed, |state| {
            if !accepts_progress(state) {
                return Outcome::Unchanged;
            }
            state.stage = ProgressStage::Completed;
            Outcome::Applied(PlanAction::Completed)
        })
        .unwrap_or_else(|| self.snapshot())
    }

    /// Records that `friend_id` is on their way. Adding twice is harmless.
    pub fn add_friend_en_route(&self, friend_id: &str) -> PlanProgress {
        self.update(PlanAction::FriendEnRoute, |state| {
            if state.current_plan.is_none() || !state.friends_en_route.insert(friend_id.to_string()) {
                return Outcome::Unchanged;
            }
            Outcome::Applied(PlanAction::FriendEnRoute)
        })
        .unwrap_or_else(|| self.snapshot())
    }

    pub fn remove_friend_en_route(&self, friend_id: &str) -> PlanProgress {
        self.update(PlanAction::FriendLeft, |state| {
            if !state.friends_en_route.remove(friend_id) {
                return Outcome::Unchanged;
            }
            Outcome::Applied(PlanAction::FriendLeft)
        })
        .unwrap_or_else(|| self.snapshot())
    }

    /// Distance from `position` to the current stop.
    ///
    /// `None` when there is no current stop or it has no coordinates.
    pub fn proximity(&self, position: &Coordinates) -> Option<Proximity> {
        let state = self.snapshot();
        let stop = state.current_stop()?;
        let location = stop.location.as_ref()?;
        let distance_m = position.distance_m(location);

        Some(Proximity {
            stop_index: state.current_stop_index,
            stop_name: stop.name.clone(),
            distance_m,
            nearby: distance_m <= self.proximity_radius_m(),
        })
    }
}
