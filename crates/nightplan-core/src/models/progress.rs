//! Snapshot of the active plan's progression.

use std::collections::BTreeSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, ProgressStage, Stop};

/// Full state of the plan progress store.
///
/// `current_stop_index` is always a valid index into the current plan's
/// stops, or `0` when there is no current plan (or it has no stops).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgress {
    pub current_plan: Option<Plan>,
    pub stage: ProgressStage,
    pub current_stop_index: usize,
    pub friends_en_route: BTreeSet<String>,
    pub night_start_time: Option<Timestamp>,
    pub last_check_in_time: Option<Timestamp>,
}

impl PlanProgress {
    /// The stop the user is heading to or checked in at.
    pub fn current_stop(&self) -> Option<&Stop> {
        self.current_plan
            .as_ref()
            .and_then(|plan| plan.stops.get(self.current_stop_index))
    }

    /// Stops after the current one.
    pub fn stops_remaining(&self) -> usize {
        self.current_plan
            .as_ref()
            .map(|plan| plan.stops.len().saturating_sub(self.current_stop_index + 1))
            .unwrap_or(0)
    }

    /// Whether the night has started and not yet ended.
    pub fn is_in_progress(&self) -> bool {
        self.current_plan.is_some()
            && !matches!(
                self.stage,
                ProgressStage::NotStarted | ProgressStage::Completed
            )
    }
}
