//! Plan and stop model definitions.

use serde::{Deserialize, Serialize};

use super::PlanStatus;
use crate::geo::Coordinates;

/// A multi-stop night out.
///
/// Date and time are kept as the free-form strings the user typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: String,

    /// Display name of the plan
    pub name: String,

    /// Scheduled date, e.g. "Tonight" or "Sat, Mar 15"
    #[serde(default)]
    pub date: String,

    /// Scheduled start time, e.g. "8:00 PM"
    #[serde(default)]
    pub time: String,

    /// Venues in visiting order
    #[serde(default)]
    pub stops: Vec<Stop>,

    /// Number of people going
    #[serde(default)]
    pub attendees: u32,

    #[serde(default)]
    pub status: PlanStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Free-text cost estimate, e.g. "$40-60"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,

    /// Free-text duration, e.g. "4 hours"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Plan {
    /// Sum of the stops' estimated durations.
    pub fn total_minutes(&self) -> u32 {
        self.stops.iter().map(|stop| stop.duration_minutes).sum()
    }

    /// Sum of the stops' costs.
    pub fn total_cost(&self) -> f64 {
        self.stops.iter().map(|stop| stop.cost).sum()
    }

    pub fn last_stop_index(&self) -> Option<usize> {
        self.stops.len().checked_sub(1)
    }
}

/// One venue visit within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: String,

    pub name: String,

    /// Venue type tag, e.g. "bar", "club", "restaurant"
    #[serde(rename = "type", default)]
    pub venue_type: String,

    /// Estimated time spent at the venue
    #[serde(default)]
    pub duration_minutes: u32,

    #[serde(default)]
    pub cost: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Booking reference or note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
}
