//! Built-in demo plans and JSON plan loading.

use std::path::Path;

use crate::{
    error::{NightplanError, Result},
    geo::Coordinates,
    models::{Plan, PlanStatus, Stop},
};

/// Reads a JSON array of plans from `path`.
///
/// # Errors
///
/// Returns `NightplanError::FileSystem` when the file cannot be read and
/// `NightplanError::Serialization` when it is not a valid plan list.
pub fn load_plans(path: &Path) -> Result<Vec<Plan>> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| NightplanError::file_system(path, e))?;
    parse_plans(&contents)
}

/// Parses a JSON array of plans.
pub fn parse_plans(json: &str) -> Result<Vec<Plan>> {
    let plans: Vec<Plan> = serde_json::from_str(json)?;
    for plan in &plans {
        if plan.id.trim().is_empty() {
            return Err(NightplanError::invalid_input("id").with_reason("plan id must not be empty"));
        }
    }
    Ok(plans)
}

fn stop(id: &str, name: &str, venue_type: &str, minutes: u32, cost: f64, at: (f64, f64)) -> Stop {
    Stop {
        id: id.to_string(),
        name: name.to_string(),
        venue_type: venue_type.to_string(),
        duration_minutes: minutes,
        cost,
        address: None,
        booking: None,
        capacity: None,
        location: Some(Coordinates::new(at.0, at.1)),
    }
}

/// Two plans: tonight's active three-stop crawl and a planned one.
pub fn demo_plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "1".to_string(),
            name: "Downtown Friday".to_string(),
            date: "Tonight".to_string(),
            time: "8:00 PM".to_string(),
            stops: vec![
                stop("s1", "Rooftop Lounge", "bar", 90, 35.0, (40.7411, -73.9897)),
                stop("s2", "Basement Jazz", "music", 120, 25.0, (40.7306, -74.0003)),
                stop("s3", "Night Owl Diner", "restaurant", 45, 18.0, (40.7265, -73.9815)),
            ],
            attendees: 4,
            status: PlanStatus::Active,
            notes: Some("Meet at the lobby".to_string()),
            estimated_cost: Some("$60-90".to_string()),
            duration: Some("4-5 hours".to_string()),
        },
        Plan {
            id: "2".to_string(),
            name: "Saturday Karaoke".to_string(),
            date: "Sat".to_string(),
            time: "9:30 PM".to_string(),
            stops: vec![stop("k1", "Echo Booth", "karaoke", 150, 30.0, (40.7359, -73.9911))],
            attendees: 6,
            status: PlanStatus::Planned,
            notes: None,
            estimated_cost: None,
            duration: None,
        },
    ]
}
