//! Display implementations for domain models.
//!
//! Everything formats as markdown so the CLI can render it with rich
//! styling or print it as plain text.

use std::fmt;

use super::datetime::{Ago, LocalTime};
use crate::models::{
    Direction, FriendRequest, Invitation, Message, MessageThread, MessageType, Plan,
    PlanProgress, PlanStatus, ProgressStage, ResponseStatus, Stop,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.venue_type.is_empty() {
            write!(f, " ({})", self.venue_type)?;
        }
        if self.duration_minutes > 0 {
            write!(f, " · {} min", self.duration_minutes)?;
        }
        if self.cost > 0.0 {
            write!(f, " · ${:.2}", self.cost)?;
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- When: {} {}", self.date, self.time)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Going: {}", self.attendees)?;
        if let Some(cost) = &self.estimated_cost {
            writeln!(f, "- Cost: {cost}")?;
        }
        if let Some(duration) = &self.duration {
            writeln!(f, "- Duration: {duration}")?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        if self.stops.is_empty() {
            writeln!(f, "\nNo stops in this plan.")?;
        } else {
            writeln!(f, "\n## Stops")?;
            writeln!(f)?;
            for (position, stop) in self.stops.iter().enumerate() {
                writeln!(f, "{}. {stop}", position + 1)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PlanProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(plan) = &self.current_plan else {
            return writeln!(f, "No active plan.");
        };

        writeln!(f, "## {}", plan.name)?;
        writeln!(f)?;
        writeln!(f, "- Stage: {}", self.stage.with_icon())?;
        match self.current_stop() {
            Some(stop) => writeln!(
                f,
                "- Stop {}/{}: {}",
                self.current_stop_index + 1,
                plan.stops.len(),
                stop.name
            )?,
            None => writeln!(f, "- No stops")?,
        }
        if self.stage != ProgressStage::Completed && self.stops_remaining() > 0 {
            writeln!(f, "- Remaining: {}", self.stops_remaining())?;
        }
        if !self.friends_en_route.is_empty() {
            let friends: Vec<&str> = self.friends_en_route.iter().map(String::as_str).collect();
            writeln!(f, "- Friends en route: {}", friends.join(", "))?;
        }
        if let Some(started) = &self.night_start_time {
            writeln!(f, "- Started: {}", LocalTime(started))?;
        }
        if let Some(checked_in) = &self.last_check_in_time {
            writeln!(f, "- Last check-in: {}", LocalTime(checked_in))?;
        }
        Ok(())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message_type {
            MessageType::Ping => write!(f, "📍 {}", self.sender_id),
            MessageType::Plan => write!(f, "🗓 {}: {}", self.sender_id, self.content),
            MessageType::Message => write!(f, "{}: {}", self.sender_id, self.content),
        }
    }
}

impl fmt::Display for MessageThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- ")?;
        if self.pinned {
            write!(f, "📌 ")?;
        }
        if self.unread {
            write!(f, "**{}**", self.name)?;
        } else {
            write!(f, "{}", self.name)?;
        }
        write!(f, " `{}`", self.id)?;
        if let Some(venue) = &self.venue {
            write!(f, " @ {venue}")?;
        }
        if let Some(status) = &self.plan_status {
            write!(f, " [{status}]")?;
        }
        if let Some(message) = &self.last_message {
            write!(f, " · {message} · {}", Ago::of(&message.timestamp))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Invitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- `{}` {} invited you to **{}** ({})",
            self.id, self.from.name, self.plan_name, self.status
        )?;
        if let Some(message) = &self.message {
            write!(f, ": \"{message}\"")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for FriendRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            Direction::Incoming => "from",
            Direction::Outgoing => "to",
        };
        write!(
            f,
            "- `{}` {arrow} **{}** ({})",
            self.id, self.counterpart.name, self.status
        )?;
        if self.mutual_friends > 0 {
            write!(f, " · {} mutual", self.mutual_friends)?;
        }
        writeln!(f)
    }
}
