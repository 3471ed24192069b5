//! Timestamp display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a timestamp in the system timezone as `HH:MM`, the way times
/// show up on a night out.
pub struct LocalTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::system()).strftime("%H:%M")
        )
    }
}

/// Relative age of a timestamp: `just now`, `5m ago`, `2h ago`, `3d ago`.
pub struct Ago {
    seconds: i64,
}

impl Ago {
    /// Age of `at` relative to the current time.
    pub fn of(at: &Timestamp) -> Self {
        Self::between(at, &Timestamp::now())
    }

    /// Age of `at` relative to `now`. Future timestamps read as `just now`.
    pub fn between(at: &Timestamp, now: &Timestamp) -> Self {
        Self {
            seconds: now.as_second() - at.as_second(),
        }
    }
}

impl fmt::Display for Ago {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seconds {
            s if s < 60 => write!(f, "just now"),
            s if s < 3_600 => write!(f, "{}m ago", s / 60),
            s if s < 86_400 => write!(f, "{}h ago", s / 3_600),
            s => write!(f, "{}d ago", s / 86_400),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    #[test]
    fn test_ago_buckets() {
        let now = at(1_700_000_000);
        assert_eq!(Ago::between(&at(1_700_000_000 - 5), &now).to_string(), "just now");
        assert_eq!(Ago::between(&at(1_700_000_000 - 300), &now).to_string(), "5m ago");
        assert_eq!(Ago::between(&at(1_700_000_000 - 7_200), &now).to_string(), "2h ago");
        assert_eq!(Ago::between(&at(1_700_000_000 - 259_200), &now).to_string(), "3d ago");
    }

    #[test]
    fn test_ago_future_is_just_now() {
        let now = at(1_700_000_000);
        assert_eq!(Ago::between(&at(1_700_000_100), &now).to_string(), "just now");
    }
}
