//! Application configuration.
//!
//! Settings are read from a TOML file. Without an explicit path the file
//! is looked up at `$XDG_CONFIG_HOME/nightplan/config.toml`; when it does
//! not exist the defaults apply.
//!
//! ```toml
//! user_id = "me"
//! user_name = "Jordan"
//! event_capacity = 256
//! reply_delay_ms = 1500
//! proximity_radius_m = 75.0
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{NightplanError, Result},
    events::DEFAULT_CAPACITY,
    models::Participant,
};

/// Runtime settings shared by the stores and the simulated backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Id of the local user
    pub user_id: String,
    /// Display name of the local user
    pub user_name: String,
    /// Events buffered per bus receiver
    pub event_capacity: usize,
    /// Delay before a simulated friend reply is delivered
    pub reply_delay_ms: u64,
    /// Distance under which the user counts as arrived at a stop
    pub proximity_radius_m: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: "me".to_string(),
            user_name: "You".to_string(),
            event_capacity: DEFAULT_CAPACITY,
            reply_delay_ms: 1500,
            proximity_radius_m: 75.0,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file at `path`, which must exist.
    ///
    /// # Errors
    ///
    /// Returns `NightplanError::FileSystem` if the file cannot be read,
    /// `NightplanError::ConfigParse` if it is not valid TOML and
    /// `NightplanError::InvalidInput` if a value is out of range.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| NightplanError::file_system(path, e))?;
        debug!("loading configuration from {}", path.display());
        Self::from_toml(&contents)
    }

    /// Loads `explicit` when given, else the XDG config file when present,
    /// else the defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Existing configuration file in the XDG config directories, if any.
    pub fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("nightplan").find_config_file("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(NightplanError::invalid_input("user_id").with_reason("must not be empty"));
        }
        if self.event_capacity == 0 {
            return Err(
                NightplanError::invalid_input("event_capacity").with_reason("must be at least 1")
            );
        }
        if !(self.proximity_radius_m.is_finite() && self.proximity_radius_m > 0.0) {
            return Err(NightplanError::invalid_input("proximity_radius_m")
                .with_reason("must be a positive number of meters"));
        }
        Ok(())
    }

    /// The local user as a conversation participant.
    pub fn me(&self) -> Participant {
        Participant::new(&self.user_id, &self.user_name)
    }
}
