//! Composition root: builds the event bus and every store.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::info;

use crate::{
    config::Config,
    error::Result,
    events::EventBus,
    inbox::{friend_requests::FriendRequestStore, invitations::InvitationStore},
    messages::{MessageStore, NotificationFeed},
    progress::PlanProgressStore,
    simulation::{ReplyScheduler, ReplySource},
};

/// Every store of the application, wired to one event bus.
///
/// Store handles are cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Config,
    pub bus: EventBus,
    pub progress: PlanProgressStore,
    pub messages: MessageStore,
    pub notifications: NotificationFeed,
    pub invitations: InvitationStore,
    pub friend_requests: FriendRequestStore,
}

impl App {
    /// Scheduler delivering simulated replies into this app's messages.
    pub fn reply_scheduler(&self, source: Arc<dyn ReplySource>) -> ReplyScheduler {
        ReplyScheduler::new(
            self.messages.clone(),
            source,
            Duration::from_millis(self.config.reply_delay_ms),
        )
    }
}

/// Builder for creating and configuring [`App`] instances.
#[derive(Debug, Clone, Default)]
pub struct AppBuilder {
    config_path: Option<PathBuf>,
    config: Option<Config>,
}

impl AppBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a configuration file to load.
    ///
    /// If not specified, uses `$XDG_CONFIG_HOME/nightplan/config.toml` when
    /// it exists and the defaults otherwise.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses `config` as is; takes precedence over any file.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the configured application.
    ///
    /// # Errors
    ///
    /// Returns the configuration errors of [`Config::load_or_default`] and
    /// [`Config::validate`].
    pub fn build(self) -> Result<App> {
        let config = match self.config {
            Some(config) => config,
            None => Config::load_or_default(self.config_path.as_deref())?,
        };
        config.validate()?;

        let bus = EventBus::new(config.event_capacity);
        let messages = MessageStore::new(bus.clone(), config.me());
        info!("nightplan ready for {}", config.user_id);

        Ok(App {
            progress: PlanProgressStore::new(bus.clone(), config.proximity_radius_m),
            notifications: NotificationFeed::new(messages.clone()),
            messages,
            invitations: InvitationStore::new(bus.clone()),
            friend_requests: FriendRequestStore::new(bus.clone()),
            bus,
            config,
        })
    }
}
