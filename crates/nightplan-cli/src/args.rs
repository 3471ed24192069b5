use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Plan a night out and follow it stop by stop
///
/// Nightplan keeps tonight's plan, conversations with friends, plan
/// invitations and friend requests in one place. Without a subcommand it
/// prints where you are in the active plan.
#[derive(Parser)]
#[command(version, about, name = "np")]
pub struct Args {
    /// Path to the configuration file. Defaults to
    /// $XDG_CONFIG_HOME/nightplan/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file with the plans to load instead of the built-in ones
    #[arg(long, global = true)]
    pub plans: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a scripted evening and print every event it produces
    Demo,
    /// Read commands from standard input, one per line
    #[command(alias = "sh")]
    Shell,
}
