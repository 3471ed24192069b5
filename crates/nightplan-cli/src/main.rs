//! Nightplan CLI application
//!
//! Command-line front-end over the nightplan stores: prints the progress of
//! tonight's plan, plays a scripted evening or runs an interactive shell.

mod args;
mod cli;
mod demo;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use nightplan_core::{seed, AppBuilder};
use renderer::TerminalRenderer;
use tokio::io::BufReader;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config,
        plans,
        no_color,
        command,
    } = Args::parse();

    let app = AppBuilder::new()
        .with_config_path(config.as_ref())
        .build()
        .context("Failed to initialize nightplan")?;

    let plans = match plans {
        Some(path) => seed::load_plans(&path)
            .with_context(|| format!("Failed to load plans from {}", path.display()))?,
        None => seed::demo_plans(),
    };

    let renderer = TerminalRenderer::new(!no_color);

    info!("Nightplan started");

    match command {
        Some(Demo) => demo::run(&app, &plans, &renderer).await,
        Some(Shell) => {
            app.progress.install(&plans);
            Cli::new(app, plans, renderer)
                .run(BufReader::new(tokio::io::stdin()))
                .await
        }
        None => {
            renderer.render(&app.progress.install(&plans).to_string());
            Ok(())
        }
    }
}
