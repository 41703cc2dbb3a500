// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Tracker command shell
//!
//! Reads one command per line from stdin (`map`, `edit`, `submit`, `cancel`,
//! `delete`, `focus`, `sort`, `clear`, `list`), runs it against the workout
//! engine and reports the resulting view changes as log events.

use anyhow::Context;
use std::io::{self, BufRead};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use workout_tracker::{
    commands::{self, Command},
    config::{Config, LogFormat},
    db::{FileStore, PersistenceGateway},
    render::{LogRenderer, RenderBoundary},
    WorkoutTracker,
};

fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.log_format);

    tracing::info!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Starting Workout-Tracker"
    );

    let store = FileStore::new(&config.data_dir);
    let gateway = PersistenceGateway::new(store, config.storage_key.clone());
    let mut tracker = WorkoutTracker::open(gateway, config.map_zoom_level);

    let mut renderer = LogRenderer;
    renderer.apply(&tracker.startup_view());

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        let listing = command == Command::List;

        match commands::dispatch(&mut tracker, command) {
            Ok(view) if listing => {
                for workout in &view.workouts {
                    println!("{}\t{}", workout.id, workout.description);
                }
            }
            Ok(view) => renderer.apply(&view),
            Err(e) if e.is_user_facing() => eprintln!("{e}"),
            Err(e) => tracing::error!(error = %e, "Command failed"),
        }
    }

    tracing::info!("Workout-Tracker stopped");
    Ok(())
}

/// Initialize structured logging.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("workout_tracker=debug,info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .init(),
    }
}
