// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Line-oriented command adapter.
//!
//! Turns text such as `submit running 5.2 24 178` into tracker calls. Used by
//! the binary to drive the engine from a terminal or a script.

use std::str::FromStr;

use crate::db::kv::KeyValueStore;
use crate::error::{Result, ValidationError};
use crate::models::input::WorkoutInput;
use crate::models::view::ViewModel;
use crate::models::workout::{Coordinates, WorkoutId, WorkoutKind};
use crate::services::collection::SortCriterion;
use crate::services::tracker::WorkoutTracker;

/// One user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `map <lat> <lng>`
    Map(Coordinates),
    /// `edit <id>`
    Edit(WorkoutId),
    /// `submit running <distance> <duration> <cadence>` or
    /// `submit cycling <distance> <duration> [elevation]`
    Submit(WorkoutInput),
    /// `cancel`
    Cancel,
    /// `delete <id>`
    Delete(WorkoutId),
    /// `focus <id>`
    Focus(WorkoutId),
    /// `sort distance|duration|type`
    Sort(SortCriterion),
    /// `clear`
    Clear,
    /// `list`
    List,
}

/// Errors parsing a command line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Invalid number for {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut args = line.split_whitespace();
        let name = args.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "map" => {
                let lat = number(args.next(), "lat")?;
                let lng = number(args.next(), "lng")?;
                Command::Map(Coordinates::new(lat, lng))
            }
            "edit" => Command::Edit(id(args.next())?),
            "submit" => {
                let kind: WorkoutKind = args
                    .next()
                    .ok_or(CommandError::MissingArgument("type"))?
                    .parse()?;
                let distance = number(args.next(), "distance")?;
                let duration = number(args.next(), "duration")?;
                let input = match kind {
                    WorkoutKind::Running => {
                        WorkoutInput::running(distance, duration, number(args.next(), "cadence")?)
                    }
                    WorkoutKind::Cycling => {
                        let elevation = args
                            .next()
                            .map(|value| number(Some(value), "elevation"))
                            .transpose()?;
                        WorkoutInput::cycling(distance, duration, elevation)
                    }
                };
                Command::Submit(input)
            }
            "cancel" => Command::Cancel,
            "delete" => Command::Delete(id(args.next())?),
            "focus" => Command::Focus(id(args.next())?),
            "sort" => Command::Sort(
                args.next()
                    .ok_or(CommandError::MissingArgument("criterion"))?
                    .parse()?,
            ),
            "clear" => Command::Clear,
            "list" => Command::List,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        match args.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn number(arg: Option<&str>, name: &'static str) -> std::result::Result<f64, CommandError> {
    let value = arg.ok_or(CommandError::MissingArgument(name))?;
    value.parse().map_err(|_| CommandError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

fn id(arg: Option<&str>) -> std::result::Result<WorkoutId, CommandError> {
    arg.map(WorkoutId::from)
        .ok_or(CommandError::MissingArgument("id"))
}

/// Run one command against the tracker.
pub fn dispatch<S: KeyValueStore>(
    tracker: &mut WorkoutTracker<S>,
    command: Command,
) -> Result<ViewModel> {
    match command {
        Command::Map(coordinates) => tracker.activate_map(coordinates),
        Command::Edit(id) => tracker.activate_edit(&id),
        Command::Submit(input) => tracker.submit(&input),
        Command::Cancel => Ok(tracker.cancel_form()),
        Command::Delete(id) => tracker.delete(&id),
        Command::Focus(id) => tracker.focus(&id),
        Command::Sort(criterion) => Ok(tracker.sort(criterion)),
        Command::Clear => Ok(tracker.clear_all()),
        Command::List => Ok(tracker.current_view()),
    }
}
