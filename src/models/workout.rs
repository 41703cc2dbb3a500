// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout record model.
//!
//! A workout is a shared base record (id, creation time, location, distance,
//! duration) plus a variant payload holding the type-specific input and its
//! derived metric. Records are built from validated input and only ever
//! change through a whole-input edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;
use crate::models::input::{ValidatedInput, VariantInput};
use crate::time_utils::format_description_date;

/// Ids keep the last ten digits of the creation time in milliseconds.
const ID_MODULUS: i64 = 10_000_000_000;

/// Stable workout identifier, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Workout type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase type name, also the sort key for type ordering.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(ValidationError::new(format!(
                "unknown workout type {other:?} (expected running or cycling)"
            ))),
        }
    }
}

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// Variant payload: the type-specific input and its derived metric.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutDetails {
    /// `pace` in min/km
    Running { cadence: u32, pace: f64 },
    /// `speed` in km/h
    Cycling {
        elevation_gain: Option<f64>,
        speed: f64,
    },
}

impl WorkoutDetails {
    fn from_input(variant: VariantInput, distance: f64, duration: f64) -> Self {
        match variant {
            VariantInput::Running { cadence } => WorkoutDetails::Running {
                cadence,
                pace: pace(distance, duration),
            },
            VariantInput::Cycling { elevation_gain } => WorkoutDetails::Cycling {
                elevation_gain,
                speed: speed(distance, duration),
            },
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Running pace in minutes per kilometer.
pub fn pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// Cycling speed in kilometers per hour.
pub fn speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// Build the "<Type> on <Month> <Day>" label.
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), format_description_date(created_at))
}

/// A logged workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    /// Distance in kilometers
    distance: f64,
    /// Duration in minutes
    duration: f64,
    description: String,
    interaction_count: u32,
    details: WorkoutDetails,
}

impl WorkoutRecord {
    /// Build a new record from validated input.
    ///
    /// Pure given its arguments; the caller supplies the id and timestamp.
    pub fn construct(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        input: &ValidatedInput,
    ) -> Self {
        let kind = input.kind();
        Self {
            id,
            created_at,
            coordinates,
            distance: input.distance(),
            duration: input.duration(),
            description: describe(kind, created_at),
            interaction_count: 0,
            details: WorkoutDetails::from_input(input.variant(), input.distance(), input.duration()),
        }
    }

    /// Rebuild a persisted record; derived fields are recomputed, never trusted.
    pub(crate) fn restore(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        input: &ValidatedInput,
        interaction_count: u32,
    ) -> Self {
        let mut record = Self::construct(id, created_at, coordinates, input);
        record.interaction_count = interaction_count;
        record
    }

    /// Replace the mutable fields with a new input.
    ///
    /// Keeps id, creation time and location. The variant payload is replaced
    /// wholesale, so switching type drops the old type's fields; the
    /// description is regenerated only when the type changes.
    pub(crate) fn apply_edit(&mut self, input: &ValidatedInput) {
        let kind_changed = input.kind() != self.kind();

        self.distance = input.distance();
        self.duration = input.duration();
        self.details = WorkoutDetails::from_input(input.variant(), self.distance, self.duration);

        if kind_changed {
            self.description = describe(input.kind(), self.created_at);
        }
        self.recompute();
    }

    /// Recompute the derived metric from distance and duration.
    pub(crate) fn recompute(&mut self) {
        match &mut self.details {
            WorkoutDetails::Running { pace: p, .. } => *p = pace(self.distance, self.duration),
            WorkoutDetails::Cycling { speed: s, .. } => *s = speed(self.distance, self.duration),
        }
    }

    pub(crate) fn record_interaction(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    pub fn pace(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { pace, .. } => Some(pace),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn cadence(&self) -> Option<u32> {
        match self.details {
            WorkoutDetails::Running { cadence, .. } => Some(cadence),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed, .. } => Some(speed),
            WorkoutDetails::Running { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { elevation_gain, .. } => elevation_gain,
            WorkoutDetails::Running { .. } => None,
        }
    }

    /// The record's current values as validated input, e.g. to prefill a form.
    pub fn to_input(&self) -> ValidatedInput {
        let variant = match self.details {
            WorkoutDetails::Running { cadence, .. } => VariantInput::Running { cadence },
            WorkoutDetails::Cycling { elevation_gain, .. } => {
                VariantInput::Cycling { elevation_gain }
            }
        };
        ValidatedInput::new(self.distance, self.duration, variant)
    }
}

/// Hands out time-derived ids that never repeat within a session.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last_millis: Option<i64>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id at `now`, skipping any id `is_taken` reports.
    pub fn next(&mut self, now: DateTime<Utc>, is_taken: impl Fn(&WorkoutId) -> bool) -> WorkoutId {
        let mut millis = now.timestamp_millis();
        if let Some(last) = self.last_millis {
            millis = millis.max(last + 1);
        }

        loop {
            let id = WorkoutId(format!("{:010}", millis.rem_euclid(ID_MODULUS)));
            if !is_taken(&id) {
                self.last_millis = Some(millis);
                return id;
            }
            millis += 1;
        }
    }
}
