// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout persistence gateway.
//!
//! Serializes the whole ordered collection into one key-value slot. The
//! stored JSON keeps the shape written by the browser version of the app
//! (`coords`, `date`, `clicks`, `type`, camelCase variant fields), so old
//! slots load unchanged.
//!
//! On load only the inputs are trusted: pace, speed and description are
//! recomputed from type, distance, duration and creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::db::kv::KeyValueStore;
use crate::error::PersistenceError;
use crate::models::workout::{Coordinates, WorkoutDetails, WorkoutId, WorkoutKind, WorkoutRecord};
use crate::services::collection::WorkoutCollection;
use crate::services::validation::{validate, validate_coordinates};

/// Persisted form of one workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkout {
    id: WorkoutId,
    date: DateTime<Utc>,
    #[serde(default)]
    clicks: u32,
    coords: Coordinates,
    distance: f64,
    duration: f64,
    #[serde(rename = "type")]
    kind: WorkoutKind,
    /// Written for readers of the slot; regenerated on load.
    #[serde(default)]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pace: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
}

impl From<&WorkoutRecord> for StoredWorkout {
    fn from(record: &WorkoutRecord) -> Self {
        let (cadence, pace, elevation_gain, speed) = match *record.details() {
            WorkoutDetails::Running { cadence, pace } => {
                (Some(f64::from(cadence)), Some(pace), None, None)
            }
            WorkoutDetails::Cycling {
                elevation_gain,
                speed,
            } => (None, None, elevation_gain, Some(speed)),
        };

        Self {
            id: record.id().clone(),
            date: record.created_at(),
            clicks: record.interaction_count(),
            coords: record.coordinates(),
            distance: record.distance(),
            duration: record.duration(),
            kind: record.kind(),
            description: Some(record.description().to_string()),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }
}

impl TryFrom<StoredWorkout> for WorkoutRecord {
    type Error = PersistenceError;

    fn try_from(stored: StoredWorkout) -> Result<Self, Self::Error> {
        let extra = match stored.kind {
            WorkoutKind::Running => stored.cadence,
            WorkoutKind::Cycling => stored.elevation_gain,
        };
        let invalid = |reason: String| PersistenceError::InvalidRecord {
            id: stored.id.clone(),
            reason,
        };

        let input = validate(stored.kind, stored.distance, stored.duration, extra)
            .map_err(|e| invalid(e.reason))?;
        let coordinates = validate_coordinates(stored.coords).map_err(|e| invalid(e.reason))?;

        Ok(WorkoutRecord::restore(
            stored.id,
            stored.date,
            coordinates,
            &input,
            stored.clicks,
        ))
    }
}

/// Accept a number, `null`, an empty string, or a numeric string.
///
/// The browser form stored an untouched elevation field as `""`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(f64),
        Text(String),
    }

    match Option::<Lenient>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Lenient::Number(n)) => Ok(Some(n)),
        Some(Lenient::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Lenient::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Saves and restores the workout collection through one storage slot.
#[derive(Debug, Clone)]
pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Serialize every record, in order, into the slot.
    pub fn save(&mut self, collection: &WorkoutCollection) -> Result<(), PersistenceError> {
        let stored: Vec<StoredWorkout> = collection.iter().map(StoredWorkout::from).collect();
        let payload = serde_json::to_string(&stored)?;
        self.store.set(&self.key, &payload)?;
        tracing::debug!(key = %self.key, count = stored.len(), "Workouts saved");
        Ok(())
    }

    /// Load the collection, treating a missing or unreadable slot as empty.
    pub fn load(&self) -> WorkoutCollection {
        match self.load_strict() {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding persisted workouts");
                WorkoutCollection::new()
            }
        }
    }

    /// Load the collection, reporting storage failures and corrupt payloads.
    ///
    /// A missing slot is still an empty collection.
    pub fn load_strict(&self) -> Result<WorkoutCollection, PersistenceError> {
        let Some(payload) = self.store.get(&self.key)? else {
            return Ok(WorkoutCollection::new());
        };
        let stored: Option<Vec<StoredWorkout>> = serde_json::from_str(&payload)?;

        let mut collection = WorkoutCollection::new();
        for item in stored.unwrap_or_default() {
            let record = WorkoutRecord::try_from(item)?;
            let id = record.id().clone();
            collection
                .insert(record)
                .map_err(|_| PersistenceError::DuplicateId(id))?;
        }

        tracing::debug!(key = %self.key, count = collection.len(), "Workouts loaded");
        Ok(collection)
    }

    /// Delete the slot.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)?;
        tracing::debug!(key = %self.key, "Workout slot cleared");
        Ok(())
    }
}
