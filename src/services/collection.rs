// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ordered workout collection.
//!
//! Order drives the list display and sorting. Every lookup resolves by id,
//! never by position, so sorting and deleting cannot desynchronize a workout
//! from its marker.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result, ValidationError};
use crate::models::input::ValidatedInput;
use crate::models::workout::{WorkoutId, WorkoutRecord};

/// Sort key for the workout list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    Distance,
    Duration,
    Type,
}

impl SortCriterion {
    fn compare(self, a: &WorkoutRecord, b: &WorkoutRecord) -> Ordering {
        match self {
            SortCriterion::Distance => a.distance().total_cmp(&b.distance()),
            SortCriterion::Duration => a.duration().total_cmp(&b.duration()),
            SortCriterion::Type => a.kind().as_str().cmp(b.kind().as_str()),
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortCriterion::Distance => "distance",
            SortCriterion::Duration => "duration",
            SortCriterion::Type => "type",
        };
        f.write_str(name)
    }
}

impl FromStr for SortCriterion {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(SortCriterion::Distance),
            "duration" => Ok(SortCriterion::Duration),
            "type" => Ok(SortCriterion::Type),
            other => Err(ValidationError::new(format!(
                "unknown sort criterion {other:?} (expected distance, duration or type)"
            ))),
        }
    }
}

/// The ordered sequence of workouts with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutCollection {
    records: Vec<WorkoutRecord>,
}

impl WorkoutCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from records in order, rejecting duplicate ids.
    pub fn from_records(records: Vec<WorkoutRecord>) -> Result<Self> {
        let mut collection = Self::new();
        for record in records {
            collection.insert(record)?;
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkoutRecord> {
        self.records.iter()
    }

    /// Ids in display order.
    pub fn ids(&self) -> Vec<WorkoutId> {
        self.records.iter().map(|r| r.id().clone()).collect()
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.position(id).is_some()
    }

    /// Append a record. A repeated id is a caller bug and is rejected.
    pub fn insert(&mut self, record: WorkoutRecord) -> Result<()> {
        if self.contains(record.id()) {
            return Err(AppError::DuplicateId(record.id().clone()));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Result<&WorkoutRecord> {
        self.position(id)
            .map(|idx| &self.records[idx])
            .ok_or_else(|| AppError::NotFound(id.clone()))
    }

    /// Replace a record's mutable fields; id, creation time and location stay.
    pub fn replace(&mut self, id: &WorkoutId, input: &ValidatedInput) -> Result<&WorkoutRecord> {
        let record = self.find_mut(id)?;
        record.apply_edit(input);
        Ok(&*record)
    }

    /// Remove the record with `id`, returning it so its marker can be dropped.
    pub fn remove(&mut self, id: &WorkoutId) -> Result<WorkoutRecord> {
        let idx = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        Ok(self.records.remove(idx))
    }

    /// Empty the collection, returning the removed records in order.
    pub fn clear_all(&mut self) -> Vec<WorkoutRecord> {
        std::mem::take(&mut self.records)
    }

    /// Stable ascending sort; ties keep their relative order.
    pub fn sort(&mut self, criterion: SortCriterion) {
        self.records.sort_by(|a, b| criterion.compare(a, b));
    }

    /// Count a non-editing activation of a workout.
    pub fn record_interaction(&mut self, id: &WorkoutId) -> Result<&WorkoutRecord> {
        let record = self.find_mut(id)?;
        record.record_interaction();
        Ok(&*record)
    }

    fn find_mut(&mut self, id: &WorkoutId) -> Result<&mut WorkoutRecord> {
        self.records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::NotFound(id.clone()))
    }

    fn position(&self, id: &WorkoutId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workout::{Coordinates, WorkoutKind};
    use crate::services::validation::validate;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, kind: WorkoutKind, distance: f64) -> WorkoutRecord {
        let extra = match kind {
            WorkoutKind::Running => Some(170.0),
            WorkoutKind::Cycling => None,
        };
        let input = validate(kind, distance, 30.0, extra).unwrap();
        WorkoutRecord::construct(
            WorkoutId::from(id),
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            Coordinates::new(39.0, -12.0),
            &input,
        )
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut collection = WorkoutCollection::new();
        collection
            .insert(record("a", WorkoutKind::Running, 5.0))
            .unwrap();

        let err = collection
            .insert(record("a", WorkoutKind::Cycling, 20.0))
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateId(id) if id.as_str() == "a"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_sort_by_type_is_stable() {
        let mut collection = WorkoutCollection::from_records(vec![
            record("r1", WorkoutKind::Running, 5.0),
            record("c1", WorkoutKind::Cycling, 20.0),
            record("r2", WorkoutKind::Running, 3.0),
            record("c2", WorkoutKind::Cycling, 10.0),
        ])
        .unwrap();

        collection.sort(SortCriterion::Type);

        let ids: Vec<_> = collection.ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["c1", "c2", "r1", "r2"]);
    }

    #[test]
    fn test_remove_missing_id_is_not_found() {
        let mut collection =
            WorkoutCollection::from_records(vec![record("a", WorkoutKind::Running, 5.0)]).unwrap();

        let err = collection.remove(&WorkoutId::from("b")).unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_record_interaction_increments_count() {
        let mut collection =
            WorkoutCollection::from_records(vec![record("a", WorkoutKind::Running, 5.0)]).unwrap();

        collection.record_interaction(&WorkoutId::from("a")).unwrap();
        let record = collection
            .record_interaction(&WorkoutId::from("a"))
            .unwrap();

        assert_eq!(record.interaction_count(), 2);
    }

    #[test]
    fn test_sort_criterion_parses() {
        assert_eq!("Distance".parse::<SortCriterion>().unwrap(), SortCriterion::Distance);
        assert_eq!("type".parse::<SortCriterion>().unwrap(), SortCriterion::Type);
        assert!("pace".parse::<SortCriterion>().is_err());
    }
}
