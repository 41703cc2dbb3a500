// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! View-model handed to the rendering boundary after every operation.
//!
//! The core never produces markup. It returns the ordered workout list plus
//! directives keyed by workout id; the renderer owns markers, list entries
//! and the form.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::input::WorkoutInput;
use crate::models::workout::{WorkoutKind, WorkoutRecord};
use crate::time_utils::format_utc_rfc3339;

/// Result of one processed user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ViewModel {
    /// Every workout in display order.
    pub workouts: Vec<WorkoutView>,
    /// Changes to apply, in order.
    pub directives: Vec<RenderDirective>,
    pub form: FormDirective,
}

impl ViewModel {
    /// Ids of the workouts in display order.
    pub fn ids(&self) -> Vec<&str> {
        self.workouts.iter().map(|w| w.id.as_str()).collect()
    }
}

/// Flat, renderer-friendly view of one workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutView {
    pub id: String,
    pub kind: WorkoutKind,
    pub description: String,
    pub coordinates: [f64; 2],
    pub distance: f64,
    pub duration: f64,
    pub created_at: String,
    pub interaction_count: u32,
    pub pace: Option<f64>,
    pub cadence: Option<u32>,
    pub speed: Option<f64>,
    pub elevation_gain: Option<f64>,
}

impl From<&WorkoutRecord> for WorkoutView {
    fn from(record: &WorkoutRecord) -> Self {
        Self {
            id: record.id().to_string(),
            kind: record.kind(),
            description: record.description().to_string(),
            coordinates: record.coordinates().into(),
            distance: record.distance(),
            duration: record.duration(),
            created_at: format_utc_rfc3339(record.created_at()),
            interaction_count: record.interaction_count(),
            pace: record.pace(),
            cadence: record.cadence(),
            speed: record.speed(),
            elevation_gain: record.elevation_gain(),
        }
    }
}

/// One change for the renderer. Markers and list entries are keyed by id;
/// rendering an id that already exists replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RenderDirective {
    RenderMarker {
        id: String,
        coordinates: [f64; 2],
        kind: WorkoutKind,
        description: String,
    },
    RemoveMarker {
        id: String,
    },
    RenderListEntry {
        entry: WorkoutView,
    },
    RemoveListEntry {
        id: String,
    },
    ReorderListEntries {
        ids: Vec<String>,
    },
    HighlightEntry {
        id: String,
    },
    ClearHighlight {
        id: String,
    },
    FocusMap {
        coordinates: [f64; 2],
        zoom: u8,
    },
}

impl RenderDirective {
    pub fn marker(record: &WorkoutRecord) -> Self {
        RenderDirective::RenderMarker {
            id: record.id().to_string(),
            coordinates: record.coordinates().into(),
            kind: record.kind(),
            description: record.description().to_string(),
        }
    }

    pub fn list_entry(record: &WorkoutRecord) -> Self {
        RenderDirective::RenderListEntry {
            entry: WorkoutView::from(record),
        }
    }
}

/// What the workout form should do.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FormDirective {
    #[default]
    Unchanged,
    /// Empty form for a new workout at the activated map location.
    OpenEmpty { coordinates: [f64; 2] },
    /// Form prefilled with an existing workout's values.
    OpenPrefilled { id: String, values: WorkoutInput },
    Close,
}
