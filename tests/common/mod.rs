// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use workout_tracker::db::{keys, MemoryStore, PersistenceGateway};
use workout_tracker::models::{Coordinates, FormDirective, ViewModel, WorkoutId, WorkoutKind, WorkoutView};
use workout_tracker::render::RenderBoundary;
use workout_tracker::services::DEFAULT_MAP_ZOOM;
use workout_tracker::WorkoutTracker;

/// Fixed creation time for deterministic descriptions.
#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 2, 8, 0, 0).unwrap()
}

/// A point off the Portuguese coast.
#[allow(dead_code)]
pub fn lisbon_coast() -> Coordinates {
    Coordinates::new(39.0, -12.0)
}

/// Create a tracker over an empty in-memory store.
#[allow(dead_code)]
pub fn memory_tracker() -> WorkoutTracker<MemoryStore> {
    tracker_over(MemoryStore::new())
}

/// Create a tracker over the given store.
#[allow(dead_code)]
pub fn tracker_over(store: MemoryStore) -> WorkoutTracker<MemoryStore> {
    WorkoutTracker::open(PersistenceGateway::new(store, keys::WORKOUTS), DEFAULT_MAP_ZOOM)
}

/// Id of the last workout in a view.
#[allow(dead_code)]
pub fn last_id(view: &ViewModel) -> WorkoutId {
    WorkoutId::new(view.workouts.last().expect("view has workouts").id.clone())
}

/// Marker state as seen by a renderer.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinates: [f64; 2],
    pub kind: WorkoutKind,
    pub description: String,
}

/// Renderer that records what is on screen, keyed by id.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub markers: BTreeMap<String, Marker>,
    pub entries: Vec<WorkoutView>,
    pub highlighted: Option<String>,
    pub focused: Option<([f64; 2], u8)>,
    pub form: Option<FormDirective>,
}

impl RenderBoundary for RecordingRenderer {
    fn render_marker(&mut self, id: &str, coordinates: [f64; 2], kind: WorkoutKind, description: &str) {
        self.markers.insert(
            id.to_string(),
            Marker {
                coordinates,
                kind,
                description: description.to_string(),
            },
        );
    }

    fn remove_marker(&mut self, id: &str) {
        self.markers.remove(id);
    }

    fn render_list_entry(&mut self, entry: &WorkoutView) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => self.entries.push(entry.clone()),
        }
    }

    fn remove_list_entry(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
    }

    fn reorder_list_entries(&mut self, ids: &[String]) {
        self.entries
            .sort_by_key(|e| ids.iter().position(|id| *id == e.id).unwrap_or(usize::MAX));
    }

    fn highlight_entry(&mut self, id: &str) {
        self.highlighted = Some(id.to_string());
    }

    fn clear_highlight(&mut self, id: &str) {
        if self.highlighted.as_deref() == Some(id) {
            self.highlighted = None;
        }
    }

    fn focus_map(&mut self, coordinates: [f64; 2], zoom: u8) {
        self.focused = Some((coordinates, zoom));
    }

    fn apply_form(&mut self, form: &FormDirective) {
        self.form = Some(form.clone());
    }
}

impl RecordingRenderer {
    /// Ids of the list entries in display order.
    #[allow(dead_code)]
    pub fn entry_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }
}
