// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendering boundary.
//!
//! The renderer owns markers, list entries and the form, all keyed by
//! workout id. `apply` walks a view-model's directives in order and calls the
//! matching hook; implementors only provide the hooks.

use crate::models::view::{FormDirective, RenderDirective, ViewModel, WorkoutView};
use crate::models::workout::WorkoutKind;

/// Consumer of view-models produced by the tracker.
pub trait RenderBoundary {
    /// Create or replace the marker for `id`.
    fn render_marker(&mut self, id: &str, coordinates: [f64; 2], kind: WorkoutKind, description: &str);

    fn remove_marker(&mut self, id: &str);

    /// Create or replace the list entry for `entry.id`.
    fn render_list_entry(&mut self, entry: &WorkoutView);

    fn remove_list_entry(&mut self, id: &str);

    fn reorder_list_entries(&mut self, ids: &[String]);

    fn highlight_entry(&mut self, _id: &str) {}

    fn clear_highlight(&mut self, _id: &str) {}

    fn focus_map(&mut self, _coordinates: [f64; 2], _zoom: u8) {}

    fn apply_form(&mut self, _form: &FormDirective) {}

    /// Apply every directive, then the form directive.
    fn apply(&mut self, view: &ViewModel) {
        for directive in &view.directives {
            match directive {
                RenderDirective::RenderMarker {
                    id,
                    coordinates,
                    kind,
                    description,
                } => self.render_marker(id, *coordinates, *kind, description),
                RenderDirective::RemoveMarker { id } => self.remove_marker(id),
                RenderDirective::RenderListEntry { entry } => self.render_list_entry(entry),
                RenderDirective::RemoveListEntry { id } => self.remove_list_entry(id),
                RenderDirective::ReorderListEntries { ids } => self.reorder_list_entries(ids),
                RenderDirective::HighlightEntry { id } => self.highlight_entry(id),
                RenderDirective::ClearHighlight { id } => self.clear_highlight(id),
                RenderDirective::FocusMap { coordinates, zoom } => {
                    self.focus_map(*coordinates, *zoom)
                }
            }
        }
        if view.form != FormDirective::Unchanged {
            self.apply_form(&view.form);
        }
    }
}

/// Renderer that reports every directive as a tracing event.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl RenderBoundary for LogRenderer {
    fn render_marker(&mut self, id: &str, coordinates: [f64; 2], kind: WorkoutKind, description: &str) {
        tracing::info!(
            workout_id = id,
            lat = coordinates[0],
            lng = coordinates[1],
            kind = %kind,
            description,
            "Render marker"
        );
    }

    fn remove_marker(&mut self, id: &str) {
        tracing::info!(workout_id = id, "Remove marker");
    }

    fn render_list_entry(&mut self, entry: &WorkoutView) {
        tracing::info!(
            workout_id = %entry.id,
            description = %entry.description,
            distance = entry.distance,
            duration = entry.duration,
            pace = ?entry.pace,
            speed = ?entry.speed,
            "Render list entry"
        );
    }

    fn remove_list_entry(&mut self, id: &str) {
        tracing::info!(workout_id = id, "Remove list entry");
    }

    fn reorder_list_entries(&mut self, ids: &[String]) {
        tracing::info!(order = ?ids, "Reorder list entries");
    }

    fn highlight_entry(&mut self, id: &str) {
        tracing::info!(workout_id = id, "Highlight list entry");
    }

    fn clear_highlight(&mut self, id: &str) {
        tracing::info!(workout_id = id, "Clear list entry highlight");
    }

    fn focus_map(&mut self, coordinates: [f64; 2], zoom: u8) {
        tracing::info!(lat = coordinates[0], lng = coordinates[1], zoom, "Focus map");
    }

    fn apply_form(&mut self, form: &FormDirective) {
        tracing::info!(form = ?form, "Form");
    }
}
