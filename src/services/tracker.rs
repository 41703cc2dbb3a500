// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout tracker: the core controller.
//!
//! Each public method handles one user action to completion:
//! 1. Consult the edit session for create vs. edit
//! 2. Validate the input
//! 3. Mutate the collection
//! 4. Persist (failures are logged, not rolled back)
//! 5. Return a view-model for the renderer

use chrono::{DateTime, Utc};

use crate::db::gateway::PersistenceGateway;
use crate::db::kv::KeyValueStore;
use crate::error::{AppError, Result};
use crate::models::input::WorkoutInput;
use crate::models::view::{FormDirective, RenderDirective, ViewModel, WorkoutView};
use crate::models::workout::{Coordinates, IdAllocator, WorkoutId, WorkoutRecord};
use crate::services::collection::{SortCriterion, WorkoutCollection};
use crate::services::edit_session::{EditSession, SessionEffect, SubmitTarget};
use crate::services::validation::validate_coordinates;

/// Default map zoom level for focus directives.
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Owns the collection, the edit session and the persistence gateway.
pub struct WorkoutTracker<S> {
    collection: WorkoutCollection,
    session: EditSession,
    gateway: PersistenceGateway<S>,
    ids: IdAllocator,
    map_zoom: u8,
}

impl<S: KeyValueStore> WorkoutTracker<S> {
    /// Rehydrate from the gateway; an unreadable slot starts empty.
    pub fn open(gateway: PersistenceGateway<S>, map_zoom: u8) -> Self {
        let collection = gateway.load();
        tracing::info!(count = collection.len(), "Workout tracker opened");
        Self::with_collection(gateway, collection, map_zoom)
    }

    /// Rehydrate from the gateway, failing on a corrupt slot.
    pub fn open_strict(gateway: PersistenceGateway<S>, map_zoom: u8) -> Result<Self> {
        let collection = gateway.load_strict()?;
        tracing::info!(count = collection.len(), "Workout tracker opened");
        Ok(Self::with_collection(gateway, collection, map_zoom))
    }

    fn with_collection(
        gateway: PersistenceGateway<S>,
        collection: WorkoutCollection,
        map_zoom: u8,
    ) -> Self {
        Self {
            collection,
            session: EditSession::new(),
            gateway,
            ids: IdAllocator::new(),
            map_zoom,
        }
    }

    pub fn collection(&self) -> &WorkoutCollection {
        &self.collection
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut PersistenceGateway<S> {
        &mut self.gateway
    }

    /// Markers and list entries for every workout, for the first render.
    pub fn startup_view(&self) -> ViewModel {
        let directives = self
            .collection
            .iter()
            .flat_map(|r| [RenderDirective::marker(r), RenderDirective::list_entry(r)])
            .collect();
        self.view(directives, FormDirective::Unchanged)
    }

    /// Current state with no changes to apply.
    pub fn current_view(&self) -> ViewModel {
        self.view(Vec::new(), FormDirective::Unchanged)
    }

    /// Map click: open an empty form for a new workout at `coordinates`.
    pub fn activate_map(&mut self, coordinates: Coordinates) -> Result<ViewModel> {
        let coordinates = validate_coordinates(coordinates)?;
        let (session, effect) = std::mem::take(&mut self.session).on_map_activated(coordinates);
        self.session = session;
        Ok(self.effect_view(effect))
    }

    /// Edit affordance click on workout `id`.
    pub fn activate_edit(&mut self, id: &WorkoutId) -> Result<ViewModel> {
        self.collection.find_by_id(id).inspect_err(log_fault)?;
        let (session, effect) =
            std::mem::take(&mut self.session).on_edit_affordance_activated(id.clone());
        self.session = session;
        Ok(self.effect_view(effect))
    }

    /// Close the form without changes.
    pub fn cancel_form(&mut self) -> ViewModel {
        let (session, effect) = std::mem::take(&mut self.session).on_form_cancelled();
        self.session = session;
        self.effect_view(effect)
    }

    /// Form submit: create or edit depending on the edit session.
    pub fn submit(&mut self, input: &WorkoutInput) -> Result<ViewModel> {
        self.submit_at(input, Utc::now())
    }

    /// Form submit with an explicit creation time.
    ///
    /// On validation failure nothing changes, including the edit session.
    pub fn submit_at(&mut self, input: &WorkoutInput, now: DateTime<Utc>) -> Result<ViewModel> {
        let target = self.session.submit_target().ok_or(AppError::NoPendingSite)?;
        let validated = input.validate()?;

        let mut directives = Vec::new();
        match target {
            SubmitTarget::Create(coordinates) => {
                let id = self.ids.next(now, |id| self.collection.contains(id));
                let record = WorkoutRecord::construct(id, now, coordinates, &validated);
                directives.push(RenderDirective::marker(&record));
                directives.push(RenderDirective::list_entry(&record));
                tracing::info!(
                    workout_id = %record.id(),
                    kind = %record.kind(),
                    distance = record.distance(),
                    "Workout created"
                );
                self.collection.insert(record).inspect_err(log_fault)?;
            }
            SubmitTarget::Edit(id) => {
                let record = self
                    .collection
                    .replace(&id, &validated)
                    .inspect_err(log_fault)?;
                directives.push(RenderDirective::marker(record));
                directives.push(RenderDirective::list_entry(record));
                directives.push(RenderDirective::ClearHighlight { id: id.to_string() });
                tracing::info!(workout_id = %id, kind = %record.kind(), "Workout edited");
            }
        }

        self.session = std::mem::take(&mut self.session).on_submit_committed();
        self.persist();
        Ok(self.view(directives, FormDirective::Close))
    }

    /// Delete workout `id` and its marker.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<ViewModel> {
        let removed = self.collection.remove(id).inspect_err(log_fault)?;
        let was_selected = self.session.selected() == Some(removed.id());
        self.session = std::mem::take(&mut self.session).forget(removed.id());
        tracing::info!(workout_id = %removed.id(), "Workout deleted");

        self.persist();
        let form = if was_selected {
            FormDirective::Close
        } else {
            FormDirective::Unchanged
        };
        Ok(self.view(Vec::from(removal_directives(&removed)), form))
    }

    /// Reorder the list. Markers stay attached to their workouts by id.
    pub fn sort(&mut self, criterion: SortCriterion) -> ViewModel {
        self.collection.sort(criterion);
        tracing::info!(criterion = %criterion, "Workouts sorted");

        self.persist();
        let ids = self.collection.iter().map(|r| r.id().to_string()).collect();
        self.view(
            vec![RenderDirective::ReorderListEntries { ids }],
            FormDirective::Unchanged,
        )
    }

    /// List entry click: count the interaction and move the map to the workout.
    pub fn focus(&mut self, id: &WorkoutId) -> Result<ViewModel> {
        let record = self
            .collection
            .record_interaction(id)
            .inspect_err(log_fault)?;
        let coordinates: [f64; 2] = record.coordinates().into();
        tracing::debug!(workout_id = %id, clicks = record.interaction_count(), "Workout focused");

        self.persist();
        let directives = vec![RenderDirective::FocusMap {
            coordinates,
            zoom: self.map_zoom,
        }];
        Ok(self.view(directives, FormDirective::Unchanged))
    }

    /// Remove every workout and delete the storage slot.
    pub fn clear_all(&mut self) -> ViewModel {
        let removed = self.collection.clear_all();
        let (session, _) = std::mem::take(&mut self.session).on_form_cancelled();
        self.session = session;
        tracing::info!(count = removed.len(), "All workouts cleared");

        if let Err(e) = self.gateway.clear() {
            tracing::warn!(error = %e, "Failed to clear workout storage");
        }
        let directives = removed.iter().flat_map(removal_directives).collect();
        self.view(directives, FormDirective::Close)
    }

    fn persist(&mut self) {
        if let Err(e) = self.gateway.save(&self.collection) {
            tracing::warn!(error = %e, "Failed to persist workouts");
        }
    }

    fn effect_view(&self, effect: SessionEffect) -> ViewModel {
        let mut directives = Vec::new();
        let form = match effect {
            SessionEffect::OpenEditForm { id, previous } => {
                if let Some(previous) = previous {
                    directives.push(RenderDirective::ClearHighlight {
                        id: previous.to_string(),
                    });
                }
                directives.push(RenderDirective::HighlightEntry { id: id.to_string() });
                self.prefilled_form(&id)
            }
            SessionEffect::KeepEditForm { id } => self.prefilled_form(&id),
            SessionEffect::CancelEdit { id } => {
                directives.push(RenderDirective::ClearHighlight { id: id.to_string() });
                FormDirective::Close
            }
            SessionEffect::OpenCreateForm {
                coordinates,
                previous,
            } => {
                if let Some(previous) = previous {
                    directives.push(RenderDirective::ClearHighlight {
                        id: previous.to_string(),
                    });
                }
                FormDirective::OpenEmpty {
                    coordinates: coordinates.into(),
                }
            }
            SessionEffect::CloseForm { previous } => {
                if let Some(previous) = previous {
                    directives.push(RenderDirective::ClearHighlight {
                        id: previous.to_string(),
                    });
                }
                FormDirective::Close
            }
        };
        self.view(directives, form)
    }

    fn prefilled_form(&self, id: &WorkoutId) -> FormDirective {
        match self.collection.find_by_id(id) {
            Ok(record) => FormDirective::OpenPrefilled {
                id: id.to_string(),
                values: record.to_input().into(),
            },
            Err(e) => {
                log_fault(&e);
                FormDirective::Close
            }
        }
    }

    fn view(&self, directives: Vec<RenderDirective>, form: FormDirective) -> ViewModel {
        ViewModel {
            workouts: self.collection.iter().map(WorkoutView::from).collect(),
            directives,
            form,
        }
    }
}

fn removal_directives(record: &WorkoutRecord) -> [RenderDirective; 2] {
    let id = record.id().to_string();
    [
        RenderDirective::RemoveMarker { id: id.clone() },
        RenderDirective::RemoveListEntry { id },
    ]
}

/// Unknown or duplicate ids are faults in the caller or the id allocator.
fn log_fault(err: &AppError) {
    tracing::error!(error = %err, "{}", fault_message(err));
}

fn fault_message(err: &AppError) -> &'static str {
    match err {
        AppError::NotFound(_) => "Workout operation referenced an unknown id",
        AppError::DuplicateId(_) => "Workout id already present in the collection",
        _ => "Workout operation failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::keys;
    use crate::db::kv::MemoryStore;
    use chrono::TimeZone;

    fn tracker() -> WorkoutTracker<MemoryStore> {
        let gateway = PersistenceGateway::new(MemoryStore::new(), keys::WORKOUTS);
        WorkoutTracker::open(gateway, DEFAULT_MAP_ZOOM)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 6, 30, 0).unwrap()
    }

    #[test]
    fn test_fault_message_names_the_cause() {
        let id = WorkoutId::from("0000000001");
        assert_eq!(
            fault_message(&AppError::NotFound(id.clone())),
            "Workout operation referenced an unknown id"
        );
        assert_eq!(
            fault_message(&AppError::DuplicateId(id)),
            "Workout id already present in the collection"
        );
    }

    #[test]
    fn test_submit_without_site_is_rejected() {
        let mut tracker = tracker();
        let err = tracker
            .submit_at(&WorkoutInput::running(5.0, 25.0, 170.0), now())
            .unwrap_err();
        assert!(matches!(err, AppError::NoPendingSite));
        assert!(tracker.collection().is_empty());
    }

    #[test]
    fn test_create_persists_and_resets_session() {
        let mut tracker = tracker();
        tracker.activate_map(Coordinates::new(39.0, -12.0)).unwrap();

        let view = tracker
            .submit_at(&WorkoutInput::running(5.2, 24.0, 178.0), now())
            .unwrap();

        assert_eq!(view.workouts.len(), 1);
        assert_eq!(view.form, FormDirective::Close);
        assert!(tracker.session().is_idle());
        assert!(tracker
            .gateway()
            .store()
            .get(keys::WORKOUTS)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_validation_failure_keeps_session() {
        let mut tracker = tracker();
        tracker.activate_map(Coordinates::new(39.0, -12.0)).unwrap();
        let before = tracker.session().clone();

        let err = tracker
            .submit_at(&WorkoutInput::running(-1.0, 24.0, 178.0), now())
            .unwrap_err();

        assert!(err.is_user_facing());
        assert_eq!(tracker.session(), &before);
        assert!(tracker.collection().is_empty());
    }

    #[test]
    fn test_focus_counts_interaction() {
        let mut tracker = tracker();
        tracker.activate_map(Coordinates::new(39.0, -12.0)).unwrap();
        let view = tracker
            .submit_at(&WorkoutInput::cycling(27.0, 95.0, Some(523.0)), now())
            .unwrap();
        let id = WorkoutId::new(view.workouts[0].id.clone());

        let view = tracker.focus(&id).unwrap();

        assert_eq!(view.workouts[0].interaction_count, 1);
        assert_eq!(
            view.directives,
            vec![RenderDirective::FocusMap {
                coordinates: [39.0, -12.0],
                zoom: DEFAULT_MAP_ZOOM
            }]
        );
    }
}
