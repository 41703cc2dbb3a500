// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Edit-session state machine.
//!
//! Decides whether the next form submission creates a workout or edits one.
//! Activating the edit affordance selects a workout; activating it again on
//! the same workout cancels editing; activating it on another workout
//! retargets. A map activation drops any selection and records the pending
//! creation site.
//!
//! Transitions take the session by value and return the next session with
//! the effect the form should show.

use crate::models::workout::{Coordinates, WorkoutId};

/// Arm stage at which a repeated activation cancels editing.
const CANCEL_STAGE: u8 = 2;

/// Selection and arm state of the workout form.
///
/// Invariant: `editing` is true exactly when a workout is selected, and a
/// pending creation site only exists while not editing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSession {
    selected: Option<WorkoutId>,
    arm_stage: u8,
    editing: bool,
    pending_site: Option<Coordinates>,
}

/// Visible outcome of a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Open the form prefilled for `id`; `previous` loses its highlight.
    OpenEditForm {
        id: WorkoutId,
        previous: Option<WorkoutId>,
    },
    /// Still editing `id`; show the form again.
    KeepEditForm { id: WorkoutId },
    /// Double activation: close the form, drop the selection, no mutation.
    CancelEdit { id: WorkoutId },
    /// Open an empty form for a new workout at the given site.
    OpenCreateForm {
        coordinates: Coordinates,
        previous: Option<WorkoutId>,
    },
    /// Close the form.
    CloseForm { previous: Option<WorkoutId> },
}

/// What a form submission should do.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitTarget {
    Create(Coordinates),
    Edit(WorkoutId),
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&WorkoutId> {
        self.selected.as_ref()
    }

    pub fn arm_stage(&self) -> u8 {
        self.arm_stage
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn pending_site(&self) -> Option<Coordinates> {
        self.pending_site
    }

    /// No selection and no pending creation site.
    pub fn is_idle(&self) -> bool {
        self.selected.is_none() && self.pending_site.is_none()
    }

    /// Handle a click on a workout's edit affordance.
    pub fn on_edit_affordance_activated(self, id: WorkoutId) -> (Self, SessionEffect) {
        match self.selected {
            None => (
                Self::armed(id.clone()),
                SessionEffect::OpenEditForm { id, previous: None },
            ),
            Some(ref selected) if *selected == id && self.arm_stage < CANCEL_STAGE => {
                let arm_stage = self.arm_stage + 1;
                if arm_stage < CANCEL_STAGE {
                    let next = Self { arm_stage, ..self };
                    (next, SessionEffect::KeepEditForm { id })
                } else {
                    tracing::debug!(workout_id = %id, "Edit cancelled by repeated activation");
                    (Self::new(), SessionEffect::CancelEdit { id })
                }
            }
            Some(previous) => {
                tracing::debug!(workout_id = %id, previous = %previous, "Edit retargeted");
                (
                    Self::armed(id.clone()),
                    SessionEffect::OpenEditForm {
                        id,
                        previous: Some(previous),
                    },
                )
            }
        }
    }

    /// Handle a map click: start a new workout at `coordinates`.
    pub fn on_map_activated(self, coordinates: Coordinates) -> (Self, SessionEffect) {
        let next = Self {
            pending_site: Some(coordinates),
            ..Self::new()
        };
        (
            next,
            SessionEffect::OpenCreateForm {
                coordinates,
                previous: self.selected,
            },
        )
    }

    /// Handle an explicit form cancel.
    pub fn on_form_cancelled(self) -> (Self, SessionEffect) {
        (
            Self::new(),
            SessionEffect::CloseForm {
                previous: self.selected,
            },
        )
    }

    /// Where a submission goes, if anywhere.
    pub fn submit_target(&self) -> Option<SubmitTarget> {
        match (&self.selected, self.pending_site) {
            (Some(id), _) if self.editing => Some(SubmitTarget::Edit(id.clone())),
            (_, Some(site)) => Some(SubmitTarget::Create(site)),
            _ => None,
        }
    }

    /// A submission was committed; back to idle.
    pub fn on_submit_committed(self) -> Self {
        Self::new()
    }

    /// A workout was deleted; drop it from the selection if it was selected.
    pub fn forget(self, id: &WorkoutId) -> Self {
        if self.selected.as_ref() == Some(id) {
            Self::new()
        } else {
            self
        }
    }

    fn armed(id: WorkoutId) -> Self {
        Self {
            selected: Some(id),
            arm_stage: 1,
            editing: true,
            pending_site: None,
        }
    }
}
