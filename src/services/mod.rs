// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - workout engine logic.

pub mod collection;
pub mod edit_session;
pub mod tracker;
pub mod validation;

pub use collection::{SortCriterion, WorkoutCollection};
pub use edit_session::{EditSession, SessionEffect, SubmitTarget};
pub use tracker::{WorkoutTracker, DEFAULT_MAP_ZOOM};
pub use validation::{validate, validate_coordinates};
