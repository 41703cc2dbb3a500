// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod input;
pub mod view;
pub mod workout;

pub use input::{ValidatedInput, VariantInput, WorkoutInput};
pub use view::{FormDirective, RenderDirective, ViewModel, WorkoutView};
pub use workout::{Coordinates, IdAllocator, WorkoutDetails, WorkoutId, WorkoutKind, WorkoutRecord};
