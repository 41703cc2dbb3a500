// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout form input, before and after validation.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;
use crate::models::workout::WorkoutKind;
use crate::services::validation;

/// Raw values submitted through the workout form.
///
/// `extra` is the cadence for running and the elevation gain for cycling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutInput {
    pub kind: WorkoutKind,
    pub distance: f64,
    pub duration: f64,
    pub extra: Option<f64>,
}

impl WorkoutInput {
    pub fn running(distance: f64, duration: f64, cadence: f64) -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance,
            duration,
            extra: Some(cadence),
        }
    }

    pub fn cycling(distance: f64, duration: f64, elevation_gain: Option<f64>) -> Self {
        Self {
            kind: WorkoutKind::Cycling,
            distance,
            duration,
            extra: elevation_gain,
        }
    }

    pub fn validate(&self) -> Result<ValidatedInput, ValidationError> {
        validation::validate(self.kind, self.distance, self.duration, self.extra)
    }
}

/// Type-specific part of a validated input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantInput {
    Running { cadence: u32 },
    Cycling { elevation_gain: Option<f64> },
}

impl VariantInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            VariantInput::Running { .. } => WorkoutKind::Running,
            VariantInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Input that passed validation. Only the validator builds these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    distance: f64,
    duration: f64,
    variant: VariantInput,
}

impl ValidatedInput {
    pub(crate) fn new(distance: f64, duration: f64, variant: VariantInput) -> Self {
        Self {
            distance,
            duration,
            variant,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        self.variant.kind()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn variant(&self) -> VariantInput {
        self.variant
    }
}

impl From<ValidatedInput> for WorkoutInput {
    fn from(input: ValidatedInput) -> Self {
        match input.variant {
            VariantInput::Running { cadence } => {
                WorkoutInput::running(input.distance, input.duration, f64::from(cadence))
            }
            VariantInput::Cycling { elevation_gain } => {
                WorkoutInput::cycling(input.distance, input.duration, elevation_gain)
            }
        }
    }
}
