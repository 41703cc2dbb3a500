// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Input validation rules.

use proptest::prelude::*;
use workout_tracker::models::{VariantInput, WorkoutInput, WorkoutKind};
use workout_tracker::services::validate;

#[test]
fn test_valid_running_input() {
    let input = WorkoutInput::running(5.2, 24.0, 178.0).validate().unwrap();
    assert_eq!(input.variant(), VariantInput::Running { cadence: 178 });
}

#[test]
fn test_missing_elevation_is_not_coerced_to_zero() {
    let input = WorkoutInput::cycling(27.0, 95.0, None).validate().unwrap();
    assert_eq!(
        input.variant(),
        VariantInput::Cycling {
            elevation_gain: None
        }
    );
}

#[test]
fn test_negative_elevation_rejected() {
    let err = WorkoutInput::cycling(27.0, 95.0, Some(-3.0))
        .validate()
        .unwrap_err();
    assert!(err.reason.contains("elevation"));
}

#[test]
fn test_error_names_the_field() {
    let err = validate(WorkoutKind::Cycling, 10.0, 0.0, None).unwrap_err();
    assert!(err.reason.contains("duration"), "got: {}", err.reason);

    let err = validate(WorkoutKind::Running, f64::NEG_INFINITY, 10.0, Some(170.0)).unwrap_err();
    assert!(err.reason.contains("distance"), "got: {}", err.reason);
}

proptest! {
    #[test]
    fn prop_non_positive_distance_rejected(distance in -1000.0f64..=0.0) {
        prop_assert!(validate(WorkoutKind::Running, distance, 30.0, Some(170.0)).is_err());
        prop_assert!(validate(WorkoutKind::Cycling, distance, 30.0, None).is_err());
    }

    #[test]
    fn prop_positive_inputs_accepted(
        distance in 0.001f64..1000.0,
        duration in 0.001f64..5000.0,
        elevation in proptest::option::of(0.0f64..9000.0),
    ) {
        prop_assert!(validate(WorkoutKind::Cycling, distance, duration, elevation).is_ok());
    }
}
