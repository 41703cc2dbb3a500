// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use workout_tracker::error::{AppError, PersistenceError, StorageError, ValidationError};
use workout_tracker::models::WorkoutId;

#[test]
fn test_is_user_facing_matches_input_errors() {
    let err = AppError::from(ValidationError::new("Distance must be a positive number"));
    assert!(err.is_user_facing());

    let err = AppError::NoPendingSite;
    assert!(err.is_user_facing());
}

#[test]
fn test_is_user_facing_no_match() {
    let err = AppError::NotFound(WorkoutId::from("0000000001"));
    assert!(!err.is_user_facing());

    let err = AppError::DuplicateId(WorkoutId::from("0000000001"));
    assert!(!err.is_user_facing());

    let err = AppError::from(PersistenceError::from(StorageError::Unavailable));
    assert!(!err.is_user_facing());
}

#[test]
fn test_display_messages() {
    let err = AppError::from(ValidationError::new("Cadence must be a whole number"));
    assert_eq!(err.to_string(), "Invalid input: Cadence must be a whole number");

    let err = AppError::NotFound(WorkoutId::from("1717315200"));
    assert_eq!(err.to_string(), "Workout not found: 1717315200");

    let err = PersistenceError::from(StorageError::Unavailable);
    assert_eq!(err.to_string(), "Storage unavailable");

    let err = PersistenceError::InvalidRecord {
        id: WorkoutId::from("42"),
        reason: "Duration must be a positive number".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid stored workout 42: Duration must be a positive number"
    );
}

#[test]
fn test_malformed_payload_converts() {
    let json_err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
    let err = AppError::from(PersistenceError::from(json_err));

    assert!(matches!(
        err,
        AppError::Persistence(PersistenceError::Malformed(_))
    ));
    assert!(err.to_string().starts_with("Persistence error: Malformed workout payload"));
}
