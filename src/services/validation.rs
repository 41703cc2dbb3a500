// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Input validation for workout creation and edits.
//!
//! Nothing reaches the collection without passing through here. A failed
//! validation leaves all state untouched.

use crate::error::ValidationError;
use crate::models::input::{ValidatedInput, VariantInput};
use crate::models::workout::{Coordinates, WorkoutKind};

/// Validate raw form values for a workout of the given kind.
///
/// `extra` is the cadence (required) for running and the elevation gain
/// (optional) for cycling. An omitted elevation stays absent.
pub fn validate(
    kind: WorkoutKind,
    distance: f64,
    duration: f64,
    extra: Option<f64>,
) -> Result<ValidatedInput, ValidationError> {
    require_positive("distance", distance)?;
    require_positive("duration", duration)?;

    let variant = match kind {
        WorkoutKind::Running => {
            let cadence = extra.ok_or_else(|| {
                ValidationError::new("cadence is required for running workouts")
            })?;
            VariantInput::Running {
                cadence: validate_cadence(cadence)?,
            }
        }
        WorkoutKind::Cycling => VariantInput::Cycling {
            elevation_gain: extra.map(validate_elevation).transpose()?,
        },
    };

    Ok(ValidatedInput::new(distance, duration, variant))
}

/// Reject non-finite or out-of-range map coordinates.
pub fn validate_coordinates(coordinates: Coordinates) -> Result<Coordinates, ValidationError> {
    let Coordinates { lat, lng } = coordinates;
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::new(format!(
            "latitude must be between -90 and 90, got {lat}"
        )));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(ValidationError::new(format!(
            "longitude must be between -180 and 180, got {lng}"
        )));
    }
    Ok(coordinates)
}

fn require_positive(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(format!("{field} must be a finite number")));
    }
    if value <= 0.0 {
        return Err(ValidationError::new(format!(
            "{field} must be a positive number, got {value}"
        )));
    }
    Ok(value)
}

fn validate_cadence(cadence: f64) -> Result<u32, ValidationError> {
    require_positive("cadence", cadence)?;
    if cadence.fract() != 0.0 || cadence > f64::from(u32::MAX) {
        return Err(ValidationError::new(format!(
            "cadence must be a whole number of steps per minute, got {cadence}"
        )));
    }
    Ok(cadence as u32)
}

fn validate_elevation(elevation: f64) -> Result<f64, ValidationError> {
    if !elevation.is_finite() {
        return Err(ValidationError::new("elevation gain must be a finite number"));
    }
    if elevation < 0.0 {
        return Err(ValidationError::new(format!(
            "elevation gain cannot be negative, got {elevation}"
        )));
    }
    Ok(elevation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_requires_cadence() {
        let err = validate(WorkoutKind::Running, 5.0, 25.0, None).unwrap_err();
        assert!(err.reason.contains("cadence"));
    }

    #[test]
    fn test_cycling_elevation_stays_absent() {
        let input = validate(WorkoutKind::Cycling, 27.0, 95.0, None).unwrap();
        assert_eq!(
            input.variant(),
            VariantInput::Cycling {
                elevation_gain: None
            }
        );
    }

    #[test]
    fn test_zero_elevation_is_kept() {
        let input = validate(WorkoutKind::Cycling, 27.0, 95.0, Some(0.0)).unwrap();
        assert_eq!(
            input.variant(),
            VariantInput::Cycling {
                elevation_gain: Some(0.0)
            }
        );
    }

    #[test]
    fn test_rejects_non_finite_and_non_positive() {
        assert!(validate(WorkoutKind::Running, f64::NAN, 25.0, Some(170.0)).is_err());
        assert!(validate(WorkoutKind::Running, 5.0, f64::INFINITY, Some(170.0)).is_err());
        assert!(validate(WorkoutKind::Running, 0.0, 25.0, Some(170.0)).is_err());
        assert!(validate(WorkoutKind::Running, 5.0, -1.0, Some(170.0)).is_err());
        assert!(validate(WorkoutKind::Running, 5.0, 25.0, Some(0.0)).is_err());
        assert!(validate(WorkoutKind::Cycling, 5.0, 25.0, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_fractional_cadence_rejected() {
        assert!(validate(WorkoutKind::Running, 5.0, 25.0, Some(170.5)).is_err());
    }

    #[test]
    fn test_coordinates_range() {
        assert!(validate_coordinates(Coordinates::new(39.0, -12.0)).is_ok());
        assert!(validate_coordinates(Coordinates::new(91.0, 0.0)).is_err());
        assert!(validate_coordinates(Coordinates::new(0.0, -180.5)).is_err());
        assert!(validate_coordinates(Coordinates::new(f64::NAN, 0.0)).is_err());
    }
}
