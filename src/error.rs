// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the workout engine and its storage layer.

use std::path::PathBuf;

use crate::models::WorkoutId;

/// Application error type returned by every core operation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Workout not found: {0}")]
    NotFound(WorkoutId),

    #[error("Duplicate workout id: {0}")]
    DuplicateId(WorkoutId),

    #[error("No workout location selected; activate the map first")]
    NoPendingSite,

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl AppError {
    /// Whether the error stems from user input and should be shown to the user.
    ///
    /// Everything else is a fault in the caller (an id the UI never rendered)
    /// or in the storage layer.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NoPendingSite)
    }
}

/// Rejected numeric or coordinate input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub reason: String,
}

impl ValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors from the durable key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage unavailable")]
    Unavailable,

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors from saving or strictly loading the persisted collection.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Malformed workout payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid stored workout {id}: {reason}")]
    InvalidRecord { id: WorkoutId, reason: String },

    #[error("Duplicate stored workout id: {0}")]
    DuplicateId(WorkoutId),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, AppError>;
