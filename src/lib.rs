// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout-Tracker: log runs and rides on a map, edit them, sort them, keep them.
//!
//! This crate provides the workout record engine: the record model, the
//! ordered collection of workouts, the edit-session state machine and the
//! persistence round-trip. Rendering is left to an external adapter which
//! receives plain view-models.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod time_utils;

pub use error::{AppError, Result};
pub use services::WorkoutTracker;
