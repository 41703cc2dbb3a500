// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable storage: key-value stores and the workout persistence gateway.

pub mod gateway;
pub mod kv;

pub use gateway::PersistenceGateway;
pub use kv::{FileStore, KeyValueStore, MemoryStore};

/// Storage slot names as constants.
pub mod keys {
    /// Slot holding the serialized workout collection.
    pub const WORKOUTS: &str = "workouts";
}
