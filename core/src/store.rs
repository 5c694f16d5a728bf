// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::{Event, EventDraft, EventPatch};

/// Holds the canonical list of events.
#[async_trait]
pub trait EventStore {
    /// All events, in insertion order.
    async fn list(&self) -> Result<Vec<Event>, StoreError>;

    /// The event with the given id, if any.
    async fn get(&self, id: &str) -> Result<Option<Event>, StoreError>;

    /// Creates an event and assigns its id.
    async fn add(&self, draft: EventDraft) -> Result<Event, StoreError>;

    /// Updates an existing event. Unknown ids are reported as [`StoreError::NotFound`].
    async fn update(&self, id: &str, patch: EventPatch) -> Result<Event, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("event not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupted event record {id}: {reason}")]
    Corrupted { id: String, reason: String },
}
