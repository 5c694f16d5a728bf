// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod events;


use std::error::Error;
use std::path::Path;
#[cfg(test)]
use std::sync::atomic::AtomicUsize;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use crate::localdb::events::{EventRecord, Events};
use crate::store::{EventStore, StoreError};
use crate::{Event, EventDraft, EventPatch};

/// Distinguishes shared-cache in-memory databases opened by tests.
#[cfg(test)]
pub(crate) static IN_MEMORY_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// SQLite backed event store.
#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,
    events: Events,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let (options, max_connections) = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            let options = SqliteConnectOptions::new()
                .filename(filename.to_str().ok_or("Invalid path encoding")?)
                .create_if_missing(true);
            (options, 4)
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            // every connection of an in-memory database sees its own data
            (SqliteConnectOptions::new().in_memory(true), 1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {e}"))?;

        let events = Events::new(pool.clone());
        Ok(LocalDb { pool, events })
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl EventStore for LocalDb {
    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        self.events
            .list()
            .await?
            .into_iter()
            .map(Event::try_from)
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, StoreError> {
        self.events.get(id).await?.map(Event::try_from).transpose()
    }

    async fn add(&self, draft: EventDraft) -> Result<Event, StoreError> {
        let id = Uuid::new_v4().to_string();
        tracing::debug!(%id, title = %draft.title, "adding event");
        let event = draft.into_event(id);
        self.events.insert(&EventRecord::from_event(&event)?).await?;
        Ok(event)
    }

    async fn update(&self, id: &str, patch: EventPatch) -> Result<Event, StoreError> {
        tracing::debug!(id, "updating event");
        let mut event = match self.get(id).await? {
            Some(event) => event,
            None => return Err(StoreError::NotFound(id.to_owned())),
        };

        patch.apply_to(&mut event);
        match self.events.update(&EventRecord::from_event(&event)?).await? {
            true => Ok(event),
            false => Err(StoreError::NotFound(id.to_owned())),
        }
    }
}
