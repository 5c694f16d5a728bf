// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use tokio::fs;

use crate::dashboard::{self, DashboardFilter, DashboardRow};
use crate::localdb::LocalDb;
use crate::store::{EventStore, StoreError};
use crate::wizard::{SubmitError, SubmitOutcome, Wizard};
use crate::{Config, Event};

/// EventHub application core.
#[derive(Debug, Clone)]
pub struct EventHub {
    config: Config,
    db: LocalDb,
}

impl EventHub {
    /// Creates a new EventHub instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        prepare(&config).await?;

        let db = LocalDb::open(config.db_path().as_deref())
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        Ok(Self { config, db })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The event store.
    pub fn store(&self) -> &LocalDb {
        &self.db
    }

    /// Get an event by its id.
    pub async fn get_event(&self, id: &str) -> Result<Event, Box<dyn Error>> {
        tracing::debug!(id, "getting event");
        match self.db.get(id).await? {
            Some(event) => Ok(event),
            None => Err(StoreError::NotFound(id.to_owned()).into()),
        }
    }

    /// Get an event by its id or by an unambiguous prefix of it, such as the
    /// short id shown on the dashboard.
    pub async fn find_event(&self, id_or_prefix: &str) -> Result<Event, Box<dyn Error>> {
        if let Some(event) = self.db.get(id_or_prefix).await? {
            return Ok(event);
        }

        let not_found = || -> Box<dyn Error> { StoreError::NotFound(id_or_prefix.to_owned()).into() };
        if id_or_prefix.is_empty() {
            return Err(not_found());
        }

        let events = self.db.list().await?;
        let mut found = events
            .into_iter()
            .filter(|e| e.id.starts_with(id_or_prefix));
        match (found.next(), found.next()) {
            (Some(event), None) => Ok(event),
            (Some(_), Some(_)) => Err(format!("Ambiguous event id: {id_or_prefix}").into()),
            (None, _) => Err(not_found()),
        }
    }

    /// A wizard that edits the event with the given id or id prefix.
    pub async fn edit_wizard(&self, id_or_prefix: &str) -> Result<Wizard, Box<dyn Error>> {
        let event = self.find_event(id_or_prefix).await?;
        tracing::debug!(id = event.id, "editing event");
        Ok(Wizard::edit(&event))
    }

    /// Submits the wizard to the event store.
    pub async fn submit(
        &self,
        wizard: &mut Wizard,
        is_draft: bool,
    ) -> Result<SubmitOutcome, SubmitError> {
        wizard
            .submit(&self.db, is_draft, &self.config.fallback_image)
            .await
    }

    /// All dashboard rows: the showcase rows, if enabled, then the stored events.
    pub async fn dashboard_rows(&self) -> Result<Vec<DashboardRow>, StoreError> {
        let mut rows = match self.config.show_seed_events {
            true => DashboardRow::seed(),
            false => Vec::new(),
        };
        let events = self.db.list().await?;
        tracing::debug!(count = events.len(), "listing stored events");
        rows.extend(
            events
                .iter()
                .map(|e| DashboardRow::from_event(e, &self.config.organizer)),
        );
        Ok(rows)
    }

    /// Dashboard rows matching the filter.
    pub async fn dashboard(&self, filter: &DashboardFilter) -> Result<Vec<DashboardRow>, StoreError> {
        let rows = self.dashboard_rows().await?;
        Ok(dashboard::list(&rows, filter).into_iter().cloned().collect())
    }

    /// Close the EventHub instance, saving any changes to the database.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.db.close().await
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = &config.state_dir {
        tracing::debug!(path = %parent.display(), "ensuring state directory exists");
        fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create state directory: {e}"))?;
    }
    Ok(())
}
