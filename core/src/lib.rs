// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of EventHub: the event model, the creation wizard, the ticket builder,
//! the organizer dashboard and the SQLite event store.

mod category;
mod config;
mod dashboard;
mod event;
mod eventhub;
mod image;
mod localdb;
mod rows;
mod store;
mod ticket;
mod wizard;

pub use crate::category::MainCategory;
pub use crate::config::{APP_NAME, Config, DB_FILENAME};
pub use crate::dashboard::{
    CategoryFilter, DATE_COMING_SOON, DashboardFilter, DashboardRow, DashboardSummary,
    StatusFilter, list as filter_dashboard,
};
pub use crate::event::{
    Artist, Event, EventDraft, EventKind, EventPatch, EventStatus, LOCATION_TBD, Location, Price,
};
pub use crate::eventhub::EventHub;
pub use crate::image::{ImageError, ImageSource, read_data_uri};
pub use crate::localdb::LocalDb;
pub use crate::rows::{RowId, Rows};
pub use crate::store::{EventStore, StoreError};
pub use crate::ticket::{Ticket, TicketBuilder, TicketError, TicketField, TicketInfo, TicketKind};
pub use crate::wizard::{
    ArtistEntry, DEFAULT_TICKET_PRICE, Step, SubmitError, SubmitOutcome, ValidationError, Wizard,
    WizardFields,
};
