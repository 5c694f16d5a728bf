// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::DateTime;
use sqlx::SqlitePool;

use crate::store::StoreError;
use crate::{Artist, Event, EventStatus, Location, Price};

/// Format of date-times in the database, sortable as text.
const STABLE_FORMAT_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone)]
pub struct Events {
    pool: SqlitePool,
}

impl Events {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, event: &EventRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO events (
    id, title, category, subcategory, description, kind, starts_at, ends_at,
    venue, city, state, address, contact, email, image, gallery, price, status,
    artists, terms, notes
)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&event.id)
            .bind(&event.title)
            .bind(&event.category)
            .bind(&event.subcategory)
            .bind(&event.description)
            .bind(&event.kind)
            .bind(&event.starts_at)
            .bind(&event.ends_at)
            .bind(&event.venue)
            .bind(&event.city)
            .bind(&event.state)
            .bind(&event.address)
            .bind(&event.contact)
            .bind(&event.email)
            .bind(&event.image)
            .bind(&event.gallery)
            .bind(event.price)
            .bind(&event.status)
            .bind(&event.artists)
            .bind(&event.terms)
            .bind(&event.notes)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Overwrites an existing row, returns `false` if no row has the id.
    pub async fn update(&self, event: &EventRecord) -> Result<bool, sqlx::Error> {
        const SQL: &str = "\
UPDATE events SET
    title       = ?,
    category    = ?,
    subcategory = ?,
    description = ?,
    kind        = ?,
    starts_at   = ?,
    ends_at     = ?,
    venue       = ?,
    city        = ?,
    state       = ?,
    address     = ?,
    contact     = ?,
    email       = ?,
    image       = ?,
    gallery     = ?,
    price       = ?,
    status      = ?,
    artists     = ?,
    terms       = ?,
    notes       = ?
WHERE id = ?;
";

        let result = sqlx::query(SQL)
            .bind(&event.title)
            .bind(&event.category)
            .bind(&event.subcategory)
            .bind(&event.description)
            .bind(&event.kind)
            .bind(&event.starts_at)
            .bind(&event.ends_at)
            .bind(&event.venue)
            .bind(&event.city)
            .bind(&event.state)
            .bind(&event.address)
            .bind(&event.contact)
            .bind(&event.email)
            .bind(&event.image)
            .bind(&event.gallery)
            .bind(event.price)
            .bind(&event.status)
            .bind(&event.artists)
            .bind(&event.terms)
            .bind(&event.notes)
            .bind(&event.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, id: &str) -> Result<Option<EventRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, title, category, subcategory, description, kind, starts_at, ends_at,
       venue, city, state, address, contact, email, image, gallery, price, status,
       artists, terms, notes
FROM events
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(&self) -> Result<Vec<EventRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, title, category, subcategory, description, kind, starts_at, ends_at,
       venue, city, state, address, contact, email, image, gallery, price, status,
       artists, terms, notes
FROM events
ORDER BY seq ASC;
";

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }
}

/// One row of the `events` table.
#[derive(Debug, sqlx::FromRow)]
pub struct EventRecord {
    id: String,
    title: String,
    category: String,
    subcategory: String,
    description: String,
    kind: String,
    starts_at: String,
    ends_at: String,
    venue: String,
    city: String,
    state: String,
    address: String,
    contact: String,
    email: String,
    image: String,
    /// JSON array of data URIs.
    gallery: String,
    /// Amount in rupees, `NULL` for free events.
    price: Option<i64>,
    status: String,
    /// JSON array of artists.
    artists: String,
    terms: String,
    notes: String,
}

impl EventRecord {
    pub fn from_event(event: &Event) -> Result<Self, StoreError> {
        let corrupted = |reason: String| StoreError::Corrupted {
            id: event.id.clone(),
            reason,
        };

        let price = match event.price.amount() {
            Some(a) => Some(i64::try_from(a).map_err(|e| corrupted(e.to_string()))?),
            None => None,
        };

        Ok(Self {
            id: event.id.clone(),
            title: event.title.clone(),
            category: event.category.to_string(),
            subcategory: event.subcategory.clone(),
            description: event.description.clone(),
            kind: event.kind.to_string(),
            starts_at: event.starts_at.map(format_dt).unwrap_or_default(),
            ends_at: event.ends_at.map(format_dt).unwrap_or_default(),
            venue: event.location.venue.clone(),
            city: event.location.city.clone(),
            state: event.location.state.clone(),
            address: event.address.clone(),
            contact: event.contact.clone(),
            email: event.email.clone(),
            image: event.image.clone(),
            gallery: serde_json::to_string(&event.gallery).map_err(|e| corrupted(e.to_string()))?,
            price,
            status: event.status.to_string(),
            artists: serde_json::to_string(&event.artists).map_err(|e| corrupted(e.to_string()))?,
            terms: event.terms.clone(),
            notes: event.notes.clone(),
        })
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = StoreError;

    fn try_from(r: EventRecord) -> Result<Self, Self::Error> {
        let id = r.id.clone();
        let corrupted = |reason: String| StoreError::Corrupted {
            id: id.clone(),
            reason,
        };

        let category = r
            .category
            .parse()
            .map_err(|()| corrupted(format!("unknown category {:?}", r.category)))?;
        let kind = r
            .kind
            .parse()
            .map_err(|()| corrupted(format!("unknown event kind {:?}", r.kind)))?;
        let status: EventStatus = r
            .status
            .parse()
            .map_err(|()| corrupted(format!("unknown status {:?}", r.status)))?;
        let price = match r.price {
            Some(a) => Price::From(u64::try_from(a).map_err(|e| corrupted(e.to_string()))?),
            None => Price::Free,
        };
        let gallery: Vec<String> =
            serde_json::from_str(&r.gallery).map_err(|e| corrupted(e.to_string()))?;
        let artists: Vec<Artist> =
            serde_json::from_str(&r.artists).map_err(|e| corrupted(e.to_string()))?;

        Ok(Event {
            id: r.id,
            title: r.title,
            category,
            subcategory: r.subcategory,
            description: r.description,
            kind,
            starts_at: parse_dt(&r.starts_at),
            ends_at: parse_dt(&r.ends_at),
            location: Location {
                venue: r.venue,
                city: r.city,
                state: r.state,
            },
            address: r.address,
            contact: r.contact,
            email: r.email,
            image: r.image,
            gallery,
            price,
            status,
            artists,
            terms: r.terms,
            notes: r.notes,
        })
    }
}

fn format_dt(dt: DateTime) -> String {
    dt.strftime(STABLE_FORMAT_DATETIME).to_string()
}

fn parse_dt(s: &str) -> Option<DateTime> {
    match s {
        "" => None,
        s => DateTime::strptime(STABLE_FORMAT_DATETIME, s)
            .inspect_err(|e| tracing::warn!(value = s, "invalid stored date-time: {e}"))
            .ok(),
    }
}
