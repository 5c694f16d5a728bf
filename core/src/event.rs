// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use jiff::civil::DateTime;

use crate::MainCategory;

/// Placeholder shown for a missing venue or city.
pub const LOCATION_TBD: &str = "TBD";

/// An event held by the event store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The unique identifier, assigned by the store on creation.
    pub id: String,

    /// The title of the event.
    pub title: String,

    /// The main category.
    pub category: MainCategory,

    /// The subcategory, one of `category.subcategories()`.
    pub subcategory: String,

    /// Free form description.
    pub description: String,

    /// Whether the event happens once or repeats.
    pub kind: EventKind,

    /// When the event starts, if scheduled.
    pub starts_at: Option<DateTime>,

    /// When the event ends, if scheduled.
    pub ends_at: Option<DateTime>,

    /// Where the event takes place.
    pub location: Location,

    /// Full postal address of the venue.
    pub address: String,

    /// Contact number of the venue.
    pub contact: String,

    /// Contact email of the venue.
    pub email: String,

    /// Cover image, a data URI or a fallback asset reference.
    pub image: String,

    /// Gallery images as data URIs.
    pub gallery: Vec<String>,

    /// The starting price.
    pub price: Price,

    /// Whether the event is a draft or published.
    pub status: EventStatus,

    /// Performing artists, in display order.
    pub artists: Vec<Artist>,

    /// Terms and conditions shown to attendees.
    pub terms: String,

    /// Private notes for the organizer.
    pub notes: String,
}

/// Draft for an event, used for creating new events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub category: MainCategory,
    pub subcategory: String,
    pub description: String,
    pub kind: EventKind,
    pub starts_at: Option<DateTime>,
    pub ends_at: Option<DateTime>,
    pub location: Location,
    pub address: String,
    pub contact: String,
    pub email: String,
    pub image: String,
    pub gallery: Vec<String>,
    pub price: Price,
    pub status: EventStatus,
    pub artists: Vec<Artist>,
    pub terms: String,
    pub notes: String,
}

impl EventDraft {
    /// Turns the draft into an event with the given id.
    pub(crate) fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            category: self.category,
            subcategory: self.subcategory,
            description: self.description,
            kind: self.kind,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            location: self.location,
            address: self.address,
            contact: self.contact,
            email: self.email,
            image: self.image,
            gallery: self.gallery,
            price: self.price,
            status: self.status,
            artists: self.artists,
            terms: self.terms,
            notes: self.notes,
        }
    }
}

/// Patch for an event, allowing partial updates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub category: Option<MainCategory>,
    pub subcategory: Option<String>,
    pub description: Option<String>,
    pub kind: Option<EventKind>,
    pub starts_at: Option<Option<DateTime>>,
    pub ends_at: Option<Option<DateTime>>,
    pub location: Option<Location>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub price: Option<Price>,
    pub status: Option<EventStatus>,
    pub artists: Option<Vec<Artist>>,
    pub terms: Option<String>,
    pub notes: Option<String>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    /// Applies the patch to an event, modifying it in place.
    pub(crate) fn apply_to<'a>(self, e: &'a mut Event) -> &'a mut Event {
        macro_rules! apply {
            ($patch:ident, $event:ident, $($field:ident),*) => {
                $(
                    if let Some(v) = $patch.$field {
                        $event.$field = v;
                    }
                )*
            };
        }

        let patch = self;
        apply!(
            patch,
            e,
            title,
            category,
            subcategory,
            description,
            kind,
            starts_at,
            ends_at,
            location,
            address,
            contact,
            email,
            image,
            gallery,
            price,
            status,
            artists,
            terms,
            notes
        );
        e
    }
}

impl From<EventDraft> for EventPatch {
    fn from(draft: EventDraft) -> Self {
        Self {
            title: Some(draft.title),
            category: Some(draft.category),
            subcategory: Some(draft.subcategory),
            description: Some(draft.description),
            kind: Some(draft.kind),
            starts_at: Some(draft.starts_at),
            ends_at: Some(draft.ends_at),
            location: Some(draft.location),
            address: Some(draft.address),
            contact: Some(draft.contact),
            email: Some(draft.email),
            image: Some(draft.image),
            gallery: Some(draft.gallery),
            price: Some(draft.price),
            status: Some(draft.status),
            artists: Some(draft.artists),
            terms: Some(draft.terms),
            notes: Some(draft.notes),
        }
    }
}

/// The status of an event, which can be a draft or published.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Saved but not visible to attendees.
    #[default]
    Draft,

    /// Visible and bookable.
    Published,
}

const STATUS_DRAFT: &str = "draft";
const STATUS_PUBLISHED: &str = "published";

impl AsRef<str> for EventStatus {
    fn as_ref(&self) -> &str {
        match self {
            EventStatus::Draft => STATUS_DRAFT,
            EventStatus::Published => STATUS_PUBLISHED,
        }
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EventStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_DRAFT => Ok(EventStatus::Draft),
            STATUS_PUBLISHED => Ok(EventStatus::Published),
            _ => Err(()),
        }
    }
}

/// Whether an event happens once or repeats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    #[default]
    OneTime,
    Recurring,
}

const KIND_ONE_TIME: &str = "one-time";
const KIND_RECURRING: &str = "recurring";

impl AsRef<str> for EventKind {
    fn as_ref(&self) -> &str {
        match self {
            EventKind::OneTime => KIND_ONE_TIME,
            EventKind::Recurring => KIND_RECURRING,
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EventKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            KIND_ONE_TIME => Ok(EventKind::OneTime),
            KIND_RECURRING => Ok(EventKind::Recurring),
            _ => Err(()),
        }
    }
}

/// Where an event takes place.
///
/// The fields are stored separately; the `"<venue>, <city>[, <state>]"` form
/// is only a view produced by [`Display`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Location {
    pub venue: String,
    pub city: String,
    pub state: String,
}

impl Location {
    pub fn new(venue: impl Into<String>, city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            city: city.into(),
            state: state.into(),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let or_tbd = |s: &str| if s.is_empty() { LOCATION_TBD } else { s }.to_owned();
        write!(f, "{}, {}", or_tbd(&self.venue), or_tbd(&self.city))?;
        if !self.state.is_empty() {
            write!(f, ", {}", self.state)?;
        }
        Ok(())
    }
}

/// Parses the display form back into its parts by splitting on `", "`.
///
/// This is positional and lossy: a part that itself contains `", "` shifts
/// every following part, and anything after the third segment is dropped.
impl FromStr for Location {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.split(", ");
        let mut next = || parts.next().unwrap_or_default().to_owned();
        Ok(Self {
            venue: next(),
            city: next(),
            state: next(),
        })
    }
}

/// The starting price of an event, in rupees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    #[default]
    Free,
    From(u64),
}

impl Price {
    /// The largest amount the store can hold.
    pub const MAX_AMOUNT: u64 = i64::MAX as u64;

    /// Interprets the price typed into the wizard.
    ///
    /// Empty input means free. Otherwise the input is a whole rupee amount,
    /// optionally prefixed by `₹` and grouped with commas such as `1,499`.
    /// Returns `None` for anything else, including amounts above
    /// [`Price::MAX_AMOUNT`].
    pub fn from_input(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Some(Price::Free);
        }

        let amount = input.strip_prefix('₹').unwrap_or(input).trim_start();
        let well_formed = amount
            .split(',')
            .all(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_digit()));
        if !well_formed {
            return None;
        }

        let digits: String = amount.chars().filter(|c| *c != ',').collect();
        match digits.parse::<u64>() {
            Ok(a) if a <= Self::MAX_AMOUNT => Some(Price::From(a)),
            _ => None,
        }
    }

    /// The amount in rupees, `None` for free events.
    pub fn amount(&self) -> Option<u64> {
        match self {
            Price::Free => None,
            Price::From(a) => Some(*a),
        }
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Free => write!(f, "Free"),
            Price::From(amount) => write!(f, "From ₹{amount}"),
        }
    }
}

impl FromStr for Price {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Free" => Ok(Price::Free),
            v => v
                .strip_prefix("From ")
                .and_then(Price::from_input)
                .filter(|p| *p != Price::Free)
                .ok_or(()),
        }
    }
}

/// A performing artist.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Artist {
    pub name: String,

    /// Photo as a data URI, empty when not provided.
    #[serde(default)]
    pub photo: String,

    /// Instagram handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,

    /// Spotify profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<String>,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether the artist row was left without a name.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}
