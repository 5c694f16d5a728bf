// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The event creation wizard.
//!
//! A [`Wizard`] walks through six [`Step`]s. Moving forward runs the checks of
//! the current step and stops at the first failing field, moving back never
//! validates. [`Wizard::submit`] turns the collected state into an event and
//! hands it to an [`EventStore`].

use std::sync::OnceLock;
use std::{fmt::Display, str::FromStr};

use futures::future::join_all;
use jiff::civil::{Date, DateTime, Time};
use regex::Regex;

use crate::image::{ImageSource, read_data_uri};
use crate::rows::{RowId, Rows};
use crate::store::{EventStore, StoreError};
use crate::ticket::{Ticket, TicketBuilder, TicketError};
use crate::{
    Artist, Event, EventDraft, EventKind, EventPatch, EventStatus, Location, MainCategory, Price,
};

const FORMAT_DATE: &str = "%Y-%m-%d";
const FORMAT_TIME: &str = "%H:%M";

/// Ticket price prefilled for new events.
pub const DEFAULT_TICKET_PRICE: &str = "49";

/// A page of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    EventDetails = 1,
    DateTime = 2,
    Tickets = 3,
    Venue = 4,
    Artists = 5,
    AdditionalInfo = 6,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::EventDetails,
        Step::DateTime,
        Step::Tickets,
        Step::Venue,
        Step::Artists,
        Step::AdditionalInfo,
    ];

    pub const FIRST: Step = Step::EventDetails;
    pub const LAST: Step = Step::AdditionalInfo;

    /// 1-based position of the step.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::EventDetails => "Event Details",
            Step::DateTime => "Date & Time",
            Step::Tickets => "Tickets",
            Step::Venue => "Venue & Location",
            Step::Artists => "Add Artist",
            Step::AdditionalInfo => "Additional Info",
        }
    }

    /// Completion in percent, the last step is 100.
    pub fn progress(self) -> u16 {
        u16::from(self.number()) * 100 / u16::from(Step::LAST.number())
    }

    /// The following step, saturating at the last one.
    pub fn next(self) -> Step {
        Step::try_from(self.number() + 1).unwrap_or(Step::LAST)
    }

    /// The preceding step, saturating at the first one.
    pub fn prev(self) -> Step {
        Step::try_from(self.number().saturating_sub(1)).unwrap_or(Step::FIRST)
    }
}

impl TryFrom<u8> for Step {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Step::ALL
            .into_iter()
            .find(|s| s.number() == value)
            .ok_or(())
    }
}

impl FromStr for Step {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse::<u8>().map_err(|_| ())?.try_into()
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), Step::LAST.number(), self.title())
    }
}

/// A required field that failed its check.
///
/// Messages are meant to be shown to the organizer as they are.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Event title is required")]
    TitleRequired,

    #[error("Main category is required")]
    CategoryRequired,

    #[error("Subcategory is required")]
    SubcategoryRequired,

    #[error("Cover image is required")]
    CoverImageRequired,

    #[error("Starting date is required")]
    StartDateRequired,

    #[error("Starting date must look like YYYY-MM-DD")]
    StartDateInvalid,

    #[error("Starting time is required")]
    StartTimeRequired,

    #[error("Starting time must look like HH:MM")]
    StartTimeInvalid,

    #[error("Ending date is required")]
    EndDateRequired,

    #[error("Ending date must look like YYYY-MM-DD")]
    EndDateInvalid,

    #[error("Ending time is required")]
    EndTimeRequired,

    #[error("Ending time must look like HH:MM")]
    EndTimeInvalid,

    #[error("Please add at least one ticket type")]
    TicketRequired,

    #[error("Starting price must be a whole amount in rupees, like 1,499")]
    TicketPriceInvalid,

    #[error("Venue name is required")]
    VenueRequired,

    #[error("City is required")]
    CityRequired,

    #[error("State is required")]
    StateRequired,

    #[error("Contact number is required")]
    ContactRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    EmailInvalid,

    /// The combined check run before submitting.
    #[error("Please fill in all required fields")]
    RequiredFieldsMissing,

    #[error("{subcategory:?} is not a {category} subcategory")]
    UnknownSubcategory {
        category: MainCategory,
        subcategory: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to save event: {0}")]
    Store(#[from] StoreError),
}

/// The result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The event as stored.
    pub event: Event,

    /// Whether the event was created, as opposed to updated.
    pub created: bool,
}

impl SubmitOutcome {
    /// Confirmation message for the organizer.
    pub fn message(&self) -> &'static str {
        match (self.created, self.event.status) {
            (false, _) => "Event updated successfully!",
            (true, EventStatus::Draft) => "Event saved as draft!",
            (true, EventStatus::Published) => "Event published successfully!",
        }
    }
}

/// Free text fields of the wizard, edited directly by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardFields {
    pub title: String,
    pub description: String,
    pub kind: EventKind,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub ticket_price: String,
    pub venue: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub contact: String,
    pub email: String,
    pub terms: String,
    pub notes: String,
}

impl Default for WizardFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            kind: EventKind::OneTime,
            start_date: String::new(),
            start_time: String::new(),
            end_date: String::new(),
            end_time: String::new(),
            ticket_price: DEFAULT_TICKET_PRICE.to_owned(),
            venue: String::new(),
            city: String::new(),
            state: String::new(),
            address: String::new(),
            contact: String::new(),
            email: String::new(),
            terms: String::new(),
            notes: String::new(),
        }
    }
}

/// One artist row of the wizard.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArtistEntry {
    pub artist: Artist,

    /// Photo chosen for the artist, not read until submit.
    pub photo: Option<ImageSource>,
}

/// State of one create or edit session.
#[derive(Debug, Clone)]
pub struct Wizard {
    editing: Option<String>,
    step: Step,
    pub fields: WizardFields,
    category: Option<MainCategory>,
    subcategory: Option<&'static str>,
    cover: Option<ImageSource>,
    tickets: Rows<Ticket>,
    artists: Rows<ArtistEntry>,
    gallery: Rows<ImageSource>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Starts a wizard for a new event.
    pub fn new() -> Self {
        let mut artists = Rows::new();
        artists.push(ArtistEntry::default());
        Self {
            editing: None,
            step: Step::FIRST,
            fields: WizardFields::default(),
            category: None,
            subcategory: None,
            cover: None,
            tickets: Rows::new(),
            artists,
            gallery: Rows::new(),
        }
    }

    /// Starts a wizard that edits an existing event.
    pub fn edit(event: &Event) -> Self {
        let mut wizard = Self::new();
        wizard.editing = Some(event.id.clone());

        wizard.fields = WizardFields {
            title: event.title.clone(),
            description: event.description.clone(),
            kind: event.kind,
            start_date: format_dt(event.starts_at, FORMAT_DATE),
            start_time: format_dt(event.starts_at, FORMAT_TIME),
            end_date: format_dt(event.ends_at, FORMAT_DATE),
            end_time: format_dt(event.ends_at, FORMAT_TIME),
            ticket_price: event.price.amount().map(|a| a.to_string()).unwrap_or_default(),
            venue: event.location.venue.clone(),
            city: event.location.city.clone(),
            state: event.location.state.clone(),
            address: event.address.clone(),
            contact: event.contact.clone(),
            email: event.email.clone(),
            terms: event.terms.clone(),
            notes: event.notes.clone(),
        };

        wizard.category = Some(event.category);
        wizard.subcategory = lookup_subcategory(event.category, &event.subcategory);
        if wizard.subcategory.is_none() {
            tracing::warn!(
                id = %event.id,
                subcategory = %event.subcategory,
                "stored subcategory does not belong to its category, dropped"
            );
        }

        if !event.image.is_empty() {
            wizard.cover = Some(ImageSource::Inline(event.image.clone()));
        }
        wizard.gallery = event
            .gallery
            .iter()
            .map(|a| ImageSource::Inline(a.clone()))
            .collect();
        if !event.artists.is_empty() {
            wizard.artists = event
                .artists
                .iter()
                .map(|artist| ArtistEntry {
                    photo: (!artist.photo.is_empty())
                        .then(|| ImageSource::Inline(artist.photo.clone())),
                    artist: artist.clone(),
                })
                .collect();
        }
        wizard
    }

    /// The id of the event being edited, `None` when creating.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Validates the current step and moves to the next one.
    ///
    /// On failure nothing changes and the first failing check is returned.
    pub fn advance(&mut self) -> Result<Step, ValidationError> {
        self.validate_step(self.step)?;
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Moves to the previous step without validating.
    pub fn retreat(&mut self) -> Step {
        self.step = self.step.prev();
        self.step
    }

    /// Runs the checks of a step, in field order.
    pub fn validate_step(&self, step: Step) -> Result<(), ValidationError> {
        use ValidationError::*;

        let f = &self.fields;
        match step {
            Step::EventDetails => {
                required(&f.title, TitleRequired)?;
                self.category.ok_or(CategoryRequired)?;
                self.subcategory.ok_or(SubcategoryRequired)?;
                self.cover.as_ref().ok_or(CoverImageRequired)?;
            }
            Step::DateTime => {
                check_date(&f.start_date, StartDateRequired, StartDateInvalid)?;
                check_time(&f.start_time, StartTimeRequired, StartTimeInvalid)?;
                check_date(&f.end_date, EndDateRequired, EndDateInvalid)?;
                check_time(&f.end_time, EndTimeRequired, EndTimeInvalid)?;
            }
            Step::Tickets => {
                if self.tickets.is_empty() {
                    return Err(TicketRequired);
                }
                self.price()?;
            }
            Step::Venue => {
                required(&f.venue, VenueRequired)?;
                required(&f.city, CityRequired)?;
                required(&f.state, StateRequired)?;
                required(&f.contact, ContactRequired)?;
                required(&f.email, EmailRequired)?;
                if !is_valid_email(&f.email) {
                    return Err(EmailInvalid);
                }
            }
            Step::Artists | Step::AdditionalInfo => {}
        }
        Ok(())
    }

    /// The reduced check run by [`Wizard::submit`].
    pub fn validate_submit(&self) -> Result<(), ValidationError> {
        match (self.fields.title.trim(), self.category, self.subcategory) {
            ("", _, _) | (_, None, _) | (_, _, None) => {
                Err(ValidationError::RequiredFieldsMissing)
            }
            _ => self.price().map(|_| ()),
        }
    }

    /// The starting price typed on the tickets step.
    pub fn price(&self) -> Result<Price, ValidationError> {
        Price::from_input(&self.fields.ticket_price).ok_or(ValidationError::TicketPriceInvalid)
    }

    pub fn category(&self) -> Option<MainCategory> {
        self.category
    }

    /// Selects the main category, a different category clears the subcategory.
    pub fn set_category(&mut self, category: Option<MainCategory>) {
        if self.category != category {
            self.subcategory = None;
        }
        self.category = category;
    }

    pub fn subcategory(&self) -> Option<&'static str> {
        self.subcategory
    }

    /// Selects a subcategory of the current main category.
    pub fn set_subcategory(&mut self, subcategory: &str) -> Result<(), ValidationError> {
        let category = self.category.ok_or(ValidationError::CategoryRequired)?;
        match lookup_subcategory(category, subcategory) {
            Some(a) => {
                self.subcategory = Some(a);
                Ok(())
            }
            None => Err(ValidationError::UnknownSubcategory {
                category,
                subcategory: subcategory.to_owned(),
            }),
        }
    }

    pub fn clear_subcategory(&mut self) {
        self.subcategory = None;
    }

    pub fn cover_image(&self) -> Option<&ImageSource> {
        self.cover.as_ref()
    }

    pub fn set_cover_image(&mut self, image: Option<ImageSource>) {
        self.cover = image;
    }

    pub fn tickets(&self) -> &Rows<Ticket> {
        &self.tickets
    }

    /// Builds the ticket and appends it to the ticket list.
    pub fn save_ticket(&mut self, builder: &TicketBuilder) -> Result<RowId, TicketError> {
        let ticket = builder.build()?;
        tracing::debug!(kind = %ticket.kind(), name = ticket.name(), "ticket saved");
        Ok(self.tickets.push(ticket))
    }

    pub fn remove_ticket(&mut self, id: RowId) -> Option<Ticket> {
        self.tickets.remove(id)
    }

    pub fn artists(&self) -> &Rows<ArtistEntry> {
        &self.artists
    }

    /// Appends a blank artist row.
    pub fn add_artist(&mut self) -> RowId {
        self.artists.push(ArtistEntry::default())
    }

    pub fn remove_artist(&mut self, id: RowId) -> Option<Artist> {
        self.artists.remove(id).map(|a| a.artist)
    }

    pub fn artist_mut(&mut self, id: RowId) -> Option<&mut Artist> {
        self.artists.get_mut(id).map(|a| &mut a.artist)
    }

    /// Sets the photo of an artist row, `false` if the row is gone.
    pub fn set_artist_photo(&mut self, id: RowId, photo: ImageSource) -> bool {
        match self.artists.get_mut(id) {
            Some(entry) => {
                entry.photo = Some(photo);
                true
            }
            None => false,
        }
    }

    pub fn clear_artist_photo(&mut self, id: RowId) -> Option<ImageSource> {
        self.artists.get_mut(id).and_then(|entry| entry.photo.take())
    }

    pub fn gallery(&self) -> &Rows<ImageSource> {
        &self.gallery
    }

    pub fn add_gallery_image(&mut self, image: ImageSource) -> RowId {
        self.gallery.push(image)
    }

    pub fn remove_gallery_image(&mut self, id: RowId) -> Option<ImageSource> {
        self.gallery.remove(id)
    }

    /// Reads every image that still points at a file.
    ///
    /// All reads run concurrently. A read that fails is logged and its slot is
    /// cleared: the cover becomes unset, artist photos become empty and gallery
    /// rows are removed.
    pub async fn resolve_images(&mut self) {
        let mut pending = Vec::new();
        if let Some(ImageSource::File(path)) = &self.cover {
            pending.push((ImageSlot::Cover, path.clone()));
        }
        for (id, entry) in self.artists.iter() {
            if let Some(ImageSource::File(path)) = &entry.photo {
                pending.push((ImageSlot::ArtistPhoto(id), path.clone()));
            }
        }
        for (id, image) in self.gallery.iter() {
            if let ImageSource::File(path) = image {
                pending.push((ImageSlot::Gallery(id), path.clone()));
            }
        }
        if pending.is_empty() {
            return;
        }

        tracing::debug!(count = pending.len(), "reading images");
        let reads = pending.into_iter().map(|(slot, path)| async move {
            let result = read_data_uri(&path).await;
            (slot, path, result)
        });
        for (slot, path, result) in join_all(reads).await {
            let image = match result {
                Ok(uri) => Some(ImageSource::Inline(uri)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "image skipped: {e}");
                    None
                }
            };
            self.complete_image(slot, image);
        }
    }

    /// Stores the outcome of an image read in its slot, dropping it if the
    /// row has been removed meanwhile.
    fn complete_image(&mut self, slot: ImageSlot, image: Option<ImageSource>) {
        match slot {
            ImageSlot::Cover => self.cover = image,
            ImageSlot::ArtistPhoto(id) => {
                if let Some(entry) = self.artists.get_mut(id) {
                    entry.photo = image;
                }
            }
            ImageSlot::Gallery(id) => match image {
                Some(image) => {
                    if let Some(slot) = self.gallery.get_mut(id) {
                        *slot = image;
                    }
                }
                None => {
                    self.gallery.remove(id);
                }
            },
        }
    }

    /// Saves the event, as a draft or published.
    ///
    /// Only title, category, subcategory and the starting price are checked
    /// here. Pending images are read first, the cover falls back to
    /// `fallback_image` when it is unset. After a successful create the wizard switches to editing the new
    /// event, so submitting again updates it.
    pub async fn submit<S>(
        &mut self,
        store: &S,
        is_draft: bool,
        fallback_image: &str,
    ) -> Result<SubmitOutcome, SubmitError>
    where
        S: EventStore + Sync + ?Sized,
    {
        self.validate_submit()?;
        self.resolve_images().await;

        let status = match is_draft {
            true => EventStatus::Draft,
            false => EventStatus::Published,
        };
        let draft = self.to_draft(status, fallback_image)?;

        let outcome = match &self.editing {
            Some(id) => {
                tracing::debug!(%id, %status, "updating event");
                let event = store.update(id, EventPatch::from(draft)).await?;
                SubmitOutcome {
                    event,
                    created: false,
                }
            }
            None => {
                tracing::debug!(%status, "creating event");
                let event = store.add(draft).await?;
                self.editing = Some(event.id.clone());
                SubmitOutcome {
                    event,
                    created: true,
                }
            }
        };
        Ok(outcome)
    }

    /// Composes the event record from the wizard state.
    pub fn to_draft(
        &self,
        status: EventStatus,
        fallback_image: &str,
    ) -> Result<EventDraft, ValidationError> {
        let (category, subcategory) = match (self.category, self.subcategory) {
            (Some(c), Some(s)) => (c, s),
            _ => return Err(ValidationError::RequiredFieldsMissing),
        };
        let price = self.price()?;

        let f = &self.fields;
        let starts_at = parse_datetime(&f.start_date, &f.start_time);
        let ends_at = parse_datetime(&f.end_date, &f.end_time);
        if let (Some(start), Some(end)) = (starts_at, ends_at)
            && end < start
        {
            tracing::warn!(%start, %end, "event ends before it starts");
        }

        let image = match self.cover.as_ref().and_then(ImageSource::as_inline) {
            Some(a) => a.to_owned(),
            None => fallback_image.to_owned(),
        };

        let artists = self
            .artists
            .values()
            .filter(|a| !a.artist.is_blank())
            .map(|a| Artist {
                photo: a
                    .photo
                    .as_ref()
                    .and_then(ImageSource::as_inline)
                    .unwrap_or_default()
                    .to_owned(),
                ..a.artist.clone()
            })
            .collect();

        Ok(EventDraft {
            title: f.title.clone(),
            category,
            subcategory: subcategory.to_owned(),
            description: f.description.clone(),
            kind: f.kind,
            starts_at,
            ends_at,
            location: Location::new(&f.venue, &f.city, &f.state),
            address: f.address.clone(),
            contact: f.contact.clone(),
            email: f.email.clone(),
            image,
            gallery: self
                .gallery
                .values()
                .filter_map(ImageSource::as_inline)
                .map(str::to_owned)
                .collect(),
            price,
            status,
            artists,
            terms: f.terms.clone(),
            notes: f.notes.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum ImageSlot {
    Cover,
    ArtistPhoto(RowId),
    Gallery(RowId),
}

fn lookup_subcategory(category: MainCategory, subcategory: &str) -> Option<&'static str> {
    category
        .subcategories()
        .iter()
        .find(|a| **a == subcategory)
        .copied()
}

fn required(value: &str, err: ValidationError) -> Result<(), ValidationError> {
    match value.trim() {
        "" => Err(err),
        _ => Ok(()),
    }
}

fn check_date(
    value: &str,
    missing: ValidationError,
    invalid: ValidationError,
) -> Result<(), ValidationError> {
    required(value, missing)?;
    parse_date(value).map(|_| ()).ok_or(invalid)
}

fn check_time(
    value: &str,
    missing: ValidationError,
    invalid: ValidationError,
) -> Result<(), ValidationError> {
    required(value, missing)?;
    parse_time(value).map(|_| ()).ok_or(invalid)
}

fn parse_date(value: &str) -> Option<Date> {
    Date::strptime(FORMAT_DATE, value.trim()).ok()
}

fn parse_time(value: &str) -> Option<Time> {
    Time::strptime(FORMAT_TIME, value.trim()).ok()
}

/// Combines date and time fields, a date without time starts at midnight.
fn parse_datetime(date: &str, time: &str) -> Option<DateTime> {
    let date = parse_date(date)?;
    let time = parse_time(time).unwrap_or(Time::midnight());
    Some(date.to_datetime(time))
}

fn format_dt(dt: Option<DateTime>, format: &str) -> String {
    dt.map(|dt| dt.strftime(format).to_string())
        .unwrap_or_default()
}

fn is_valid_email(s: &str) -> bool {
    const RE: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(RE).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(s))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::ticket::{TicketField, TicketKind};

    fn standard_ticket() -> TicketBuilder {
        TicketBuilder::new(TicketKind::Standard)
            .with(TicketField::Name, "Early Bird")
            .with(TicketField::Category, "General")
            .with(TicketField::EntryType, "Single Entry")
            .with(TicketField::Price, "499")
            .with(TicketField::Quantity, "100")
    }

    fn step_one_done() -> Wizard {
        let mut w = Wizard::new();
        w.fields.title = "Night Out".to_string();
        w.set_category(Some(MainCategory::Music));
        w.set_subcategory("Techno").unwrap();
        w.set_cover_image(Some(ImageSource::Inline("data:image/png;base64,YWJj".into())));
        w
    }

    fn at_step_four() -> Wizard {
        let mut w = step_one_done();
        w.fields.start_date = "2024-07-15".to_string();
        w.fields.start_time = "18:00".to_string();
        w.fields.end_date = "2024-07-15".to_string();
        w.fields.end_time = "23:30".to_string();
        w.save_ticket(&standard_ticket()).unwrap();
        assert_eq!(w.advance(), Ok(Step::DateTime));
        assert_eq!(w.advance(), Ok(Step::Tickets));
        assert_eq!(w.advance(), Ok(Step::Venue));
        w
    }

    fn fill_venue(w: &mut Wizard) {
        w.fields.venue = "Hall A".to_string();
        w.fields.city = "Pune".to_string();
        w.fields.state = "MH".to_string();
        w.fields.contact = "9999999999".to_string();
        w.fields.email = "hall@example.com".to_string();
    }

    #[test]
    fn new_wizard_defaults() {
        let w = Wizard::new();
        assert_eq!(w.step(), Step::EventDetails);
        assert_eq!(w.editing(), None);
        assert_eq!(w.fields.ticket_price, "49");
        assert_eq!(w.fields.kind, EventKind::OneTime);
        assert_eq!(w.artists().len(), 1);
        assert!(w.tickets().is_empty());
    }

    #[test]
    fn step_titles_and_progress() {
        assert_eq!(Step::Venue.title(), "Venue & Location");
        assert_eq!(Step::Venue.to_string(), "Step 4 of 6: Venue & Location");
        assert_eq!(Step::EventDetails.progress(), 16);
        assert_eq!(Step::AdditionalInfo.progress(), 100);
        assert_eq!("3".parse(), Ok(Step::Tickets));
        assert!("7".parse::<Step>().is_err());
    }

    #[test]
    fn step_one_reports_first_missing_field() {
        let mut w = Wizard::new();
        assert_eq!(w.advance(), Err(ValidationError::TitleRequired));

        w.fields.title = "   ".to_string();
        assert_eq!(w.advance(), Err(ValidationError::TitleRequired));

        w.fields.title = "Night Out".to_string();
        assert_eq!(w.advance(), Err(ValidationError::CategoryRequired));

        w.set_category(Some(MainCategory::Music));
        assert_eq!(w.advance(), Err(ValidationError::SubcategoryRequired));

        w.set_subcategory("Techno").unwrap();
        assert_eq!(w.advance(), Err(ValidationError::CoverImageRequired));
        assert_eq!(w.step(), Step::EventDetails);

        w.set_cover_image(Some(ImageSource::File("cover.png".into())));
        assert_eq!(w.advance(), Ok(Step::DateTime));
    }

    #[test]
    fn failed_advance_changes_nothing() {
        let mut w = step_one_done();
        w.advance().unwrap();
        w.fields.start_date = "2024-07-15".to_string();
        w.save_ticket(&standard_ticket()).unwrap();
        let before = w.clone();
        let err = w.advance().unwrap_err();
        assert_eq!(err.to_string(), "Starting time is required");
        assert_eq!(w.step(), before.step());
        assert_eq!(w.fields, before.fields);
        assert_eq!(w.category(), before.category());
        assert_eq!(w.subcategory(), before.subcategory());
        assert_eq!(w.cover_image(), before.cover_image());
        assert_eq!(w.tickets().len(), before.tickets().len());
        assert_eq!(w.artists().len(), before.artists().len());
        assert_eq!(w.gallery().len(), before.gallery().len());
    }

    #[test]
    fn step_two_checks_formats() {
        let mut w = step_one_done();
        w.advance().unwrap();

        w.fields.start_date = "15/07/2024".to_string();
        assert_eq!(w.advance(), Err(ValidationError::StartDateInvalid));

        w.fields.start_date = "2024-07-15".to_string();
        w.fields.start_time = "6pm".to_string();
        assert_eq!(w.advance(), Err(ValidationError::StartTimeInvalid));

        w.fields.start_time = "18:00".to_string();
        assert_eq!(w.advance(), Err(ValidationError::EndDateRequired));

        w.fields.end_date = "2024-07-15".to_string();
        assert_eq!(w.advance(), Err(ValidationError::EndTimeRequired));

        w.fields.end_time = "25:00".to_string();
        assert_eq!(w.advance(), Err(ValidationError::EndTimeInvalid));
    }

    #[test]
    fn step_two_allows_end_before_start() {
        let mut w = step_one_done();
        w.advance().unwrap();
        w.fields.start_date = "2024-07-15".to_string();
        w.fields.start_time = "18:00".to_string();
        w.fields.end_date = "2024-07-14".to_string();
        w.fields.end_time = "10:00".to_string();
        assert_eq!(w.advance(), Ok(Step::Tickets));
    }

    #[test]
    fn step_three_requires_ticket() {
        let mut w = step_one_done();
        w.fields.start_date = "2024-07-15".to_string();
        w.fields.start_time = "18:00".to_string();
        w.fields.end_date = "2024-07-15".to_string();
        w.fields.end_time = "23:00".to_string();
        w.advance().unwrap();
        w.advance().unwrap();

        assert_eq!(w.advance(), Err(ValidationError::TicketRequired));
        assert_eq!(
            ValidationError::TicketRequired.to_string(),
            "Please add at least one ticket type"
        );

        let id = w.save_ticket(&standard_ticket()).unwrap();
        w.remove_ticket(id);
        assert_eq!(w.advance(), Err(ValidationError::TicketRequired));

        w.save_ticket(&standard_ticket()).unwrap();
        assert_eq!(w.advance(), Ok(Step::Venue));
    }

    #[test]
    fn step_three_rejects_malformed_price() {
        let mut w = at_step_four();
        w.retreat();

        for price in ["49.99", "abc", "99999999999999999999", "9223372036854775808"] {
            w.fields.ticket_price = price.to_string();
            assert_eq!(w.advance(), Err(ValidationError::TicketPriceInvalid), "{price}");
            assert_eq!(w.step(), Step::Tickets);
        }

        w.fields.ticket_price = "₹1,499".to_string();
        assert_eq!(w.advance(), Ok(Step::Venue));
        assert_eq!(w.price(), Ok(Price::From(1499)));
    }

    #[test]
    fn submit_check_rejects_malformed_price() {
        let mut w = step_one_done();
        w.fields.ticket_price = "49.99".to_string();
        assert_eq!(w.validate_submit(), Err(ValidationError::TicketPriceInvalid));
        assert_eq!(
            w.to_draft(EventStatus::Draft, "").unwrap_err(),
            ValidationError::TicketPriceInvalid
        );

        w.fields.ticket_price.clear();
        assert_eq!(w.validate_submit(), Ok(()));
    }

    #[test]
    fn invalid_ticket_is_not_saved() {
        let mut w = Wizard::new();
        let builder = TicketBuilder::new(TicketKind::Table).with(TicketField::Name, "VIP Table");
        assert!(w.save_ticket(&builder).is_err());
        assert!(w.tickets().is_empty());
    }

    #[test]
    fn step_four_field_order() {
        let mut w = at_step_four();
        assert_eq!(w.advance(), Err(ValidationError::VenueRequired));
        w.fields.venue = "Hall A".to_string();
        assert_eq!(w.advance(), Err(ValidationError::CityRequired));
        w.fields.city = "Pune".to_string();
        assert_eq!(w.advance(), Err(ValidationError::StateRequired));
        w.fields.state = "MH".to_string();
        assert_eq!(w.advance(), Err(ValidationError::ContactRequired));
        w.fields.contact = "9999999999".to_string();
        assert_eq!(w.advance(), Err(ValidationError::EmailRequired));
        assert_eq!(w.step(), Step::Venue);
    }

    #[test]
    fn step_four_checks_email() {
        let mut w = at_step_four();
        fill_venue(&mut w);
        for email in ["hall", "hall@example", "hall @example.com", "@example.com"] {
            w.fields.email = email.to_string();
            assert_eq!(w.advance(), Err(ValidationError::EmailInvalid), "{email}");
        }
        w.fields.email = "hall@example.com".to_string();
        assert_eq!(w.advance(), Ok(Step::Artists));
    }

    #[test]
    fn last_steps_have_no_checks_and_cap() {
        let mut w = at_step_four();
        fill_venue(&mut w);
        w.advance().unwrap();
        assert_eq!(w.advance(), Ok(Step::AdditionalInfo));
        assert_eq!(w.advance(), Ok(Step::AdditionalInfo));
    }

    #[test]
    fn retreat_never_validates_and_floors() {
        let mut w = at_step_four();
        w.fields.title.clear();
        assert_eq!(w.retreat(), Step::Tickets);
        assert_eq!(w.retreat(), Step::DateTime);
        assert_eq!(w.retreat(), Step::EventDetails);
        assert_eq!(w.retreat(), Step::EventDetails);
    }

    #[test]
    fn changing_category_clears_subcategory() {
        let mut w = step_one_done();
        w.set_category(Some(MainCategory::Music));
        assert_eq!(w.subcategory(), Some("Techno"));

        w.set_category(Some(MainCategory::Workshop));
        assert_eq!(w.subcategory(), None);
        assert_eq!(w.advance(), Err(ValidationError::SubcategoryRequired));
    }

    #[test]
    fn rejects_foreign_subcategory() {
        let mut w = Wizard::new();
        assert_eq!(
            w.set_subcategory("Yoga"),
            Err(ValidationError::CategoryRequired)
        );

        w.set_category(Some(MainCategory::Music));
        let err = w.set_subcategory("Yoga").unwrap_err();
        assert_eq!(err.to_string(), "\"Yoga\" is not a Music subcategory");
        assert_eq!(w.subcategory(), None);
    }

    #[test]
    fn submit_checks_only_required_fields() {
        let mut w = Wizard::new();
        w.fields.title = "Night Out".to_string();
        assert_eq!(
            w.validate_submit(),
            Err(ValidationError::RequiredFieldsMissing)
        );
        w.set_category(Some(MainCategory::Music));
        w.set_subcategory("Rock").unwrap();
        assert_eq!(w.validate_submit(), Ok(()));
    }

    #[test]
    fn draft_composes_display_fields() {
        let mut w = step_one_done();
        w.fields.venue = "Hall A".to_string();
        w.fields.city = "Pune".to_string();
        let first = w.artists().ids().next().unwrap();
        w.artist_mut(first).unwrap().name = "DJ Snake".to_string();
        w.add_artist(); // left blank

        let draft = w.to_draft(EventStatus::Draft, "fallback.jpg").unwrap();
        assert_eq!(draft.location.to_string(), "Hall A, Pune");
        assert_eq!(draft.price.to_string(), "From ₹49");
        assert_eq!(draft.image, "data:image/png;base64,YWJj");
        assert_eq!(draft.artists.len(), 1);
        assert_eq!(draft.artists[0].name, "DJ Snake");

        w.fields.ticket_price.clear();
        w.set_cover_image(None);
        let draft = w.to_draft(EventStatus::Published, "fallback.jpg").unwrap();
        assert_eq!(draft.price.to_string(), "Free");
        assert_eq!(draft.image, "fallback.jpg");
        assert_eq!(draft.location.to_string(), "Hall A, Pune");
    }

    #[test]
    fn draft_combines_schedule() {
        let mut w = step_one_done();
        w.fields.start_date = "2024-07-15".to_string();
        w.fields.start_time = "18:30".to_string();
        w.fields.end_date = "2024-07-16".to_string();

        let draft = w.to_draft(EventStatus::Draft, "").unwrap();
        assert_eq!(
            draft.starts_at,
            Some(jiff::civil::date(2024, 7, 15).at(18, 30, 0, 0))
        );
        assert_eq!(
            draft.ends_at,
            Some(jiff::civil::date(2024, 7, 16).at(0, 0, 0, 0))
        );
    }

    #[test]
    fn edit_backfills_fields() {
        let mut w = at_step_four();
        fill_venue(&mut w);
        let event = w
            .to_draft(EventStatus::Published, "fallback.jpg")
            .unwrap()
            .into_event("id-1".to_string());

        let edit = Wizard::edit(&event);
        assert_eq!(edit.editing(), Some("id-1"));
        assert_eq!(edit.step(), Step::EventDetails);
        assert_eq!(edit.fields.title, "Night Out");
        assert_eq!(edit.category(), Some(MainCategory::Music));
        assert_eq!(edit.subcategory(), Some("Techno"));
        assert_eq!(edit.fields.venue, "Hall A");
        assert_eq!(edit.fields.city, "Pune");
        assert_eq!(edit.fields.state, "MH");
        assert_eq!(edit.fields.start_date, "2024-07-15");
        assert_eq!(edit.fields.start_time, "18:00");
        assert_eq!(edit.fields.ticket_price, "49");
        assert_eq!(edit.artists().len(), 1, "a blank row when none stored");
        assert!(edit.cover_image().is_some());
    }

    #[test]
    fn edit_of_free_event_keeps_it_free() {
        let mut event = step_one_done()
            .to_draft(EventStatus::Draft, "")
            .unwrap()
            .into_event("id-1".to_string());
        event.price = Price::Free;

        let edit = Wizard::edit(&event);
        assert_eq!(edit.fields.ticket_price, "");
    }

    #[tokio::test]
    async fn unreadable_images_leave_slots_empty() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        std::fs::write(&good, b"abc").unwrap();

        let mut w = step_one_done();
        w.set_cover_image(Some(ImageSource::File(dir.path().join("missing.png"))));
        let artist = w.artists().ids().next().unwrap();
        w.set_artist_photo(artist, ImageSource::File(good.clone()));
        let kept = w.add_gallery_image(ImageSource::File(good));
        let dropped = w.add_gallery_image(ImageSource::File(dir.path().join("notes.txt")));

        w.resolve_images().await;

        assert_eq!(w.cover_image(), None);
        assert_eq!(
            w.artists().get(artist).unwrap().photo,
            Some(ImageSource::Inline("data:image/png;base64,YWJj".into()))
        );
        assert!(w.gallery().contains(kept));
        assert!(!w.gallery().contains(dropped));
    }

    #[test]
    fn completion_for_removed_row_is_dropped() {
        let mut w = Wizard::new();
        let id = w.add_gallery_image(ImageSource::File("a.png".into()));
        let other = w.add_gallery_image(ImageSource::File("b.png".into()));
        w.remove_gallery_image(id);

        w.complete_image(ImageSlot::Gallery(id), Some(ImageSource::Inline("x".into())));
        assert_eq!(w.gallery().len(), 1);
        assert_eq!(
            w.gallery().get(other),
            Some(&ImageSource::File("b.png".into()))
        );
    }

    #[test]
    fn artist_photo_follows_its_row() {
        let mut w = Wizard::new();
        let first = w.artists().ids().next().unwrap();
        let second = w.add_artist();

        assert!(w.set_artist_photo(second, ImageSource::File("b.png".into())));
        w.remove_artist(first);
        assert_eq!(
            w.clear_artist_photo(second),
            Some(ImageSource::File("b.png".into()))
        );
        assert_eq!(w.clear_artist_photo(second), None);
        assert!(!w.set_artist_photo(first, ImageSource::File("a.png".into())));
    }

    /// Store that records calls and can be told to fail.
    #[derive(Default)]
    struct RecordingStore {
        events: Mutex<Vec<Event>>,
        fail: bool,
    }

    #[async_trait]
    impl EventStore for RecordingStore {
        async fn list(&self) -> Result<Vec<Event>, StoreError> {
            Ok(self.events.lock().unwrap().clone())
        }

        async fn get(&self, id: &str) -> Result<Option<Event>, StoreError> {
            Ok(self.list().await?.into_iter().find(|e| e.id == id))
        }

        async fn add(&self, draft: EventDraft) -> Result<Event, StoreError> {
            if self.fail {
                return Err(StoreError::Corrupted {
                    id: String::new(),
                    reason: "disk full".to_string(),
                });
            }
            let mut events = self.events.lock().unwrap();
            let event = draft.into_event(format!("e{}", events.len() + 1));
            events.push(event.clone());
            Ok(event)
        }

        async fn update(&self, id: &str, patch: EventPatch) -> Result<Event, StoreError> {
            let mut events = self.events.lock().unwrap();
            let event = events
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
            patch.apply_to(event);
            Ok(event.clone())
        }
    }

    #[tokio::test]
    async fn submit_creates_then_updates() {
        let store = RecordingStore::default();
        let mut w = step_one_done();

        let outcome = w.submit(&store, true, "fallback.jpg").await.unwrap();
        assert!(outcome.created);
        assert_eq!(outcome.event.status, EventStatus::Draft);
        assert_eq!(outcome.message(), "Event saved as draft!");
        assert_eq!(w.editing(), Some(outcome.event.id.as_str()));

        let outcome = w.submit(&store, false, "fallback.jpg").await.unwrap();
        assert!(!outcome.created);
        assert_eq!(outcome.event.status, EventStatus::Published);
        assert_eq!(outcome.message(), "Event updated successfully!");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn submit_rejects_missing_fields() {
        let store = RecordingStore::default();
        let mut w = Wizard::new();
        let err = w.submit(&store, false, "").await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::RequiredFieldsMissing)
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_surfaces_store_failure() {
        let store = RecordingStore {
            fail: true,
            ..Default::default()
        };
        let mut w = step_one_done();
        let err = w.submit(&store, false, "").await.unwrap_err();
        assert!(matches!(err, SubmitError::Store(_)));
        assert_eq!(w.editing(), None);
    }

    #[tokio::test]
    async fn submit_edit_of_missing_event_is_not_found() {
        let store = RecordingStore::default();
        let event = step_one_done()
            .to_draft(EventStatus::Draft, "")
            .unwrap()
            .into_event("gone".to_string());
        let mut w = Wizard::edit(&event);

        let err = w.submit(&store, false, "").await.unwrap_err();
        assert!(matches!(err, SubmitError::Store(StoreError::NotFound(id)) if id == "gone"));
    }
}
