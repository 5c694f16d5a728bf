// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use eventhub_core::{EventKind, MainCategory, RowId, Step, TicketBuilder, TicketKind};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph};

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Form, Input, RadioGroup};
use crate::tui::component_form_util::{
    Button, Choices, Picker, RowList, RowsAccess, Trigger, VisibleIf, VisiblePredicate,
};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::ticket_editor::{TicketDialog, new_ticket_dialog};
use crate::tui::wizard_store::{ArtistField, TextField, WizardStore};

pub fn new_wizard_editor(title: &str) -> SinglePage<WizardStore, WizardEditor> {
    SinglePage::new(title, instructions(), WizardEditor::new())
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " Field ".into(),
        "<Up/Down>".blue().bold(),
        " Next ".into(),
        "<PgDn>".blue().bold(),
        " Back ".into(),
        "<PgUp>".blue().bold(),
        " Draft ".into(),
        "<C-d>".blue().bold(),
        " Publish ".into(),
        "<C-s>".blue().bold(),
        " Exit ".into(),
        "<Esc> ".blue().bold(),
    ])
}

/// The six step forms, the progress header and the ticket dialog.
pub struct WizardEditor {
    forms: Vec<Form<WizardStore>>,
    current: Step,
    dialog: Option<(TicketKind, TicketDialog)>,
}

impl WizardEditor {
    pub fn new() -> Self {
        Self {
            forms: Step::ALL.into_iter().map(new_step_form).collect(),
            current: Step::FIRST,
            dialog: None,
        }
    }

    fn form_index(step: Step) -> usize {
        usize::from(step.number() - 1)
    }

    fn split(area: Rect) -> [Rect; 4] {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area)
    }

    /// Follows the store: switches the active form when the step moved, opens
    /// or drops the ticket dialog.
    fn sync(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<WizardStore>) {
        let (step, ticket) = {
            let store = store.borrow();
            let ticket = store.ticket.as_ref().map(TicketBuilder::kind);
            (store.wizard.step(), ticket)
        };

        if step != self.current {
            self.forms[Self::form_index(self.current)].deactivate(dispatcher, store);
            self.current = step;
            self.forms[Self::form_index(step)].activate(dispatcher, store);
        }

        match ticket {
            Some(kind) if self.dialog.as_ref().is_none_or(|(k, _)| *k != kind) => {
                let mut dialog = new_ticket_dialog(kind);
                dialog.activate(dispatcher, store);
                self.dialog = Some((kind, dialog));
            }
            Some(_) => {}
            None => self.dialog = None,
        }
    }

    fn handle_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<WizardStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if let Some((_, dialog)) = &mut self.dialog {
            if let Some(msg) = dialog.on_key(dispatcher, store, area, event) {
                return Some(msg);
            }

            match event.code {
                KeyCode::Enter => dispatcher.dispatch(Action::SaveTicket),
                KeyCode::Esc => dispatcher.dispatch(Action::CancelTicket),
                _ => {}
            }
            // the dialog is modal
            return Some(Message::Handled);
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let action = match event.code {
            KeyCode::PageDown => Some(Action::NextStep),
            KeyCode::Char('n') if ctrl => Some(Action::NextStep),
            KeyCode::PageUp => Some(Action::PrevStep),
            KeyCode::Char('p') if ctrl => Some(Action::PrevStep),
            KeyCode::Char('s' | 'd') if ctrl && self.current != Step::LAST => {
                return Some(Message::Handled);
            }
            KeyCode::Char('s') if ctrl => Some(Action::Submit { is_draft: false }),
            KeyCode::Char('d') if ctrl => Some(Action::Submit { is_draft: true }),
            _ => None,
        };
        if let Some(action) = action {
            dispatcher.dispatch(action);
            return Some(Message::Handled);
        }

        let [_, _, body, _] = Self::split(area);
        self.forms[Self::form_index(self.current)].on_key(dispatcher, store, body, event)
    }
}

impl Component<WizardStore> for WizardEditor {
    fn render(&self, store: &RefCell<WizardStore>, area: Rect, buf: &mut Buffer) {
        let [header, progress, body, footer] = Self::split(area);
        let (step, toast, ticket_open) = {
            let store = store.borrow();
            (store.wizard.step(), store.toast.clone(), store.ticket.is_some())
        };

        Paragraph::new(Line::from(vec![
            format!(" Step {} of {}  ", step.number(), Step::LAST.number()).dark_gray(),
            step.title().bold(),
        ]))
        .render(header, buf);

        Gauge::default()
            .gauge_style(Style::new().blue().on_black())
            .percent(step.progress())
            .label(format!("{}%", step.progress()))
            .render(progress, buf);

        self.forms[Self::form_index(step)].render(store, body, buf);

        if let Some(toast) = toast {
            let line = match toast.is_error {
                true => format!(" ✗ {}", toast.message).red(),
                false => format!(" ✓ {}", toast.message).green(),
            };
            Paragraph::new(line).render(footer, buf);
        }

        if ticket_open && let Some((_, dialog)) = &self.dialog {
            dialog.render(store, area, buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<WizardStore>, area: Rect) -> Option<(u16, u16)> {
        let ticket_open = store.borrow().ticket.is_some();
        if ticket_open && let Some((_, dialog)) = &self.dialog {
            return dialog.get_cursor_position(store, area);
        }

        let [_, _, body, _] = Self::split(area);
        self.forms[Self::form_index(self.current)].get_cursor_position(store, body)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<WizardStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.sync(dispatcher, store);
        let msg = self.handle_key(dispatcher, store, area, event);
        self.sync(dispatcher, store);
        msg
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<WizardStore>) {
        self.current = store.borrow().wizard.step();
        self.forms[Self::form_index(self.current)].activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<WizardStore>) {
        self.forms[Self::form_index(self.current)].deactivate(dispatcher, store);
    }
}

fn new_step_form(step: Step) -> Form<WizardStore> {
    match step {
        Step::EventDetails => Form::new(vec![
            Box::new(new_title()),
            Box::new(new_description()),
            Box::new(new_kind()),
            Box::new(new_category()),
            Box::new(VisibleIf::<_, _, HasCategory>::new(new_subcategory())),
            Box::new(Input::<_, CoverAccess>::new("Cover image")),
        ]),
        Step::DateTime => Form::new(vec![
            Box::new(new_start_date()),
            Box::new(new_start_time()),
            Box::new(new_end_date()),
            Box::new(new_end_time()),
        ]),
        Step::Tickets => Form::new(vec![
            Box::new(new_ticket_price()),
            Box::new(new_ticket_kind()),
            Box::new(Button::<_, OpenTicketTrigger>::new("Ticket types", "Add ticket")),
            Box::new(RowList::<_, TicketRows>::new("Tickets", "No tickets yet")),
        ]),
        Step::Venue => Form::new(vec![
            Box::new(new_venue()),
            Box::new(new_city()),
            Box::new(new_state()),
            Box::new(new_address()),
            Box::new(new_contact()),
            Box::new(new_email()),
        ]),
        Step::Artists => Form::new(vec![
            Box::new(RowList::<_, ArtistRows>::new("Artists", "No artists")),
            Box::new(Button::<_, AddArtistTrigger>::new("Line-up", "Add artist")),
            Box::new(VisibleIf::<_, _, HasArtist>::new(new_artist_name())),
            Box::new(VisibleIf::<_, _, HasArtist>::new(new_artist_photo())),
            Box::new(VisibleIf::<_, _, HasArtist>::new(new_artist_instagram())),
            Box::new(VisibleIf::<_, _, HasArtist>::new(new_artist_spotify())),
        ]),
        Step::AdditionalInfo => Form::new(vec![
            Box::new(new_terms()),
            Box::new(new_notes()),
            Box::new(Input::<_, GalleryPathAccess>::new("Gallery")),
            Box::new(Button::<_, AddGalleryTrigger>::new("", "Add to gallery")),
            Box::new(RowList::<_, GalleryRows>::new("Gallery images", "No images")),
            Box::new(Button::<_, DraftTrigger>::new("Finish", "Save as draft")),
            Box::new(Button::<_, PublishTrigger>::new("", "Publish event")),
        ]),
    }
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident, $placeholder: expr) => {
        fn $fn() -> Input<WizardStore, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl Access<WizardStore, String> for $acc {
            fn get(store: &RefCell<WizardStore>) -> String {
                store.borrow().text(TextField::$field).to_owned()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::UpdateText(TextField::$field, value));
                true
            }

            fn placeholder(_store: &RefCell<WizardStore>) -> Option<String> {
                $placeholder.map(str::to_owned)
            }
        }
    };
}

new_input!(new_title, "Event title", TitleAccess, Title, Some("Give your event a name"));
new_input!(new_description, "Description", DescriptionAccess, Description, None);
new_input!(new_start_date, "Starting date", StartDateAccess, StartDate, Some("YYYY-MM-DD"));
new_input!(new_start_time, "Starting time", StartTimeAccess, StartTime, Some("HH:MM"));
new_input!(new_end_date, "Ending date", EndDateAccess, EndDate, Some("YYYY-MM-DD"));
new_input!(new_end_time, "Ending time", EndTimeAccess, EndTime, Some("HH:MM"));
new_input!(
    new_ticket_price,
    "Starting price (₹)",
    TicketPriceAccess,
    TicketPrice,
    Some("Leave empty for a free event")
);
new_input!(new_venue, "Venue", VenueAccess, Venue, None);
new_input!(new_city, "City", CityAccess, City, None);
new_input!(new_state, "State", StateAccess, State, None);
new_input!(new_address, "Address", AddressAccess, Address, Some("Optional"));
new_input!(new_contact, "Contact number", ContactAccess, Contact, None);
new_input!(new_email, "Email", EmailAccess, Email, Some("name@example.com"));
new_input!(new_terms, "Terms & conditions", TermsAccess, Terms, Some("Optional"));
new_input!(new_notes, "Notes", NotesAccess, Notes, Some("Optional"));

macro_rules! new_artist_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident) => {
        fn $fn() -> Input<WizardStore, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl Access<WizardStore, String> for $acc {
            fn get(store: &RefCell<WizardStore>) -> String {
                store.borrow().artist_field(ArtistField::$field)
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::UpdateArtist(ArtistField::$field, value));
                true
            }

            fn placeholder(store: &RefCell<WizardStore>) -> Option<String> {
                artist_placeholder(store, ArtistField::$field)
            }
        }
    };
}

new_artist_input!(new_artist_name, "Artist name", ArtistNameAccess, Name);
new_artist_input!(new_artist_photo, "Artist photo", ArtistPhotoAccess, Photo);
new_artist_input!(new_artist_instagram, "Instagram", ArtistInstagramAccess, Instagram);
new_artist_input!(new_artist_spotify, "Spotify", ArtistSpotifyAccess, Spotify);

fn artist_placeholder(store: &RefCell<WizardStore>, field: ArtistField) -> Option<String> {
    let placeholder = match field {
        ArtistField::Name => "Leave empty to skip this artist".to_owned(),
        ArtistField::Instagram => "@handle".to_owned(),
        ArtistField::Spotify => "https://open.spotify.com/artist/...".to_owned(),
        ArtistField::Photo => {
            let store = store.borrow();
            let original = store
                .selected_artist
                .and_then(|id| store.artist_photos.get(&id))
                .and_then(|a| a.original());
            image_placeholder(original.map(|a| a.label().into_owned()))
        }
    };
    Some(placeholder)
}

fn image_placeholder(current: Option<String>) -> String {
    match current {
        Some(label) => format!("Empty keeps the current image {label}"),
        None => "Path to a JPEG or PNG file".to_owned(),
    }
}

struct CoverAccess;

impl Access<WizardStore, String> for CoverAccess {
    fn get(store: &RefCell<WizardStore>) -> String {
        store.borrow().cover.path.clone()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateCoverPath(value));
        true
    }

    fn placeholder(store: &RefCell<WizardStore>) -> Option<String> {
        let current = store.borrow().cover.original().map(|a| a.label().into_owned());
        Some(image_placeholder(current))
    }
}

struct GalleryPathAccess;

impl Access<WizardStore, String> for GalleryPathAccess {
    fn get(store: &RefCell<WizardStore>) -> String {
        store.borrow().gallery_path.clone()
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateGalleryPath(value));
        true
    }

    fn placeholder(_store: &RefCell<WizardStore>) -> Option<String> {
        Some("Path of an image to add".to_owned())
    }
}

fn new_kind() -> RadioGroup<WizardStore, EventKind, KindAccess> {
    let values = vec![EventKind::OneTime, EventKind::Recurring];
    let options = vec!["One-time".to_owned(), "Recurring".to_owned()];
    RadioGroup::new("Event type", values, options)
}

struct KindAccess;

impl Access<WizardStore, EventKind> for KindAccess {
    fn get(store: &RefCell<WizardStore>) -> EventKind {
        store.borrow().wizard.fields.kind
    }

    fn set(dispatcher: &mut Dispatcher, value: EventKind) -> bool {
        dispatcher.dispatch(Action::UpdateKind(value));
        true
    }
}

fn new_category() -> RadioGroup<WizardStore, Option<MainCategory>, CategoryAccess> {
    let values = MainCategory::ALL.into_iter().map(Some).collect();
    let options = MainCategory::ALL.iter().map(ToString::to_string).collect();
    RadioGroup::new("Main category", values, options)
}

struct CategoryAccess;

impl Access<WizardStore, Option<MainCategory>> for CategoryAccess {
    fn get(store: &RefCell<WizardStore>) -> Option<MainCategory> {
        store.borrow().wizard.category()
    }

    fn set(dispatcher: &mut Dispatcher, value: Option<MainCategory>) -> bool {
        dispatcher.dispatch(Action::UpdateCategory(value));
        true
    }
}

fn new_subcategory() -> Picker<WizardStore, SubcategoryChoices> {
    Picker::new("Subcategory", "Press <Left>/<Right> to choose")
}

struct SubcategoryChoices;

impl Choices<WizardStore> for SubcategoryChoices {
    fn choices(store: &RefCell<WizardStore>) -> &'static [&'static str] {
        match store.borrow().wizard.category() {
            Some(category) => category.subcategories(),
            None => &[],
        }
    }

    fn get(store: &RefCell<WizardStore>) -> Option<&'static str> {
        store.borrow().wizard.subcategory()
    }

    fn set(dispatcher: &mut Dispatcher, value: &'static str) {
        dispatcher.dispatch(Action::UpdateSubcategory(value));
    }
}

struct HasCategory;

impl VisiblePredicate<WizardStore> for HasCategory {
    fn is_visible(store: &RefCell<WizardStore>) -> bool {
        store.borrow().wizard.category().is_some()
    }
}

fn new_ticket_kind() -> RadioGroup<WizardStore, TicketKind, TicketKindAccess> {
    let values = TicketKind::ALL.to_vec();
    let options = TicketKind::ALL.iter().map(|a| a.title().to_owned()).collect();
    RadioGroup::new("Ticket type", values, options)
}

struct TicketKindAccess;

impl Access<WizardStore, TicketKind> for TicketKindAccess {
    fn get(store: &RefCell<WizardStore>) -> TicketKind {
        store.borrow().ticket_kind
    }

    fn set(dispatcher: &mut Dispatcher, value: TicketKind) -> bool {
        dispatcher.dispatch(Action::SelectTicketKind(value));
        true
    }
}

macro_rules! trigger {
    ($name: ident, $action: expr) => {
        struct $name;

        impl Trigger<WizardStore> for $name {
            fn trigger(dispatcher: &mut Dispatcher, _store: &RefCell<WizardStore>) {
                dispatcher.dispatch($action);
            }
        }
    };
}

trigger!(OpenTicketTrigger, Action::OpenTicket);
trigger!(AddArtistTrigger, Action::AddArtist);
trigger!(AddGalleryTrigger, Action::AddGalleryImage);
trigger!(DraftTrigger, Action::Submit { is_draft: true });
trigger!(PublishTrigger, Action::Submit { is_draft: false });

struct TicketRows;

impl RowsAccess<WizardStore> for TicketRows {
    fn rows(store: &RefCell<WizardStore>) -> Vec<(RowId, String)> {
        let store = store.borrow();
        store
            .wizard
            .tickets()
            .iter()
            .map(|(id, t)| {
                let label = format!("{} · {} · {}", t.kind().title(), t.name(), t.summary());
                (id, label)
            })
            .collect()
    }

    fn selected(store: &RefCell<WizardStore>) -> Option<RowId> {
        store.borrow().selected_ticket
    }

    fn select(dispatcher: &mut Dispatcher, id: RowId) {
        dispatcher.dispatch(Action::SelectTicket(id));
    }

    fn remove(dispatcher: &mut Dispatcher, id: RowId) {
        dispatcher.dispatch(Action::RemoveTicket(id));
    }
}

struct ArtistRows;

impl RowsAccess<WizardStore> for ArtistRows {
    fn rows(store: &RefCell<WizardStore>) -> Vec<(RowId, String)> {
        let store = store.borrow();
        store
            .wizard
            .artists()
            .iter()
            .map(|(id, entry)| {
                let name = match entry.artist.name.trim() {
                    "" => "(unnamed)",
                    name => name,
                };
                let label = match &entry.photo {
                    Some(photo) => format!("{name} · {}", photo.label()),
                    None => name.to_owned(),
                };
                (id, label)
            })
            .collect()
    }

    fn selected(store: &RefCell<WizardStore>) -> Option<RowId> {
        store.borrow().selected_artist
    }

    fn select(dispatcher: &mut Dispatcher, id: RowId) {
        dispatcher.dispatch(Action::SelectArtist(id));
    }

    fn remove(dispatcher: &mut Dispatcher, id: RowId) {
        dispatcher.dispatch(Action::RemoveArtist(id));
    }
}

struct HasArtist;

impl VisiblePredicate<WizardStore> for HasArtist {
    fn is_visible(store: &RefCell<WizardStore>) -> bool {
        let store = store.borrow();
        store
            .selected_artist
            .is_some_and(|id| store.wizard.artists().contains(id))
    }
}

struct GalleryRows;

impl RowsAccess<WizardStore> for GalleryRows {
    fn rows(store: &RefCell<WizardStore>) -> Vec<(RowId, String)> {
        let store = store.borrow();
        store
            .wizard
            .gallery()
            .iter()
            .map(|(id, image)| (id, image.label().into_owned()))
            .collect()
    }

    fn selected(store: &RefCell<WizardStore>) -> Option<RowId> {
        store.borrow().selected_gallery
    }

    fn select(dispatcher: &mut Dispatcher, id: RowId) {
        dispatcher.dispatch(Action::SelectGalleryImage(id));
    }

    fn remove(dispatcher: &mut Dispatcher, id: RowId) {
        dispatcher.dispatch(Action::RemoveGalleryImage(id));
    }
}
