// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, collections::HashMap, path::PathBuf, rc::Rc};

use eventhub_core::{
    Artist, ImageSource, RowId, Rows, TicketBuilder, TicketKind, Wizard, WizardFields,
};

use crate::tui::dispatcher::{Action, Dispatcher};

/// A free text field of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Description,
    StartDate,
    StartTime,
    EndDate,
    EndTime,
    TicketPrice,
    Venue,
    City,
    State,
    Address,
    Contact,
    Email,
    Terms,
    Notes,
}

impl TextField {
    pub fn get(self, fields: &WizardFields) -> &str {
        match self {
            TextField::Title => &fields.title,
            TextField::Description => &fields.description,
            TextField::StartDate => &fields.start_date,
            TextField::StartTime => &fields.start_time,
            TextField::EndDate => &fields.end_date,
            TextField::EndTime => &fields.end_time,
            TextField::TicketPrice => &fields.ticket_price,
            TextField::Venue => &fields.venue,
            TextField::City => &fields.city,
            TextField::State => &fields.state,
            TextField::Address => &fields.address,
            TextField::Contact => &fields.contact,
            TextField::Email => &fields.email,
            TextField::Terms => &fields.terms,
            TextField::Notes => &fields.notes,
        }
    }

    fn get_mut(self, fields: &mut WizardFields) -> &mut String {
        match self {
            TextField::Title => &mut fields.title,
            TextField::Description => &mut fields.description,
            TextField::StartDate => &mut fields.start_date,
            TextField::StartTime => &mut fields.start_time,
            TextField::EndDate => &mut fields.end_date,
            TextField::EndTime => &mut fields.end_time,
            TextField::TicketPrice => &mut fields.ticket_price,
            TextField::Venue => &mut fields.venue,
            TextField::City => &mut fields.city,
            TextField::State => &mut fields.state,
            TextField::Address => &mut fields.address,
            TextField::Contact => &mut fields.contact,
            TextField::Email => &mut fields.email,
            TextField::Terms => &mut fields.terms,
            TextField::Notes => &mut fields.notes,
        }
    }
}

/// A field of the selected artist row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistField {
    Name,
    Instagram,
    Spotify,
    Photo,
}

/// A file path typed for an image slot.
///
/// While the path is empty the slot keeps the image it had when the wizard
/// opened, so an edit session does not drop stored images by accident.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImagePath {
    pub path: String,
    original: Option<ImageSource>,
}

impl ImagePath {
    fn new(original: Option<ImageSource>) -> Self {
        Self {
            path: String::new(),
            original,
        }
    }

    pub fn original(&self) -> Option<&ImageSource> {
        self.original.as_ref()
    }

    fn image(&self) -> Option<ImageSource> {
        match self.path.trim() {
            "" => self.original.clone(),
            path => Some(ImageSource::File(PathBuf::from(path))),
        }
    }
}

/// A one line notice shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
            is_error: true,
        }
    }
}

#[derive(Debug)]
pub struct WizardStore {
    pub wizard: Wizard,

    pub cover: ImagePath,
    pub gallery_path: String,
    pub selected_gallery: Option<RowId>,

    pub artist_photos: HashMap<RowId, ImagePath>,
    pub selected_artist: Option<RowId>,

    /// Kind used by the next ticket dialog.
    pub ticket_kind: TicketKind,
    /// The open ticket dialog, if any.
    pub ticket: Option<TicketBuilder>,
    pub selected_ticket: Option<RowId>,

    pub toast: Option<Toast>,

    /// Set once the user asks to submit, `true` for a draft.
    pub submit: Option<bool>,
}

impl WizardStore {
    pub fn new(wizard: Wizard) -> Self {
        let artist_photos = wizard
            .artists()
            .iter()
            .map(|(id, entry)| (id, ImagePath::new(entry.photo.clone())))
            .collect();

        let selected_gallery = wizard.gallery().ids().next();
        let selected_artist = wizard.artists().ids().next();
        let selected_ticket = wizard.tickets().ids().next();

        Self {
            cover: ImagePath::new(wizard.cover_image().cloned()),
            gallery_path: String::new(),
            selected_gallery,
            artist_photos,
            selected_artist,
            ticket_kind: TicketKind::Standard,
            ticket: None,
            selected_ticket,
            toast: None,
            submit: None,
            wizard,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.wizard.editing() {
            Some(_) => "Edit Event",
            None => "Create Event",
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        field.get(&self.wizard.fields)
    }

    /// The value of a field of the selected artist, empty if none is selected.
    pub fn artist_field(&self, field: ArtistField) -> String {
        let Some(id) = self.selected_artist else {
            return String::new();
        };

        let artist = self.wizard.artists().get(id).map(|entry| &entry.artist);
        match (field, artist) {
            (ArtistField::Photo, _) => self
                .artist_photos
                .get(&id)
                .map(|a| a.path.clone())
                .unwrap_or_default(),
            (_, None) => String::new(),
            (ArtistField::Name, Some(a)) => a.name.clone(),
            (ArtistField::Instagram, Some(a)) => a.instagram.clone().unwrap_or_default(),
            (ArtistField::Spotify, Some(a)) => a.spotify.clone().unwrap_or_default(),
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            that.borrow_mut().reduce(action);
        }));
        dispatcher.register(callback);
    }

    pub fn reduce(&mut self, action: &Action) {
        match action {
            Action::UpdateText(field, v) => *field.get_mut(&mut self.wizard.fields) = v.clone(),
            Action::UpdateKind(v) => self.wizard.fields.kind = *v,
            Action::UpdateCategory(v) => self.wizard.set_category(*v),
            Action::UpdateSubcategory(v) => {
                if let Err(e) = self.wizard.set_subcategory(v) {
                    self.toast = Some(Toast::error(e));
                }
            }
            Action::UpdateCoverPath(v) => {
                self.cover.path = v.clone();
                self.wizard.set_cover_image(self.cover.image());
            }

            Action::UpdateGalleryPath(v) => self.gallery_path = v.clone(),
            Action::AddGalleryImage => match self.gallery_path.trim() {
                "" => self.toast = Some(Toast::error("Enter the path of an image first")),
                path => {
                    let image = ImageSource::File(PathBuf::from(path));
                    self.selected_gallery = Some(self.wizard.add_gallery_image(image));
                    self.gallery_path.clear();
                    self.toast = Some(Toast::info("Image added to the gallery"));
                }
            },
            Action::SelectGalleryImage(id) => self.selected_gallery = Some(*id),
            Action::RemoveGalleryImage(id) => {
                let position = self.wizard.gallery().position(*id);
                self.wizard.remove_gallery_image(*id);
                self.selected_gallery = neighbour(self.wizard.gallery(), position);
            }

            Action::AddArtist => {
                let id = self.wizard.add_artist();
                self.artist_photos.insert(id, ImagePath::default());
                self.selected_artist = Some(id);
            }
            Action::SelectArtist(id) => self.selected_artist = Some(*id),
            Action::RemoveArtist(id) => {
                let position = self.wizard.artists().position(*id);
                self.wizard.remove_artist(*id);
                self.artist_photos.remove(id);
                self.selected_artist = neighbour(self.wizard.artists(), position);
            }
            Action::UpdateArtist(field, v) => self.update_artist(*field, v),

            Action::SelectTicketKind(v) => self.ticket_kind = *v,
            Action::OpenTicket => {
                self.ticket = Some(TicketBuilder::new(self.ticket_kind));
                self.toast = None;
            }
            Action::UpdateTicket(field, v) => {
                if let Some(builder) = &mut self.ticket {
                    builder.set(*field, v.clone());
                }
            }
            Action::SaveTicket => {
                let Some(builder) = &self.ticket else {
                    return;
                };
                match self.wizard.save_ticket(builder) {
                    Ok(id) => {
                        self.selected_ticket = Some(id);
                        self.ticket = None;
                        self.toast = Some(Toast::info("Ticket saved"));
                    }
                    Err(e) => self.toast = Some(Toast::error(e)),
                }
            }
            Action::CancelTicket => self.ticket = None,
            Action::SelectTicket(id) => self.selected_ticket = Some(*id),
            Action::RemoveTicket(id) => {
                let position = self.wizard.tickets().position(*id);
                self.wizard.remove_ticket(*id);
                self.selected_ticket = neighbour(self.wizard.tickets(), position);
            }

            Action::NextStep => match self.wizard.advance() {
                Ok(_) => self.toast = None,
                Err(e) => self.toast = Some(Toast::error(e)),
            },
            Action::PrevStep => {
                self.wizard.retreat();
                self.toast = None;
            }
            Action::Submit { is_draft } => match self.wizard.validate_submit() {
                Ok(()) => {
                    self.submit = Some(*is_draft);
                    self.toast = None;
                }
                Err(e) => self.toast = Some(Toast::error(e)),
            },
        }
    }

    fn update_artist(&mut self, field: ArtistField, value: &str) {
        let Some(id) = self.selected_artist else {
            return;
        };

        let optional = || (!value.trim().is_empty()).then(|| value.to_owned());
        match field {
            ArtistField::Photo => self.update_artist_photo(id, value),
            ArtistField::Name => self.edit_artist(id, |a| a.name = value.to_owned()),
            ArtistField::Instagram => self.edit_artist(id, |a| a.instagram = optional()),
            ArtistField::Spotify => self.edit_artist(id, |a| a.spotify = optional()),
        }
    }

    fn edit_artist(&mut self, id: RowId, edit: impl FnOnce(&mut Artist)) {
        if let Some(artist) = self.wizard.artist_mut(id) {
            edit(artist);
        }
    }

    fn update_artist_photo(&mut self, id: RowId, path: &str) {
        let slot = self.artist_photos.entry(id).or_default();
        slot.path = path.to_owned();
        match slot.image() {
            Some(image) => {
                self.wizard.set_artist_photo(id, image);
            }
            None => {
                self.wizard.clear_artist_photo(id);
            }
        }
    }
}

/// The row that takes over the selection after the row at `position` is gone.
fn neighbour<T>(rows: &Rows<T>, position: Option<usize>) -> Option<RowId> {
    let last = rows.len().checked_sub(1)?;
    rows.ids().nth(position?.min(last))
}
