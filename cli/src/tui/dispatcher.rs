// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use eventhub_core::{EventKind, MainCategory, RowId, TicketField, TicketKind};

use crate::tui::wizard_store::{ArtistField, TextField};

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    UpdateText(TextField, String),
    UpdateKind(EventKind),
    UpdateCategory(Option<MainCategory>),
    UpdateSubcategory(&'static str),
    UpdateCoverPath(String),

    UpdateGalleryPath(String),
    AddGalleryImage,
    SelectGalleryImage(RowId),
    RemoveGalleryImage(RowId),

    AddArtist,
    SelectArtist(RowId),
    RemoveArtist(RowId),
    UpdateArtist(ArtistField, String),

    SelectTicketKind(TicketKind),
    OpenTicket,
    UpdateTicket(TicketField, String),
    SaveTicket,
    CancelTicket,
    SelectTicket(RowId),
    RemoveTicket(RowId),

    NextStep,
    PrevStep,
    Submit { is_draft: bool },
}
