// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::{Path, PathBuf};

use eventhub_core::{
    Config, ImageSource, MainCategory, Step, TicketBuilder, TicketField, TicketKind, Wizard,
};

/// Creates a test configuration that keeps its database in `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        ..Default::default()
    }
}

/// Builder for test configurations.
#[derive(Debug, Default)]
pub struct TestConfigBuilder {
    state_dir: Option<PathBuf>,
    organizer: Option<String>,
    fallback_image: Option<String>,
    show_seed_events: Option<bool>,
}

#[allow(dead_code)]
impl TestConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state_dir(mut self, path: &Path) -> Self {
        self.state_dir = Some(path.to_path_buf());
        self
    }

    #[must_use]
    pub fn with_organizer(mut self, organizer: &str) -> Self {
        self.organizer = Some(organizer.to_string());
        self
    }

    #[must_use]
    pub fn with_fallback_image(mut self, image: &str) -> Self {
        self.fallback_image = Some(image.to_string());
        self
    }

    #[must_use]
    pub fn without_seed_events(mut self) -> Self {
        self.show_seed_events = Some(false);
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        let default = Config::default();
        Config {
            state_dir: self.state_dir,
            organizer: self.organizer.unwrap_or(default.organizer),
            fallback_image: self.fallback_image.unwrap_or(default.fallback_image),
            show_seed_events: self.show_seed_events.unwrap_or(default.show_seed_events),
        }
    }
}

/// A builder for a valid standard ticket.
#[must_use]
pub fn standard_ticket(name: &str) -> TicketBuilder {
    TicketBuilder::new(TicketKind::Standard)
        .with(TicketField::Name, name)
        .with(TicketField::Category, "General")
        .with(TicketField::EntryType, "Single Entry")
        .with(TicketField::Price, "499")
        .with(TicketField::Quantity, "100")
}

/// A wizard walked through every step with valid input.
#[must_use]
pub fn completed_wizard(title: &str) -> Wizard {
    let mut w = Wizard::new();
    w.fields.title = title.to_string();
    w.set_category(Some(MainCategory::Music));
    w.set_subcategory("Techno").expect("Techno is a music subcategory");
    w.set_cover_image(Some(ImageSource::Inline(
        "data:image/png;base64,YWJj".to_string(),
    )));
    w.advance().expect("step 1 is valid");

    w.fields.start_date = "2024-07-15".to_string();
    w.fields.start_time = "18:00".to_string();
    w.fields.end_date = "2024-07-15".to_string();
    w.fields.end_time = "23:30".to_string();
    w.advance().expect("step 2 is valid");

    w.save_ticket(&standard_ticket("Early Bird"))
        .expect("ticket is valid");
    w.advance().expect("step 3 is valid");

    w.fields.venue = "Hall A".to_string();
    w.fields.city = "Pune".to_string();
    w.fields.state = "MH".to_string();
    w.fields.contact = "9999999999".to_string();
    w.fields.email = "hall@example.com".to_string();
    w.advance().expect("step 4 is valid");

    let artist = w.artists().ids().next().expect("one artist row");
    if let Some(a) = w.artist_mut(artist) {
        a.name = "DJ Snake".to_string();
        a.instagram = Some("djsnake".to_string());
    }
    w.advance().expect("step 5 is valid");

    assert_eq!(w.step(), Step::AdditionalInfo);
    w
}
