// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event creation and editing workflow tests.

use eventhub_core::{
    EventHub, EventStatus, EventStore, ImageSource, Location, MainCategory, Price, Step,
    StoreError, SubmitError, ValidationError, Wizard,
};

use crate::common::{
    assert_file_exists, assert_step_blocked, completed_wizard, setup_temp_dirs, test_config,
};

#[tokio::test]
async fn wizard_create_flow_publishes_event() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let hub = EventHub::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let mut wizard = completed_wizard("Night Out");

    // Act
    let outcome = hub.submit(&mut wizard, false).await.unwrap();

    // Assert - outcome
    assert!(outcome.created);
    assert_eq!(outcome.message(), "Event published successfully!");
    assert_eq!(outcome.event.status, EventStatus::Published);
    assert_eq!(outcome.event.location.to_string(), "Hall A, Pune, MH");
    assert_eq!(outcome.event.price.to_string(), "From ₹49");
    assert_eq!(outcome.event.artists.len(), 1);

    // Assert - persisted
    assert_file_exists(&temp_dirs.state_dir.join("eventhub.db"));
    let stored = hub.get_event(&outcome.event.id).await.unwrap();
    assert_eq!(stored, outcome.event);
}

#[tokio::test]
async fn wizard_edit_flow_round_trips_fields() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let hub = EventHub::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let mut wizard = completed_wizard("Night Out");
    let created = hub.submit(&mut wizard, true).await.unwrap().event;

    // Act - reopen the event
    let mut edit = hub.edit_wizard(&created.id).await.unwrap();

    // Assert - back-filled
    assert_eq!(edit.editing(), Some(created.id.as_str()));
    assert_eq!(edit.step(), Step::EventDetails);
    assert_eq!(edit.fields.title, "Night Out");
    assert_eq!(edit.category(), Some(MainCategory::Music));
    assert_eq!(edit.subcategory(), Some("Techno"));
    assert_eq!(
        Location::new(&edit.fields.venue, &edit.fields.city, &edit.fields.state),
        created.location
    );
    assert_eq!(edit.fields.ticket_price, "49");
    assert_eq!(edit.artists().len(), 1);

    // Act - change and publish
    edit.fields.title = "Night Out Reloaded".to_string();
    edit.fields.ticket_price.clear();
    let outcome = hub.submit(&mut edit, false).await.unwrap();

    // Assert - updated in place
    assert!(!outcome.created);
    assert_eq!(outcome.message(), "Event updated successfully!");
    let events = hub.store().list().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Night Out Reloaded");
    assert_eq!(events[0].price, Price::Free);
    assert_eq!(events[0].status, EventStatus::Published);
}

#[tokio::test]
async fn wizard_blocks_each_step_until_valid() {
    let mut wizard = Wizard::new();
    assert_step_blocked(&mut wizard, ValidationError::TitleRequired);

    wizard.fields.title = "Night Out".to_string();
    wizard.set_category(Some(MainCategory::Workshop));
    wizard.set_subcategory("Yoga").unwrap();
    assert_step_blocked(&mut wizard, ValidationError::CoverImageRequired);

    wizard.set_cover_image(Some(ImageSource::Inline("x".to_string())));
    assert_eq!(wizard.advance(), Ok(Step::DateTime));
    assert_step_blocked(&mut wizard, ValidationError::StartDateRequired);
}

#[tokio::test]
async fn wizard_reads_picked_images_on_submit() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let hub = EventHub::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let cover = temp_dirs.create_image_file("cover.png", b"abc").await.unwrap();
    let photo = temp_dirs.create_image_file("dj.jpg", b"abc").await.unwrap();
    let mut wizard = completed_wizard("Night Out");
    wizard.set_cover_image(Some(ImageSource::File(cover)));
    let artist = wizard.artists().ids().next().unwrap();
    assert!(wizard.set_artist_photo(artist, ImageSource::File(photo)));
    wizard.add_gallery_image(ImageSource::File(temp_dirs.images_dir.join("missing.png")));

    // Act
    let event = hub.submit(&mut wizard, false).await.unwrap().event;

    // Assert
    assert_eq!(event.image, "data:image/png;base64,YWJj");
    assert_eq!(event.artists[0].photo, "data:image/jpeg;base64,YWJj");
    assert!(event.gallery.is_empty(), "unreadable gallery image is dropped");
}

#[tokio::test]
async fn wizard_falls_back_to_configured_cover() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut config = test_config(&temp_dirs.state_dir);
    config.fallback_image = "assets/fallback.jpg".to_string();
    let hub = EventHub::new(config).await.unwrap();
    let mut wizard = completed_wizard("Night Out");
    wizard.set_cover_image(Some(ImageSource::File(
        temp_dirs.images_dir.join("gone.png"),
    )));

    // Act
    let event = hub.submit(&mut wizard, true).await.unwrap().event;

    // Assert
    assert_eq!(event.image, "assets/fallback.jpg");
}

#[tokio::test]
async fn wizard_edit_of_unknown_event_fails() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let hub = EventHub::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    let err = hub.edit_wizard("no-such-id").await.unwrap_err();
    assert!(err.to_string().contains("no-such-id"));
}

#[tokio::test]
async fn wizard_edit_accepts_short_id() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let hub = EventHub::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let created = hub
        .submit(&mut completed_wizard("Night Out"), true)
        .await
        .unwrap()
        .event;
    let short = created.id.split('-').next().unwrap();

    // Act
    let edit = hub.edit_wizard(short).await.unwrap();

    // Assert
    assert_eq!(edit.editing(), Some(created.id.as_str()));
    assert!(hub.edit_wizard("").await.is_err());
}

#[tokio::test]
async fn wizard_submit_of_deleted_event_reports_not_found() {
    // Arrange - an edit session for an event that only lives in another database
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let other_dirs = setup_temp_dirs().await.unwrap();
    let hub = EventHub::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    let other = EventHub::new(test_config(&other_dirs.state_dir)).await.unwrap();
    let created = other
        .submit(&mut completed_wizard("Elsewhere"), true)
        .await
        .unwrap()
        .event;
    let mut wizard = Wizard::edit(&created);

    // Act
    let err = hub.submit(&mut wizard, false).await.unwrap_err();

    // Assert
    assert!(matches!(err, SubmitError::Store(StoreError::NotFound(id)) if id == created.id));
    assert!(hub.store().list().await.unwrap().is_empty());
}
