// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven behavior workflow tests.

use eventhub_core::{EventHub, EventStore};

use crate::common::{TestConfigBuilder, completed_wizard, setup_temp_dirs};

#[tokio::test]
async fn config_state_dir_is_created() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let state_dir = temp_dirs.state_dir.join("nested").join("eventhub");
    let config = TestConfigBuilder::new().with_state_dir(&state_dir).build();

    // Act
    let hub = EventHub::new(config).await.unwrap();

    // Assert
    assert!(state_dir.is_dir());
    assert_eq!(hub.config().db_path(), Some(state_dir.join("eventhub.db")));
}

#[tokio::test]
async fn config_events_survive_reopen() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .build();
    let hub = EventHub::new(config.clone()).await.unwrap();
    let id = hub
        .submit(&mut completed_wizard("Night Out"), false)
        .await
        .unwrap()
        .event
        .id;
    hub.close().await.unwrap();

    // Act
    let hub = EventHub::new(config).await.unwrap();

    // Assert
    let events = hub.store().list().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, id);
}
