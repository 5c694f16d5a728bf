// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Dashboard listing workflow tests.

use eventhub_core::{
    CategoryFilter, DashboardFilter, DashboardSummary, EventHub, EventStatus, StatusFilter,
};

use crate::common::{TestConfigBuilder, completed_wizard, setup_temp_dirs, test_config};

#[tokio::test]
async fn dashboard_lists_seed_then_stored_events() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let hub = EventHub::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    hub.submit(&mut completed_wizard("Night Out"), true)
        .await
        .unwrap();

    // Act
    let rows = hub.dashboard(&DashboardFilter::default()).await.unwrap();

    // Assert
    let ids: Vec<_> = rows.iter().take(4).map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    let stored = &rows[4];
    assert_eq!(stored.title, "Night Out");
    assert_eq!(stored.organizer, "EventHub Organizer");
    assert_eq!(stored.date, "July 15, 2024");
    assert_eq!(stored.status, EventStatus::Draft);
    assert_eq!(stored.capacity_percent(), 0);
}

#[tokio::test]
async fn dashboard_filters_combine() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let hub = EventHub::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    hub.submit(&mut completed_wizard("Night Out"), true)
        .await
        .unwrap();
    hub.submit(&mut completed_wizard("Day Out"), false)
        .await
        .unwrap();

    // Act
    let filter = DashboardFilter {
        status: StatusFilter::Draft,
        category: CategoryFilter::Named("Music".to_string()),
        search: "OUT".to_string(),
    };
    let rows = hub.dashboard(&filter).await.unwrap();

    // Assert
    let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Night Out"]);
}

#[tokio::test]
async fn dashboard_search_matches_organizer() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let hub = EventHub::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    let filter = DashboardFilter {
        search: "abc".to_string(),
        ..Default::default()
    };
    let rows = hub.dashboard(&filter).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].organizer, "ABC Events");
    assert_eq!(rows[0].capacity_percent(), 97);
}

#[tokio::test]
async fn dashboard_without_seed_events() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .with_organizer("Night Owls")
        .without_seed_events()
        .build();
    let hub = EventHub::new(config).await.unwrap();
    hub.submit(&mut completed_wizard("Night Out"), false)
        .await
        .unwrap();

    // Act
    let rows = hub.dashboard(&DashboardFilter::default()).await.unwrap();

    // Assert
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].organizer, "Night Owls");
    let summary = DashboardSummary::of(&rows);
    assert_eq!(summary.total_events, 1);
    assert_eq!(summary.total_revenue, 0);
}
