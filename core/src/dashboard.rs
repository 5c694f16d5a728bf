// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use crate::{Event, EventStatus};

/// Date shown for events without a start.
pub const DATE_COMING_SOON: &str = "Coming Soon";

const FORMAT_DATE: &str = "%B %-d, %Y";

/// One line of the organizer dashboard.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DashboardRow {
    pub id: String,
    pub title: String,
    pub organizer: String,
    pub date: String,
    pub status: EventStatus,
    pub category: String,
    pub tickets_sold: u64,
    pub total_tickets: u64,
    pub revenue: u64,
    pub image: String,
    pub promoted: bool,
}

impl DashboardRow {
    /// The showcase rows listed before any stored event.
    pub fn seed() -> Vec<DashboardRow> {
        #[rustfmt::skip]
        let rows = [
            ("1", "Summer Music Festival 2024", "ABC Events", "July 15, 2024", EventStatus::Published, "Music", 4850, 5000, 28500, "assets/event-music.jpg", true),
            ("2", "Tech Innovation Conference", "TechCorp", "August 22, 2024", EventStatus::Published, "Conference", 1850, 2000, 19960, "assets/event-conference.jpg", false),
            ("3", "Food & Wine Festival", "Culinary Dreams", "September 10, 2024", EventStatus::Published, "Food", 3200, 4000, 45000, "assets/event-food.jpg", true),
            ("4", "Winter Gala Night", "Elite Events", "December 10, 2024", EventStatus::Draft, "Arts", 0, 500, 0, "assets/event-music.jpg", false),
        ];

        rows.into_iter()
            .map(
                |(id, title, organizer, date, status, category, sold, total, revenue, image, promoted)| {
                    DashboardRow {
                        id: id.to_owned(),
                        title: title.to_owned(),
                        organizer: organizer.to_owned(),
                        date: date.to_owned(),
                        status,
                        category: category.to_owned(),
                        tickets_sold: sold,
                        total_tickets: total,
                        revenue,
                        image: image.to_owned(),
                        promoted,
                    }
                },
            )
            .collect()
    }

    /// A stored event, which has no sales yet.
    pub fn from_event(event: &Event, organizer: &str) -> Self {
        let date = match event.starts_at {
            Some(dt) => dt.strftime(FORMAT_DATE).to_string(),
            None => DATE_COMING_SOON.to_owned(),
        };

        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            organizer: organizer.to_owned(),
            date,
            status: event.status,
            category: event.category.to_string(),
            tickets_sold: 0,
            total_tickets: 0,
            revenue: 0,
            image: event.image.clone(),
            promoted: false,
        }
    }

    /// Share of sold tickets, rounded to a whole percent. Zero when nothing is on sale.
    pub fn capacity_percent(&self) -> u64 {
        match self.total_tickets {
            0 => 0,
            total => (self.tickets_sold as f64 / total as f64 * 100.0).round() as u64,
        }
    }
}

/// Status selection of the dashboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StatusFilter {
    #[default]
    All,
    Draft,
    Published,
}

impl StatusFilter {
    fn matches(&self, status: EventStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Draft => status == EventStatus::Draft,
            StatusFilter::Published => status == EventStatus::Published,
        }
    }
}

/// Category selection of the dashboard, matched exactly against the row category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

const CATEGORY_ALL: &str = "all";

impl CategoryFilter {
    /// Categories offered by the dashboard menu.
    pub const CHOICES: [&'static str; 4] = ["Music", "Conference", "Food", "Arts"];

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "{CATEGORY_ALL}"),
            CategoryFilter::Named(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Err(()),
            CATEGORY_ALL => Ok(CategoryFilter::All),
            name => Ok(CategoryFilter::Named(name.to_owned())),
        }
    }
}

/// The three dashboard filters, combined with AND.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DashboardFilter {
    pub status: StatusFilter,
    pub category: CategoryFilter,

    /// Case-insensitive text searched in title and organizer.
    pub search: String,
}

impl DashboardFilter {
    pub fn matches(&self, row: &DashboardRow) -> bool {
        let query = self.search.to_lowercase();
        self.status.matches(row.status)
            && self.category.matches(&row.category)
            && (row.title.to_lowercase().contains(&query)
                || row.organizer.to_lowercase().contains(&query))
    }
}

/// Keeps the rows matching the filter, in their original order.
pub fn list<'a>(
    rows: impl IntoIterator<Item = &'a DashboardRow>,
    filter: &DashboardFilter,
) -> Vec<&'a DashboardRow> {
    rows.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Totals over a set of dashboard rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DashboardSummary {
    pub total_events: usize,
    pub total_revenue: u64,
    pub promoted_events: usize,
}

impl DashboardSummary {
    pub fn of<'a>(rows: impl IntoIterator<Item = &'a DashboardRow>) -> Self {
        rows.into_iter().fold(Self::default(), |mut acc, row| {
            acc.total_events += 1;
            acc.total_revenue += row.revenue;
            acc.promoted_events += usize::from(row.promoted);
            acc
        })
    }

    /// Share of promoted events, rounded to a whole percent.
    pub fn promoted_percent(&self) -> u64 {
        match self.total_events {
            0 => 0,
            total => (self.promoted_events as f64 / total as f64 * 100.0).round() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventDraft, EventKind, Location, MainCategory, Price};

    fn stored_event(starts_at: Option<jiff::civil::DateTime>) -> Event {
        EventDraft {
            title: "Night Out".to_string(),
            category: MainCategory::Workshop,
            subcategory: "Yoga".to_string(),
            description: String::new(),
            kind: EventKind::OneTime,
            starts_at,
            ends_at: None,
            location: Location::default(),
            address: String::new(),
            contact: String::new(),
            email: String::new(),
            image: "data:image/png;base64,YWJj".to_string(),
            gallery: vec![],
            price: Price::Free,
            status: EventStatus::Published,
            artists: vec![],
            terms: String::new(),
            notes: String::new(),
        }
        .into_event("e1".to_string())
    }

    fn titles(rows: &[&DashboardRow]) -> Vec<String> {
        rows.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn capacity_percent_rounds() {
        let seed = DashboardRow::seed();
        assert_eq!(seed[0].capacity_percent(), 97);
        assert_eq!(seed[1].capacity_percent(), 93);
        assert_eq!(seed[2].capacity_percent(), 80);
        assert_eq!(seed[3].capacity_percent(), 0);

        let row = DashboardRow::from_event(&stored_event(None), "Me");
        assert_eq!(row.total_tickets, 0);
        assert_eq!(row.capacity_percent(), 0);
    }

    #[test]
    fn from_event_uses_organizer_and_date() {
        let row = DashboardRow::from_event(&stored_event(None), "EventHub Organizer");
        assert_eq!(row.organizer, "EventHub Organizer");
        assert_eq!(row.date, "Coming Soon");
        assert_eq!(row.category, "Workshop");
        assert!(!row.promoted);

        let start = jiff::civil::date(2024, 7, 5).at(18, 0, 0, 0);
        let row = DashboardRow::from_event(&stored_event(Some(start)), "Me");
        assert_eq!(row.date, "July 5, 2024");
    }

    #[test]
    fn default_filter_lists_everything_in_order() {
        let seed = DashboardRow::seed();
        let rows = list(&seed, &DashboardFilter::default());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[3].id, "4");
    }

    #[test]
    fn status_and_category_combine() {
        let seed = DashboardRow::seed();
        let filter = DashboardFilter {
            status: StatusFilter::Published,
            category: "Music".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(titles(&list(&seed, &filter)), vec!["Summer Music Festival 2024"]);

        let filter = DashboardFilter {
            status: StatusFilter::Draft,
            category: "Music".parse().unwrap(),
            ..Default::default()
        };
        assert!(list(&seed, &filter).is_empty());
    }

    #[test]
    fn search_matches_title_or_organizer_ignoring_case() {
        let seed = DashboardRow::seed();
        let filter = DashboardFilter {
            search: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(titles(&list(&seed, &filter)), vec!["Summer Music Festival 2024"]);

        let filter = DashboardFilter {
            search: "FESTIVAL".to_string(),
            ..Default::default()
        };
        assert_eq!(
            titles(&list(&seed, &filter)),
            vec!["Summer Music Festival 2024", "Food & Wine Festival"]
        );
    }

    #[test]
    fn category_is_matched_exactly() {
        let seed = DashboardRow::seed();
        let filter = DashboardFilter {
            category: "music".parse().unwrap(),
            ..Default::default()
        };
        assert!(list(&seed, &filter).is_empty());
        assert_eq!("all".parse(), Ok(CategoryFilter::All));
        assert!("".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn summary_totals() {
        let seed = DashboardRow::seed();
        let summary = DashboardSummary::of(&seed);
        assert_eq!(summary.total_events, 4);
        assert_eq!(summary.total_revenue, 93460);
        assert_eq!(summary.promoted_events, 2);
        assert_eq!(summary.promoted_percent(), 50);
        assert_eq!(DashboardSummary::default().promoted_percent(), 0);
    }
}
