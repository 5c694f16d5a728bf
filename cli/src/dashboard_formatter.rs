// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use eventhub_core::{DashboardRow, DashboardSummary, EventStatus};

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{OutputFormat, truncate_to_width};

const MAX_TITLE_WIDTH: usize = 32;

#[derive(Debug)]
pub struct DashboardFormatter {
    columns: Vec<DashboardColumn>,
    format: OutputFormat,
}

impl DashboardFormatter {
    pub fn new(format: OutputFormat) -> Self {
        use DashboardColumn::*;
        Self {
            columns: vec![
                Id, Title, Organizer, Date, Status, Category, Sold, Capacity, Revenue, Promoted,
            ],
            format,
        }
    }

    pub fn format<'a>(&'a self, rows: &'a [DashboardRow]) -> Display<'a> {
        Display {
            rows,
            formatter: self,
        }
    }
}

pub struct Display<'a> {
    rows: &'a [DashboardRow],
    formatter: &'a DashboardFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let rows: Vec<_> = self.rows.iter().map(JsonRow::from).collect();
                let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            OutputFormat::Table if self.rows.is_empty() => writeln!(f, "No events found"),
            OutputFormat::Table => {
                write!(f, "{}", Table::new(&self.formatter.columns, self.rows))?;
                writeln!(f)?;
                write_summary(f, &DashboardSummary::of(self.rows))
            }
        }
    }
}

#[derive(serde::Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    row: &'a DashboardRow,
    capacity_percent: u64,
}

impl<'a> From<&'a DashboardRow> for JsonRow<'a> {
    fn from(row: &'a DashboardRow) -> Self {
        Self {
            row,
            capacity_percent: row.capacity_percent(),
        }
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, summary: &DashboardSummary) -> fmt::Result {
    writeln!(
        f,
        "{} events • {} revenue • {} promoted ({}%)",
        summary.total_events,
        format_rupees(summary.total_revenue),
        summary.promoted_events,
        summary.promoted_percent(),
    )
}

#[derive(Debug, Clone, Copy)]
pub enum DashboardColumn {
    Id,
    Title,
    Organizer,
    Date,
    Status,
    Category,
    Sold,
    Capacity,
    Revenue,
    Promoted,
}

impl TableColumn<DashboardRow> for DashboardColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            DashboardColumn::Id => "ID",
            DashboardColumn::Title => "Title",
            DashboardColumn::Organizer => "Organizer",
            DashboardColumn::Date => "Date",
            DashboardColumn::Status => "Status",
            DashboardColumn::Category => "Category",
            DashboardColumn::Sold => "Sold",
            DashboardColumn::Capacity => "Capacity",
            DashboardColumn::Revenue => "Revenue",
            DashboardColumn::Promoted => "Promoted",
        }
        .into()
    }

    fn format<'a>(&self, row: &'a DashboardRow) -> Cow<'a, str> {
        match self {
            DashboardColumn::Id => short_id(&row.id).into(),
            DashboardColumn::Title => truncate_to_width(&row.title, MAX_TITLE_WIDTH).into(),
            DashboardColumn::Organizer => row.organizer.as_str().into(),
            DashboardColumn::Date => row.date.as_str().into(),
            DashboardColumn::Status => row.status.as_ref().into(),
            DashboardColumn::Category => row.category.as_str().into(),
            DashboardColumn::Sold => format!("{}/{}", row.tickets_sold, row.total_tickets).into(),
            DashboardColumn::Capacity => format!("{}%", row.capacity_percent()).into(),
            DashboardColumn::Revenue => format_rupees(row.revenue).into(),
            DashboardColumn::Promoted => Cow::Borrowed(if row.promoted { "★" } else { "" }),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            DashboardColumn::Sold | DashboardColumn::Capacity | DashboardColumn::Revenue => {
                PaddingDirection::Right
            }
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, row: &DashboardRow) -> Option<Color> {
        match self {
            DashboardColumn::Status => match row.status {
                EventStatus::Published => Some(Color::Green),
                EventStatus::Draft => Some(Color::Yellow),
            },
            DashboardColumn::Promoted => Some(Color::Magenta),
            _ => None,
        }
    }
}

/// Stored events carry a uuid, the first block is enough to tell them apart.
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

/// Formats an amount with thousands separators, e.g. `₹28,500`.
fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    out.push('₹');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
