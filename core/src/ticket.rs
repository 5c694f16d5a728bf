// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::{fmt::Display, str::FromStr};

/// The four kinds of admission product an event can sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TicketKind {
    /// Free entry for invited guests.
    VipGuest,

    /// A regular paid ticket.
    Standard,

    /// A reserved table for a number of guests.
    Table,

    /// One pass admitting a whole group.
    GroupPass,
}

const KIND_VIP_GUEST: &str = "vip-guest";
const KIND_STANDARD: &str = "standard";
const KIND_TABLE: &str = "table";
const KIND_GROUP_PASS: &str = "group-pass";

impl TicketKind {
    pub const ALL: [TicketKind; 4] = [
        TicketKind::VipGuest,
        TicketKind::Standard,
        TicketKind::Table,
        TicketKind::GroupPass,
    ];

    /// Menu title of the kind.
    pub fn title(&self) -> &'static str {
        match self {
            TicketKind::VipGuest => "VIP Guest",
            TicketKind::Standard => "Standard",
            TicketKind::Table => "Table",
            TicketKind::GroupPass => "Group Pass",
        }
    }

    /// The fields a builder of this kind collects, in form order.
    pub fn fields(&self) -> &'static [TicketField] {
        use TicketField::*;
        match self {
            TicketKind::VipGuest => &[Name, Category, EntryType, GuestLimit],
            TicketKind::Standard => &[Name, Category, EntryType, Price, Quantity],
            TicketKind::Table => &[Name, Category, EntryType, Price, SeatsPerTable, Tables],
            TicketKind::GroupPass => &[Name, Category, EntryType, Price, GroupSize],
        }
    }
}

impl AsRef<str> for TicketKind {
    fn as_ref(&self) -> &str {
        match self {
            TicketKind::VipGuest => KIND_VIP_GUEST,
            TicketKind::Standard => KIND_STANDARD,
            TicketKind::Table => KIND_TABLE,
            TicketKind::GroupPass => KIND_GROUP_PASS,
        }
    }
}

impl Display for TicketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for TicketKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            KIND_VIP_GUEST => Ok(TicketKind::VipGuest),
            KIND_STANDARD => Ok(TicketKind::Standard),
            KIND_TABLE => Ok(TicketKind::Table),
            KIND_GROUP_PASS => Ok(TicketKind::GroupPass),
            _ => Err(()),
        }
    }
}

/// Fields shared by every ticket kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketInfo {
    pub name: String,
    pub category: String,
    pub entry_type: String,
}

/// A ticket type defined in the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ticket {
    VipGuest {
        info: TicketInfo,
        guest_limit: u32,
    },
    Standard {
        info: TicketInfo,
        price: u64,
        quantity: u32,
    },
    Table {
        info: TicketInfo,
        price: u64,
        seats_per_table: u32,
        tables: u32,
    },
    GroupPass {
        info: TicketInfo,
        price: u64,
        group_size: u32,
    },
}

impl Ticket {
    pub fn kind(&self) -> TicketKind {
        match self {
            Ticket::VipGuest { .. } => TicketKind::VipGuest,
            Ticket::Standard { .. } => TicketKind::Standard,
            Ticket::Table { .. } => TicketKind::Table,
            Ticket::GroupPass { .. } => TicketKind::GroupPass,
        }
    }

    pub fn info(&self) -> &TicketInfo {
        match self {
            Ticket::VipGuest { info, .. }
            | Ticket::Standard { info, .. }
            | Ticket::Table { info, .. }
            | Ticket::GroupPass { info, .. } => info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn category(&self) -> &str {
        &self.info().category
    }

    pub fn entry_type(&self) -> &str {
        &self.info().entry_type
    }

    /// Price per ticket in rupees; VIP guests always enter for free.
    pub fn price(&self) -> u64 {
        match self {
            Ticket::VipGuest { .. } => 0,
            Ticket::Standard { price, .. }
            | Ticket::Table { price, .. }
            | Ticket::GroupPass { price, .. } => *price,
        }
    }

    /// One line summary, e.g. `Early Bird • Single Entry • ₹499`.
    pub fn summary(&self) -> String {
        let mut s = format!("{} • {}", self.category(), self.entry_type());
        if self.price() != 0 {
            s += &format!(" • ₹{}", self.price());
        }
        s
    }
}

/// A field collected by the ticket builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketField {
    Name,
    Category,
    EntryType,
    Price,
    Quantity,
    GuestLimit,
    SeatsPerTable,
    Tables,
    GroupSize,
}

impl TicketField {
    pub fn title(&self) -> &'static str {
        match self {
            TicketField::Name => "Ticket name",
            TicketField::Category => "Ticket category",
            TicketField::EntryType => "Entry type",
            TicketField::Price => "Price (₹)",
            TicketField::Quantity => "Quantity",
            TicketField::GuestLimit => "Guest limit",
            TicketField::SeatsPerTable => "Seats per table",
            TicketField::Tables => "Number of tables",
            TicketField::GroupSize => "Group size",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("{} is required", .0.title())]
    MissingField(TicketField),

    #[error("{} must be a positive number, got {value:?}", .field.title())]
    InvalidNumber { field: TicketField, value: String },
}

/// Collects one ticket definition of a fixed kind.
///
/// Values are kept as typed text until [`TicketBuilder::build`] checks the
/// fields required by the kind.
#[derive(Debug, Clone)]
pub struct TicketBuilder {
    kind: TicketKind,
    values: HashMap<TicketField, String>,
}

impl TicketBuilder {
    pub fn new(kind: TicketKind) -> Self {
        Self {
            kind,
            values: HashMap::new(),
        }
    }

    pub fn kind(&self) -> TicketKind {
        self.kind
    }

    pub fn get(&self, field: TicketField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, field: TicketField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Builder style variant of [`TicketBuilder::set`].
    pub fn with(mut self, field: TicketField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Checks the fields required by the kind and produces the ticket.
    pub fn build(&self) -> Result<Ticket, TicketError> {
        let info = TicketInfo {
            name: self.text(TicketField::Name)?,
            category: self.text(TicketField::Category)?,
            entry_type: self.text(TicketField::EntryType)?,
        };

        let ticket = match self.kind {
            TicketKind::VipGuest => Ticket::VipGuest {
                info,
                guest_limit: self.number(TicketField::GuestLimit)?,
            },
            TicketKind::Standard => Ticket::Standard {
                info,
                price: self.number(TicketField::Price)?,
                quantity: self.number(TicketField::Quantity)?,
            },
            TicketKind::Table => Ticket::Table {
                info,
                price: self.number(TicketField::Price)?,
                seats_per_table: self.number(TicketField::SeatsPerTable)?,
                tables: self.number(TicketField::Tables)?,
            },
            TicketKind::GroupPass => Ticket::GroupPass {
                info,
                price: self.number(TicketField::Price)?,
                group_size: self.number(TicketField::GroupSize)?,
            },
        };
        Ok(ticket)
    }

    fn text(&self, field: TicketField) -> Result<String, TicketError> {
        match self.get(field).trim() {
            "" => Err(TicketError::MissingField(field)),
            v => Ok(v.to_owned()),
        }
    }

    fn number<T: FromStr>(&self, field: TicketField) -> Result<T, TicketError> {
        let v = self.text(field)?;
        v.parse().map_err(|_| TicketError::InvalidNumber { field, value: v })
    }
}
