//! Resource kinds and kind-tagged records
//!
//! The hosted database exposes one table per [`ResourceKind`]. Records read
//! back from a table are wrapped in [`Record`], payloads written to a table in
//! [`RecordInput`], so callers can work with every kind through one API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ErrorCode;
use crate::models::{
    Chef, ChefInput, DiningTable, DiningTableInput, MenuItem, MenuItemInput, Reservation,
    ReservationInput,
};

/// A category of stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Tables,
    Chefs,
    MenuItems,
    Reservations,
}

/// Column ordering applied when selecting a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: &'static str,
    pub descending: bool,
}

impl ResourceKind {
    /// Tab order in the admin panel
    pub const ALL: [ResourceKind; 4] = [
        Self::Tables,
        Self::Chefs,
        Self::MenuItems,
        Self::Reservations,
    ];

    /// Name of the backing database table
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Tables => "tables",
            Self::Chefs => "chefs",
            Self::MenuItems => "menu_items",
            Self::Reservations => "reservations",
        }
    }

    /// Ordering used for every `select` of this kind
    pub fn sort_order(&self) -> SortOrder {
        match self {
            Self::Tables => SortOrder {
                column: "table_number",
                descending: false,
            },
            Self::Chefs => SortOrder {
                column: "name",
                descending: false,
            },
            Self::MenuItems => SortOrder {
                column: "category",
                descending: false,
            },
            Self::Reservations => SortOrder {
                column: "reservation_date",
                descending: true,
            },
        }
    }

    /// Reservations are listed only; the admin panel never writes them
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Reservations)
    }

    /// Error code for a missing record of this kind
    pub fn not_found_code(&self) -> ErrorCode {
        match self {
            Self::Tables => ErrorCode::TableNotFound,
            Self::Chefs => ErrorCode::ChefNotFound,
            Self::MenuItems => ErrorCode::MenuItemNotFound,
            Self::Reservations => ErrorCode::ReservationNotFound,
        }
    }

    /// Tab label in the admin panel
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tables => "Masalar",
            Self::Chefs => "Aşçılar",
            Self::MenuItems => "Menü",
            Self::Reservations => "Rezervasyonlar",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tables" | "table" => Ok(Self::Tables),
            "chefs" | "chef" => Ok(Self::Chefs),
            "menu_items" | "menu" | "menu-items" => Ok(Self::MenuItems),
            "reservations" | "reservation" => Ok(Self::Reservations),
            other => Err(format!("unknown resource kind '{}'", other)),
        }
    }
}

/// A stored record of any kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Table(DiningTable),
    Chef(Chef),
    MenuItem(MenuItem),
    Reservation(Reservation),
}

impl Record {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Table(_) => ResourceKind::Tables,
            Self::Chef(_) => ResourceKind::Chefs,
            Self::MenuItem(_) => ResourceKind::MenuItems,
            Self::Reservation(_) => ResourceKind::Reservations,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Table(t) => &t.id,
            Self::Chef(c) => &c.id,
            Self::MenuItem(m) => &m.id,
            Self::Reservation(r) => &r.id,
        }
    }

    /// Decode a row of the given kind
    pub fn from_value(kind: ResourceKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            ResourceKind::Tables => Self::Table(serde_json::from_value(value)?),
            ResourceKind::Chefs => Self::Chef(serde_json::from_value(value)?),
            ResourceKind::MenuItems => Self::MenuItem(serde_json::from_value(value)?),
            ResourceKind::Reservations => Self::Reservation(serde_json::from_value(value)?),
        })
    }
}

/// A payload written to a table of the matching kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordInput {
    Table(DiningTableInput),
    Chef(ChefInput),
    MenuItem(MenuItemInput),
    Reservation(ReservationInput),
}

impl RecordInput {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Table(_) => ResourceKind::Tables,
            Self::Chef(_) => ResourceKind::Chefs,
            Self::MenuItem(_) => ResourceKind::MenuItems,
            Self::Reservation(_) => ResourceKind::Reservations,
        }
    }
}
