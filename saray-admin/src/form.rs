//! Admin form state
//!
//! Every field is held as text exactly as typed. Numbers are parsed only
//! when the form is submitted (see [`crate::validation`]).

use shared::models::{MenuCategory, TableStatus};
use shared::{Record, ResourceKind};

use crate::error::{AdminError, AdminResult};

/// Table form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableForm {
    pub table_number: String,
    pub capacity: String,
    pub location: String,
    pub status: String,
}

impl Default for TableForm {
    fn default() -> Self {
        Self {
            table_number: String::new(),
            capacity: String::new(),
            location: String::new(),
            status: TableStatus::default().as_str().to_string(),
        }
    }
}

/// Chef form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChefForm {
    pub name: String,
    pub biography: String,
    pub signature_dish: String,
    pub image_url: String,
}

/// Menu item form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
}

impl Default for MenuItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: MenuCategory::default().label().to_string(),
            image_url: String::new(),
        }
    }
}

/// The single create/edit form of the admin panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Table(TableForm),
    Chef(ChefForm),
    MenuItem(MenuItemForm),
}

impl FormState {
    /// Blank form for a kind; reservations have none
    pub fn empty(kind: ResourceKind) -> Option<Self> {
        match kind {
            ResourceKind::Tables => Some(Self::Table(TableForm::default())),
            ResourceKind::Chefs => Some(Self::Chef(ChefForm::default())),
            ResourceKind::MenuItems => Some(Self::MenuItem(MenuItemForm::default())),
            ResourceKind::Reservations => None,
        }
    }

    /// Form pre-filled from a stored record, numbers rendered as text
    pub fn from_record(record: &Record) -> Option<Self> {
        match record {
            Record::Table(t) => Some(Self::Table(TableForm {
                table_number: t.table_number.to_string(),
                capacity: t.capacity.to_string(),
                location: t.location.clone(),
                status: t.status.as_str().to_string(),
            })),
            Record::Chef(c) => Some(Self::Chef(ChefForm {
                name: c.name.clone(),
                biography: c.biography.clone(),
                signature_dish: c.signature_dish.clone(),
                image_url: c.image_url.clone(),
            })),
            Record::MenuItem(m) => Some(Self::MenuItem(MenuItemForm {
                name: m.name.clone(),
                description: m.description.clone(),
                price: m.price.normalize().to_string(),
                category: m.category.label().to_string(),
                image_url: m.image_url.clone(),
            })),
            Record::Reservation(_) => None,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Table(_) => ResourceKind::Tables,
            Self::Chef(_) => ResourceKind::Chefs,
            Self::MenuItem(_) => ResourceKind::MenuItems,
        }
    }

    /// Column names and current values, in display order
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Table(f) => vec![
                ("table_number", f.table_number.as_str()),
                ("capacity", f.capacity.as_str()),
                ("location", f.location.as_str()),
                ("status", f.status.as_str()),
            ],
            Self::Chef(f) => vec![
                ("name", f.name.as_str()),
                ("biography", f.biography.as_str()),
                ("signature_dish", f.signature_dish.as_str()),
                ("image_url", f.image_url.as_str()),
            ],
            Self::MenuItem(f) => vec![
                ("name", f.name.as_str()),
                ("description", f.description.as_str()),
                ("price", f.price.as_str()),
                ("category", f.category.as_str()),
                ("image_url", f.image_url.as_str()),
            ],
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Replace one field's text
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> AdminResult<()> {
        let kind = self.kind();
        let slot = match self {
            Self::Table(f) => match field {
                "table_number" => &mut f.table_number,
                "capacity" => &mut f.capacity,
                "location" => &mut f.location,
                "status" => &mut f.status,
                _ => return Err(unknown(kind, field)),
            },
            Self::Chef(f) => match field {
                "name" => &mut f.name,
                "biography" => &mut f.biography,
                "signature_dish" => &mut f.signature_dish,
                "image_url" => &mut f.image_url,
                _ => return Err(unknown(kind, field)),
            },
            Self::MenuItem(f) => match field {
                "name" => &mut f.name,
                "description" => &mut f.description,
                "price" => &mut f.price,
                "category" => &mut f.category,
                "image_url" => &mut f.image_url,
                _ => return Err(unknown(kind, field)),
            },
        };
        *slot = value.into();
        Ok(())
    }
}

fn unknown(kind: ResourceKind, field: &str) -> AdminError {
    AdminError::UnknownField {
        kind,
        field: field.to_string(),
    }
}
