//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dining table status (masa durumu)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Reserved,
    Occupied,
}

impl TableStatus {
    pub const ALL: [TableStatus; 3] = [Self::Available, Self::Reserved, Self::Occupied];

    /// Stored value, as written to the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Occupied => "occupied",
        }
    }

    /// Label shown in the admin panel
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Müsait",
            Self::Reserved => "Rezerveli",
            Self::Occupied => "Dolu",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s) || status.label() == s)
            .ok_or_else(|| format!("unknown table status '{}'", s))
    }
}

/// Dining table entity (masa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    pub table_number: i32,
    pub capacity: i32,
    pub location: String,
    #[serde(default)]
    pub status: TableStatus,
}

/// Insert/update payload for a dining table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTableInput {
    pub table_number: i32,
    pub capacity: i32,
    pub location: String,
    pub status: TableStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_value_and_label() {
        assert_eq!("reserved".parse::<TableStatus>(), Ok(TableStatus::Reserved));
        assert_eq!("Occupied".parse::<TableStatus>(), Ok(TableStatus::Occupied));
        assert_eq!("Müsait".parse::<TableStatus>(), Ok(TableStatus::Available));
        assert!("broken".parse::<TableStatus>().is_err());
    }

    #[test]
    fn test_missing_status_defaults_to_available() {
        let json = r#"{"id":"t1","table_number":3,"capacity":4,"location":"Teras"}"#;
        let table: DiningTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.status, TableStatus::Available);
    }
}
