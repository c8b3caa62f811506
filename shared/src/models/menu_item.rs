//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu category. The set is fixed; the labels are the stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MenuCategory {
    #[default]
    #[serde(rename = "Saray Başlangıçları")]
    PalaceStarters,
    #[serde(rename = "Taş Fırın")]
    StoneOven,
    #[serde(rename = "Ana Yemekler")]
    MainCourses,
    #[serde(rename = "Tatlılar")]
    Desserts,
}

impl MenuCategory {
    /// Display order on the public menu
    pub const ALL: [MenuCategory; 4] = [
        Self::PalaceStarters,
        Self::StoneOven,
        Self::MainCourses,
        Self::Desserts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PalaceStarters => "Saray Başlangıçları",
            Self::StoneOven => "Taş Fırın",
            Self::MainCourses => "Ana Yemekler",
            Self::Desserts => "Tatlılar",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown menu category '{}'", s))
    }
}

/// Menu item entity (yemek)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub category: MenuCategory,
    pub image_url: String,
}

/// Insert/update payload for a menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemInput {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: MenuCategory,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_uses_turkish_labels_on_the_wire() {
        let json = serde_json::to_string(&MenuCategory::StoneOven).unwrap();
        assert_eq!(json, "\"Taş Fırın\"");
        let category: MenuCategory = serde_json::from_str("\"Tatlılar\"").unwrap();
        assert_eq!(category, MenuCategory::Desserts);
    }

    #[test]
    fn test_price_is_a_json_number() {
        let input = MenuItemInput {
            name: "Lahmacun Özel".into(),
            description: "Dana kıyma".into(),
            price: Decimal::new(1455, 1),
            category: MenuCategory::StoneOven,
            image_url: "https://x/y.jpg".into(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["price"], serde_json::json!(145.5));
        assert_eq!(value["category"], "Taş Fırın");
    }
}
