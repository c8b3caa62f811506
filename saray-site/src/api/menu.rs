//! Public menu

use axum::{Json, extract::State};
use serde::Serialize;
use shared::models::{MenuCategory, MenuItem};
use shared::{AppResult, Record, ResourceKind};

use crate::state::AppState;

/// One category block of the menu
#[derive(Debug, Serialize)]
pub struct MenuSection {
    pub category: MenuCategory,
    pub items: Vec<MenuItem>,
}

/// Group items by category in display order, dropping empty categories
pub fn group_by_category(items: Vec<MenuItem>) -> Vec<MenuSection> {
    MenuCategory::ALL
        .into_iter()
        .map(|category| MenuSection {
            category,
            items: items
                .iter()
                .filter(|item| item.category == category)
                .cloned()
                .collect(),
        })
        .filter(|section| !section.items.is_empty())
        .collect()
}

/// GET /api/menu - menu grouped by category
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MenuSection>>> {
    let items = state
        .client
        .select(ResourceKind::MenuItems)
        .await?
        .into_iter()
        .filter_map(|record| match record {
            Record::MenuItem(item) => Some(item),
            _ => None,
        })
        .collect();
    Ok(Json(group_by_category(items)))
}
