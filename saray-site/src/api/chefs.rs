//! Public chef list

use axum::{Json, extract::State};
use shared::models::Chef;
use shared::{AppResult, Record, ResourceKind};

use crate::state::AppState;

/// GET /api/chefs - chefs ordered by name
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Chef>>> {
    let chefs = state
        .client
        .select(ResourceKind::Chefs)
        .await?
        .into_iter()
        .filter_map(|record| match record {
            Record::Chef(chef) => Some(chef),
            _ => None,
        })
        .collect();
    Ok(Json(chefs))
}
