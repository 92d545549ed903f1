//! GET /api/plants endpoint
//!
//! Queries the catalog by free-text search, favorites ids, and per-column
//! value filters. Values within one column are OR'd; everything else
//! combines with AND.

use axum::extract::{RawQuery, State};
use axum::Json;
use vd_catalog::{FilterCategory, PlantQuery};
use vd_types::PlantRecord;

use super::helpers::QueryParams;
use crate::state::AppState;

/// GET /api/plants?q=&ids=&<column>=...
/// Matching rows in catalog order; multi-value params repeat the key.
pub async fn get_plants(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<Vec<PlantRecord>> {
    let params = QueryParams::parse(raw.as_deref().unwrap_or(""));

    let mut query = PlantQuery {
        search: params.first("q").map(str::to_string),
        ids: params.all("ids"),
        selections: Vec::new(),
    };
    for category in FilterCategory::ALL {
        let values = params.all(category.wire_key());
        if !values.is_empty() {
            query.selections.push((category, values));
        }
    }

    let rows: Vec<PlantRecord> = state.catalog.query(&query).into_iter().cloned().collect();
    Json(rows)
}
