//! GET /api/filters endpoint
//!
//! Lists the distinct values of every filterable column, each ordered for
//! presentation (domain sort keys for strata, maturity, lifespan and
//! spacing; lexical order for the rest).

use axum::{extract::State, Json};
use vd_catalog::FilterOptions;

use crate::state::AppState;

/// GET /api/filters
/// Distinct non-empty values per filter column.
pub async fn get_filters(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.catalog.filter_options())
}
