//! Hostel catalog endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{error, require_gender, success, ApiResult};
use crate::errors::AppError;
use crate::inventory;
use crate::models::Hostel;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HostelQuery {
    #[serde(default)]
    pub gender: Option<String>,
}

/// GET /api/hostels - List the catalog, optionally for one gender.
pub async fn list_hostels(
    State(state): State<AppState>,
    Query(query): Query<HostelQuery>,
) -> ApiResult<Vec<Hostel>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match query.gender.as_deref().filter(|g| !g.is_empty()) {
        None => success(inventory::hostels().to_vec(), revision_id),
        Some(value) => match require_gender(Some(value)) {
            Ok(gender) => success(
                inventory::hostels_by_gender(gender)
                    .into_iter()
                    .copied()
                    .collect(),
                revision_id,
            ),
            Err(e) => error(e, revision_id),
        },
    }
}

/// GET /api/hostels/:id - Get a single hostel.
pub async fn get_hostel(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Hostel> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match inventory::find_hostel(&id) {
        Some(hostel) => success(*hostel, revision_id),
        None => error(AppError::unknown_hostel(&id), revision_id),
    }
}
