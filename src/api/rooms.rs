//! Room availability endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{error, require_gender, success, ApiResult};
use crate::errors::AppError;
use crate::inventory::{self, RoomFilter};
use crate::models::{Room, RoomTypePreference};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableRoomsQuery {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub hostel_id: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl AvailableRoomsQuery {
    fn to_filter(&self) -> Result<RoomFilter, AppError> {
        let mut filter = RoomFilter::new(require_gender(self.gender.as_deref())?);

        if let Some(hostel_id) = self.hostel_id.as_deref().filter(|h| !h.is_empty()) {
            if inventory::find_hostel(hostel_id).is_none() {
                return Err(AppError::unknown_hostel(hostel_id));
            }
            filter = filter.hostel(hostel_id);
        }

        if let Some(value) = self.room_type.as_deref().filter(|t| !t.is_empty()) {
            let preference = RoomTypePreference::from_str(value)
                .ok_or_else(|| AppError::Validation(format!("Unknown room type '{}'", value)))?;
            filter = filter.room_type(preference);
        }

        if let Some(text) = &self.search {
            filter = filter.search(text.as_str());
        }

        Ok(filter)
    }
}

/// GET /api/rooms/available - Rooms with a free bed matching the query.
pub async fn list_available_rooms(
    State(state): State<AppState>,
    Query(query): Query<AvailableRoomsQuery>,
) -> ApiResult<Vec<Room>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let filter = match query.to_filter() {
        Ok(filter) => filter,
        Err(e) => return error(e, revision_id),
    };

    match state.repo.available_rooms(&filter).await {
        Ok(rooms) => {
            tracing::debug!(
                gender = filter.gender.as_str(),
                hostel = ?filter.hostel_id,
                count = rooms.len(),
                "Availability query"
            );
            success(rooms, revision_id)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/rooms/:id - Get a single room.
pub async fn get_room(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Room> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_room(&id).await {
        Ok(Some(room)) => success(room, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Room {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn query(gender: &str) -> AvailableRoomsQuery {
        AvailableRoomsQuery {
            gender: Some(gender.to_string()),
            hostel_id: None,
            room_type: None,
            search: None,
        }
    }

    #[test]
    fn test_filter_from_query() {
        let mut q = query("female");
        q.hostel_id = Some("mary".to_string());
        q.room_type = Some("6-bed-no-ensuite".to_string());
        q.search = Some(" 01 ".to_string());

        let filter = q.to_filter().unwrap();
        assert_eq!(filter.gender, Gender::Female);
        assert_eq!(filter.hostel_id.as_deref(), Some("mary"));
        assert_eq!(filter.room_type, Some(RoomTypePreference::SixBedShared));
        assert_eq!(filter.search.as_deref(), Some("01"));
    }

    #[test]
    fn test_filter_rejects_bad_input() {
        assert!(matches!(
            query("robot").to_filter(),
            Err(AppError::InvalidGender(_))
        ));

        let mut missing = query("male");
        missing.gender = None;
        assert!(matches!(missing.to_filter(), Err(AppError::InvalidGender(_))));

        let mut unknown = query("male");
        unknown.hostel_id = Some("atlantis".to_string());
        assert!(matches!(
            unknown.to_filter(),
            Err(AppError::UnknownHostel(_))
        ));

        let mut bad_type = query("male");
        bad_type.room_type = Some("penthouse".to_string());
        assert!(matches!(bad_type.to_filter(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_hostel_is_ignored() {
        let mut q = query("male");
        q.hostel_id = Some(String::new());
        assert!(q.to_filter().unwrap().hostel_id.is_none());
    }
}
