//! Availability queries over a room set.

use rand::Rng;

use super::generate_rooms;
use crate::models::{Gender, Room, RoomTypePreference};

/// Criteria a room must satisfy to be offered to a student.
#[derive(Debug, Clone)]
pub struct RoomFilter {
    pub gender: Gender,
    pub hostel_id: Option<String>,
    pub room_type: Option<RoomTypePreference>,
    pub search: Option<String>,
}

impl RoomFilter {
    pub fn new(gender: Gender) -> Self {
        Self {
            gender,
            hostel_id: None,
            room_type: None,
            search: None,
        }
    }

    /// Restrict to one hostel. An empty id means no restriction.
    pub fn hostel(mut self, hostel_id: impl Into<String>) -> Self {
        let hostel_id = hostel_id.into();
        self.hostel_id = (!hostel_id.is_empty()).then_some(hostel_id);
        self
    }

    pub fn room_type(mut self, preference: RoomTypePreference) -> Self {
        self.room_type = Some(preference);
        self
    }

    /// Free-text search on room number or hostel name. Surrounding whitespace
    /// is trimmed and blank input is ignored.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn matches(&self, room: &Room) -> bool {
        if room.gender != self.gender || !room.has_space() {
            return false;
        }

        if let Some(hostel_id) = &self.hostel_id {
            let prefix = format!("{}-", hostel_id);
            if !room.id.starts_with(&prefix) {
                return false;
            }
        }

        if let Some(preference) = &self.room_type {
            if !preference.matches(room) {
                return false;
            }
        }

        if let Some(text) = &self.search {
            let needle = text.to_lowercase();
            if !room.number.contains(text.as_str())
                && !room.hostel_name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }
}

/// Rooms with at least one free bed matching `filter`, in input order.
pub fn available_rooms(rooms: &[Room], filter: &RoomFilter) -> Vec<Room> {
    rooms.iter().filter(|r| filter.matches(r)).cloned().collect()
}

/// Regenerate the whole inventory and filter it.
///
/// Occupancy is re-randomized on every call, so repeated calls may disagree.
/// Store-backed queries in [`crate::db::Repository`] do not have this problem.
#[cfg_attr(not(test), allow(dead_code))]
pub fn generate_available_rooms<R: Rng + ?Sized>(
    rng: &mut R,
    gender: Gender,
    hostel_id: Option<&str>,
) -> Vec<Room> {
    let mut filter = RoomFilter::new(gender);
    if let Some(hostel_id) = hostel_id {
        filter = filter.hostel(hostel_id);
    }
    available_rooms(&generate_rooms(rng), &filter)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rooms() -> Vec<Room> {
        generate_rooms(&mut StdRng::seed_from_u64(2024))
    }

    #[test]
    fn test_never_returns_full_or_wrong_gender() {
        let all = rooms();
        for gender in [Gender::Male, Gender::Female] {
            let available = available_rooms(&all, &RoomFilter::new(gender));
            assert!(!available.is_empty());
            for room in &available {
                assert_eq!(room.gender, gender);
                assert!(room.occupied_beds < room.capacity);
            }
        }
    }

    #[test]
    fn test_mary_scenario() {
        let mut rng = StdRng::seed_from_u64(5);
        let available = generate_available_rooms(&mut rng, Gender::Female, Some("mary"));

        assert!(!available.is_empty());
        for room in &available {
            assert!(room.id.starts_with("mary-"));
            assert_eq!(room.gender, Gender::Female);
            assert_eq!(room.capacity, 6);
            assert!(!room.is_ensuite);
            assert!(room.occupied_beds < 6);
        }
    }

    #[test]
    fn test_hostel_prefix_requires_separator() {
        let mut room = rooms().into_iter().find(|r| r.id == "levi-1").unwrap();
        room.occupied_beds = 0;
        room.occupants.clear();

        assert!(RoomFilter::new(Gender::Male).hostel("levi").matches(&room));
        assert!(!RoomFilter::new(Gender::Male).hostel("lev").matches(&room));
    }

    #[test]
    fn test_empty_hostel_means_all() {
        let filter = RoomFilter::new(Gender::Male).hostel("");
        assert!(filter.hostel_id.is_none());
    }

    #[test]
    fn test_unknown_hostel_yields_nothing() {
        let all = rooms();
        let filter = RoomFilter::new(Gender::Female).hostel("atlantis");
        assert!(available_rooms(&all, &filter).is_empty());
    }

    #[test]
    fn test_gender_and_hostel_mismatch_yields_nothing() {
        let all = rooms();
        let filter = RoomFilter::new(Gender::Female).hostel("levi");
        assert!(available_rooms(&all, &filter).is_empty());
    }

    #[test]
    fn test_preserves_generation_order() {
        let all = rooms();
        let available = available_rooms(&all, &RoomFilter::new(Gender::Female));
        let positions: Vec<usize> = available
            .iter()
            .map(|r| all.iter().position(|a| a.id == r.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_room_type_filter() {
        let all = rooms();
        let filter = RoomFilter::new(Gender::Female).room_type(RoomTypePreference::TwoBedEnsuite);
        let available = available_rooms(&all, &filter);

        assert!(!available.is_empty());
        for room in &available {
            assert_eq!((room.capacity, room.is_ensuite), (2, true));
            assert!(room.hostel_id == "deborah" || room.hostel_id == "rebecca");
        }
    }

    #[test]
    fn test_search_by_number_and_hostel_name() {
        let mut all = rooms();
        for room in &mut all {
            room.occupied_beds = 0;
            room.occupants.clear();
        }

        let by_number = available_rooms(&all, &RoomFilter::new(Gender::Male).search("150"));
        let ids: Vec<&str> = by_number.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            ["levi-150", "integrity-150", "joseph-150", "joshua-150", "elisha-150"]
        );

        let by_name = available_rooms(&all, &RoomFilter::new(Gender::Female).search("  MERCY "));
        assert_eq!(by_name.len(), 200);
        assert!(by_name.iter().all(|r| r.hostel_name == "Mercy Hall"));
    }
}
