//! Occupancy totals for the admin dashboard.

use super::hostels;
use crate::models::{HostelOccupancy, OccupancySummary, Room};

/// Summarize bed usage per hostel (catalog order) and overall.
pub fn summarize(rooms: &[Room]) -> OccupancySummary {
    let per_hostel: Vec<HostelOccupancy> = hostels()
        .iter()
        .map(|hostel| {
            let mut entry = HostelOccupancy {
                hostel_id: hostel.id.to_string(),
                hostel_name: hostel.name.to_string(),
                gender: hostel.gender,
                total_rooms: 0,
                total_beds: 0,
                occupied_beds: 0,
                available_beds: 0,
                rooms_with_space: 0,
            };

            for room in rooms.iter().filter(|r| r.hostel_id == hostel.id) {
                entry.total_rooms += 1;
                entry.total_beds += room.capacity;
                entry.occupied_beds += room.occupied_beds;
                entry.available_beds += room.free_beds();
                if room.has_space() {
                    entry.rooms_with_space += 1;
                }
            }

            entry
        })
        .collect();

    OccupancySummary {
        total_rooms: per_hostel.iter().map(|h| h.total_rooms).sum(),
        total_beds: per_hostel.iter().map(|h| h.total_beds).sum(),
        occupied_beds: per_hostel.iter().map(|h| h.occupied_beds).sum(),
        available_beds: per_hostel.iter().map(|h| h.available_beds).sum(),
        rooms_with_space: per_hostel.iter().map(|h| h.rooms_with_space).sum(),
        hostels: per_hostel,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::inventory::generate_rooms;

    #[test]
    fn test_summary_matches_catalog() {
        let rooms = generate_rooms(&mut StdRng::seed_from_u64(11));
        let summary = summarize(&rooms);

        assert_eq!(summary.total_rooms, 2400);
        assert_eq!(summary.hostels.len(), 12);
        assert_eq!(
            summary.occupied_beds + summary.available_beds,
            summary.total_beds
        );

        for (entry, hostel) in summary.hostels.iter().zip(hostels()) {
            assert_eq!(entry.hostel_id, hostel.id);
            assert_eq!(entry.total_rooms, hostel.total_rooms);
            let beds: u32 = hostel.room_types.iter().map(|t| t.capacity * t.count).sum();
            assert_eq!(entry.total_beds, beds);
        }
    }

    #[test]
    fn test_empty_rooms() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_rooms, 0);
        assert_eq!(summary.hostels.len(), 12);
        assert!(summary.hostels.iter().all(|h| h.total_beds == 0));
    }
}
