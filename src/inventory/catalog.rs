//! Static hostel catalog.

use crate::models::{Gender, Hostel, RoomType};

const fn rooms(capacity: u32, is_ensuite: bool, count: u32) -> RoomType {
    RoomType {
        capacity,
        is_ensuite,
        count,
    }
}

/// Every hostel, in display order: male halls first, then female halls.
pub static HOSTELS: [Hostel; 12] = [
    Hostel {
        id: "levi",
        name: "Levi Hall",
        gender: Gender::Male,
        room_types: &[rooms(4, true, 200)],
        total_rooms: 200,
    },
    Hostel {
        id: "integrity",
        name: "Integrity Hall",
        gender: Gender::Male,
        room_types: &[rooms(4, true, 200)],
        total_rooms: 200,
    },
    Hostel {
        id: "joseph",
        name: "Joseph Hall",
        gender: Gender::Male,
        room_types: &[rooms(6, true, 200)],
        total_rooms: 200,
    },
    Hostel {
        id: "joshua",
        name: "Joshua Hall",
        gender: Gender::Male,
        room_types: &[rooms(6, true, 200)],
        total_rooms: 200,
    },
    Hostel {
        id: "elisha",
        name: "Elisha Hall",
        gender: Gender::Male,
        room_types: &[rooms(6, false, 200)],
        total_rooms: 200,
    },
    Hostel {
        id: "deborah",
        name: "Deborah Hall",
        gender: Gender::Female,
        room_types: &[rooms(4, true, 67), rooms(2, true, 67), rooms(6, false, 66)],
        total_rooms: 200,
    },
    Hostel {
        id: "rebecca",
        name: "Rebecca Hall",
        gender: Gender::Female,
        room_types: &[rooms(6, true, 67), rooms(4, true, 67), rooms(2, true, 66)],
        total_rooms: 200,
    },
    Hostel {
        id: "mercy",
        name: "Mercy Hall",
        gender: Gender::Female,
        room_types: &[rooms(6, true, 100), rooms(4, true, 100)],
        total_rooms: 200,
    },
    Hostel {
        id: "esme",
        name: "Esme Hall",
        gender: Gender::Female,
        room_types: &[rooms(6, true, 200)],
        total_rooms: 200,
    },
    Hostel {
        id: "mary",
        name: "Mary Hall",
        gender: Gender::Female,
        room_types: &[rooms(6, false, 200)],
        total_rooms: 200,
    },
    Hostel {
        id: "susan",
        name: "Susan Hall",
        gender: Gender::Female,
        room_types: &[rooms(6, false, 100), rooms(4, false, 100)],
        total_rooms: 200,
    },
    Hostel {
        id: "dorcas",
        name: "Dorcas Hall",
        gender: Gender::Female,
        room_types: &[rooms(6, true, 200)],
        total_rooms: 200,
    },
];

/// The full catalog in order.
pub fn hostels() -> &'static [Hostel] {
    &HOSTELS
}

pub fn find_hostel(id: &str) -> Option<&'static Hostel> {
    HOSTELS.iter().find(|h| h.id == id)
}

/// Hostels open to the given gender, in catalog order.
pub fn hostels_by_gender(gender: Gender) -> Vec<&'static Hostel> {
    HOSTELS.iter().filter(|h| h.gender == gender).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_type_counts_sum_to_total() {
        for hostel in hostels() {
            let sum: u32 = hostel.room_types.iter().map(|t| t.count).sum();
            assert_eq!(sum, hostel.total_rooms, "hostel {}", hostel.id);
            assert!(hostel.room_types.iter().all(|t| t.capacity >= 1));
        }
    }

    #[test]
    fn test_catalog_shape() {
        assert_eq!(hostels().len(), 12);
        assert_eq!(hostels_by_gender(Gender::Male).len(), 5);
        assert_eq!(hostels_by_gender(Gender::Female).len(), 7);

        let total: u32 = hostels().iter().map(|h| h.total_rooms).sum();
        assert_eq!(total, 2400);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = hostels().iter().map(|h| h.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), hostels().len());
    }

    #[test]
    fn test_hostels_by_gender_keeps_catalog_order() {
        let male: Vec<&str> = hostels_by_gender(Gender::Male).iter().map(|h| h.id).collect();
        assert_eq!(male, ["levi", "integrity", "joseph", "joshua", "elisha"]);

        let female: Vec<&str> = hostels_by_gender(Gender::Female)
            .iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(
            female,
            ["deborah", "rebecca", "mercy", "esme", "mary", "susan", "dorcas"]
        );
    }

    #[test]
    fn test_find_levi() {
        let levi = find_hostel("levi").unwrap();
        assert_eq!(levi.gender, Gender::Male);
        assert_eq!(levi.room_types, &[rooms(4, true, 200)]);
        assert_eq!(levi.total_rooms, 200);

        assert!(find_hostel("nowhere").is_none());
    }
}
