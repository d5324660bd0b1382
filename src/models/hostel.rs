//! Hostel and room-type models.

use serde::{Deserialize, Serialize};

/// Gender restriction of a hostel, and of every room inside it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Parse the wire form. Anything outside `male`/`female` is rejected.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// A homogeneous group of rooms within a hostel.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub capacity: u32,
    pub is_ensuite: bool,
    pub count: u32,
}

/// A residential building restricted to one gender.
///
/// Hostels are compiled into the binary and never change at runtime.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hostel {
    pub id: &'static str,
    pub name: &'static str,
    pub gender: Gender,
    pub room_types: &'static [RoomType],
    pub total_rooms: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_round_trip() {
        assert_eq!(Gender::from_str("male"), Some(Gender::Male));
        assert_eq!(Gender::from_str("female"), Some(Gender::Female));
        assert_eq!(Gender::Female.as_str(), "female");
    }

    #[test]
    fn test_gender_rejects_unknown() {
        assert_eq!(Gender::from_str("other"), None);
        assert_eq!(Gender::from_str("Male"), None);
        assert_eq!(Gender::from_str(""), None);
    }

    #[test]
    fn test_hostel_serializes_camel_case() {
        static TYPES: [RoomType; 1] = [RoomType {
            capacity: 2,
            is_ensuite: true,
            count: 3,
        }];
        let hostel = Hostel {
            id: "test",
            name: "Test Hall",
            gender: Gender::Female,
            room_types: &TYPES,
            total_rooms: 3,
        };

        let value = serde_json::to_value(hostel).unwrap();
        assert_eq!(value["gender"], "female");
        assert_eq!(value["totalRooms"], 3);
        assert_eq!(value["roomTypes"][0]["isEnsuite"], true);
    }
}
