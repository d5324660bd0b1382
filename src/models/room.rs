//! Room model and room-type preferences.

use serde::{Deserialize, Serialize};

use super::Gender;

/// One physical room inside a hostel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub hostel_id: String,
    pub number: String,
    pub capacity: u32,
    pub is_ensuite: bool,
    pub occupied_beds: u32,
    pub occupants: Vec<String>,
    pub gender: Gender,
    pub hostel_name: String,
    /// Internal version for optimistic concurrency control
    #[serde(default)]
    pub version: i64,
}

impl Room {
    pub fn has_space(&self) -> bool {
        self.occupied_beds < self.capacity
    }

    pub fn free_beds(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied_beds)
    }

    /// Label of the next bed a new occupant would take, e.g. `Bed 3`.
    pub fn next_bed_label(&self) -> String {
        format!("Bed {}", self.occupied_beds + 1)
    }
}

/// Room layout a student may ask for when applying.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomTypePreference {
    #[serde(rename = "2-bed-ensuite")]
    TwoBedEnsuite,
    #[serde(rename = "4-bed-ensuite")]
    FourBedEnsuite,
    #[serde(rename = "6-bed-ensuite")]
    SixBedEnsuite,
    #[serde(rename = "4-bed-no-ensuite")]
    FourBedShared,
    #[serde(rename = "6-bed-no-ensuite")]
    SixBedShared,
    #[serde(rename = "any")]
    Any,
}

impl RoomTypePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomTypePreference::TwoBedEnsuite => "2-bed-ensuite",
            RoomTypePreference::FourBedEnsuite => "4-bed-ensuite",
            RoomTypePreference::SixBedEnsuite => "6-bed-ensuite",
            RoomTypePreference::FourBedShared => "4-bed-no-ensuite",
            RoomTypePreference::SixBedShared => "6-bed-no-ensuite",
            RoomTypePreference::Any => "any",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "2-bed-ensuite" => Some(RoomTypePreference::TwoBedEnsuite),
            "4-bed-ensuite" => Some(RoomTypePreference::FourBedEnsuite),
            "6-bed-ensuite" => Some(RoomTypePreference::SixBedEnsuite),
            "4-bed-no-ensuite" => Some(RoomTypePreference::FourBedShared),
            "6-bed-no-ensuite" => Some(RoomTypePreference::SixBedShared),
            "any" => Some(RoomTypePreference::Any),
            _ => None,
        }
    }

    /// The (capacity, ensuite) pair this preference stands for, `None` for `any`.
    pub fn layout(&self) -> Option<(u32, bool)> {
        match self {
            RoomTypePreference::TwoBedEnsuite => Some((2, true)),
            RoomTypePreference::FourBedEnsuite => Some((4, true)),
            RoomTypePreference::SixBedEnsuite => Some((6, true)),
            RoomTypePreference::FourBedShared => Some((4, false)),
            RoomTypePreference::SixBedShared => Some((6, false)),
            RoomTypePreference::Any => None,
        }
    }

    pub fn matches(&self, room: &Room) -> bool {
        match self.layout() {
            Some((capacity, is_ensuite)) => {
                room.capacity == capacity && room.is_ensuite == is_ensuite
            }
            None => true,
        }
    }
}
