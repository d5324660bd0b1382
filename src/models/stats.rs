//! Admin dashboard summary models.

use serde::Serialize;

use super::Gender;

/// Bed usage of a single hostel.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostelOccupancy {
    pub hostel_id: String,
    pub hostel_name: String,
    pub gender: Gender,
    pub total_rooms: u32,
    pub total_beds: u32,
    pub occupied_beds: u32,
    pub available_beds: u32,
    pub rooms_with_space: u32,
}

/// Bed usage across the whole inventory.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySummary {
    pub total_rooms: u32,
    pub total_beds: u32,
    pub occupied_beds: u32,
    pub available_beds: u32,
    pub rooms_with_space: u32,
    pub hostels: Vec<HostelOccupancy>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub total: i64,
}

/// Everything the admin dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub occupancy: OccupancySummary,
    pub applications: ApplicationCounts,
}
