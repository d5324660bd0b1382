//! Hostel application model and request bodies.

use serde::{Deserialize, Serialize};

use super::{Gender, RoomTypePreference};

/// Review state of an application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// A student's request for a bed space in a specific room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub student_name: String,
    pub matric_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub gender: Gender,
    pub hostel_id: String,
    pub hostel_name: String,
    pub room_id: String,
    pub room_number: String,
    pub is_ensuite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type_preference: Option<RoomTypePreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
    pub status: ApplicationStatus,
    /// Bed label assigned on approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_space: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Internal version for optimistic concurrency control
    #[serde(default)]
    pub version: i64,
}

/// Request body for submitting an application.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub student_name: String,
    pub matric_number: String,
    #[serde(default)]
    pub department: Option<String>,
    pub gender: Gender,
    pub hostel_id: String,
    pub room_id: String,
    #[serde(default)]
    pub room_type_preference: Option<RoomTypePreference>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub medical_conditions: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub emergency_phone: Option<String>,
    #[serde(default)]
    pub agree_terms: bool,
}

/// Request body for an admin decision on an application.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewApplicationRequest {
    pub status: ApplicationStatus,
    /// Expected version for optimistic concurrency control
    #[serde(default)]
    pub expected_version: Option<i64>,
}
