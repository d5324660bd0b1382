//! Database repository for the occupancy snapshot and applications.
//!
//! Every mutation runs in a transaction and bumps the revision counter once.
//! Write transactions take the SQLite write lock up front (`BEGIN IMMEDIATE`)
//! so concurrent writers queue on the busy timeout instead of failing a
//! read-to-write lock upgrade.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::errors::AppError;
use crate::inventory::{self, RoomFilter};
use crate::models::{
    Application, ApplicationCounts, ApplicationStatus, CreateApplicationRequest, DashboardStats,
    Gender, Hostel, OccupancySummary, ReviewApplicationRequest, Room, RoomTypePreference,
};

const ROOM_COLUMNS: &str = "id, hostel_id, number, capacity, is_ensuite, occupied_beds, \
     occupants, gender, hostel_name, version";

const APPLICATION_COLUMNS: &str = "id, student_name, matric_number, department, gender, hostel_id, \
     hostel_name, room_id, room_number, is_ensuite, room_type_preference, special_requests, \
     medical_conditions, emergency_contact, emergency_phone, status, bed_space, created_at, \
     updated_at, version";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    // ==================== ROOM OPERATIONS ====================

    /// Generate and store the occupancy snapshot unless one already exists.
    ///
    /// Returns the number of rooms inserted, zero when the store was already seeded.
    pub async fn seed_rooms(&self, seed: Option<u64>) -> Result<usize, AppError> {
        let existing: i64 = sqlx::query("SELECT COUNT(*) AS count FROM rooms")
            .fetch_one(&self.pool)
            .await?
            .get("count");

        if existing > 0 {
            tracing::debug!(rooms = existing, "Occupancy snapshot already present");
            return Ok(0);
        }

        let rooms = {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            inventory::generate_rooms(&mut rng)
        };

        let mut tx = self.begin_write().await?;

        for (position, room) in rooms.iter().enumerate() {
            let occupants_json = serde_json::to_string(&room.occupants)?;
            sqlx::query(
                "INSERT INTO rooms (id, position, hostel_id, number, capacity, is_ensuite, occupied_beds, occupants, gender, hostel_name, version) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            )
            .bind(&room.id)
            .bind(position as i64)
            .bind(&room.hostel_id)
            .bind(&room.number)
            .bind(i64::from(room.capacity))
            .bind(room.is_ensuite as i32)
            .bind(i64::from(room.occupied_beds))
            .bind(&occupants_json)
            .bind(room.gender.as_str())
            .bind(&room.hostel_name)
            .bind(room.version)
            .execute(&mut *tx)
            .await?;
        }

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(rooms.len())
    }

    /// All rooms of the snapshot, in generation order.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM rooms ORDER BY position",
            ROOM_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(room_from_row).collect()
    }

    /// Get a room by ID.
    pub async fn get_room(&self, id: &str) -> Result<Option<Room>, AppError> {
        let mut conn = self.pool.acquire().await?;
        fetch_room(&mut conn, id).await
    }

    /// Rooms of the snapshot with a free bed matching `filter`.
    pub async fn available_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, AppError> {
        let rooms = self.list_rooms().await?;
        Ok(inventory::available_rooms(&rooms, filter))
    }

    pub async fn occupancy_summary(&self) -> Result<OccupancySummary, AppError> {
        let rooms = self.list_rooms().await?;
        Ok(inventory::summarize(&rooms))
    }

    // ==================== APPLICATION OPERATIONS ====================

    /// Create a pending application for a bed in `request.room_id`.
    pub async fn create_application(
        &self,
        hostel: &Hostel,
        request: &CreateApplicationRequest,
    ) -> Result<Application, AppError> {
        let mut tx = self.begin_write().await?;

        let active: i64 = sqlx::query(
            "SELECT COUNT(*) AS count FROM applications WHERE matric_number = ? AND status IN ('pending', 'approved')",
        )
        .bind(request.matric_number.trim())
        .fetch_one(&mut *tx)
        .await?
        .get("count");

        if active > 0 {
            return Err(AppError::Validation(format!(
                "Student {} already has an active application",
                request.matric_number.trim()
            )));
        }

        let room = fetch_room(&mut tx, &request.room_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", request.room_id)))?;

        if room.hostel_id != hostel.id {
            return Err(AppError::Validation(format!(
                "Room {} is not in {}",
                room.id, hostel.name
            )));
        }
        if room.gender != request.gender {
            return Err(AppError::Validation(format!(
                "{} is reserved for {} students",
                hostel.name,
                room.gender.as_str()
            )));
        }
        if !room.has_space() {
            return Err(AppError::RoomFull(format!(
                "Room {} in {} has no free bed",
                room.number, room.hostel_name
            )));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let application = Application {
            id,
            student_name: request.student_name.trim().to_string(),
            matric_number: request.matric_number.trim().to_string(),
            department: request
                .department
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            gender: request.gender,
            hostel_id: hostel.id.to_string(),
            hostel_name: hostel.name.to_string(),
            room_id: room.id.clone(),
            room_number: room.number.clone(),
            is_ensuite: room.is_ensuite,
            room_type_preference: request.room_type_preference,
            special_requests: request.special_requests.clone(),
            medical_conditions: request.medical_conditions.clone(),
            emergency_contact: request.emergency_contact.clone(),
            emergency_phone: request.emergency_phone.clone(),
            status: ApplicationStatus::Pending,
            bed_space: None,
            created_at: now.clone(),
            updated_at: now,
            version: 1,
        };

        sqlx::query(&format!(
            "INSERT INTO applications ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            APPLICATION_COLUMNS
        ))
        .bind(&application.id)
        .bind(&application.student_name)
        .bind(&application.matric_number)
        .bind(&application.department)
        .bind(application.gender.as_str())
        .bind(&application.hostel_id)
        .bind(&application.hostel_name)
        .bind(&application.room_id)
        .bind(&application.room_number)
        .bind(application.is_ensuite as i32)
        .bind(application.room_type_preference.map(|p| p.as_str()))
        .bind(&application.special_requests)
        .bind(&application.medical_conditions)
        .bind(&application.emergency_contact)
        .bind(&application.emergency_phone)
        .bind(application.status.as_str())
        .bind(&application.bed_space)
        .bind(&application.created_at)
        .bind(&application.updated_at)
        .bind(application.version)
        .execute(&mut *tx)
        .await?;

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(application)
    }

    /// Get an application by ID.
    pub async fn get_application(&self, id: &str) -> Result<Option<Application>, AppError> {
        let mut conn = self.pool.acquire().await?;
        fetch_application(&mut conn, id).await
    }

    /// List applications, newest first, optionally restricted to one status.
    pub async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, AppError> {
        let rows = match status {
            Some(status) => {
                sqlx::query(&format!(
                    "SELECT {} FROM applications WHERE status = ? ORDER BY created_at DESC, id",
                    APPLICATION_COLUMNS
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM applications ORDER BY created_at DESC, id",
                    APPLICATION_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(application_from_row).collect()
    }

    /// Approve or reject a pending application.
    ///
    /// Approval claims a bed in the application's room in the same
    /// transaction; if the room filled up in the meantime the application
    /// stays pending.
    pub async fn review_application(
        &self,
        id: &str,
        request: &ReviewApplicationRequest,
    ) -> Result<Application, AppError> {
        if request.status == ApplicationStatus::Pending {
            return Err(AppError::Validation(
                "Status must be 'approved' or 'rejected'".to_string(),
            ));
        }

        let mut tx = self.begin_write().await?;

        let existing = fetch_application(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;

        // Check version for optimistic concurrency
        if let Some(expected) = request.expected_version {
            if existing.version != expected {
                return Err(AppError::Conflict {
                    message: format!(
                        "Version mismatch: expected {}, current {}",
                        expected, existing.version
                    ),
                    current_version: existing.version,
                });
            }
        }

        if existing.status != ApplicationStatus::Pending {
            return Err(AppError::Validation(format!(
                "Application {} is already {}",
                id,
                existing.status.as_str()
            )));
        }

        let bed_space = match request.status {
            ApplicationStatus::Approved => {
                Some(claim_bed(&mut tx, &existing.room_id, &existing.student_name).await?)
            }
            _ => None,
        };

        let now = Utc::now().to_rfc3339();
        let new_version = existing.version + 1;

        let result = sqlx::query(
            "UPDATE applications SET status = ?, bed_space = ?, updated_at = ?, version = ? WHERE id = ? AND version = ?",
        )
        .bind(request.status.as_str())
        .bind(&bed_space)
        .bind(&now)
        .bind(new_version)
        .bind(id)
        .bind(existing.version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict {
                message: "Concurrent modification detected".to_string(),
                current_version: existing.version,
            });
        }

        bump_revision(&mut tx).await?;
        tx.commit().await?;

        tracing::info!(
            application = %id,
            room = %existing.room_id,
            status = request.status.as_str(),
            "Application reviewed"
        );

        Ok(Application {
            status: request.status,
            bed_space,
            updated_at: now,
            version: new_version,
            ..existing
        })
    }

    /// Number of applications per status.
    pub async fn application_counts(&self) -> Result<ApplicationCounts, AppError> {
        let rows = sqlx::query("SELECT status, COUNT(*) AS count FROM applications GROUP BY status")
            .fetch_all(&self.pool)
            .await?;

        let mut counts = ApplicationCounts::default();
        for row in rows {
            let status: String = row.get("status");
            let count: i64 = row.get("count");
            match ApplicationStatus::from_str(&status) {
                Some(ApplicationStatus::Pending) => counts.pending = count,
                Some(ApplicationStatus::Approved) => counts.approved = count,
                Some(ApplicationStatus::Rejected) => counts.rejected = count,
                None => tracing::warn!(status = %status, "Unknown application status in database"),
            }
            counts.total += count;
        }

        Ok(counts)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        Ok(DashboardStats {
            occupancy: self.occupancy_summary().await?,
            applications: self.application_counts().await?,
        })
    }
}

/// Take the next free bed in `room_id` for `occupant`, returning its label.
async fn claim_bed(
    conn: &mut SqliteConnection,
    room_id: &str,
    occupant: &str,
) -> Result<String, AppError> {
    let mut room = fetch_room(conn, room_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))?;

    if !room.has_space() {
        return Err(AppError::RoomFull(format!(
            "Room {} in {} has no free bed",
            room.number, room.hostel_name
        )));
    }

    let label = room.next_bed_label();
    room.occupants.push(occupant.to_string());
    let occupants_json = serde_json::to_string(&room.occupants)?;

    let result = sqlx::query(
        "UPDATE rooms SET occupied_beds = occupied_beds + 1, occupants = ?, version = version + 1 WHERE id = ? AND version = ? AND occupied_beds < capacity",
    )
    .bind(&occupants_json)
    .bind(room_id)
    .bind(room.version)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::RoomFull(format!(
            "Room {} in {} was taken concurrently",
            room.number, room.hostel_name
        )));
    }

    Ok(label)
}

async fn bump_revision(conn: &mut SqliteConnection) -> Result<(), AppError> {
    let now = Utc::now().to_rfc3339();
    sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
        .bind(&now)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn fetch_room(conn: &mut SqliteConnection, id: &str) -> Result<Option<Room>, AppError> {
    let row = sqlx::query(&format!("SELECT {} FROM rooms WHERE id = ?", ROOM_COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(room_from_row).transpose()
}

async fn fetch_application(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Application>, AppError> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM applications WHERE id = ?",
        APPLICATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(application_from_row).transpose()
}

// Helper functions for row conversion

fn room_from_row(row: &SqliteRow) -> Result<Room, AppError> {
    let is_ensuite: i32 = row.get("is_ensuite");
    let occupants: String = row.get("occupants");
    Ok(Room {
        id: row.get("id"),
        hostel_id: row.get("hostel_id"),
        number: row.get("number"),
        capacity: get_u32(row, "capacity")?,
        is_ensuite: is_ensuite != 0,
        occupied_beds: get_u32(row, "occupied_beds")?,
        occupants: serde_json::from_str(&occupants)?,
        gender: parse_gender(row)?,
        hostel_name: row.get("hostel_name"),
        version: row.get("version"),
    })
}

fn application_from_row(row: &SqliteRow) -> Result<Application, AppError> {
    let is_ensuite: i32 = row.get("is_ensuite");
    let status: String = row.get("status");
    let preference: Option<String> = row.get("room_type_preference");
    Ok(Application {
        id: row.get("id"),
        student_name: row.get("student_name"),
        matric_number: row.get("matric_number"),
        department: row.get("department"),
        gender: parse_gender(row)?,
        hostel_id: row.get("hostel_id"),
        hostel_name: row.get("hostel_name"),
        room_id: row.get("room_id"),
        room_number: row.get("room_number"),
        is_ensuite: is_ensuite != 0,
        room_type_preference: preference.and_then(|p| RoomTypePreference::from_str(&p)),
        special_requests: row.get("special_requests"),
        medical_conditions: row.get("medical_conditions"),
        emergency_contact: row.get("emergency_contact"),
        emergency_phone: row.get("emergency_phone"),
        status: ApplicationStatus::from_str(&status)
            .ok_or_else(|| AppError::Internal(format!("Unknown application status {}", status)))?,
        bed_space: row.get("bed_space"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        version: row.get("version"),
    })
}

fn parse_gender(row: &SqliteRow) -> Result<Gender, AppError> {
    let gender: String = row.get("gender");
    Gender::from_str(&gender)
        .ok_or_else(|| AppError::Internal(format!("Unknown gender {} in database", gender)))
}

fn get_u32(row: &SqliteRow, column: &str) -> Result<u32, AppError> {
    let value: i64 = row.get(column);
    u32::try_from(value)
        .map_err(|_| AppError::Internal(format!("Column {} out of range: {}", column, value)))
}
