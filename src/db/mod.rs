//! Database module for SQLite persistence.
//!
//! SQLite holds the one occupancy snapshot the API serves, plus applications.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            schema_version INTEGER NOT NULL DEFAULT 1,
            revision_id INTEGER NOT NULL DEFAULT 0,
            generated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        INSERT OR IGNORE INTO meta (id, schema_version, revision_id, generated_at)
        VALUES (1, 1, 0, datetime('now'));
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL UNIQUE,
            hostel_id TEXT NOT NULL,
            number TEXT NOT NULL,
            capacity INTEGER NOT NULL CHECK (capacity >= 1),
            is_ensuite INTEGER NOT NULL,
            occupied_beds INTEGER NOT NULL CHECK (occupied_beds >= 0 AND occupied_beds <= capacity),
            occupants TEXT NOT NULL,
            gender TEXT NOT NULL,
            hostel_name TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS applications (
            id TEXT PRIMARY KEY,
            student_name TEXT NOT NULL,
            matric_number TEXT NOT NULL,
            department TEXT,
            gender TEXT NOT NULL,
            hostel_id TEXT NOT NULL,
            hostel_name TEXT NOT NULL,
            room_id TEXT NOT NULL REFERENCES rooms(id),
            room_number TEXT NOT NULL,
            is_ensuite INTEGER NOT NULL,
            room_type_preference TEXT,
            special_requests TEXT,
            medical_conditions TEXT,
            emergency_contact TEXT,
            emergency_phone TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            bed_space TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_rooms_hostel_id ON rooms(hostel_id);
        CREATE INDEX IF NOT EXISTS idx_applications_status ON applications(status);
        CREATE INDEX IF NOT EXISTS idx_applications_created_at ON applications(created_at);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
