//! Booking persistence.
//!
//! SQLite is the default store. A single JSON file can be used instead.

mod json_file;
mod repository;

pub use json_file::*;
pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::{Config, StoreKind};
use crate::errors::AppError;

/// Open the store selected by the configuration.
pub async fn open_store(config: &Config) -> Result<Arc<dyn BookingStore>, AppError> {
    match config.store {
        StoreKind::Sqlite => {
            let pool = init_database(&config.db_path).await?;
            Ok(Arc::new(Repository::new(pool)))
        }
        StoreKind::Json => {
            let store = JsonFileStore::new(config.bookings_path.clone());
            tracing::info!("Bookings file: {:?}", store.path());
            Ok(Arc::new(store))
        }
    }
}

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
        CREATE TABLE IF NOT EXISTS bookings (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            studio_id INTEGER NOT NULL,
            studio_name TEXT NOT NULL,
            studio_type TEXT NOT NULL,
            location TEXT NOT NULL,
            date TEXT NOT NULL,
            time_slot TEXT NOT NULL,
            user_name TEXT NOT NULL,
            user_email TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One booking per studio, date and slot
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_slot
            ON bookings(studio_id, date, time_slot);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
