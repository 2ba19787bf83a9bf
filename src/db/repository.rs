//! Booking repository backed by SQLite.
//!
//! A unique index on (studio_id, date, time_slot) makes the write itself the
//! final conflict check.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::Booking;

/// Append-only store of bookings.
///
/// Implementations keep insertion order and refuse a second booking for the
/// same studio, date and slot at write time.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Bookings for one studio on one date.
    async fn list(&self, studio_id: i64, date: NaiveDate) -> Result<Vec<Booking>, AppError>;

    /// Every booking, oldest first.
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;

    /// Persist a new booking, or fail with `AppError::SlotUnavailable` if the
    /// slot was taken in the meantime.
    async fn append(&self, booking: &Booking) -> Result<(), AppError>;

    /// Slot labels already booked for one studio on one date.
    async fn booked_slots(&self, studio_id: i64, date: NaiveDate) -> Result<Vec<String>, AppError> {
        Ok(self
            .list(studio_id, date)
            .await?
            .into_iter()
            .map(|b| b.time_slot)
            .collect())
    }
}

/// SQLite implementation of [`BookingStore`].
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for Repository {
    async fn list(&self, studio_id: i64, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, studio_id, studio_name, studio_type, location, date, time_slot,
                      user_name, user_email, created_at
               FROM bookings WHERE studio_id = ? AND date = ? ORDER BY seq"#,
        )
        .bind(studio_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, studio_id, studio_name, studio_type, location, date, time_slot,
                      user_name, user_email, created_at
               FROM bookings ORDER BY seq"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn append(&self, booking: &Booking) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"INSERT INTO bookings (
                id, studio_id, studio_name, studio_type, location, date, time_slot,
                user_name, user_email, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&booking.id)
        .bind(booking.studio_id)
        .bind(&booking.studio_name)
        .bind(&booking.studio_type)
        .bind(&booking.location)
        .bind(booking.date)
        .bind(&booking.time_slot)
        .bind(&booking.user_name)
        .bind(&booking.user_email)
        .bind(&booking.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::warn!(
                    studio_id = booking.studio_id,
                    date = %booking.date,
                    time_slot = %booking.time_slot,
                    "Slot taken at write time"
                );
                Err(AppError::slot_unavailable())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn booking_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Booking, AppError> {
    Ok(Booking {
        id: row.try_get("id")?,
        studio_id: row.try_get("studio_id")?,
        studio_name: row.try_get("studio_name")?,
        studio_type: row.try_get("studio_type")?,
        location: row.try_get("location")?,
        date: row.try_get("date")?,
        time_slot: row.try_get("time_slot")?,
        user_name: row.try_get("user_name")?,
        user_email: row.try_get("user_email")?,
        created_at: row.try_get("created_at")?,
    })
}
