//! Booking store kept as one JSON array in a file.
//!
//! The file is read whole on every query and rewritten whole on every append.
//! A file that does not parse counts as an empty list.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use super::BookingStore;
use crate::errors::AppError;
use crate::models::Booking;

/// File-backed implementation of [`BookingStore`].
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write within this process only.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Booking>, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(bookings) => Ok(bookings),
            Err(e) => {
                tracing::warn!(
                    "Bookings file {:?} is unreadable, treating it as empty: {}",
                    self.path,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_all(&self, bookings: &[Booking]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(bookings)
            .map_err(|e| AppError::Internal(format!("Failed to encode bookings: {}", e)))?;

        // Write beside the target and rename so readers never see a partial file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl BookingStore for JsonFileStore {
    async fn list(&self, studio_id: i64, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .filter(|b| b.studio_id == studio_id && b.date == date)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        self.read_all().await
    }

    async fn append(&self, booking: &Booking) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut bookings = self.read_all().await?;
        let taken = bookings.iter().any(|b| {
            b.studio_id == booking.studio_id
                && b.date == booking.date
                && b.time_slot == booking.time_slot
        });
        if taken {
            tracing::warn!(
                studio_id = booking.studio_id,
                date = %booking.date,
                time_slot = %booking.time_slot,
                "Slot taken at write time"
            );
            return Err(AppError::slot_unavailable());
        }

        bookings.push(booking.clone());
        self.write_all(&bookings).await
    }
}
