//! Booking model persisted by the booking store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Studio;

/// A confirmed reservation of one hour slot.
///
/// Studio fields are denormalized at creation time so the bookings list
/// renders without the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub studio_id: i64,
    pub studio_name: String,
    pub studio_type: String,
    pub location: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub user_name: String,
    pub user_email: String,
    pub created_at: String,
}

impl Booking {
    /// Build a new booking for `studio` with a fresh id and creation timestamp.
    pub fn new(
        studio: &Studio,
        date: NaiveDate,
        time_slot: String,
        user_name: String,
        user_email: String,
    ) -> Self {
        Self {
            id: format!("booking-{}", uuid::Uuid::new_v4()),
            studio_id: studio.id,
            studio_name: studio.name.clone(),
            studio_type: studio.studio_type.clone(),
            location: studio.location.label(),
            date,
            time_slot,
            user_name,
            user_email,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Request body for `POST /api/bookings`.
///
/// Every form field is optional so that validation, not deserialization,
/// reports what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub studio_id: i64,
    /// ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

/// Response body for a confirmed booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking: Booking,
    /// Where the client can list all bookings.
    pub bookings_url: String,
}
