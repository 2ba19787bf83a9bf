//! Booking endpoints.

use axum::extract::State;

use super::extract::Json;
use super::{success, ApiResult};
use crate::booking::{BookingForm, BOOKINGS_URL};
use crate::errors::AppError;
use crate::models::{Booking, BookingConfirmation, CreateBookingRequest};
use crate::AppState;

/// GET /api/bookings - List all bookings, oldest first.
pub async fn list_bookings(State(state): State<AppState>) -> ApiResult<Vec<Booking>> {
    success(state.store.list_all().await?)
}

/// POST /api/bookings - Reserve a slot.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> ApiResult<BookingConfirmation> {
    let studio = state.catalog.get(request.studio_id).ok_or_else(|| {
        AppError::NotFound(format!("Studio {} not found", request.studio_id))
    })?;

    let mut form = BookingForm::from_request(studio, &request);
    match form.submit(state.store.as_ref()).await {
        Ok(booking) => success(BookingConfirmation {
            booking,
            bookings_url: BOOKINGS_URL.to_string(),
        }),
        Err(e) => {
            tracing::debug!(
                studio_id = studio.id,
                "Booking rejected: {}",
                form.error().unwrap_or(e.message())
            );
            Err(e)
        }
    }
}
