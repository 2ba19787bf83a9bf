//! Studio catalog endpoints.

use axum::extract::State;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::extract::{Path, Query};
use super::{success, ApiResult};
use crate::availability::{self, TimeSlot};
use crate::errors::AppError;
use crate::geo::{self, RadiusSearch};
use crate::models::{Coordinate, Studio};
use crate::AppState;

/// Text search query parameters.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    /// Free text matched against area and city.
    #[serde(default)]
    pub q: String,
}

/// Nearby search query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub radius_km: Option<f64>,
}

/// Availability query parameters.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub date: Option<String>,
}

/// Free slots for one studio on one date.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub studio_id: i64,
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// GET /api/studios - List studios, optionally filtered by location text.
pub async fn list_studios(
    State(state): State<AppState>,
    Query(params): Query<LocationQuery>,
) -> ApiResult<Vec<Studio>> {
    let studios = state
        .catalog
        .filter_by_location(&params.q)
        .into_iter()
        .cloned()
        .collect();

    success(studios)
}

/// GET /api/studios/suggestions - Areas and cities matching the query.
pub async fn location_suggestions(
    State(state): State<AppState>,
    Query(params): Query<LocationQuery>,
) -> ApiResult<Vec<String>> {
    success(state.catalog.location_suggestions(&params.q))
}

/// GET /api/studios/nearby - Studios within a radius of the user's position.
pub async fn nearby_studios(
    State(state): State<AppState>,
    Query(params): Query<NearbyQuery>,
) -> ApiResult<RadiusSearch> {
    let origin = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
        _ => None,
    };

    success(geo::resolve_radius_search(
        state.catalog.studios(),
        origin,
        params.radius_km,
    )?)
}

/// GET /api/studios/:id - Get a single studio.
pub async fn get_studio(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Studio> {
    match state.catalog.get(id) {
        Some(studio) => success(studio.clone()),
        None => Err(AppError::NotFound(format!("Studio {} not found", id))),
    }
}

/// GET /api/studios/:id/availability - Free slots for a date.
pub async fn studio_availability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<AvailabilityQuery>,
) -> ApiResult<AvailabilityResponse> {
    let studio = state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Studio {} not found", id)))?;

    let date = match params.date.as_deref().map(str::trim) {
        None | Some("") => {
            return Err(AppError::Validation("Please select a date".to_string()));
        }
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map_err(|_| AppError::Validation("Please select a valid date".to_string()))?,
    };

    let booked = state.store.booked_slots(studio.id, date).await?;
    let slots = availability::available_slots(
        &studio.availability.open,
        &studio.availability.close,
        booked.as_slice(),
    )?;

    success(AvailabilityResponse {
        studio_id: studio.id,
        date,
        slots,
    })
}
