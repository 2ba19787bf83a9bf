//! Studio model for the static catalog.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether the pair is finite and within the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Where a studio is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioLocation {
    pub area: String,
    pub city: String,
    pub coordinates: Coordinate,
}

impl StudioLocation {
    /// "Area, City", as snapshotted onto bookings.
    pub fn label(&self) -> String {
        format!("{}, {}", self.area, self.city)
    }
}

/// Daily opening hours as "HH:MM" labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioAvailability {
    pub open: String,
    pub close: String,
}

/// A bookable recording studio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Studio {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub studio_type: String,
    pub location: StudioLocation,
    pub availability: StudioAvailability,
    pub price_per_hour: f64,
    pub currency: String,
    pub rating: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}
