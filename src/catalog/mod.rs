//! Static studio catalog.
//!
//! Loaded once at startup, either from a JSON file or from the catalog compiled
//! into the binary, and read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use crate::availability;
use crate::errors::AppError;
use crate::models::Studio;

/// Catalog shipped with the binary.
const EMBEDDED_CATALOG: &str = include_str!("../../data/studios.json");

/// In-memory list of studios in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    studios: Vec<Studio>,
}

impl Catalog {
    /// Load the catalog from `path`, or the embedded one when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Config(format!(
                        "Failed to read catalog {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_json(&raw)
            }
            None => Self::from_json(EMBEDDED_CATALOG),
        }
    }

    /// Parse and validate a JSON array of studios.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let studios: Vec<Studio> = serde_json::from_str(raw)
            .map_err(|e| AppError::Config(format!("Invalid catalog JSON: {}", e)))?;
        Self::new(studios)
    }

    /// Build a catalog, rejecting duplicate ids, out-of-range ratings and
    /// hours that cannot produce slots.
    pub fn new(studios: Vec<Studio>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for studio in &studios {
            if !seen.insert(studio.id) {
                return Err(AppError::Config(format!(
                    "Duplicate studio id {} in catalog",
                    studio.id
                )));
            }
            if !(0.0..=5.0).contains(&studio.rating) {
                return Err(AppError::Config(format!(
                    "Studio {} has rating {} outside 0-5",
                    studio.id, studio.rating
                )));
            }
            availability::generate_slots(&studio.availability.open, &studio.availability.close)
                .map_err(|e| {
                    AppError::Config(format!(
                        "Studio {} has invalid hours: {}",
                        studio.id,
                        e.message()
                    ))
                })?;
        }

        Ok(Self { studios })
    }

    pub fn studios(&self) -> &[Studio] {
        &self.studios
    }

    pub fn get(&self, id: i64) -> Option<&Studio> {
        self.studios.iter().find(|s| s.id == id)
    }

    /// Studios whose area or city contains `query`, ignoring case.
    ///
    /// A blank query returns the whole catalog in its original order.
    pub fn filter_by_location(&self, query: &str) -> Vec<&Studio> {
        // Whitespace-only queries count as blank and match everything.
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.studios.iter().collect();
        }

        self.studios
            .iter()
            .filter(|studio| {
                studio.location.area.to_lowercase().contains(&needle)
                    || studio.location.city.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Distinct areas and cities containing `query`, areas first.
    pub fn location_suggestions(&self, query: &str) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let areas = self.studios.iter().map(|s| s.location.area.as_str());
        let cities = self.studios.iter().map(|s| s.location.city.as_str());

        let mut seen = HashSet::new();
        areas
            .chain(cities)
            .filter(|place| seen.insert(*place))
            .filter(|place| place.to_lowercase().contains(&needle))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_json(
            r#"[
            {"id": 1, "name": "A", "type": "Recording Studio",
             "location": {"area": "Gulshan", "city": "Dhaka", "coordinates": {"latitude": 23.79, "longitude": 90.41}},
             "availability": {"open": "09:00", "close": "12:00"},
             "pricePerHour": 100, "currency": "BDT", "rating": 4, "amenities": []},
            {"id": 2, "name": "B", "type": "Podcast Studio",
             "location": {"area": "Agrabad", "city": "Chittagong", "coordinates": {"latitude": 22.32, "longitude": 91.81}},
             "availability": {"open": "10:00", "close": "18:00"},
             "pricePerHour": 200, "currency": "BDT", "rating": 3.5, "amenities": ["Mic"]},
            {"id": 3, "name": "C", "type": "Rehearsal Space",
             "location": {"area": "Gulshan", "city": "Dhaka", "coordinates": {"latitude": 23.80, "longitude": 90.40}},
             "availability": {"open": "08:00", "close": "20:00"},
             "pricePerHour": 150, "currency": "BDT", "rating": 5, "amenities": []}
        ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::load(None).unwrap();
        assert!(!catalog.studios().is_empty());
        assert!(catalog.get(3).is_some());
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let catalog = sample();
        let ids: Vec<i64> = catalog.filter_by_location("").iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.filter_by_location("   ").len(), 3);
    }

    #[test]
    fn test_filter_matches_area_or_city_case_insensitively() {
        let catalog = sample();

        let ids: Vec<i64> = catalog
            .filter_by_location("DHAKA")
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let ids: Vec<i64> = catalog
            .filter_by_location("grab")
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![2]);

        assert!(catalog.filter_by_location("Sylhet").is_empty());
    }

    #[test]
    fn test_suggestions_are_deduplicated_areas_then_cities() {
        let catalog = sample();
        assert_eq!(catalog.location_suggestions("a"), vec![
            "Gulshan",
            "Agrabad",
            "Dhaka",
            "Chittagong"
        ]);
        assert_eq!(catalog.location_suggestions("gul"), vec!["Gulshan"]);
        assert!(catalog.location_suggestions("").is_empty());
        assert!(catalog.location_suggestions("zzz").is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut studios = sample().studios().to_vec();
        studios.push(studios[0].clone());
        let err = Catalog::new(studios).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_overnight_hours_are_rejected() {
        let mut studios = sample().studios().to_vec();
        studios[0].availability.open = "22:00".to_string();
        studios[0].availability.close = "02:00".to_string();
        assert!(Catalog::new(studios).is_err());
    }

    #[test]
    fn test_malformed_catalog_json() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(AppError::Config(_))
        ));
    }
}
