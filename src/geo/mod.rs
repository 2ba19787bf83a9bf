//! Great-circle distance and radius filtering over the catalog.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Coordinate, Studio};

/// Mean Earth radius used by the spherical approximation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius used when the client does not pick one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Notice returned when no usable user position was supplied.
pub const LOCATION_UNAVAILABLE_NOTICE: &str =
    "Unable to access your location. Please check your browser settings and try again.";

/// Haversine distance in kilometers between two coordinates.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Keep studios within `radius_km` of `origin`, preserving catalog order.
pub fn filter_by_radius<'a>(
    studios: &'a [Studio],
    origin: Coordinate,
    radius_km: f64,
) -> Vec<&'a Studio> {
    studios
        .iter()
        .filter(|studio| haversine_km(origin, studio.location.coordinates) <= radius_km)
        .collect()
}

/// Outcome of a nearby search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusSearch {
    pub studios: Vec<Studio>,
    /// False when the position was missing and the catalog came back unfiltered.
    pub applied: bool,
    pub radius_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Apply the radius filter if a usable position is known.
///
/// A missing or out-of-range position leaves the filter unapplied and
/// attaches a user-facing notice instead of failing.
pub fn resolve_radius_search(
    studios: &[Studio],
    origin: Option<Coordinate>,
    radius_km: Option<f64>,
) -> Result<RadiusSearch, AppError> {
    let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(AppError::Validation(
            "Search radius must be a positive number of kilometers".to_string(),
        ));
    }

    match origin.filter(Coordinate::is_valid) {
        Some(origin) => Ok(RadiusSearch {
            studios: filter_by_radius(studios, origin, radius_km)
                .into_iter()
                .cloned()
                .collect(),
            applied: true,
            radius_km,
            notice: None,
        }),
        None => {
            tracing::debug!("Radius search without a usable position, returning full catalog");
            Ok(RadiusSearch {
                studios: studios.to_vec(),
                applied: false,
                radius_km,
                notice: Some(LOCATION_UNAVAILABLE_NOTICE.to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StudioAvailability, StudioLocation};

    fn studio_at(id: i64, latitude: f64, longitude: f64) -> Studio {
        Studio {
            id,
            name: format!("Studio {}", id),
            studio_type: "Recording Studio".to_string(),
            location: StudioLocation {
                area: "Area".to_string(),
                city: "City".to_string(),
                coordinates: Coordinate::new(latitude, longitude),
            },
            availability: StudioAvailability {
                open: "09:00".to_string(),
                close: "18:00".to_string(),
            },
            price_per_hour: 1000.0,
            currency: "BDT".to_string(),
            rating: 4.0,
            amenities: vec![],
            images: vec![],
        }
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.5, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric_and_zero_on_self() {
        let dhaka = Coordinate::new(23.8103, 90.4125);
        let chittagong = Coordinate::new(22.3569, 91.7832);

        assert_eq!(haversine_km(dhaka, dhaka), 0.0);
        let there = haversine_km(dhaka, chittagong);
        let back = haversine_km(chittagong, dhaka);
        assert!((there - back).abs() < 1e-9);
        assert!(there > 200.0 && there < 220.0, "got {}", there);
    }

    #[test]
    fn test_filter_by_radius_keeps_boundary_and_order() {
        let studios = vec![
            studio_at(1, 0.0, 0.5),
            studio_at(2, 0.0, 5.0),
            studio_at(3, 0.0, 0.0),
        ];
        let kept = filter_by_radius(&studios, Coordinate::new(0.0, 0.0), 60.0);
        let ids: Vec<i64> = kept.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // The exact distance itself is inside the radius.
        let exact = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.5));
        assert_eq!(
            filter_by_radius(&studios, Coordinate::new(0.0, 0.0), exact).len(),
            2
        );
    }

    #[test]
    fn test_missing_position_falls_back_to_catalog() {
        let studios = vec![studio_at(1, 0.0, 0.0), studio_at(2, 10.0, 10.0)];
        let result = resolve_radius_search(&studios, None, Some(20.0)).unwrap();

        assert!(!result.applied);
        assert_eq!(result.studios.len(), 2);
        assert_eq!(result.notice.as_deref(), Some(LOCATION_UNAVAILABLE_NOTICE));
    }

    #[test]
    fn test_invalid_position_is_treated_as_unavailable() {
        let studios = vec![studio_at(1, 0.0, 0.0)];
        let result =
            resolve_radius_search(&studios, Some(Coordinate::new(123.0, 0.0)), None).unwrap();
        assert!(!result.applied);
        assert_eq!(result.radius_km, DEFAULT_RADIUS_KM);
    }

    #[test]
    fn test_non_positive_radius_is_rejected() {
        let studios = vec![studio_at(1, 0.0, 0.0)];
        let err = resolve_radius_search(&studios, Some(Coordinate::new(0.0, 0.0)), Some(0.0))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(resolve_radius_search(&studios, None, Some(f64::NAN)).is_err());
    }
}
