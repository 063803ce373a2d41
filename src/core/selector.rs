use crate::core::catalog::VenueCatalog;
use crate::core::geo::{centroid, distance_km};
use crate::domain::model::{CandidateWithDistance, Coordinate};
use crate::utils::error::{MeetError, Result};
use std::sync::Arc;

/// Narrows the catalog down to the venues nearest the participants' centroid.
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    catalog: Arc<VenueCatalog>,
}

impl CandidateSelector {
    pub fn new(catalog: Arc<VenueCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &VenueCatalog {
        &self.catalog
    }

    /// Returns up to `max_candidates` venues ordered by distance from the
    /// centroid, nearest first. Equal distances keep catalog order.
    pub fn select(
        &self,
        participants: &[Coordinate],
        max_candidates: usize,
    ) -> Result<Vec<CandidateWithDistance>> {
        if max_candidates == 0 {
            return Err(MeetError::invalid_input("max_candidates must be at least 1"));
        }
        let origin = centroid(participants)
            .ok_or_else(|| MeetError::invalid_input("at least one participant is required"))?;

        let mut candidates: Vec<CandidateWithDistance> = self
            .catalog
            .venues()
            .iter()
            .map(|venue| CandidateWithDistance {
                distance_from_centroid_km: distance_km(&origin, &venue.coordinate),
                venue: venue.clone(),
            })
            .collect();

        // sort_by 為穩定排序，距離相同時保留目錄順序
        candidates.sort_by(|a, b| {
            a.distance_from_centroid_km
                .total_cmp(&b.distance_from_centroid_km)
        });
        candidates.truncate(max_candidates);

        tracing::debug!(
            "Selected {} candidates around centroid ({:.4}, {:.4})",
            candidates.len(),
            origin.lat,
            origin.lng
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Venue;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn venue(label: &str, lat: f64, lng: f64) -> Venue {
        Venue {
            label: label.to_string(),
            coordinate: coord(lat, lng),
            venue_type: "station".to_string(),
            features: vec![],
        }
    }

    fn small_selector() -> CandidateSelector {
        CandidateSelector::new(Arc::new(VenueCatalog::new(vec![
            venue("Far", 37.60, 127.00),
            venue("Near", 37.50, 127.00),
            venue("Twin A", 37.52, 127.00),
            venue("Twin B", 37.48, 127.00),
        ])))
    }

    #[test]
    fn test_select_orders_by_distance_from_centroid() {
        let selector = small_selector();
        let participants = [coord(37.49, 127.0), coord(37.51, 127.0)];

        let result = selector.select(&participants, 10).unwrap();

        let labels: Vec<&str> = result.iter().map(|c| c.venue.label.as_str()).collect();
        assert_eq!(labels[0], "Near");
        assert_eq!(labels[3], "Far");
        assert!(result[0].distance_from_centroid_km < 1e-9);
        assert!(result
            .windows(2)
            .all(|w| w[0].distance_from_centroid_km <= w[1].distance_from_centroid_km));
    }

    #[test]
    fn test_select_ties_keep_catalog_order() {
        let selector = CandidateSelector::new(Arc::new(VenueCatalog::new(vec![
            venue("First", 37.50, 127.01),
            venue("Second", 37.50, 126.99),
        ])));

        let result = selector.select(&[coord(37.50, 127.00)], 2).unwrap();

        assert_eq!(
            result[0].distance_from_centroid_km,
            result[1].distance_from_centroid_km
        );
        assert_eq!(result[0].venue.label, "First");
        assert_eq!(result[1].venue.label, "Second");
    }

    #[test]
    fn test_select_truncates_to_max_candidates() {
        let selector = small_selector();
        let result = selector.select(&[coord(37.5, 127.0)], 2).unwrap();
        assert_eq!(result.len(), 2);

        let all = selector.select(&[coord(37.5, 127.0)], 50).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_select_rejects_empty_participants() {
        let selector = small_selector();
        let result = selector.select(&[], 5);
        assert!(matches!(result, Err(MeetError::InvalidInput { .. })));
    }

    #[test]
    fn test_select_rejects_zero_candidates() {
        let selector = small_selector();
        assert!(selector.select(&[coord(37.5, 127.0)], 0).is_err());
    }
}
