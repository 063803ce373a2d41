//! Great-circle distance on a spherical Earth.

use crate::domain::model::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometers.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Arithmetic mean of latitudes and of longitudes, taken independently.
///
/// Not a spherical centroid: only meaningful when the points span a city,
/// and it misbehaves across the antimeridian. Returns `None` for an empty
/// slice.
pub fn centroid(points: &[Coordinate]) -> Option<Coordinate> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;
    // 有效座標的平均值必然仍在範圍內
    Some(Coordinate { lat, lng })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn test_same_point_is_zero() {
        let gangnam = coord(37.4979, 127.0276);
        assert_eq!(distance_km(&gangnam, &gangnam), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let gangnam = coord(37.4979, 127.0276);
        let hongdae = coord(37.5571, 126.9244);
        assert_eq!(
            distance_km(&gangnam, &hongdae),
            distance_km(&hongdae, &gangnam)
        );
    }

    #[test]
    fn test_known_city_distance() {
        // Gangnam to Hongik Univ. is roughly 11 km as the crow flies
        let d = distance_km(&coord(37.4979, 127.0276), &coord(37.5571, 126.9244));
        assert!(d > 10.5 && d < 11.5, "got {}", d);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance_km(&coord(0.0, 0.0), &coord(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn test_centroid_averages_independently() {
        let c = centroid(&[coord(37.0, 127.0), coord(38.0, 126.0)]).unwrap();
        assert!((c.lat - 37.5).abs() < 1e-12);
        assert!((c.lng - 126.5).abs() < 1e-12);
        assert!(centroid(&[]).is_none());
    }
}
