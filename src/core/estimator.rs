use crate::core::geo::distance_km;
use crate::domain::model::Coordinate;

/// Mean public transit speed in km/h.
pub const AVG_SPEED_KMH: f64 = 18.0;

/// Fixed boarding and transfer overhead in minutes.
pub const BASE_WAIT_MIN: f64 = 8.0;

/// Linear transit-time model: straight-line distance at a fixed mean speed
/// plus a fixed wait.
#[derive(Debug, Clone, Copy)]
pub struct EtaEstimator {
    avg_speed_kmh: f64,
    base_wait_min: f64,
}

impl Default for EtaEstimator {
    fn default() -> Self {
        Self {
            avg_speed_kmh: AVG_SPEED_KMH,
            base_wait_min: BASE_WAIT_MIN,
        }
    }
}

impl EtaEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Travel time in whole minutes, rounded half to even.
    pub fn estimate(&self, origin: &Coordinate, destination: &Coordinate) -> u32 {
        self.minutes_for_distance(distance_km(origin, destination))
    }

    pub fn minutes_for_distance(&self, km: f64) -> u32 {
        let minutes = (km / self.avg_speed_kmh) * 60.0 + self.base_wait_min;
        minutes.round_ties_even().max(0.0) as u32
    }
}
