//! Fairness and purpose-fit scoring.
//!
//! The total score rewards purpose fit and penalises both the spread of
//! travel times and the average travel burden:
//!
//! ```text
//! total = purpose_score - std * 5 - mean * 0.5
//! ```

use crate::domain::model::Fairness;
use crate::domain::purpose::{Feature, Purpose};
use crate::utils::error::{MeetError, Result};

pub const BASE_PURPOSE_SCORE: f64 = 100.0;
pub const FEATURE_MATCH_BONUS: f64 = 20.0;
pub const STD_PENALTY_PER_MIN: f64 = 5.0;
pub const MEAN_PENALTY_PER_MIN: f64 = 0.5;

/// Rounds to two decimals, half to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// Mean and sample standard deviation (n - 1) of the travel times.
    ///
    /// A single participant has no spread: `std = 0`.
    pub fn fairness(&self, eta_minutes: &[u32]) -> Result<Fairness> {
        match eta_minutes {
            [] => Err(MeetError::invalid_input(
                "fairness needs at least one travel time",
            )),
            [only] => Ok(Fairness {
                std: 0.0,
                mean: f64::from(*only),
            }),
            _ => {
                let n = eta_minutes.len() as f64;
                let mean = eta_minutes.iter().map(|&m| f64::from(m)).sum::<f64>() / n;
                let variance = eta_minutes
                    .iter()
                    .map(|&m| (f64::from(m) - mean).powi(2))
                    .sum::<f64>()
                    / (n - 1.0);

                Ok(Fairness {
                    std: round2(variance.sqrt()),
                    mean: round2(mean),
                })
            }
        }
    }

    /// 100 plus 20 for every preferred feature of the purpose the venue offers.
    pub fn purpose_score(&self, features: &[Feature], purpose: Purpose) -> f64 {
        let matches = purpose
            .preferred_features()
            .iter()
            .filter(|preferred| features.contains(preferred))
            .count();
        BASE_PURPOSE_SCORE + FEATURE_MATCH_BONUS * matches as f64
    }

    pub fn total_score(&self, fairness: &Fairness, purpose_score: f64) -> f64 {
        round2(
            purpose_score
                - fairness.std * STD_PENALTY_PER_MIN
                - fairness.mean * MEAN_PENALTY_PER_MIN,
        )
    }
}
