use crate::core::catalog::VenueCatalog;
use crate::core::estimator::EtaEstimator;
use crate::core::explanation::ExplanationSynthesizer;
use crate::core::scoring::ScoreEngine;
use crate::core::selector::CandidateSelector;
use crate::domain::model::{Coordinate, Participant, Recommendation, ScoredCandidate};
use crate::domain::purpose::Purpose;
use crate::utils::error::{MeetError, Result};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

pub const DEFAULT_MAX_CANDIDATES: usize = 50;
pub const TOP_K: usize = 5;
pub const MIN_PARTICIPANTS: usize = 2;

/// 推薦流程：選候選 → 估算每位參與者的 ETA → 評分 → 排序取前五 → 產生說明
///
/// 引擎本身不持有可變狀態，可在多個請求間共享。
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    selector: CandidateSelector,
    estimator: EtaEstimator,
    scorer: ScoreEngine,
    explainer: ExplanationSynthesizer,
    max_candidates: usize,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<VenueCatalog>) -> Self {
        Self {
            selector: CandidateSelector::new(catalog),
            estimator: EtaEstimator::default(),
            scorer: ScoreEngine::new(),
            explainer: ExplanationSynthesizer::new(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn catalog(&self) -> &VenueCatalog {
        self.selector.catalog()
    }

    pub fn recommend(
        &self,
        participants: &[Participant],
        purpose: Purpose,
    ) -> Result<Vec<Recommendation>> {
        let ranked = self.rank_candidates(participants, purpose)?;

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .take(TOP_K)
            .enumerate()
            .map(|(i, candidate)| {
                let explanation = self.explainer.explain(
                    &candidate.venue,
                    &candidate.eta_by_participant,
                    &candidate.fairness,
                    purpose,
                );
                Recommendation {
                    rank: i + 1,
                    label: candidate.venue.label,
                    lat: candidate.venue.coordinate.lat,
                    lng: candidate.venue.coordinate.lng,
                    eta_by_participant: candidate.eta_by_participant,
                    fairness: candidate.fairness,
                    purpose_score: candidate.purpose_score,
                    explanation,
                }
            })
            .collect();

        if let Some(top) = recommendations.first() {
            tracing::debug!(
                "Top recommendation for '{}': {} (std {}, mean {})",
                purpose.tag(),
                top.label,
                top.fairness.std,
                top.fairness.mean
            );
        }

        Ok(recommendations)
    }

    /// 所有候選依 total_score 由高到低排序（同分保留距離順序）
    pub fn rank_candidates(
        &self,
        participants: &[Participant],
        purpose: Purpose,
    ) -> Result<Vec<ScoredCandidate>> {
        validate_participants(participants)?;

        let origins: Vec<Coordinate> = participants.iter().map(|p| p.coordinate).collect();
        let candidates = self.selector.select(&origins, self.max_candidates)?;

        let mut scored = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let eta_by_participant: BTreeMap<String, u32> = participants
                .iter()
                .map(|p| {
                    (
                        p.name.clone(),
                        self.estimator
                            .estimate(&p.coordinate, &candidate.venue.coordinate),
                    )
                })
                .collect();

            let etas: Vec<u32> = participants
                .iter()
                .map(|p| eta_by_participant[&p.name])
                .collect();
            let fairness = self.scorer.fairness(&etas)?;
            let purpose_score = self
                .scorer
                .purpose_score(&candidate.venue.features, purpose);
            let total_score = self.scorer.total_score(&fairness, purpose_score);

            scored.push(ScoredCandidate {
                venue: candidate.venue,
                distance_from_centroid_km: candidate.distance_from_centroid_km,
                eta_by_participant,
                fairness,
                purpose_score,
                total_score,
            });
        }

        scored.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

        tracing::debug!(
            "Scored {} candidates for {} participants",
            scored.len(),
            participants.len()
        );

        Ok(scored)
    }
}

fn validate_participants(participants: &[Participant]) -> Result<()> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(MeetError::invalid_input(format!(
            "at least {} participants are required, got {}",
            MIN_PARTICIPANTS,
            participants.len()
        )));
    }

    let mut seen = HashSet::new();
    for participant in participants {
        if participant.name.trim().is_empty() {
            return Err(MeetError::invalid_input("participant name cannot be empty"));
        }
        // 欄位為公開，結構字面值可能繞過 Coordinate::new 的檢查
        Coordinate::new(participant.coordinate.lat, participant.coordinate.lng).map_err(|e| {
            MeetError::invalid_input(format!("participant '{}': {}", participant.name, e))
        })?;
        if !seen.insert(participant.name.as_str()) {
            return Err(MeetError::invalid_input(format!(
                "duplicate participant name '{}'",
                participant.name
            )));
        }
    }
    Ok(())
}
