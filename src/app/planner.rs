use crate::core::engine::{RecommendationEngine, MIN_PARTICIPANTS};
use crate::domain::model::{Origin, Participant, ParticipantRequest, RecommendationReport};
use crate::domain::ports::AddressResolver;
use crate::domain::purpose::Purpose;
use crate::utils::error::{MeetError, Result};
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// 把參與者的出發地解析成座標，再交給推薦引擎
#[derive(Clone)]
pub struct MeetingPlanner {
    resolver: Arc<dyn AddressResolver>,
    engine: RecommendationEngine,
}

impl MeetingPlanner {
    pub fn new(resolver: Arc<dyn AddressResolver>, engine: RecommendationEngine) -> Self {
        Self { resolver, engine }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub async fn plan(
        &self,
        requests: &[ParticipantRequest],
        purpose: &str,
    ) -> Result<RecommendationReport> {
        validate_requests(requests)?;

        let purpose = Purpose::from_tag(purpose);
        tracing::info!(
            "🗺️  Planning for {} participants (purpose: {}, resolver: {})",
            requests.len(),
            purpose.tag(),
            self.resolver.name()
        );

        let participants = self.resolve_all(requests).await?;
        let recommendations = self.engine.recommend(&participants, purpose)?;

        tracing::info!("✅ Produced {} recommendations", recommendations.len());

        Ok(RecommendationReport {
            generated_at: Utc::now(),
            purpose: purpose.tag().to_string(),
            participants: participants
                .into_iter()
                .map(|p| (p.name, p.coordinate))
                .collect::<BTreeMap<_, _>>(),
            recommendations,
        })
    }

    // 依序解析，遇到第一個找不到的出發地即中止
    async fn resolve_all(&self, requests: &[ParticipantRequest]) -> Result<Vec<Participant>> {
        let mut participants = Vec::with_capacity(requests.len());
        for request in requests {
            let coordinate = match &request.origin {
                Origin::Coordinate(coordinate) => *coordinate,
                Origin::Text(text) => match self.resolver.resolve(text).await? {
                    Some(coordinate) => coordinate,
                    None => {
                        tracing::warn!("Could not resolve '{}' for {}", text, request.name);
                        return Err(MeetError::UnresolvedAddress {
                            participant: request.name.clone(),
                            origin: text.clone(),
                        });
                    }
                },
            };
            tracing::debug!(
                "{} starts at ({}, {})",
                request.name,
                coordinate.lat,
                coordinate.lng
            );
            participants.push(Participant::new(request.name.clone(), coordinate));
        }
        Ok(participants)
    }
}

fn validate_requests(requests: &[ParticipantRequest]) -> Result<()> {
    if requests.len() < MIN_PARTICIPANTS {
        return Err(MeetError::invalid_input(format!(
            "at least {} participants are required, got {}",
            MIN_PARTICIPANTS,
            requests.len()
        )));
    }

    let mut seen = HashSet::new();
    for request in requests {
        if request.name.trim().is_empty() {
            return Err(MeetError::invalid_input("participant name cannot be empty"));
        }
        if let Origin::Text(text) = &request.origin {
            if text.trim().is_empty() {
                return Err(MeetError::invalid_input(format!(
                    "participant '{}' has an empty origin",
                    request.name
                )));
            }
        }
        if !seen.insert(request.name.as_str()) {
            return Err(MeetError::invalid_input(format!(
                "duplicate participant name '{}'",
                request.name
            )));
        }
    }
    Ok(())
}
