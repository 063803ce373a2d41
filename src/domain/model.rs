use crate::domain::purpose::Feature;
use crate::utils::error::{MeetError, Result};
use crate::utils::validation::validate_range;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// WGS84 座標；建構時即檢查經緯度範圍
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = MeetError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        validate_range("lat", lat, -90.0, 90.0)?;
        validate_range("lng", lng, -180.0, 180.0)?;
        Ok(Self { lat, lng })
    }

    /// 解析 "37.4979,127.0276" 形式的字串
    pub fn parse_pair(text: &str) -> Option<Result<Self>> {
        let (lat, lng) = text.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok()?;
        let lng = lng.trim().parse::<f64>().ok()?;
        Some(Self::new(lat, lng))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Venue {
    pub label: String,
    pub coordinate: Coordinate,
    pub venue_type: String,
    /// 依目錄中的順序保存，說明文字取前兩項
    pub features: Vec<Feature>,
}

impl Venue {
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: String,
    pub coordinate: Coordinate,
}

impl Participant {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CandidateWithDistance {
    pub venue: Venue,
    pub distance_from_centroid_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fairness {
    pub std: f64,
    pub mean: f64,
}

#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub venue: Venue,
    pub distance_from_centroid_km: f64,
    pub eta_by_participant: BTreeMap<String, u32>,
    pub fairness: Fairness,
    pub purpose_score: f64,
    pub total_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub rank: usize,
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    pub eta_by_participant: BTreeMap<String, u32>,
    pub fairness: Fairness,
    pub purpose_score: f64,
    pub explanation: String,
}

/// 參與者的出發地：自由文字地址或已知座標
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Text(String),
    Coordinate(Coordinate),
}

impl Origin {
    /// "LAT,LNG" 直接視為座標，其餘交給地址解析
    pub fn parse(text: &str) -> Result<Self> {
        match Coordinate::parse_pair(text) {
            Some(coordinate) => Ok(Origin::Coordinate(coordinate?)),
            None => Ok(Origin::Text(text.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRequest {
    pub name: String,
    pub origin: Origin,
}

impl ParticipantRequest {
    pub fn from_text(name: impl Into<String>, origin_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: Origin::Text(origin_text.into()),
        }
    }

    pub fn at(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            origin: Origin::Coordinate(coordinate),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub generated_at: DateTime<Utc>,
    pub purpose: String,
    pub participants: BTreeMap<String, Coordinate>,
    pub recommendations: Vec<Recommendation>,
}
