//! Closed sets of venue features and meeting purposes, with the lookup
//! tables the scorer and the explanation writer share.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Cafe,
    Restaurant,
    Shopping,
    Culture,
    Entertainment,
    Business,
}

impl Feature {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "cafe" => Some(Feature::Cafe),
            "restaurant" => Some(Feature::Restaurant),
            "shopping" => Some(Feature::Shopping),
            "culture" => Some(Feature::Culture),
            "entertainment" => Some(Feature::Entertainment),
            "business" => Some(Feature::Business),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Feature::Cafe => "cafe",
            Feature::Restaurant => "restaurant",
            Feature::Shopping => "shopping",
            Feature::Culture => "culture",
            Feature::Entertainment => "entertainment",
            Feature::Business => "business",
        }
    }

    /// Phrase used when describing the neighbourhood around a venue.
    pub fn phrase(self) -> &'static str {
        match self {
            Feature::Cafe => "plenty of cafes",
            Feature::Restaurant => "lots of good restaurants",
            Feature::Shopping => "good shopping",
            Feature::Culture => "cultural venues",
            Feature::Entertainment => "plenty to do",
            Feature::Business => "spots suited to business meetings",
        }
    }
}

/// Why the group is meeting.
///
/// `General` is the fallback for any tag outside the eight known purposes;
/// it prefers cafes and restaurants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Purpose {
    #[default]
    CafeTalk,
    Restaurant,
    Shopping,
    Business,
    Culture,
    Entertainment,
    Study,
    Date,
    General,
}

impl Purpose {
    pub const KNOWN: [Purpose; 8] = [
        Purpose::CafeTalk,
        Purpose::Restaurant,
        Purpose::Shopping,
        Purpose::Business,
        Purpose::Culture,
        Purpose::Entertainment,
        Purpose::Study,
        Purpose::Date,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "cafe_talk" => Purpose::CafeTalk,
            "restaurant" => Purpose::Restaurant,
            "shopping" => Purpose::Shopping,
            "business" => Purpose::Business,
            "culture" => Purpose::Culture,
            "entertainment" => Purpose::Entertainment,
            "study" => Purpose::Study,
            "date" => Purpose::Date,
            _ => Purpose::General,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Purpose::CafeTalk => "cafe_talk",
            Purpose::Restaurant => "restaurant",
            Purpose::Shopping => "shopping",
            Purpose::Business => "business",
            Purpose::Culture => "culture",
            Purpose::Entertainment => "entertainment",
            Purpose::Study => "study",
            Purpose::Date => "date",
            Purpose::General => "general",
        }
    }

    pub fn preferred_features(self) -> &'static [Feature] {
        match self {
            Purpose::CafeTalk => &[Feature::Cafe, Feature::Culture],
            Purpose::Restaurant => &[Feature::Restaurant],
            Purpose::Shopping => &[Feature::Shopping],
            Purpose::Business => &[Feature::Business, Feature::Cafe],
            Purpose::Culture => &[Feature::Culture],
            Purpose::Entertainment => &[Feature::Entertainment, Feature::Shopping],
            Purpose::Study => &[Feature::Cafe, Feature::Culture],
            Purpose::Date => &[Feature::Cafe, Feature::Restaurant, Feature::Culture],
            Purpose::General => &[Feature::Cafe, Feature::Restaurant],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Purpose::CafeTalk => "a chat over coffee",
            Purpose::Restaurant => "a meal together",
            Purpose::Shopping => "shopping",
            Purpose::Business => "a business meeting",
            Purpose::Culture => "a cultural outing",
            Purpose::Entertainment => "a fun day out",
            Purpose::Study => "a study session",
            Purpose::Date => "a date",
            Purpose::General => "meeting up",
        }
    }

    pub fn is_known(self) -> bool {
        self != Purpose::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_purpose_tags_round_trip() {
        for purpose in Purpose::KNOWN {
            assert_eq!(Purpose::from_tag(purpose.tag()), purpose);
            assert!(purpose.is_known());
        }
    }

    #[test]
    fn test_unknown_purpose_falls_back_to_general() {
        let purpose = Purpose::from_tag("karaoke");
        assert_eq!(purpose, Purpose::General);
        assert!(!purpose.is_known());
        assert_eq!(
            purpose.preferred_features(),
            &[Feature::Cafe, Feature::Restaurant]
        );
    }

    #[test]
    fn test_feature_tags_are_case_insensitive() {
        assert_eq!(Feature::from_tag(" Cafe "), Some(Feature::Cafe));
        assert_eq!(Feature::from_tag("nightlife"), None);
    }
}
