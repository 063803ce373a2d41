use crate::domain::model::{Fairness, Venue};
use crate::domain::purpose::Purpose;
use std::collections::BTreeMap;

pub const SIMILAR_ARRIVAL_STD: f64 = 3.0;
pub const MODERATE_SPREAD_STD: f64 = 7.0;
pub const FAST_MEAN_MIN: f64 = 20.0;
pub const MODERATE_MEAN_MIN: f64 = 35.0;
const MAX_FEATURE_PHRASES: usize = 2;

/// Templated, rule-based justification for a recommended venue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationSynthesizer;

impl ExplanationSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Builds the explanation from four clauses in fixed order: spread of
    /// arrival times, average travel time, the neighbourhood, and purpose fit.
    /// The last two are omitted when there is nothing to say.
    pub fn explain(
        &self,
        venue: &Venue,
        eta_by_participant: &BTreeMap<String, u32>,
        fairness: &Fairness,
        purpose: Purpose,
    ) -> String {
        let mut sentences = Vec::with_capacity(4);

        sentences.push(spread_sentence(fairness.std));
        sentences.push(mean_sentence(fairness.mean, eta_by_participant));

        let phrases: Vec<&str> = venue
            .features
            .iter()
            .take(MAX_FEATURE_PHRASES)
            .map(|f| f.phrase())
            .collect();
        if !phrases.is_empty() {
            sentences.push(format!("The area has {}", phrases.join(" and ")));
        }

        if purpose
            .preferred_features()
            .iter()
            .any(|f| venue.has_feature(*f))
        {
            sentences.push(format!("A good place for {}", purpose.description()));
        }

        format!("{}.", sentences.join(". "))
    }
}

fn spread_sentence(std: f64) -> String {
    if std < SIMILAR_ARRIVAL_STD {
        "Everyone arrives around the same time".to_string()
    } else if std < MODERATE_SPREAD_STD {
        "Travel times have a moderate spread".to_string()
    } else {
        "Travel times show a noticeable spread, but the spot is still accessible".to_string()
    }
}

fn mean_sentence(mean: f64, eta_by_participant: &BTreeMap<String, u32>) -> String {
    let minutes = mean.round_ties_even() as i64;
    let longest = eta_by_participant.values().max().copied();
    if mean < FAST_MEAN_MIN {
        format!("Fast to reach, about {} minutes on average", minutes)
    } else if mean < MODERATE_MEAN_MIN {
        format!("Moderate travel of about {} minutes on average", minutes)
    } else {
        match longest {
            Some(longest) => format!(
                "Longer travel of about {} minutes on average (at most {}), but fair to all",
                minutes, longest
            ),
            None => format!(
                "Longer travel of about {} minutes on average, but fair to all",
                minutes
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Coordinate;
    use crate::domain::purpose::Feature;

    fn venue(features: Vec<Feature>) -> Venue {
        Venue {
            label: "Test Station".to_string(),
            coordinate: Coordinate::new(37.5, 127.0).unwrap(),
            venue_type: "station".to_string(),
            features,
        }
    }

    fn etas(values: &[u32]) -> BTreeMap<String, u32> {
        values
            .iter()
            .enumerate()
            .map(|(i, m)| (format!("P{}", i), *m))
            .collect()
    }

    #[test]
    fn test_full_explanation() {
        let explainer = ExplanationSynthesizer::new();
        let text = explainer.explain(
            &venue(vec![Feature::Cafe, Feature::Restaurant, Feature::Culture]),
            &etas(&[18, 20]),
            &Fairness {
                std: 1.41,
                mean: 19.0,
            },
            Purpose::CafeTalk,
        );

        assert_eq!(
            text,
            "Everyone arrives around the same time. \
             Fast to reach, about 19 minutes on average. \
             The area has plenty of cafes and lots of good restaurants. \
             A good place for a chat over coffee."
        );
    }

    #[test]
    fn test_thresholds_are_inclusive_lower_bounds() {
        let explainer = ExplanationSynthesizer::new();
        let v = venue(vec![]);

        let moderate = explainer.explain(
            &v,
            &etas(&[20, 25]),
            &Fairness {
                std: 3.0,
                mean: 20.0,
            },
            Purpose::Shopping,
        );
        assert!(moderate.starts_with("Travel times have a moderate spread. Moderate travel"));

        let wide = explainer.explain(
            &v,
            &etas(&[30, 45]),
            &Fairness {
                std: 7.0,
                mean: 35.0,
            },
            Purpose::Shopping,
        );
        assert!(wide.contains("noticeable spread"));
        assert!(wide.contains("Longer travel of about 35 minutes on average (at most 45)"));
    }

    #[test]
    fn test_optional_clauses_are_omitted() {
        let explainer = ExplanationSynthesizer::new();
        let text = explainer.explain(
            &venue(vec![]),
            &etas(&[10, 10]),
            &Fairness {
                std: 0.0,
                mean: 10.0,
            },
            Purpose::Business,
        );
        assert_eq!(
            text,
            "Everyone arrives around the same time. Fast to reach, about 10 minutes on average."
        );
    }

    #[test]
    fn test_purpose_clause_requires_matching_feature() {
        let explainer = ExplanationSynthesizer::new();
        let fairness = Fairness {
            std: 0.0,
            mean: 10.0,
        };
        let shops = venue(vec![Feature::Shopping]);

        let no_match = explainer.explain(&shops, &etas(&[10]), &fairness, Purpose::Culture);
        assert!(!no_match.contains("A good place for"));

        let general = explainer.explain(
            &venue(vec![Feature::Restaurant]),
            &etas(&[10]),
            &fairness,
            Purpose::from_tag("unknown"),
        );
        assert!(general.ends_with("A good place for meeting up."));
    }
}
