use meetplanner::core::estimator::BASE_WAIT_MIN;
use meetplanner::core::geo::{centroid, distance_km};
use meetplanner::{
    Coordinate, MeetError, Participant, Purpose, RecommendationEngine, VenueCatalog,
};
use std::sync::Arc;

fn engine() -> RecommendationEngine {
    RecommendationEngine::new(Arc::new(VenueCatalog::seoul()))
}

fn gangnam_and_hongdae() -> anyhow::Result<Vec<Participant>> {
    Ok(vec![
        Participant::new("A", Coordinate::new(37.4979, 127.0276)?),
        Participant::new("B", Coordinate::new(37.5571, 126.9244)?),
    ])
}

#[test]
fn test_cafe_talk_between_gangnam_and_hongdae() -> anyhow::Result<()> {
    let engine = engine();
    let participants = gangnam_and_hongdae()?;

    let ranked = engine.rank_candidates(&participants, Purpose::CafeTalk)?;
    let recommendations = engine.recommend(&participants, Purpose::CafeTalk)?;
    let top = &recommendations[0];

    // 最高分的候選同時也是最靠近中心點的場所
    let best_score = ranked
        .iter()
        .map(|c| c.total_score)
        .fold(f64::MIN, f64::max);
    assert_eq!(ranked[0].total_score, best_score);
    assert_eq!(ranked[0].venue.label, top.label);

    let origins: Vec<Coordinate> = participants.iter().map(|p| p.coordinate).collect();
    let center = centroid(&origins).expect("two origins");
    let nearest = engine
        .catalog()
        .venues()
        .iter()
        .min_by(|a, b| {
            distance_km(&center, &a.coordinate).total_cmp(&distance_km(&center, &b.coordinate))
        })
        .expect("non-empty catalog");
    assert_eq!(top.label, nearest.label);

    assert_eq!(top.label, "Itaewon Station");
    assert_eq!(top.rank, 1);
    assert_eq!(top.eta_by_participant["A"], 25);
    assert_eq!(top.eta_by_participant["B"], 30);
    assert_eq!(top.fairness.mean, 27.5);
    assert_eq!(top.fairness.std, 3.54);
    assert_eq!(top.purpose_score, 140.0);
    assert_eq!(ranked[0].total_score, 108.55);
    assert_eq!(
        top.explanation,
        "Travel times have a moderate spread. \
         Moderate travel of about 28 minutes on average. \
         The area has lots of good restaurants and cultural venues. \
         A good place for a chat over coffee."
    );

    for rec in &recommendations {
        for minutes in rec.eta_by_participant.values() {
            assert!(f64::from(*minutes) >= BASE_WAIT_MIN);
        }
    }
    Ok(())
}

#[test]
fn test_unknown_purpose_uses_default_preferences() -> anyhow::Result<()> {
    let engine = engine();
    let participants = gangnam_and_hongdae()?;

    let recommendations = engine.recommend(&participants, Purpose::from_tag("karaoke night"))?;

    assert_eq!(recommendations.len(), 5);
    // 預設偏好 {cafe, restaurant}：新林站兩項皆符合而勝出
    assert_eq!(recommendations[0].label, "Sillim Station");
    assert_eq!(recommendations[0].purpose_score, 140.0);
    assert!(recommendations[0].explanation.ends_with("A good place for meeting up."));
    Ok(())
}

#[test]
fn test_single_participant_is_invalid_input() -> anyhow::Result<()> {
    let result = engine().recommend(
        &[Participant::new("A", Coordinate::new(37.4979, 127.0276)?)],
        Purpose::CafeTalk,
    );
    assert!(matches!(result, Err(MeetError::InvalidInput { .. })));
    Ok(())
}

#[test]
fn test_out_of_range_coordinate_is_invalid_input() -> anyhow::Result<()> {
    let participants = vec![
        Participant::new("A", Coordinate::new(37.4979, 127.0276)?),
        // 直接以結構字面值建構，繞過 Coordinate::new
        Participant {
            name: "B".to_string(),
            coordinate: Coordinate {
                lat: 123.0,
                lng: 126.9,
            },
        },
    ];
    let result = engine().recommend(&participants, Purpose::CafeTalk);
    assert!(matches!(result, Err(MeetError::InvalidInput { .. })));
    Ok(())
}

#[test]
fn test_recommend_is_idempotent() -> anyhow::Result<()> {
    let engine = engine();
    let participants = gangnam_and_hongdae()?;

    let first = serde_json::to_string(&engine.recommend(&participants, Purpose::Date)?)?;
    let second = serde_json::to_string(&engine.recommend(&participants, Purpose::Date)?)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_engine_is_shared_across_threads() -> anyhow::Result<()> {
    let engine = Arc::new(engine());
    let participants = gangnam_and_hongdae()?;
    let expected = engine.recommend(&participants, Purpose::Study)?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let participants = participants.clone();
            std::thread::spawn(move || engine.recommend(&participants, Purpose::Study))
        })
        .collect();

    for handle in handles {
        let result = handle.join().expect("thread panicked")?;
        assert_eq!(result, expected);
    }
    Ok(())
}
