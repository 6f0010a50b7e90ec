use range_grader::action::{ActionKey, ActionType, Sizing};
use range_grader::distribution::*;
use range_grader::error::GradeError;
use range_grader::hand::{HandClass, NUM_HANDS};

fn hand(s: &str) -> HandClass {
    HandClass::parse(s).unwrap()
}

fn raise(bb: f64) -> ActionKey {
    ActionKey::resolve(ActionType::Raise, Some(bb), "test").unwrap()
}

#[test]
fn test_sum_within_tolerance_accepted() {
    let dist = normalize(
        vec![(
            hand("AKo"),
            vec![
                RawAction::sized(ActionType::Raise, 60.0, 2.5),
                RawAction::new(ActionType::Fold, 40.005),
            ],
        )],
        &DistributionConfig::default(),
    )
    .unwrap();
    assert_eq!(dist.strategy(&hand("AKo")).frequency(&raise(2.5)), 60.0);
}

#[test]
fn test_sum_outside_tolerance_names_hand() {
    let err = normalize(
        vec![(
            hand("AKo"),
            vec![
                RawAction::sized(ActionType::Raise, 60.0, 2.5),
                RawAction::new(ActionType::Fold, 40.02),
            ],
        )],
        &DistributionConfig::default(),
    )
    .unwrap_err();
    match err {
        GradeError::InvalidDistribution { hand, .. } => assert_eq!(hand, "AKo"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_short_sum_rejected() {
    let result = normalize(
        vec![(hand("99"), vec![RawAction::new(ActionType::Call, 50.0)])],
        &DistributionConfig::default(),
    );
    assert!(matches!(result, Err(GradeError::InvalidDistribution { .. })));
}

#[test]
fn test_negative_frequency_rejected() {
    let result = normalize(
        vec![(
            hand("99"),
            vec![
                RawAction::new(ActionType::Call, 110.0),
                RawAction::new(ActionType::Fold, -10.0),
            ],
        )],
        &DistributionConfig::default(),
    );
    assert!(matches!(result, Err(GradeError::NegativeFrequency { .. })));
}

#[test]
fn test_raise_without_sizing_rejected() {
    let result = normalize(
        vec![(hand("AA"), vec![RawAction::new(ActionType::Raise, 100.0)])],
        &DistributionConfig::default(),
    );
    match result {
        Err(GradeError::MissingSizing { context, .. }) => assert!(context.contains("AA")),
        other => panic!("expected MissingSizing, got {:?}", other),
    }
}

#[test]
fn test_duplicate_action_rejected() {
    let result = normalize(
        vec![(
            hand("AA"),
            vec![
                RawAction::sized(ActionType::Raise, 50.0, 2.5),
                RawAction::sized(ActionType::Raise, 50.0, 2.5),
            ],
        )],
        &DistributionConfig::default(),
    );
    assert!(matches!(result, Err(GradeError::DuplicateAction { .. })));
}

#[test]
fn test_sizing_is_part_of_identity() {
    let dist = normalize(
        vec![(
            hand("AA"),
            vec![
                RawAction::sized(ActionType::Raise, 70.0, 2.0),
                RawAction::sized(ActionType::Raise, 30.0, 3.0),
            ],
        )],
        &DistributionConfig::default(),
    )
    .unwrap();
    let strategy = dist.strategy(&hand("AA"));
    assert_eq!(strategy.frequency(&raise(2.0)), 70.0);
    assert_eq!(strategy.frequency(&raise(3.0)), 30.0);
    assert_eq!(strategy.action_total(ActionType::Raise), 100.0);
    assert_eq!(Sizing::from_bb(2.0).unwrap().bb(), 2.0);
}

#[test]
fn test_absent_hand_is_implicit_fold() {
    let dist = normalize(
        vec![(hand("AA"), vec![RawAction::sized(ActionType::Raise, 100.0, 2.5)])],
        &DistributionConfig::default(),
    )
    .unwrap();
    assert_eq!(dist.len(), 1);
    assert!(!dist.contains(&hand("72o")));
    assert_eq!(dist.strategy(&hand("72o")).frequency(&ActionKey::FOLD), 100.0);
}

#[test]
fn test_reject_policy_requires_all_hands() {
    let config = DistributionConfig {
        missing_hands: MissingHandPolicy::Reject,
        ..DistributionConfig::default()
    };
    let result = normalize(
        vec![(hand("AA"), vec![RawAction::sized(ActionType::Raise, 100.0, 2.5)])],
        &config,
    );
    assert!(matches!(result, Err(GradeError::MissingHand(_))));

    let full = normalize_labeled(
        &[RawHandEntry {
            label: "22+, A2s+, K2s+, Q2s+, J2s+, T2s+, 92s+, 82s+, 72s+, 62s+, 52s+, 42s+, 32s, \
                    A2o+, K2o+, Q2o+, J2o+, T2o+, 92o+, 82o+, 72o+, 62o+, 52o+, 42o+, 32o"
                .to_string(),
            actions: vec![RawAction::new(ActionType::Fold, 100.0)],
        }],
        &config,
    )
    .unwrap();
    assert_eq!(full.len(), NUM_HANDS);
}

#[test]
fn test_labeled_groups_expand() {
    let dist = normalize_labeled(
        &[
            RawHandEntry {
                label: "QQ+, AKs".to_string(),
                actions: vec![RawAction::sized(ActionType::Raise, 100.0, 9.0)],
            },
            RawHandEntry {
                label: "JJ-99".to_string(),
                actions: vec![RawAction::new(ActionType::Call, 100.0)],
            },
        ],
        &DistributionConfig::default(),
    )
    .unwrap();
    assert_eq!(dist.len(), 7);
    assert_eq!(dist.strategy(&hand("TT")).frequency(&ActionKey::passive(ActionType::Call)), 100.0);
}

#[test]
fn test_overlapping_labels_rejected() {
    let result = normalize_labeled(
        &[
            RawHandEntry {
                label: "TT+".to_string(),
                actions: vec![RawAction::sized(ActionType::Raise, 100.0, 2.5)],
            },
            RawHandEntry {
                label: "QQ".to_string(),
                actions: vec![RawAction::new(ActionType::Call, 100.0)],
            },
        ],
        &DistributionConfig::default(),
    );
    match result {
        Err(GradeError::DuplicateHand(h)) => assert_eq!(h, "QQ"),
        other => panic!("expected DuplicateHand, got {:?}", other),
    }
}

#[test]
fn test_from_json() {
    let json = r#"[
        { "label": "AA", "actions": [{ "type": "RAISE", "frequency": 97, "sizing": 2.5 }, { "type": "CALL", "frequency": 3 }] },
        { "label": "72o", "actions": [{ "type": "FOLD", "frequency": 100 }] }
    ]"#;
    let dist = from_json(json, &DistributionConfig::default()).unwrap();
    let aa = dist.strategy(&hand("AA"));
    assert_eq!(aa.frequency(&raise(2.5)), 97.0);
    assert_eq!(aa.frequency(&ActionKey::passive(ActionType::Call)), 3.0);
}

#[test]
fn test_iteration_in_grid_order() {
    let dist = normalize(
        vec![
            (hand("22"), vec![RawAction::new(ActionType::Fold, 100.0)]),
            (hand("AA"), vec![RawAction::new(ActionType::Fold, 100.0)]),
            (hand("AKo"), vec![RawAction::new(ActionType::Fold, 100.0)]),
        ],
        &DistributionConfig::default(),
    )
    .unwrap();
    let order: Vec<String> = dist.iter().map(|(h, _)| h.to_string()).collect();
    assert_eq!(order, vec!["AA", "AKo", "22"]);
}
