use range_grader::cards::*;
use range_grader::error::GradeError;
use range_grader::hand::*;

#[test]
fn test_pair_weight() {
    let aa = HandClass::new(Rank::Ace, Rank::Ace, false).unwrap();
    assert_eq!(aa.weight(), 6);
    assert_eq!(aa.shape(), Shape::Pair);
}

#[test]
fn test_suited_weight() {
    let aks = HandClass::new(Rank::Ace, Rank::King, true).unwrap();
    assert_eq!(aks.weight(), 4);
}

#[test]
fn test_offsuit_weight() {
    let ako = HandClass::new(Rank::Ace, Rank::King, false).unwrap();
    assert_eq!(ako.weight(), 12);
}

#[test]
fn test_rank_order_irrelevant() {
    let a = HandClass::new(Rank::King, Rank::Ace, true).unwrap();
    let b = HandClass::new(Rank::Ace, Rank::King, true).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "AKs");
}

#[test]
fn test_suited_pair_rejected() {
    let err = HandClass::new(Rank::Queen, Rank::Queen, true).unwrap_err();
    assert!(matches!(err, GradeError::InvalidHand(_)));
}

#[test]
fn test_parse_valid() {
    assert_eq!(HandClass::parse("AA").unwrap().to_string(), "AA");
    assert_eq!(HandClass::parse("72o").unwrap().to_string(), "72o");
    assert_eq!(HandClass::parse("27o").unwrap().to_string(), "72o");
    assert_eq!(HandClass::parse("kqs").unwrap().to_string(), "KQs");
}

#[test]
fn test_parse_invalid() {
    for bad in ["", "A", "AK", "AAs", "AAo", "AKx", "1Ks", "AKs+", "XX"] {
        assert!(HandClass::parse(bad).is_err(), "{} should not parse", bad);
    }
}

#[test]
fn test_from_holding() {
    assert_eq!(HandClass::from_holding("AsKs").unwrap().to_string(), "AKs");
    assert_eq!(HandClass::from_holding("AsKh").unwrap().to_string(), "AKo");
    assert_eq!(HandClass::from_holding("7d7c").unwrap().to_string(), "77");
    assert!(HandClass::from_holding("AsAs").is_err());
}

#[test]
fn test_combos_match_weight() {
    for hand in all_hands() {
        let combos = hand.combos();
        assert_eq!(combos.len() as u32, hand.weight(), "{}", hand);
        for (c1, c2) in combos {
            assert_eq!(HandClass::from_cards(c1, c2).unwrap(), *hand);
        }
    }
}

#[test]
fn test_169_classes() {
    assert_eq!(all_hands().len(), NUM_HANDS);
    let pairs = all_hands().iter().filter(|h| h.shape() == Shape::Pair).count();
    let suited = all_hands().iter().filter(|h| h.shape() == Shape::Suited).count();
    let offsuit = all_hands().iter().filter(|h| h.shape() == Shape::Offsuit).count();
    assert_eq!((pairs, suited, offsuit), (13, 78, 78));
}

#[test]
fn test_serde_as_label() {
    let hand = HandClass::parse("T9s").unwrap();
    let json = serde_json::to_string(&hand).unwrap();
    assert_eq!(json, "\"T9s\"");
    let back: HandClass = serde_json::from_str(&json).unwrap();
    assert_eq!(back, hand);
    assert!(serde_json::from_str::<HandClass>("\"T9x\"").is_err());
}
