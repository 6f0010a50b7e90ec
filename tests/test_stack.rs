use approx::assert_relative_eq;
use range_grader::error::GradeError;
use range_grader::stack::*;

#[test]
fn test_ratio_within_cap() {
    let config = StackConfig::default();
    assert_relative_eq!(config.stack_to_pot_ratio(20.0, 4.0).unwrap(), 5.0);
}

#[test]
fn test_ratio_clamped_to_cap() {
    let config = StackConfig::default();
    assert_eq!(config.stack_to_pot_ratio(100.0, 1.5).unwrap(), 10.0);
    assert_eq!(config.stack_to_pot_ratio(1000.0, 1.0).unwrap(), 10.0);
    assert!(config.raw_ratio(100.0, 1.5).unwrap() > 10.0);
}

#[test]
fn test_zero_pot_rejected() {
    let config = StackConfig::default();
    assert!(matches!(config.stack_to_pot_ratio(100.0, 0.0), Err(GradeError::InvalidPot(_))));
    assert!(matches!(config.stack_to_pot_ratio(100.0, -1.0), Err(GradeError::InvalidPot(_))));
}

#[test]
fn test_negative_stack_rejected() {
    let config = StackConfig::default();
    assert!(matches!(config.stack_to_pot_ratio(-5.0, 4.0), Err(GradeError::InvalidStack(_))));
}

#[test]
fn test_zero_stack_is_bucket_zero() {
    let config = StackConfig::default();
    assert_eq!(config.bucket(0.0, 4.0).unwrap(), SprBucket(0));
}

#[test]
fn test_buckets() {
    let config = StackConfig::default();
    assert_eq!(config.bucket(20.0, 4.0).unwrap(), SprBucket(5));
    assert_eq!(config.bucket(19.9, 4.0).unwrap(), SprBucket(4));
    assert_eq!(config.bucket(100.0, 4.0).unwrap(), SprBucket(10));
    assert_eq!(config.bucket_for_ratio(37.0), SprBucket(10));
    assert_eq!(SprBucket(10).to_string(), "spr10");
}

#[test]
fn test_wider_buckets() {
    let config = StackConfig {
        bucket_width: 2.5,
        ..StackConfig::default()
    };
    assert_eq!(config.bucket_for_ratio(4.9), SprBucket(1));
    assert_eq!(config.bucket_for_ratio(5.0), SprBucket(2));
    assert_eq!(config.bucket_for_ratio(10.0), SprBucket(4));
}

#[test]
fn test_preflop_pots() {
    let config = StackConfig::default();
    assert_relative_eq!(config.pot_after_open(), 4.0);
    assert_relative_eq!(config.pot_after_open_and_call(), 6.5);
}

#[test]
fn test_capped_stack() {
    let config = StackConfig::default();
    assert_relative_eq!(config.capped_stack(100.0, 6.5).unwrap(), 65.0);
    assert_relative_eq!(config.capped_stack(30.0, 6.5).unwrap(), 30.0);
    assert!(config.capped_stack(30.0, 0.0).is_err());
}

#[test]
fn test_invalid_config_rejected() {
    let config = StackConfig {
        max_stack_to_pot_ratio: 0.0,
        ..StackConfig::default()
    };
    assert!(config.validate().is_err());
    let config = StackConfig {
        bucket_width: -1.0,
        ..StackConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(StackConfig::default().validate().is_ok());
}

#[test]
fn test_street_pot() {
    use range_grader::scenario::Street;

    let config = StackConfig::default();
    // 1.5 blinds + 2.5 open + 2.5 call, rounded.
    assert_eq!(config.street_pot(Street::Preflop, 0.0).unwrap(), 7.0);
    assert_eq!(config.street_pot(Street::Preflop, 10.0).unwrap(), 7.0);
    assert_eq!(config.street_pot(Street::Flop, 3.0).unwrap(), 10.0);
    assert_eq!(config.street_pot(Street::Turn, 3.0).unwrap(), 13.0);
    assert_eq!(config.street_pot(Street::River, 3.0).unwrap(), 16.0);
    assert_eq!(config.street_pot(Street::Flop, 2.2).unwrap(), 9.0);
}

#[test]
fn test_street_pot_rejects_negative_bet() {
    use range_grader::scenario::Street;

    let config = StackConfig::default();
    assert!(config.street_pot(Street::Turn, -1.0).is_err());
    assert!(config.street_pot(Street::Turn, f64::NAN).is_err());
}
