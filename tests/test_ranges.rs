use range_grader::hand::HandClass;
use range_grader::ranges::*;

fn labels(range: &str) -> Vec<String> {
    parse_range(range).unwrap().iter().map(|h| h.to_string()).collect()
}

#[test]
fn test_combo_count() {
    assert_eq!(combo_count(&HandClass::parse("AA").unwrap()), 6);
    assert_eq!(combo_count(&HandClass::parse("AKs").unwrap()), 4);
    assert_eq!(combo_count(&HandClass::parse("AKo").unwrap()), 12);
}

#[test]
fn test_parse_range_simple() {
    let result = labels("AA,KK,QQ");
    assert_eq!(result, vec!["AA", "KK", "QQ"]);
}

#[test]
fn test_parse_range_plus_pairs() {
    let result = labels("TT+");
    assert_eq!(result, vec!["AA", "KK", "QQ", "JJ", "TT"]);
}

#[test]
fn test_parse_range_plus_suited() {
    let result = labels("ATs+");
    assert_eq!(result, vec!["AKs", "AQs", "AJs", "ATs"]);
}

#[test]
fn test_parse_range_plus_offsuit() {
    let result = labels("K9o+");
    assert!(result.contains(&"KQo".to_string()));
    assert!(result.contains(&"K9o".to_string()));
    assert!(!result.contains(&"K8o".to_string()));
    assert!(!result.contains(&"KK".to_string()));
}

#[test]
fn test_parse_range_dash_pairs() {
    let result = labels("77-TT");
    assert_eq!(result.len(), 4);
    assert!(result.contains(&"77".to_string()));
    assert!(result.contains(&"TT".to_string()));
    assert!(!result.contains(&"66".to_string()));
    assert!(!result.contains(&"JJ".to_string()));
}

#[test]
fn test_parse_range_dash_suited() {
    let result = labels("KTs-KQs");
    assert_eq!(result, vec!["KQs", "KJs", "KTs"]);
}

#[test]
fn test_parse_range_mixed_whitespace() {
    let result = labels(" AA , KK, AKs,  AQs+ ");
    assert!(result.contains(&"AA".to_string()));
    assert!(result.contains(&"AKs".to_string()));
    assert!(result.contains(&"AQs".to_string()));
    assert_eq!(result.len(), 4);
}

#[test]
fn test_parse_range_empty() {
    assert!(parse_range("").unwrap().is_empty());
}

#[test]
fn test_parse_range_invalid() {
    assert!(parse_range("AA, ZZ").is_err());
    assert!(parse_range("AK").is_err());
}

#[test]
fn test_all_pairs_pct() {
    let pairs = parse_range("22+").unwrap();
    assert_eq!(total_combos(&pairs), 78);
    assert!((range_pct(&pairs) - (78.0 / 1326.0 * 100.0)).abs() < 1e-9);
}
