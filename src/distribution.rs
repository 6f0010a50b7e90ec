//! Per-hand action frequencies and their validation.
//!
//! Raw entries come straight from the caller (one `{type, frequency, sizing}`
//! list per hand) and only become an `ActionDistribution` by passing through
//! `normalize`, so everything downstream can assume valid frequencies.

use std::collections::btree_map::{self, BTreeMap};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::action::{ActionKey, ActionType};
use crate::error::{GradeError, GradeResult};
use crate::hand::{all_hands, HandClass};
use crate::ranges::parse_range;

fn default_sum_tolerance() -> f64 {
    0.01
}

/// What to do with a hand class the caller did not mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingHandPolicy {
    /// Treat the hand as 100% FOLD.
    #[default]
    ImplicitFold,
    /// Fail validation with `MissingHand`.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Allowed distance of a hand's frequency sum from 100.
    #[serde(default = "default_sum_tolerance")]
    pub sum_tolerance: f64,
    #[serde(default)]
    pub missing_hands: MissingHandPolicy,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            sum_tolerance: default_sum_tolerance(),
            missing_hands: MissingHandPolicy::default(),
        }
    }
}

/// One unvalidated action as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub action: ActionType,
    /// Percentage in 0..=100.
    pub frequency: f64,
    /// Bet/raise size in big blinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<f64>,
}

impl RawAction {
    pub fn new(action: ActionType, frequency: f64) -> RawAction {
        RawAction {
            action,
            frequency,
            sizing: None,
        }
    }

    pub fn sized(action: ActionType, frequency: f64, sizing: f64) -> RawAction {
        RawAction {
            action,
            frequency,
            sizing: Some(sizing),
        }
    }
}

/// A labelled group of hands sharing one action list. The label is range
/// notation: "AA", "AA, KK", "TT+", "KTs-KQs".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHandEntry {
    pub label: String,
    pub actions: Vec<RawAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    #[serde(flatten)]
    pub key: ActionKey,
    pub frequency: f64,
}

/// Validated strategy for one hand. Keys are unique; frequencies sum to 100
/// within tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandStrategy {
    entries: Vec<ActionEntry>,
}

static IMPLICIT_FOLD: Lazy<HandStrategy> = Lazy::new(|| HandStrategy {
    entries: vec![ActionEntry {
        key: ActionKey::FOLD,
        frequency: 100.0,
    }],
});

impl HandStrategy {
    pub fn implicit_fold() -> &'static HandStrategy {
        &IMPLICIT_FOLD
    }

    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }

    /// Frequency of `key`, 0 when the hand never takes it.
    pub fn frequency(&self, key: &ActionKey) -> f64 {
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| e.frequency)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, key: &ActionKey) -> bool {
        self.entries.iter().any(|e| &e.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = ActionKey> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    /// Frequency summed over every sizing of `action`.
    pub fn action_total(&self, action: ActionType) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.key.action == action)
            .map(|e| e.frequency)
            .sum()
    }

    fn validate(hand: &HandClass, raw: &[RawAction], tolerance: f64) -> GradeResult<HandStrategy> {
        let label = hand.to_string();
        let mut entries: Vec<ActionEntry> = Vec::with_capacity(raw.len());
        let mut sum = 0.0;

        for action in raw {
            if !action.frequency.is_finite() || action.frequency < 0.0 {
                return Err(GradeError::NegativeFrequency {
                    hand: label,
                    frequency: action.frequency,
                });
            }
            let key = ActionKey::resolve(action.action, action.sizing, &label)?;
            if entries.iter().any(|e| e.key == key) {
                return Err(GradeError::DuplicateAction {
                    hand: label,
                    action: key.to_string(),
                });
            }
            sum += action.frequency;
            entries.push(ActionEntry {
                key,
                frequency: action.frequency,
            });
        }

        if (sum - 100.0).abs() > tolerance {
            return Err(GradeError::InvalidDistribution { hand: label, sum });
        }
        Ok(HandStrategy { entries })
    }
}

/// Validated mapping from hand class to strategy. Iteration is always in
/// canonical grid order regardless of input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionDistribution {
    hands: BTreeMap<HandClass, HandStrategy>,
}

impl ActionDistribution {
    pub fn get(&self, hand: &HandClass) -> Option<&HandStrategy> {
        self.hands.get(hand)
    }

    /// Strategy for `hand`, falling back to 100% FOLD when absent.
    pub fn strategy(&self, hand: &HandClass) -> &HandStrategy {
        self.hands.get(hand).unwrap_or_else(|| HandStrategy::implicit_fold())
    }

    pub fn contains(&self, hand: &HandClass) -> bool {
        self.hands.contains_key(hand)
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, HandClass, HandStrategy> {
        self.hands.iter()
    }

    /// Share of all 1326 holdings that take `action` (any sizing), in percent.
    pub fn combo_frequency(&self, action: ActionType) -> f64 {
        let weighted: f64 = all_hands()
            .iter()
            .map(|h| h.weight() as f64 * self.strategy(h).action_total(action))
            .sum();
        weighted / crate::hand::TOTAL_COMBOS as f64
    }
}

/// Validate raw per-hand entries into an `ActionDistribution`.
///
/// Fails on the first hand whose frequencies are negative, duplicated, or do
/// not sum to 100 within `config.sum_tolerance`, and on raises/bets without a
/// sizing. The error names the offending hand.
pub fn normalize<I>(raw: I, config: &DistributionConfig) -> GradeResult<ActionDistribution>
where
    I: IntoIterator<Item = (HandClass, Vec<RawAction>)>,
{
    let mut hands = BTreeMap::new();
    for (hand, actions) in raw {
        if hands.contains_key(&hand) {
            return Err(GradeError::DuplicateHand(hand.to_string()));
        }
        let strategy = HandStrategy::validate(&hand, &actions, config.sum_tolerance)?;
        hands.insert(hand, strategy);
    }

    if config.missing_hands == MissingHandPolicy::Reject {
        if let Some(missing) = all_hands().iter().find(|h| !hands.contains_key(*h)) {
            return Err(GradeError::MissingHand(missing.to_string()));
        }
    }

    log::debug!("normalized distribution with {} explicit hands", hands.len());
    Ok(ActionDistribution { hands })
}

/// Expand labelled groups and validate them. A hand reached by two labels is
/// a `DuplicateHand` error.
pub fn normalize_labeled(entries: &[RawHandEntry], config: &DistributionConfig) -> GradeResult<ActionDistribution> {
    let mut expanded = Vec::new();
    for entry in entries {
        for hand in parse_range(&entry.label)? {
            expanded.push((hand, entry.actions.clone()));
        }
    }
    normalize(expanded, config)
}

/// Parse a JSON array of `{label, actions}` records and validate it.
pub fn from_json(json: &str, config: &DistributionConfig) -> GradeResult<ActionDistribution> {
    let entries: Vec<RawHandEntry> = serde_json::from_str(json)?;
    normalize_labeled(&entries, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> HandClass {
        HandClass::parse(s).unwrap()
    }

    #[test]
    fn two_raise_sizes_coexist() {
        let dist = normalize(
            vec![(
                hand("AA"),
                vec![
                    RawAction::sized(ActionType::Raise, 50.0, 2.0),
                    RawAction::sized(ActionType::Raise, 50.0, 3.0),
                ],
            )],
            &DistributionConfig::default(),
        )
        .unwrap();
        let strategy = dist.strategy(&hand("AA"));
        assert_eq!(strategy.entries().len(), 2);
        assert!((strategy.action_total(ActionType::Raise) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn same_sizing_twice_rejected() {
        let err = normalize(
            vec![(
                hand("AA"),
                vec![
                    RawAction::sized(ActionType::Raise, 50.0, 2.5),
                    RawAction::sized(ActionType::Raise, 50.0, 2.5),
                ],
            )],
            &DistributionConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GradeError::DuplicateAction { .. }));
    }

    #[test]
    fn absent_hand_is_fold() {
        let dist = normalize(Vec::new(), &DistributionConfig::default()).unwrap();
        assert_eq!(dist.strategy(&hand("72o")).frequency(&ActionKey::FOLD), 100.0);
        assert!(!dist.contains(&hand("72o")));
    }
}
