//! Hand-by-hand grading of a submitted range against a reference range.
//!
//! Every one of the 169 classes is graded; a class missing from either side
//! counts as 100% FOLD. Each action seen on either side gets an absolute
//! frequency delta. A hand with every delta inside the threshold is CORRECT;
//! otherwise each action gets its own verdict (any action the reference never
//! takes is EXTRA_ACTION, however small) and the hand takes the most severe:
//!
//! MISSING_ACTION > EXTRA_ACTION > FREQUENCY_ERROR > CORRECT
//!
//! The aggregate score is the combo-weighted share of CORRECT hands.

use std::collections::BTreeSet;
use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::action::ActionKey;
use crate::distribution::{ActionDistribution, HandStrategy};
use crate::error::{GradeError, GradeResult};
use crate::hand::{all_hands, HandClass};

fn default_frequency_threshold() -> f64 {
    5.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparatorConfig {
    /// Largest per-action difference, in percentage points, still graded
    /// CORRECT. Also the floor above which a reference action counts as
    /// material when the submission drops it.
    #[serde(default = "default_frequency_threshold")]
    pub frequency_threshold: f64,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            frequency_threshold: default_frequency_threshold(),
        }
    }
}

impl ComparatorConfig {
    pub fn validate(&self) -> GradeResult<()> {
        if !self.frequency_threshold.is_finite() || self.frequency_threshold < 0.0 {
            return Err(GradeError::InvalidValue(format!(
                "frequency_threshold must be non-negative, got {}",
                self.frequency_threshold
            )));
        }
        Ok(())
    }
}

/// Verdict for one action or one hand. Variants are declared from least to
/// most severe so `Ord` gives the precedence directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Correct,
    FrequencyError,
    ExtraAction,
    MissingAction,
}

pub const ALL_CLASSIFICATIONS: [Classification; 4] = [
    Classification::Correct,
    Classification::FrequencyError,
    Classification::ExtraAction,
    Classification::MissingAction,
];

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Correct => "CORRECT",
            Classification::FrequencyError => "FREQUENCY_ERROR",
            Classification::ExtraAction => "EXTRA_ACTION",
            Classification::MissingAction => "MISSING_ACTION",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDelta {
    pub action: ActionKey,
    pub submitted: f64,
    pub reference: f64,
    pub delta: f64,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandComparison {
    pub hand: HandClass,
    pub weight: u32,
    pub classification: Classification,
    /// One entry per action on either side, ordered by action key.
    pub deltas: Vec<ActionDelta>,
    pub max_delta: f64,
}

impl HandComparison {
    pub fn is_correct(&self) -> bool {
        self.classification == Classification::Correct
    }

    /// Deltas that carry the hand's own verdict.
    pub fn worst_actions(&self) -> impl Iterator<Item = &ActionDelta> {
        self.deltas
            .iter()
            .filter(move |d| d.classification == self.classification)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Combo-weighted share of CORRECT hands, in [0, 1].
    pub score: f64,
    pub threshold: f64,
    /// All 169 hands in canonical grid order.
    pub hands: Vec<HandComparison>,
}

impl ComparisonResult {
    pub fn accuracy_pct(&self) -> f64 {
        self.score * 100.0
    }

    pub fn hand(&self, hand: &HandClass) -> &HandComparison {
        &self.hands[hand.index()]
    }

    pub fn with_classification(&self, classification: Classification) -> impl Iterator<Item = &HandComparison> {
        self.hands
            .iter()
            .filter(move |h| h.classification == classification)
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.with_classification(classification).count()
    }

    pub fn correct_weight(&self) -> u32 {
        self.with_classification(Classification::Correct)
            .map(|h| h.weight)
            .sum()
    }

    pub fn total_weight(&self) -> u32 {
        self.hands.iter().map(|h| h.weight).sum()
    }

    /// One-paragraph summary of the grade.
    pub fn feedback(&self) -> String {
        let correct = self.count(Classification::Correct);
        let missing = self.count(Classification::MissingAction);
        let extra = self.count(Classification::ExtraAction);
        let frequency = self.count(Classification::FrequencyError);

        let mut parts = vec![format!(
            "You matched {} out of {} hands correctly ({:.1}% of combos).",
            correct,
            self.hands.len(),
            self.accuracy_pct()
        )];

        if missing > 0 {
            parts.push(format!(
                "{} {} an action the reference takes.",
                hands_text(missing),
                if missing == 1 { "is missing" } else { "are missing" }
            ));
        }
        if extra > 0 {
            parts.push(format!(
                "{} {} an action the reference never takes.",
                hands_text(extra),
                if extra == 1 { "includes" } else { "include" }
            ));
        }
        if frequency > 0 {
            parts.push(format!(
                "{} {} frequency errors (action frequencies differ by more than {}%).",
                hands_text(frequency),
                if frequency == 1 { "has" } else { "have" },
                self.threshold
            ));
        }

        parts.join(" ")
    }
}

fn hands_text(n: usize) -> String {
    if n == 1 {
        "1 hand".to_string()
    } else {
        format!("{} hands", n)
    }
}

/// Stateless grader; holds only its configuration, so one instance can be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RangeComparator {
    config: ComparatorConfig,
}

impl RangeComparator {
    pub fn new(config: ComparatorConfig) -> RangeComparator {
        RangeComparator { config }
    }

    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    pub fn compare(&self, submitted: &ActionDistribution, reference: &ActionDistribution) -> ComparisonResult {
        let hands: Vec<HandComparison> = all_hands()
            .iter()
            .map(|hand| self.compare_hand(*hand, submitted.strategy(hand), reference.strategy(hand)))
            .collect();

        let total: u32 = hands.iter().map(|h| h.weight).sum();
        let correct: u32 = hands.iter().filter(|h| h.is_correct()).map(|h| h.weight).sum();

        ComparisonResult {
            score: correct as f64 / total as f64,
            threshold: self.config.frequency_threshold,
            hands,
        }
    }

    /// Grade many independent submissions against one reference in parallel.
    /// Output order follows input order.
    pub fn compare_many(
        &self,
        submissions: &[ActionDistribution],
        reference: &ActionDistribution,
    ) -> Vec<ComparisonResult> {
        submissions
            .par_iter()
            .map(|submitted| self.compare(submitted, reference))
            .collect()
    }

    pub fn compare_hand(&self, hand: HandClass, submitted: &HandStrategy, reference: &HandStrategy) -> HandComparison {
        let threshold = self.config.frequency_threshold;
        let keys: BTreeSet<ActionKey> = submitted.keys().chain(reference.keys()).collect();
        let frequencies: Vec<(ActionKey, f64, f64)> = keys
            .into_iter()
            .map(|action| (action, submitted.frequency(&action), reference.frequency(&action)))
            .collect();

        // Verdicts only apply once some action is off by more than the threshold.
        let within = frequencies.iter().all(|(_, s, r)| (s - r).abs() <= threshold);

        let deltas: Vec<ActionDelta> = frequencies
            .into_iter()
            .map(|(action, s, r)| {
                let delta = (s - r).abs();
                ActionDelta {
                    action,
                    submitted: s,
                    reference: r,
                    delta,
                    classification: self.classify(s, r, delta, within),
                }
            })
            .collect();

        let classification = deltas
            .iter()
            .map(|d| d.classification)
            .max()
            .unwrap_or(Classification::Correct);
        let max_delta = deltas.iter().map(|d| d.delta).fold(0.0, f64::max);

        HandComparison {
            hand,
            weight: hand.weight(),
            classification,
            deltas,
            max_delta,
        }
    }

    /// Verdict for one action. `hand_within` says whether every action of the
    /// hand is inside the threshold; an action the reference never takes is
    /// EXTRA_ACTION at any frequency once the hand is outside it.
    fn classify(&self, submitted: f64, reference: f64, delta: f64, hand_within: bool) -> Classification {
        let threshold = self.config.frequency_threshold;
        if hand_within {
            Classification::Correct
        } else if reference == 0.0 && submitted > 0.0 {
            Classification::ExtraAction
        } else if reference > threshold && submitted == 0.0 {
            Classification::MissingAction
        } else if delta > threshold {
            Classification::FrequencyError
        } else {
            Classification::Correct
        }
    }
}
