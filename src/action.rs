use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GradeError, GradeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionType {
    /// Bets and raises put new money in and must carry a sizing.
    pub fn is_aggressive(self) -> bool {
        matches!(self, ActionType::Bet | ActionType::Raise)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Fold => "FOLD",
            ActionType::Check => "CHECK",
            ActionType::Call => "CALL",
            ActionType::Bet => "BET",
            ActionType::Raise => "RAISE",
        }
    }

    pub fn from_str(s: &str) -> Option<ActionType> {
        match s.trim().to_uppercase().as_str() {
            "FOLD" | "F" => Some(ActionType::Fold),
            "CHECK" | "X" => Some(ActionType::Check),
            "CALL" | "C" => Some(ActionType::Call),
            "BET" | "B" => Some(ActionType::Bet),
            "RAISE" | "R" => Some(ActionType::Raise),
            _ => None,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bet size in hundredths of a big blind, so it can take part in equality
/// and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Sizing(u32);

impl Sizing {
    /// Fails unless `bb` rounds to at least 0.01 bb and fits the fixed-point
    /// range.
    pub fn from_bb(bb: f64) -> GradeResult<Sizing> {
        let hundredths = (bb * 100.0).round();
        if !hundredths.is_finite() || hundredths < 1.0 || hundredths > u32::MAX as f64 {
            return Err(GradeError::InvalidValue(format!(
                "Sizing must be between 0.01bb and {}bb, got {}",
                u32::MAX as f64 / 100.0,
                bb
            )));
        }
        Ok(Sizing(hundredths as u32))
    }

    pub fn bb(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl From<Sizing> for f64 {
    fn from(s: Sizing) -> f64 {
        s.bb()
    }
}

impl TryFrom<f64> for Sizing {
    type Error = GradeError;

    fn try_from(bb: f64) -> Result<Self, Self::Error> {
        Sizing::from_bb(bb)
    }
}

impl fmt::Display for Sizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bb", self.bb())
    }
}

/// Identity of an action inside a hand's strategy. RAISE 2bb and RAISE 3bb
/// are distinct keys; passive actions never carry a sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionKey {
    #[serde(rename = "type")]
    pub action: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<Sizing>,
}

impl ActionKey {
    pub const FOLD: ActionKey = ActionKey {
        action: ActionType::Fold,
        sizing: None,
    };

    pub fn passive(action: ActionType) -> ActionKey {
        ActionKey { action, sizing: None }
    }

    /// Build a key from raw input. Aggressive actions need a sizing; a
    /// sizing on a passive action is dropped. `context` names the hand or
    /// history slot for the error message.
    pub fn resolve(action: ActionType, sizing: Option<f64>, context: &str) -> GradeResult<ActionKey> {
        if !action.is_aggressive() {
            return Ok(ActionKey::passive(action));
        }
        match sizing {
            Some(bb) => Ok(ActionKey {
                action,
                sizing: Some(Sizing::from_bb(bb)?),
            }),
            None => Err(GradeError::MissingSizing {
                action: action.to_string(),
                context: context.to_string(),
            }),
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sizing {
            Some(size) => write!(f, "{} {}", self.action, size),
            None => write!(f, "{}", self.action),
        }
    }
}
