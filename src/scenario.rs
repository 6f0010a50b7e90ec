//! The situation being graded and the key it resolves to.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::action::{ActionKey, ActionType};
use crate::error::{GradeError, GradeResult};
use crate::stack::{SprBucket, StackConfig};

/// 6-max seats in preflop acting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    UTG,
    MP,
    CO,
    BTN,
    SB,
    BB,
}

pub const ALL_POSITIONS: [Position; 6] = [
    Position::UTG,
    Position::MP,
    Position::CO,
    Position::BTN,
    Position::SB,
    Position::BB,
];

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::UTG => "UTG",
            Position::MP => "MP",
            Position::CO => "CO",
            Position::BTN => "BTN",
            Position::SB => "SB",
            Position::BB => "BB",
        }
    }

    /// "HJ" is accepted as the 6-max name for MP.
    pub fn from_str(s: &str) -> Option<Position> {
        match s.trim().to_uppercase().as_str() {
            "UTG" => Some(Position::UTG),
            "MP" | "HJ" => Some(Position::MP),
            "CO" => Some(Position::CO),
            "BTN" | "BU" => Some(Position::BTN),
            "SB" => Some(Position::SB),
            "BB" => Some(Position::BB),
            _ => None,
        }
    }

    /// Seat order preflop: UTG acts first, BB last.
    pub fn preflop_order(&self) -> usize {
        *self as usize
    }

    /// Seat order postflop: SB acts first, BTN last.
    pub fn postflop_order(&self) -> usize {
        match self {
            Position::SB => 0,
            Position::BB => 1,
            Position::UTG => 2,
            Position::MP => 3,
            Position::CO => 4,
            Position::BTN => 5,
        }
    }

    /// Whether this seat acts after `other` on later streets.
    pub fn is_ip_vs(&self, other: &Position) -> bool {
        self.postflop_order() > other.postflop_order()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Betting round the decision is made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Street {
    #[default]
    #[serde(alias = "preflop")]
    Preflop,
    #[serde(alias = "flop")]
    Flop,
    #[serde(alias = "turn")]
    Turn,
    #[serde(alias = "river")]
    River,
}

pub const ALL_STREETS: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

impl Street {
    pub fn as_str(&self) -> &'static str {
        match self {
            Street::Preflop => "PREFLOP",
            Street::Flop => "FLOP",
            Street::Turn => "TURN",
            Street::River => "RIVER",
        }
    }

    pub fn from_str(s: &str) -> Option<Street> {
        match s.trim().to_uppercase().as_str() {
            "PREFLOP" | "PRE" => Some(Street::Preflop),
            "FLOP" => Some(Street::Flop),
            "TURN" => Some(Street::Turn),
            "RIVER" => Some(Street::River),
            _ => None,
        }
    }

    pub fn is_postflop(&self) -> bool {
        *self != Street::Preflop
    }

    /// Postflop streets dealt so far: 0 preflop, 3 on the river.
    pub fn postflop_rounds(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One earlier action in the hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousAction {
    pub position: Position,
    #[serde(rename = "actionType")]
    pub action: ActionType,
    /// Bet/raise size in bb; required for BET and RAISE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<f64>,
}

impl PreviousAction {
    pub fn new(position: Position, action: ActionType, sizing: Option<f64>) -> PreviousAction {
        PreviousAction {
            position,
            action,
            sizing,
        }
    }

    /// Parse "CO:raise:2.5" or "UTG:fold".
    pub fn parse(s: &str) -> GradeResult<PreviousAction> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let invalid = || GradeError::InvalidValue(format!("Invalid previous action: {}", s));
        let (pos, act, sizing) = match parts.as_slice() {
            [p, a] => (*p, *a, None),
            [p, a, size] => (*p, *a, Some(size.trim().parse::<f64>().map_err(|_| invalid())?)),
            _ => return Err(invalid()),
        };
        let position = Position::from_str(pos).ok_or_else(invalid)?;
        let action = ActionType::from_str(act).ok_or_else(invalid)?;
        Ok(PreviousAction::new(position, action, sizing))
    }

    fn key(&self, slot: usize) -> GradeResult<ActionKey> {
        ActionKey::resolve(self.action, self.sizing, &format!("{} at history step {}", self.position, slot))
    }
}

/// One step of a normalised action history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryStep {
    pub position: Position,
    pub action: ActionKey,
}

impl fmt::Display for HistoryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.position, self.action)
    }
}

/// Exact-match lookup key for a reference range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioKey {
    pub position: Position,
    #[serde(default)]
    pub street: Street,
    pub history: Vec<HistoryStep>,
    pub spr: SprBucket,
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)?;
        if self.street.is_postflop() {
            write!(f, " {}", self.street)?;
        }
        if self.history.is_empty() {
            write!(f, " first in, {}", self.spr)
        } else {
            write!(f, " after [{}], {}", self.history.iter().join(", "), self.spr)
        }
    }
}

/// Immutable description of the spot being graded. Stack and pot are in big
/// blinds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioContext {
    position: Position,
    street: Street,
    history: Vec<PreviousAction>,
    effective_stack: f64,
    pot: f64,
}

impl ScenarioContext {
    /// Validates the history sizings, the stack and the pot up front. The
    /// context starts on the preflop street; see `with_street`.
    pub fn new(
        position: Position,
        history: Vec<PreviousAction>,
        effective_stack: f64,
        pot: f64,
    ) -> GradeResult<ScenarioContext> {
        if !effective_stack.is_finite() || effective_stack < 0.0 {
            return Err(GradeError::InvalidStack(effective_stack));
        }
        if !(pot > 0.0) || !pot.is_finite() {
            return Err(GradeError::InvalidPot(pot));
        }
        for (slot, action) in history.iter().enumerate() {
            action.key(slot)?;
        }
        Ok(ScenarioContext {
            position,
            street: Street::Preflop,
            history,
            effective_stack,
            pot,
        })
    }

    pub fn with_street(mut self, street: Street) -> ScenarioContext {
        self.street = street;
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn history(&self) -> &[PreviousAction] {
        &self.history
    }

    pub fn effective_stack(&self) -> f64 {
        self.effective_stack
    }

    pub fn pot(&self) -> f64 {
        self.pot
    }

    pub fn has_aggression(&self) -> bool {
        self.history.iter().any(|a| a.action.is_aggressive())
    }

    /// History with folds removed and sizings quantised.
    pub fn normalized_history(&self) -> GradeResult<Vec<HistoryStep>> {
        self.history
            .iter()
            .enumerate()
            .filter(|(_, a)| a.action != ActionType::Fold)
            .map(|(slot, a)| {
                Ok(HistoryStep {
                    position: a.position,
                    action: a.key(slot)?,
                })
            })
            .collect()
    }

    /// Pot used to pick the reference range. A preflop spot with no bet or
    /// raise in the history is an open, played into the standard post-open
    /// pot. Postflop spots and spots facing aggression use the actual pot.
    pub fn reference_pot(&self, stack: &StackConfig) -> f64 {
        if self.street.is_postflop() || self.has_aggression() {
            self.pot
        } else {
            stack.pot_after_open()
        }
    }

    pub fn key(&self, stack: &StackConfig) -> GradeResult<ScenarioKey> {
        Ok(ScenarioKey {
            position: self.position,
            street: self.street,
            history: self.normalized_history()?,
            spr: stack.bucket(self.effective_stack, self.reference_pot(stack))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_previous_action() {
        let a = PreviousAction::parse("CO:raise:2.5").unwrap();
        assert_eq!(a.position, Position::CO);
        assert_eq!(a.action, ActionType::Raise);
        assert_eq!(a.sizing, Some(2.5));
        assert!(PreviousAction::parse("XX:fold").is_err());
        assert!(PreviousAction::parse("CO").is_err());
    }

    #[test]
    fn street_parsing() {
        assert_eq!(Street::from_str("flop"), Some(Street::Flop));
        assert_eq!(Street::from_str("PRE"), Some(Street::Preflop));
        assert_eq!(Street::from_str("showdown"), None);
        assert_eq!(Street::River.postflop_rounds(), 3);
        let s: Street = serde_json::from_str("\"turn\"").unwrap();
        assert_eq!(s, Street::Turn);
    }

    #[test]
    fn postflop_order() {
        assert!(Position::BTN.is_ip_vs(&Position::BB));
        assert!(!Position::SB.is_ip_vs(&Position::UTG));
    }
}
