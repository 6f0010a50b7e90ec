//! The 169 canonical starting-hand classes and their combinatorial weights.
//!
//! Classes are laid out on the usual 13x13 grid (A..2 on both axes):
//!   - Diagonal (row == col): pairs (AA, KK, ...)
//!   - Above diagonal (row < col): suited hands (AKs, AQs, ...)
//!   - Below diagonal (row > col): offsuit hands (AKo, AQo, ...)
//!
//! The grid index doubles as the canonical ordering used everywhere else.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cards::{parse_holding, Card, Rank, ALL_SUITS, GRID_RANKS};
use crate::error::{GradeError, GradeResult};

/// Number of canonical preflop hands (13x13 grid).
pub const NUM_HANDS: usize = 169;

/// Number of concrete two-card holdings (52 choose 2).
pub const TOTAL_COMBOS: u32 = 1326;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Pair,
    Suited,
    Offsuit,
}

impl Shape {
    pub fn weight(self) -> u32 {
        match self {
            Shape::Pair => 6,
            Shape::Suited => 4,
            Shape::Offsuit => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandClass {
    high: Rank,
    low: Rank,
    shape: Shape,
}

static ALL_HANDS: Lazy<Vec<HandClass>> = Lazy::new(|| (0..NUM_HANDS).map(HandClass::from_index_unchecked).collect());

impl HandClass {
    /// Build the class for two ranks. Rank order does not matter; `suited` is
    /// ignored only in the sense that a suited pair is rejected.
    pub fn new(r1: Rank, r2: Rank, suited: bool) -> GradeResult<HandClass> {
        let (high, low) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
        let shape = match (high == low, suited) {
            (true, true) => {
                return Err(GradeError::InvalidHand(format!("{}{}s", high, low)));
            }
            (true, false) => Shape::Pair,
            (false, true) => Shape::Suited,
            (false, false) => Shape::Offsuit,
        };
        Ok(HandClass { high, low, shape })
    }

    pub fn pair(rank: Rank) -> HandClass {
        HandClass {
            high: rank,
            low: rank,
            shape: Shape::Pair,
        }
    }

    /// Canonical class of a concrete holding.
    pub fn from_cards(c1: Card, c2: Card) -> GradeResult<HandClass> {
        if c1 == c2 {
            return Err(GradeError::InvalidHand(format!("{}{}", c1, c2)));
        }
        let suited = c1.rank != c2.rank && c1.suit == c2.suit;
        HandClass::new(c1.rank, c2.rank, suited)
    }

    pub fn from_holding(notation: &str) -> GradeResult<HandClass> {
        let (c1, c2) = parse_holding(notation)?;
        HandClass::from_cards(c1, c2)
    }

    /// Parse "AA", "AKs", "AKo". Lowercase ranks and reversed rank order
    /// ("KAs") are accepted.
    pub fn parse(notation: &str) -> GradeResult<HandClass> {
        let trimmed = notation.trim();
        let chars: Vec<char> = trimmed.chars().collect();
        let invalid = || GradeError::InvalidHand(trimmed.to_string());

        let (r1, r2) = match chars.as_slice() {
            [a, b] | [a, b, _] => (
                Rank::from_char(*a).map_err(|_| invalid())?,
                Rank::from_char(*b).map_err(|_| invalid())?,
            ),
            _ => return Err(invalid()),
        };

        match chars.get(2).map(|c| c.to_ascii_lowercase()) {
            None if r1 == r2 => Ok(HandClass::pair(r1)),
            Some('s') if r1 != r2 => HandClass::new(r1, r2, true),
            Some('o') if r1 != r2 => HandClass::new(r1, r2, false),
            _ => Err(invalid()),
        }
    }

    pub fn high(&self) -> Rank {
        self.high
    }

    pub fn low(&self) -> Rank {
        self.low
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_pair(&self) -> bool {
        self.shape == Shape::Pair
    }

    /// Number of concrete card combinations this class stands for.
    pub fn weight(&self) -> u32 {
        self.shape.weight()
    }

    /// Position on the 13x13 grid, 0 (AA) to 168 (22).
    pub fn index(&self) -> usize {
        let hi = self.high.grid_index();
        let lo = self.low.grid_index();
        match self.shape {
            Shape::Pair => hi * 13 + hi,
            Shape::Suited => hi * 13 + lo,
            Shape::Offsuit => lo * 13 + hi,
        }
    }

    pub fn from_index(idx: usize) -> Option<HandClass> {
        if idx < NUM_HANDS {
            Some(ALL_HANDS[idx])
        } else {
            None
        }
    }

    fn from_index_unchecked(idx: usize) -> HandClass {
        let row = idx / 13;
        let col = idx % 13;
        let shape = if row == col {
            Shape::Pair
        } else if row < col {
            Shape::Suited
        } else {
            Shape::Offsuit
        };
        HandClass {
            high: GRID_RANKS[row.min(col)],
            low: GRID_RANKS[row.max(col)],
            shape,
        }
    }

    /// All concrete holdings of this class. Length always equals `weight()`.
    pub fn combos(&self) -> Vec<(Card, Card)> {
        let mut combos = Vec::with_capacity(self.weight() as usize);
        match self.shape {
            Shape::Pair => {
                for i in 0..ALL_SUITS.len() {
                    for j in (i + 1)..ALL_SUITS.len() {
                        combos.push((Card::new(self.high, ALL_SUITS[i]), Card::new(self.low, ALL_SUITS[j])));
                    }
                }
            }
            Shape::Suited => {
                for &s in &ALL_SUITS {
                    combos.push((Card::new(self.high, s), Card::new(self.low, s)));
                }
            }
            Shape::Offsuit => {
                for &s1 in &ALL_SUITS {
                    for &s2 in &ALL_SUITS {
                        if s1 != s2 {
                            combos.push((Card::new(self.high, s1), Card::new(self.low, s2)));
                        }
                    }
                }
            }
        }
        combos
    }
}

/// Every hand class in canonical grid order.
pub fn all_hands() -> &'static [HandClass] {
    &ALL_HANDS
}

impl PartialOrd for HandClass {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandClass {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Shape::Pair => write!(f, "{}{}", self.high, self.low),
            Shape::Suited => write!(f, "{}{}s", self.high, self.low),
            Shape::Offsuit => write!(f, "{}{}o", self.high, self.low),
        }
    }
}

impl FromStr for HandClass {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandClass::parse(s)
    }
}

impl Serialize for HandClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HandClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HandClass::parse(&s).map_err(serde::de::Error::custom)
    }
}
