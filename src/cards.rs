use std::fmt;

use crate::error::{GradeError, GradeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub fn from_char(c: char) -> GradeResult<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(GradeError::InvalidRank(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Row/column of this rank in the 13x13 grid (Ace = 0, Two = 12).
    pub fn grid_index(self) -> usize {
        (Rank::Ace.value() - self.value()) as usize
    }

    pub fn from_grid_index(idx: usize) -> Option<Rank> {
        GRID_RANKS.get(idx).copied()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

/// Ranks in grid order: A, K, Q, ... 2.
pub const GRID_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::King,
    Rank::Queen,
    Rank::Jack,
    Rank::Ten,
    Rank::Nine,
    Rank::Eight,
    Rank::Seven,
    Rank::Six,
    Rank::Five,
    Rank::Four,
    Rank::Three,
    Rank::Two,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn from_char(c: char) -> GradeResult<Suit> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spades),
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            _ => Err(GradeError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

pub fn parse_card(notation: &str) -> GradeResult<Card> {
    let notation = notation.trim();
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 2 {
        return Err(GradeError::InvalidCardNotation(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0])?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

/// Parse a concrete two-card holding such as "AsKh".
pub fn parse_holding(notation: &str) -> GradeResult<(Card, Card)> {
    let notation = notation.trim();
    if notation.len() != 4 || !notation.is_ascii() {
        return Err(GradeError::InvalidCardNotation(notation.to_string()));
    }
    let c1 = parse_card(&notation[..2])?;
    let c2 = parse_card(&notation[2..])?;
    if c1 == c2 {
        return Err(GradeError::InvalidCardNotation(notation.to_string()));
    }
    Ok((c1, c2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_index_round_trips() {
        for rank in ALL_RANKS {
            assert_eq!(Rank::from_grid_index(rank.grid_index()), Some(rank));
        }
        assert_eq!(Rank::Ace.grid_index(), 0);
        assert_eq!(Rank::Two.grid_index(), 12);
    }

    #[test]
    fn holding_rejects_same_card_twice() {
        assert!(parse_holding("AsAs").is_err());
        assert!(parse_holding("AsA").is_err());
        assert!(parse_holding("AsAh").is_ok());
    }

    #[test]
    fn lowercase_ranks_accepted() {
        assert_eq!(parse_card("ks").unwrap(), Card::new(Rank::King, Suit::Spades));
    }
}
