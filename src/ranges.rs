//! Range notation: "AA,KK", "TT+", "ATs+", "77-TT", "KTs-KQs".

use std::collections::BTreeSet;

use crate::cards::Rank;
use crate::error::{GradeError, GradeResult};
use crate::hand::{HandClass, Shape, TOTAL_COMBOS};

/// Expand a range string into its hand classes, sorted in grid order and
/// without duplicates. Any unrecognised token fails the whole parse.
pub fn parse_range(range_str: &str) -> GradeResult<Vec<HandClass>> {
    let mut hands = BTreeSet::new();
    for part in range_str.split(',') {
        let part: String = part.chars().filter(|c| !c.is_whitespace()).collect();
        if part.is_empty() {
            continue;
        }
        if let Some(base) = part.strip_suffix('+') {
            hands.extend(expand_plus(base)?);
        } else if part.contains('-') {
            hands.extend(expand_dash(&part)?);
        } else {
            hands.insert(HandClass::parse(&part)?);
        }
    }
    Ok(hands.into_iter().collect())
}

fn invalid(notation: &str) -> GradeError {
    GradeError::InvalidRangeNotation(notation.to_string())
}

fn ranks_between(lo: Rank, hi: Rank) -> impl Iterator<Item = Rank> {
    crate::cards::ALL_RANKS
        .into_iter()
        .filter(move |r| *r >= lo && *r <= hi)
}

fn expand_plus(base: &str) -> GradeResult<Vec<HandClass>> {
    let hand = HandClass::parse(base).map_err(|_| invalid(base))?;

    // Pair: "TT+" climbs to AA.
    if hand.is_pair() {
        return Ok(ranks_between(hand.high(), Rank::Ace).map(HandClass::pair).collect());
    }

    // Suited/offsuit: "ATs+" climbs the kicker up to just below the top card.
    let suited = hand.shape() == Shape::Suited;
    let top = hand.high();
    ranks_between(hand.low(), top)
        .filter(|r| *r < top)
        .map(|r| HandClass::new(top, r, suited))
        .collect()
}

fn expand_dash(range_str: &str) -> GradeResult<Vec<HandClass>> {
    let (start, end) = range_str.split_once('-').ok_or_else(|| invalid(range_str))?;
    let start = HandClass::parse(start).map_err(|_| invalid(range_str))?;
    let end = HandClass::parse(end).map_err(|_| invalid(range_str))?;

    if start.shape() != end.shape() {
        return Err(invalid(range_str));
    }

    // Pair range: "77-TT"
    if start.is_pair() {
        let (lo, hi) = (start.high().min(end.high()), start.high().max(end.high()));
        return Ok(ranks_between(lo, hi).map(HandClass::pair).collect());
    }

    // Suited/offsuit range sharing the top card: "KTs-KQs"
    if start.high() != end.high() {
        return Err(invalid(range_str));
    }
    let suited = start.shape() == Shape::Suited;
    let (lo, hi) = (start.low().min(end.low()), start.low().max(end.low()));
    ranks_between(lo, hi)
        .map(|r| HandClass::new(start.high(), r, suited))
        .collect()
}

pub fn combo_count(hand: &HandClass) -> u32 {
    hand.weight()
}

pub fn total_combos(hands: &[HandClass]) -> u32 {
    hands.iter().map(combo_count).sum()
}

/// Share of all 1326 holdings covered by `hands`, in percent.
pub fn range_pct(hands: &[HandClass]) -> f64 {
    total_combos(hands) as f64 / TOTAL_COMBOS as f64 * 100.0
}
