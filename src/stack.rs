//! Stack and pot normalisation.
//!
//! Reference ranges are only trusted up to a maximum stack-to-pot ratio, so
//! every ratio is clamped into `[0, max_stack_to_pot_ratio]` before it is
//! used to pick a range.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GradeError, GradeResult};
use crate::scenario::Street;

fn default_max_stack_to_pot_ratio() -> f64 {
    10.0
}

fn default_blinds() -> f64 {
    1.5
}

fn default_standard_open_size() -> f64 {
    2.5
}

fn default_bucket_width() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    /// Largest stack-to-pot ratio any reference range is solved for.
    #[serde(default = "default_max_stack_to_pot_ratio")]
    pub max_stack_to_pot_ratio: f64,
    /// Small blind + big blind, in bb.
    #[serde(default = "default_blinds")]
    pub blinds: f64,
    /// Standard preflop open, in bb.
    #[serde(default = "default_standard_open_size")]
    pub standard_open_size: f64,
    /// Width of one stack-to-pot bucket.
    #[serde(default = "default_bucket_width")]
    pub bucket_width: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            max_stack_to_pot_ratio: default_max_stack_to_pot_ratio(),
            blinds: default_blinds(),
            standard_open_size: default_standard_open_size(),
            bucket_width: default_bucket_width(),
        }
    }
}

/// Discretised, clamped stack-to-pot ratio used as part of a reference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SprBucket(pub u32);

impl fmt::Display for SprBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spr{}", self.0)
    }
}

fn check_stack(stack: f64) -> GradeResult<()> {
    if !stack.is_finite() || stack < 0.0 {
        return Err(GradeError::InvalidStack(stack));
    }
    Ok(())
}

fn check_pot(pot: f64) -> GradeResult<()> {
    // NaN fails the comparison too.
    if !(pot > 0.0) || !pot.is_finite() {
        return Err(GradeError::InvalidPot(pot));
    }
    Ok(())
}

impl StackConfig {
    pub fn validate(&self) -> GradeResult<()> {
        if !(self.max_stack_to_pot_ratio > 0.0) || !self.max_stack_to_pot_ratio.is_finite() {
            return Err(GradeError::InvalidValue(format!(
                "max_stack_to_pot_ratio must be positive, got {}",
                self.max_stack_to_pot_ratio
            )));
        }
        if !(self.bucket_width > 0.0) || !self.bucket_width.is_finite() {
            return Err(GradeError::InvalidValue(format!(
                "bucket_width must be positive, got {}",
                self.bucket_width
            )));
        }
        if self.blinds < 0.0 || self.standard_open_size < 0.0 {
            return Err(GradeError::InvalidValue("blinds and open size must be non-negative".to_string()));
        }
        Ok(())
    }

    /// Raw `stack / pot`, unclamped. Fails on a non-positive pot.
    pub fn raw_ratio(&self, stack: f64, pot: f64) -> GradeResult<f64> {
        check_stack(stack)?;
        check_pot(pot)?;
        Ok(stack / pot)
    }

    /// `stack / pot` clamped to `[0, max_stack_to_pot_ratio]`. Ratios above the
    /// cap are evaluated as the cap, not rejected.
    pub fn stack_to_pot_ratio(&self, stack: f64, pot: f64) -> GradeResult<f64> {
        let ratio = self.raw_ratio(stack, pot)?;
        Ok(ratio.clamp(0.0, self.max_stack_to_pot_ratio))
    }

    pub fn bucket(&self, stack: f64, pot: f64) -> GradeResult<SprBucket> {
        let ratio = self.stack_to_pot_ratio(stack, pot)?;
        Ok(self.bucket_for_ratio(ratio))
    }

    pub fn bucket_for_ratio(&self, ratio: f64) -> SprBucket {
        let clamped = ratio.clamp(0.0, self.max_stack_to_pot_ratio);
        SprBucket((clamped / self.bucket_width).floor() as u32)
    }

    /// Pot after a standard open with nobody else in yet: blinds + open.
    pub fn pot_after_open(&self) -> f64 {
        self.blinds + self.standard_open_size
    }

    /// Pot after a standard open and one call: blinds + open + call.
    pub fn pot_after_open_and_call(&self) -> f64 {
        self.blinds + 2.0 * self.standard_open_size
    }

    /// Pot in a single-raised pot reaching `street`, with one bet of
    /// `bet_size` on every postflop street so far, rounded to whole big
    /// blinds. Preflop ignores `bet_size`.
    pub fn street_pot(&self, street: Street, bet_size: f64) -> GradeResult<f64> {
        if !bet_size.is_finite() || bet_size < 0.0 {
            return Err(GradeError::InvalidValue(format!(
                "bet size must be non-negative, got {}",
                bet_size
            )));
        }
        let bets = bet_size * street.postflop_rounds() as f64;
        Ok((self.pot_after_open_and_call() + bets).round())
    }

    /// Effective stack limited to `pot * max_stack_to_pot_ratio`.
    pub fn capped_stack(&self, stack: f64, pot: f64) -> GradeResult<f64> {
        check_stack(stack)?;
        check_pot(pot)?;
        Ok(stack.min(pot * self.max_stack_to_pot_ratio))
    }
}
