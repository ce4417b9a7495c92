//! Dice expressions in `NdM[+K|-K]` notation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};
use crate::roll::{Modifier, RollResult, Sign, roll};
use crate::source::RandomSource;

/// A dice expression such as `2d6` or `3d4-2`.
///
/// An expression may hold a zero count or zero sides; that is only rejected
/// when it is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpr {
    /// Number of dice to roll.
    pub count: u32,
    /// Faces on each die.
    pub sides: u32,
    /// Flat modifier applied to the sum.
    pub modifier: Option<Modifier>,
}

impl DiceExpr {
    /// Create an expression.
    pub fn new(count: u32, sides: u32, modifier: Option<Modifier>) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Roll this expression against the given source.
    pub fn roll<R: RandomSource + ?Sized>(&self, source: &mut R) -> DiceResult<RollResult> {
        roll(self.count, self.sides, self.modifier, source)
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if let Some(modifier) = self.modifier {
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || DiceError::Syntax(s.to_string());

        let (count, rest) = s.trim().split_once('d').ok_or_else(syntax)?;
        let (sides, modifier) = match rest.find(['+', '-']) {
            Some(idx) => {
                let sign = rest[idx..].chars().next().and_then(Sign::from_char);
                let value = parse_number(&rest[idx + 1..]).ok_or_else(syntax)?;
                (&rest[..idx], sign.map(|sign| Modifier::new(sign, value)))
            }
            None => (rest, None),
        };

        Ok(Self {
            count: parse_number(count).ok_or_else(syntax)?,
            sides: parse_number(sides).ok_or_else(syntax)?,
            modifier,
        })
    }
}

/// Parse a run of ASCII digits, rejecting signs and whitespace that
/// `u32::from_str` would otherwise accept or report differently.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
