//! Rolling dice and applying modifiers.

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};
use crate::expr::DiceExpr;
use crate::source::RandomSource;

/// The most dice a single roll may draw.
pub const MAX_DICE: u32 = 100_000;

/// Direction of a flat modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    /// `+K`: added to the dice total.
    Plus,
    /// `-K`: subtracted from the dice total.
    Minus,
}

impl Sign {
    /// Map a `+` or `-` character to a sign.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            _ => None,
        }
    }

    /// The character used for this sign in dice notation.
    pub fn as_char(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A flat modifier applied after the dice are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifier {
    /// Whether the value is added or subtracted.
    pub sign: Sign,
    /// The magnitude of the modifier.
    pub value: u32,
}

impl Modifier {
    /// Create a modifier.
    pub fn new(sign: Sign, value: u32) -> Self {
        Self { sign, value }
    }

    /// Apply this modifier to a summed total.
    pub fn apply(self, total: i64) -> i64 {
        match self.sign {
            Sign::Plus => total + i64::from(self.value),
            Sign::Minus => total - i64::from(self.value),
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.sign, self.value)
    }
}

/// The outcome of a dice roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Sum of all dice with the modifier applied.
    pub total: i64,
    /// Individual die values in the order they were drawn.
    pub breakdown: Vec<u32>,
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.breakdown.iter().map(u32::to_string).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total)
    }
}

/// Roll `count` dice with `sides` faces and apply an optional modifier.
///
/// Both `count` and `sides` must be positive and `count` may not exceed
/// [`MAX_DICE`]; a rejected roll draws nothing from `source`. Otherwise
/// exactly `count` values are drawn, in order.
pub fn roll<R: RandomSource + ?Sized>(
    count: u32,
    sides: u32,
    modifier: Option<Modifier>,
    source: &mut R,
) -> DiceResult<RollResult> {
    if count == 0 || sides == 0 {
        return Err(DiceError::InvalidDiceExpression {
            expression: DiceExpr::new(count, sides, modifier).to_string(),
        });
    }
    if count > MAX_DICE {
        return Err(DiceError::TooManyDice {
            expression: DiceExpr::new(count, sides, modifier).to_string(),
            max: MAX_DICE,
        });
    }

    let breakdown: Vec<u32> = (0..count).map(|_| source.next_in(sides)).collect();
    let sum: i64 = breakdown.iter().copied().map(i64::from).sum();
    let total = modifier.map_or(sum, |m| m.apply(sum));

    Ok(RollResult { total, breakdown })
}
