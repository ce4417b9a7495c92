//! Error types for dice rolling.

/// Errors that can occur while parsing or rolling dice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The dice count or the number of sides is zero.
    #[error("invalid dice expression {expression}: dice count and sides must be positive")]
    InvalidDiceExpression {
        /// The offending expression in dice notation.
        expression: String,
    },

    /// More dice were requested than a single roll allows.
    #[error("too many dice in {expression}: at most {max} may be rolled at once")]
    TooManyDice {
        /// The offending expression in dice notation.
        expression: String,
        /// The per-roll limit.
        max: u32,
    },

    /// The text is not in `NdM`, `NdM+K` or `NdM-K` notation.
    #[error("cannot parse dice expression: {0:?}")]
    Syntax(String),
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
