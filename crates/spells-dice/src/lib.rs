//! Dice rolling for the spells campaign tool.
//!
//! Rolls `NdM` expressions with an optional `+K`/`-K` modifier against any
//! [`RandomSource`]. Every `rand::Rng` is a random source, so seeding a
//! `StdRng` makes rolls reproducible; tests can inject scripted sources.

pub mod error;
pub mod expr;
pub mod roll;
pub mod source;

pub use error::{DiceError, DiceResult};
pub use expr::DiceExpr;
pub use roll::{MAX_DICE, Modifier, RollResult, Sign, roll};
pub use source::RandomSource;
