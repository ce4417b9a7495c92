//! The node types oracle text parses into.

use serde::{Deserialize, Serialize};
use spells_dice::DiceExpr;

/// One piece of parsed oracle text.
///
/// Nodes are built fresh for each resolution and consumed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Literal text, emitted unchanged.
    Text {
        /// The characters, whitespace included.
        value: String,
    },
    /// `{a|b|c}`: one option is picked at random.
    Choice {
        /// Raw option substrings in source order. They are trimmed when
        /// picked but never parsed further.
        options: Vec<String>,
    },
    /// `[name]`: a reference to a caller-supplied table.
    Table {
        /// The text between the brackets, used verbatim as the key.
        name: String,
    },
    /// `NdM`, `NdM+K` or `NdM-K`.
    Dice(DiceExpr),
}

impl Node {
    /// Literal text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Choice node from its options.
    pub fn choice<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choice {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Table reference node.
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table { name: name.into() }
    }
}

/// Renders the node back in oracle notation.
impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text { value } => write!(f, "{value}"),
            Self::Choice { options } => write!(f, "{{{}}}", options.join("|")),
            Self::Table { name } => write!(f, "[{name}]"),
            Self::Dice(expr) => write!(f, "{expr}"),
        }
    }
}
