//! Error types for oracle parsing and resolution.

use spells_dice::DiceError;

/// Byte range of a fragment in the text being parsed.
pub type Span = std::ops::Range<usize>;

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur while parsing or resolving oracle text.
///
/// Every error aborts the whole call; no partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// A `{` has no matching `}`.
    #[error("unterminated choice at byte {}: missing closing '}}'", .span.start)]
    UnterminatedChoice {
        /// From the opening brace to the end of the input.
        span: Span,
    },

    /// A `[` has no matching `]`.
    #[error("unterminated table reference at byte {}: missing closing ']'", .span.start)]
    UnterminatedTable {
        /// From the opening bracket to the end of the input.
        span: Span,
    },

    /// A choice node has no options to pick from.
    #[error("choice has no options")]
    EmptyChoice,

    /// A choice has more options than a random source can index.
    #[error("choice has {count} options, more than can be drawn from")]
    TooManyOptions {
        /// How many options the choice holds.
        count: usize,
    },

    /// A dice node could not be rolled.
    #[error(transparent)]
    Dice(#[from] DiceError),

    /// Table references nested deeper than the configured limit.
    #[error("table [{table}] nests more than {limit} levels deep")]
    RecursionLimitExceeded {
        /// The table whose expansion crossed the limit.
        table: String,
        /// The configured maximum depth.
        limit: usize,
    },

    /// An error raised while resolving the text of a table.
    #[error("in table [{table}]: {source}")]
    InTable {
        /// The table being expanded.
        table: String,
        /// What went wrong inside it.
        #[source]
        source: Box<OracleError>,
    },
}

impl OracleError {
    /// The span of the offending fragment, for errors raised by the parser
    /// on the text that was passed in directly.
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::UnterminatedChoice { span } | Self::UnterminatedTable { span } => Some(span),
            _ => None,
        }
    }

    /// The innermost error, looking through table wrappers.
    pub fn root_cause(&self) -> &OracleError {
        match self {
            Self::InTable { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
