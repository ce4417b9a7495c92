//! Oracle text resolution for the spells campaign tool.
//!
//! Oracle text is prose mixed with three generative directives:
//!
//! - choices, `{north|south|west}`, pick one option uniformly;
//! - table references, `[creature]`, expand a caller-supplied entry;
//! - dice, `2d6+1`, roll and print the total.
//!
//! [`parse`] turns a string into [`Node`]s and a [`Resolver`] expands them
//! into a single string.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod node;
pub mod parser;
pub mod resolver;

pub use config::OracleConfig;
pub use error::{OracleError, OracleResult, Span};
pub use node::Node;
pub use parser::parse;
pub use resolver::{Resolver, Tables};
