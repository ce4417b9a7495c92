//! Terminal rendering of oracle errors.

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::error::OracleError;

/// Render a parse error as an ariadne report pointing into `source`.
///
/// Returns `None` when the error carries no span into `source`, which is the
/// case for resolution errors and anything raised inside a table's text.
pub fn render_error(source: &str, filename: &str, err: &OracleError) -> Option<String> {
    let span = err.span()?;
    let opener = match err {
        OracleError::UnterminatedChoice { .. } => "this '{' is never closed",
        _ => "this '[' is never closed",
    };

    // ariadne counts characters, spans are bytes.
    let start = char_offset(source, span.start)?;
    let end = char_offset(source, span.end)?;

    let mut output = Vec::new();
    Report::build(ReportKind::Error, (filename, start..end))
        .with_message(err.to_string())
        .with_label(
            Label::new((filename, start..start + 1))
                .with_message(opener)
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut output)
        .ok()?;

    String::from_utf8(output).ok()
}

fn char_offset(source: &str, byte: usize) -> Option<usize> {
    source.get(..byte).map(|prefix| prefix.chars().count())
}
