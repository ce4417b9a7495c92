//! Scanner and parser for oracle text.
//!
//! The lexer only separates block openers and digit runs from everything
//! else. Block bodies are taken raw by scanning ahead in the source, so
//! nothing inside `{...}` or `[...]` is tokenized.

use logos::Logos;
use spells_dice::{DiceExpr, Modifier, Sign};

use crate::error::{OracleError, OracleResult};
use crate::node::Node;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    #[token("{")]
    LBrace,

    #[token("[")]
    LBracket,

    #[regex(r"[0-9]+")]
    Digits,

    #[regex(r"[^{\[0-9]+")]
    Text,
}

/// Parse oracle text into nodes, in source order.
///
/// Adjacent literal characters end up in a single [`Node::Text`]; the empty
/// string yields no nodes. An unterminated `{` or `[` fails the whole parse.
pub fn parse(source: &str) -> OracleResult<Vec<Node>> {
    Parser::new(source).run()
}

struct Parser<'src> {
    lexer: logos::Lexer<'src, RawToken>,
    nodes: Vec<Node>,
    text: String,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            lexer: RawToken::lexer(source),
            nodes: Vec::new(),
            text: String::new(),
        }
    }

    fn run(mut self) -> OracleResult<Vec<Node>> {
        while let Some(token) = self.lexer.next() {
            match token {
                Ok(RawToken::LBrace) => self.choice()?,
                Ok(RawToken::LBracket) => self.table()?,
                Ok(RawToken::Digits) => self.digits(),
                Ok(RawToken::Text) | Err(()) => self.text.push_str(self.lexer.slice()),
            }
        }
        self.flush_text();
        Ok(self.nodes)
    }

    fn choice(&mut self) -> OracleResult<()> {
        let body = self.block_body('}').ok_or_else(|| OracleError::UnterminatedChoice {
            span: self.rest_span(),
        })?;
        let options = body.split('|').map(str::to_string).collect();
        self.push(Node::Choice { options });
        Ok(())
    }

    fn table(&mut self) -> OracleResult<()> {
        let name = self.block_body(']').ok_or_else(|| OracleError::UnterminatedTable {
            span: self.rest_span(),
        })?;
        self.push(Node::table(name));
        Ok(())
    }

    /// Take everything up to `close` and move the lexer past it.
    fn block_body(&mut self, close: char) -> Option<&'src str> {
        let remainder = self.lexer.remainder();
        let end = remainder.find(close)?;
        self.lexer.bump(end + close.len_utf8());
        Some(&remainder[..end])
    }

    /// From the current token to the end of the input.
    fn rest_span(&self) -> std::ops::Range<usize> {
        self.lexer.span().start..self.lexer.source().len()
    }

    /// A digit run becomes a dice node when `d<digits>` follows it directly;
    /// otherwise it is literal text.
    fn digits(&mut self) {
        let count = self.lexer.slice();
        match scan_dice(count, self.lexer.remainder()) {
            Some((expr, len)) => {
                self.lexer.bump(len);
                self.push(Node::Dice(expr));
            }
            None => self.text.push_str(count),
        }
    }

    fn push(&mut self, node: Node) {
        self.flush_text();
        self.nodes.push(node);
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let value = std::mem::take(&mut self.text);
            self.nodes.push(Node::Text { value });
        }
    }
}

/// Match `d<digits>[(+|-)<digits>]` at the start of `rest`, taking the
/// longest form available. Returns the expression and how many bytes of
/// `rest` it consumed. A count or side number too large for a die leaves the
/// whole run as text; an oversized modifier is left as text after the dice.
fn scan_dice(count: &str, rest: &str) -> Option<(DiceExpr, usize)> {
    let after_d = rest.strip_prefix('d')?;
    let sides_len = digit_run(after_d);
    if sides_len == 0 {
        return None;
    }

    let count = count.parse().ok()?;
    let sides = after_d[..sides_len].parse().ok()?;
    let len = 1 + sides_len;

    match scan_modifier(&after_d[sides_len..]) {
        Some((modifier, modifier_len)) => Some((
            DiceExpr::new(count, sides, Some(modifier)),
            len + modifier_len,
        )),
        None => Some((DiceExpr::new(count, sides, None), len)),
    }
}

/// Match `(+|-)<digits>` at the start of `tail`.
fn scan_modifier(tail: &str) -> Option<(Modifier, usize)> {
    let sign = tail.chars().next().and_then(Sign::from_char)?;
    let value_len = digit_run(&tail[1..]);
    if value_len == 0 {
        return None;
    }
    let value = tail[1..=value_len].parse().ok()?;
    Some((Modifier::new(sign, value), 1 + value_len))
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}
