//! Lexer for constraint text
//!
//! The lexer does not produce a token stream up front. The parser drives it,
//! alternating between [`Lexer::read_token`] and [`Lexer::read_operator`].

use crate::operator::Operator;

/// Scanner over constraint text.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// True once every byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Advance past spaces, tabs, carriage returns and newlines.
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches([' ', '\t', '\r', '\n']);
        self.pos += rest.len() - trimmed.len();
    }

    /// Read a literal token.
    ///
    /// Consumes characters up to the first one at which a catalog operator
    /// begins; ASCII letters and digits never start an operator so they are
    /// not checked. The consumed text is trimmed. Returns `None` when the
    /// trimmed text is empty, meaning an operator should be read instead.
    pub fn read_token(&mut self) -> Option<String> {
        let text = self.text;
        let start = self.pos;
        let end = text[start..]
            .char_indices()
            .map(|(i, c)| (start + i, c))
            .find(|(i, c)| !c.is_ascii_alphanumeric() && Operator::lookup_at(text, *i).is_some())
            .map_or(text.len(), |(i, _)| i);

        self.pos = end;
        let token = text[start..end].trim_matches([' ', '\t', '\r', '\n']);
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Read an operator at the current position.
    ///
    /// Tries every catalog entry in order; the first whose symbol matches is
    /// returned and the position advances past it.
    pub fn read_operator(&mut self) -> Option<&'static Operator> {
        let op = Operator::lookup_at(self.text, self.pos)?;
        self.pos += op.symbol.len();
        Some(op)
    }
}
