//! Arena of scanned tokens.
//!
//! Tokens, their byte spans, and the newline offsets live in parallel
//! owned tables. A [`Token`] refers to its span by index, so text and
//! location lookups are O(1) and O(log n) respectively.

use crate::token::{Kind, Span, Token};

/// 1-based line and column of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Tokens produced by [`crate::scan`], read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    source: Vec<u8>,
    tokens: Vec<Token>,
    spans: Vec<Span>,
    lines: Vec<usize>,
}

impl TokenStream {
    pub(crate) fn new(source: &[u8]) -> Self {
        Self::with_capacity(source, 0, 0)
    }

    pub(crate) fn with_capacity(source: &[u8], tokens: usize, lines: usize) -> Self {
        Self {
            source: source.to_vec(),
            tokens: Vec::with_capacity(tokens),
            spans: Vec::with_capacity(tokens),
            lines: Vec::with_capacity(lines),
        }
    }

    pub(crate) fn push(&mut self, kind: Kind, span: Span) -> Token {
        debug_assert_eq!(self.tokens.len(), self.spans.len());
        let token = Token::new(kind, self.tokens.len());
        self.tokens.push(token);
        self.spans.push(span);
        token
    }

    pub(crate) fn push_line(&mut self, offset: usize) {
        self.lines.push(offset);
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Token> {
        self.tokens.get(index).copied()
    }

    #[must_use]
    pub fn span(&self, token: Token) -> Option<Span> {
        self.spans.get(token.pos).copied()
    }

    /// Raw lexeme bytes of `token`.
    #[must_use]
    pub fn bytes(&self, token: Token) -> Option<&[u8]> {
        let span = self.span(token)?;
        self.source.get(span.start..span.end)
    }

    /// Lexeme text of `token`. `None` for tokens outside this stream or
    /// spans that are not valid UTF-8.
    #[must_use]
    pub fn text(&self, token: Token) -> Option<&str> {
        std::str::from_utf8(self.bytes(token)?).ok()
    }

    /// Line and column of a byte offset.
    #[must_use]
    pub fn location(&self, offset: usize) -> Location {
        let line = self.lines.partition_point(|&nl| nl < offset);
        let line_start = if line == 0 { 0 } else { self.lines[line - 1] + 1 };
        Location {
            line: line + 1,
            column: offset - line_start + 1,
        }
    }

    /// Location of the first byte of `token`.
    #[must_use]
    pub fn token_location(&self, token: Token) -> Option<Location> {
        self.span(token).map(|span| self.location(span.start))
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().copied()
    }

    /// Tokens starting at `index`; empty past the end.
    pub fn tokens_from(&self, index: usize) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().skip(index).copied()
    }

    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.spans.iter().copied()
    }

    /// Byte offsets of every `\n` in the source, ascending.
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().copied()
    }

    /// Lexemes of every token, in order.
    pub fn texts(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.tokens().map(|t| self.text(t))
    }

    #[must_use]
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Allocated slots in the token and line tables.
    #[must_use]
    pub fn capacity(&self) -> (usize, usize) {
        (self.tokens.capacity(), self.lines.capacity())
    }
}
