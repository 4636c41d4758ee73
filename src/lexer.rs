use crate::options::Options;
use crate::stream::TokenStream;
use crate::token::{Kind, Span};

/// Scan source bytes into a token stream.
///
/// Never fails: malformed lexemes become [`Kind::Invalid`] tokens and
/// scanning continues after them.
#[tracing::instrument(skip_all, fields(source_len = input.len()))]
pub fn scan(input: &[u8], options: Options) -> TokenStream {
    let mut stream = if options.reduce_alloc() {
        let (tokens, lines) = count(input, options);
        TokenStream::with_capacity(input, tokens, lines)
    } else {
        TokenStream::new(input)
    };

    for lexeme in Lexer::new(input) {
        match lexeme {
            Lexeme::Token(kind, span) => {
                stream.push(kind, span);
            }
            Lexeme::Comment(span) => {
                if options.preserve_comment() {
                    stream.push(Kind::Comment, span);
                }
            }
            Lexeme::Newline(offset) => {
                stream.push_line(offset);
                if options.preserve_newline() {
                    stream.push(Kind::Newline, Span::new(offset, offset + 1));
                }
            }
        }
    }

    stream
}

/// Exact token and line counts `scan` will produce for `input`.
fn count(input: &[u8], options: Options) -> (usize, usize) {
    let mut tokens = 0;
    let mut lines = 0;
    for lexeme in Lexer::new(input) {
        match lexeme {
            Lexeme::Token(..) => tokens += 1,
            Lexeme::Comment(_) => tokens += usize::from(options.preserve_comment()),
            Lexeme::Newline(_) => {
                lines += 1;
                tokens += usize::from(options.preserve_newline());
            }
        }
    }
    (tokens, lines)
}

/// One step of the scanner, before options decide what gets stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Token(Kind, Span),
    Comment(Span),
    Newline(usize),
}

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Iterator for Lexer<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        self.skip_space();

        let start = self.pos;
        let ch = self.peek()?;

        let kind = match ch {
            b'\n' => {
                self.pos += 1;
                return Some(Lexeme::Newline(start));
            }
            b';' => {
                self.skip_line();
                return Some(Lexeme::Comment(Span::new(start, self.pos)));
            }
            b'-' if self.peek_at(1) == Some(b'-') => self.read_line_string(),
            b'"' => self.read_quoted_string(),
            c if c.is_ascii_alphabetic() => self.read_ident(),
            c if c.is_ascii_digit() => self.read_number(),
            _ => {
                self.pos += 1;
                punctuation(ch)
            }
        };

        Some(Lexeme::Token(kind, Span::new(start, self.pos)))
    }
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn skip_space(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | 0x0b | 0x0c) = self.peek() {
            self.pos += 1;
        }
    }

    /// Advance to the next `\n` (not consumed) or end of input.
    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn read_ident(&mut self) -> Kind {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == b'_' || c == b'-') {
                break;
            }
            self.pos += 1;
        }
        Kind::keyword(&self.input[start..self.pos]).unwrap_or(Kind::Ident)
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn read_number(&mut self) -> Kind {
        self.skip_digits();
        if self.peek() != Some(b'.') {
            return Kind::Number;
        }

        self.pos += 1; // skip .
        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
            // dangling decimal point
            return Kind::Invalid;
        }
        self.skip_digits();
        Kind::Number
    }

    fn read_quoted_string(&mut self) -> Kind {
        let start = self.pos;
        self.pos += 1; // skip opening quote

        loop {
            match self.peek() {
                None | Some(b'\n') => return Kind::Invalid,
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    // the newline ends the string unterminated
                    if self.peek().is_some_and(|c| c != b'\n') {
                        self.pos += 1;
                    }
                }
                Some(_) => self.pos += 1,
            }
        }

        if has_template_marker(&self.input[start..self.pos]) {
            Kind::StringTempl
        } else {
            Kind::String
        }
    }

    fn read_line_string(&mut self) -> Kind {
        let start = self.pos;
        self.skip_line();

        if has_template_marker(&self.input[start..self.pos]) {
            Kind::StringLineTempl
        } else {
            Kind::StringLine
        }
    }
}

/// Raw `\(` anywhere in the lexeme, escaped backslash or not.
fn has_template_marker(body: &[u8]) -> bool {
    body.windows(2).any(|w| w == b"\\(")
}

/// Single-byte structural and delimiter kinds.
const fn punctuation(ch: u8) -> Kind {
    match ch {
        b'(' => Kind::ParenOpen,
        b')' => Kind::ParenClose,
        b'[' => Kind::BracketOpen,
        b']' => Kind::BracketClose,
        b'{' => Kind::BraceOpen,
        b'}' => Kind::BraceClose,
        b',' => Kind::Comma,
        b':' => Kind::Colon,
        b'/' => Kind::FSlash,
        b'\\' => Kind::BSlash,
        b'#' => Kind::Hash,
        _ => Kind::Invalid,
    }
}
