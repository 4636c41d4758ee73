use std::fmt;

/// Byte range `[start, end)` of a token in the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// Malformed lexeme or unrecognised byte.
    #[default]
    Invalid,

    /// Opening parenthesis `(`.
    ParenOpen,
    /// Closing parenthesis `)`.
    ParenClose,
    /// Opening square bracket `[`.
    BracketOpen,
    /// Closing square bracket `]`.
    BracketClose,
    /// Opening brace `{`.
    BraceOpen,
    /// Closing brace `}`.
    BraceClose,

    Comma,
    Colon,
    /// Forward slash `/`, the qualified-name separator.
    FSlash,
    /// Backslash `\`.
    BSlash,
    /// Reserved; a lone `-` scans as `Invalid`.
    Minus,
    /// Attribute tag prefix `#`.
    Hash,

    Package,
    Import,
    Using,
    Component,
    Document,
    And,
    Or,
    Not,
    True,
    False,
    If,

    Ident,
    /// Double-quoted string (`"..."`).
    String,
    /// Line string (`-- ...` up to end of line).
    StringLine,
    /// Double-quoted string containing an interpolation marker `\(`.
    StringTempl,
    /// Line string containing an interpolation marker `\(`.
    StringLineTempl,
    Number,
    Newline,
    /// Comment (`; ...` up to end of line).
    Comment,

    /// Returned by lookahead past the last token. Never stored in a stream.
    Eof,
}

/// Reserved words and the kinds they scan to.
const KEYWORDS: [(&[u8], Kind); 11] = [
    (b"package", Kind::Package),
    (b"import", Kind::Import),
    (b"using", Kind::Using),
    (b"component", Kind::Component),
    (b"document", Kind::Document),
    (b"and", Kind::And),
    (b"or", Kind::Or),
    (b"not", Kind::Not),
    (b"true", Kind::True),
    (b"false", Kind::False),
    (b"if", Kind::If),
];

impl Kind {
    /// Look up a reserved word.
    #[must_use]
    pub fn keyword(lexeme: &[u8]) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == lexeme)
            .map(|&(_, kind)| kind)
    }

    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Package
                | Self::Import
                | Self::Using
                | Self::Component
                | Self::Document
                | Self::And
                | Self::Or
                | Self::Not
                | Self::True
                | Self::False
                | Self::If
        )
    }

    /// Any of the four string kinds.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(
            self,
            Self::String | Self::StringLine | Self::StringTempl | Self::StringLineTempl
        )
    }

    /// Kinds the parser never observes.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Comment | Self::Newline)
    }

    /// Human-readable name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::ParenOpen => "(",
            Self::ParenClose => ")",
            Self::BracketOpen => "[",
            Self::BracketClose => "]",
            Self::BraceOpen => "{",
            Self::BraceClose => "}",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::FSlash => "/",
            Self::BSlash => "\\",
            Self::Minus => "-",
            Self::Hash => "#",
            Self::Package => "package",
            Self::Import => "import",
            Self::Using => "using",
            Self::Component => "component",
            Self::Document => "document",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::True => "true",
            Self::False => "false",
            Self::If => "if",
            Self::Ident => "ident",
            Self::String => "string",
            Self::StringLine => "line string",
            Self::StringTempl => "template string",
            Self::StringLineTempl => "template line string",
            Self::Number => "number",
            Self::Newline => "newline",
            Self::Comment => "comment",
            Self::Eof => "end of stream",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified token. `pos` indexes the owning stream's span table.
///
/// The default token (`Invalid`, no position) stands in for a field the
/// parser expected but did not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: Kind,
    pub pos: usize,
}

impl Token {
    /// Position used by tokens that do not live in a stream.
    pub const NO_POS: usize = usize::MAX;

    /// Lookahead result past the last token.
    pub const EOF: Self = Self {
        kind: Kind::Eof,
        pos: Self::NO_POS,
    };

    #[must_use]
    pub const fn new(kind: Kind, pos: usize) -> Self {
        Self { kind, pos }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, Kind::Eof)
    }
}

impl Default for Token {
    fn default() -> Self {
        Self {
            kind: Kind::Invalid,
            pos: Self::NO_POS,
        }
    }
}
