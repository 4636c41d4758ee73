use bitflags::bitflags;

bitflags! {
    /// Scan and parse options. One set drives both the lexer and the parser.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Options: u8 {
        /// Emit `newline` tokens. Line offsets are recorded either way.
        const PRESERVE_NEWLINE = 1;
        /// Emit `comment` tokens instead of skipping them.
        const PRESERVE_COMMENT = 1 << 1;
        /// Presize token tables and AST containers with a counting prepass.
        const REDUCE_ALLOC = 1 << 2;
    }
}

impl Options {
    #[must_use]
    pub const fn preserve_newline(self) -> bool {
        self.contains(Self::PRESERVE_NEWLINE)
    }

    #[must_use]
    pub const fn preserve_comment(self) -> bool {
        self.contains(Self::PRESERVE_COMMENT)
    }

    #[must_use]
    pub const fn reduce_alloc(self) -> bool {
        self.contains(Self::REDUCE_ALLOC)
    }
}
