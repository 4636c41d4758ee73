//! Capacity hints for `Options::REDUCE_ALLOC`.
//!
//! Every hint is a filtered count over [`Walk`], the one routine that knows
//! where a list region ends. It must stay in step with the grammar in
//! `parser`: a region ends exactly where the matching parse loop stops.

use std::iter::Peekable;

use crate::stream::TokenStream;
use crate::token::{Kind, Token};

/// Declarations a file will hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileHint {
    pub imports: usize,
    pub usings: usize,
    pub components: usize,
}

/// Entries a component, document, or element body will hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyHint {
    /// Elements and text.
    pub children: usize,
    /// `key: value` entries inside attribute blocks.
    pub attributes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    /// Whole stream.
    Never,
    /// Unmatched closing kind, e.g. `]` of a property list.
    Close(Kind),
    /// First token that cannot start or continue a content item.
    Body,
}

/// Nesting at a visited token, measured before the token itself applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Depth {
    parens: usize,
    brackets: usize,
    braces: usize,
}

impl Depth {
    const fn is_top(self) -> bool {
        self.parens == 0 && self.brackets == 0 && self.braces == 0
    }
}

/// Non-trivia tokens of one region, with their nesting depth.
struct Walk<I: Iterator<Item = Token>> {
    tokens: I,
    end: End,
    depth: Depth,
    /// Inside a `#qualified/name` tag, before its `{`.
    tagged: bool,
    done: bool,
}

impl<I: Iterator<Item = Token>> Walk<I> {
    fn ends_region(&self, kind: Kind) -> bool {
        if !self.depth.is_top() {
            return false;
        }
        match self.end {
            End::Never => false,
            End::Close(close) => kind == close,
            End::Body => {
                let starts_item = matches!(kind, Kind::ParenOpen | Kind::Hash | Kind::BraceOpen)
                    || kind.is_string();
                let continues_tag = self.tagged && matches!(kind, Kind::Ident | Kind::FSlash);
                !(starts_item || continues_tag)
            }
        }
    }

    fn enter(&mut self, kind: Kind) {
        let d = &mut self.depth;
        match kind {
            Kind::ParenOpen => d.parens += 1,
            Kind::ParenClose => d.parens = d.parens.saturating_sub(1),
            Kind::BracketOpen => d.brackets += 1,
            Kind::BracketClose => d.brackets = d.brackets.saturating_sub(1),
            Kind::BraceOpen => d.braces += 1,
            Kind::BraceClose => d.braces = d.braces.saturating_sub(1),
            _ => {}
        }
        if kind == Kind::Hash {
            self.tagged = true;
        } else if !matches!(kind, Kind::Ident | Kind::FSlash) {
            self.tagged = false;
        }
    }
}

impl<I: Iterator<Item = Token>> Iterator for Walk<I> {
    type Item = (Kind, Depth);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let kind = self.tokens.by_ref().map(|t| t.kind).find(|k| !k.is_trivia())?;
        if self.ends_region(kind) {
            self.done = true;
            return None;
        }
        let depth = self.depth;
        self.enter(kind);
        Some((kind, depth))
    }
}

fn walk(
    stream: &TokenStream,
    from: usize,
    end: End,
) -> Walk<impl Iterator<Item = Token> + '_> {
    Walk {
        tokens: stream.tokens_from(from),
        end,
        depth: Depth::default(),
        tagged: false,
        done: false,
    }
}

/// Declaration lists of a whole file.
///
/// Top-level groups are visited in order past the package: imports until
/// the first group that is not one, then usings, then declarations until
/// a group starting with neither `component` nor `document`.
pub fn file(stream: &TokenStream) -> FileHint {
    let mut hint = FileHint::default();
    let mut phase = Phase::Package;
    let mut tokens: Peekable<_> = walk(stream, 0, End::Never).peekable();
    while let Some((kind, depth)) = tokens.next() {
        if kind != Kind::ParenOpen || !depth.is_top() {
            continue;
        }
        let keyword = tokens.peek().map(|&(k, _)| k);
        phase = match (phase, keyword) {
            (Phase::Package, _) => Phase::Imports,
            (Phase::Imports, Some(Kind::Import)) => {
                hint.imports += 1;
                Phase::Imports
            }
            (Phase::Imports | Phase::Usings, Some(Kind::Using)) => {
                hint.usings += 1;
                Phase::Usings
            }
            (_, Some(Kind::Component)) => {
                hint.components += 1;
                Phase::Declarations
            }
            (_, Some(Kind::Document)) => Phase::Declarations,
            _ => break,
        };
    }
    hint
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Package,
    Imports,
    Usings,
    Declarations,
}

/// Identifiers of a `[a b c]` using list; `from` is just past the `[`.
pub fn using_idents(stream: &TokenStream, from: usize) -> usize {
    walk(stream, from, End::Close(Kind::BracketClose))
        .filter(|&(kind, depth)| kind == Kind::Ident && depth.is_top())
        .count()
}

/// Properties of a `[a: A, b: B]` list; `from` is just past the `[`.
pub fn properties(stream: &TokenStream, from: usize) -> usize {
    walk(stream, from, End::Close(Kind::BracketClose))
        .filter(|&(kind, depth)| kind == Kind::Colon && depth.is_top())
        .count()
}

/// Content of a body starting at `from`.
pub fn body(stream: &TokenStream, from: usize) -> BodyHint {
    let mut hint = BodyHint::default();
    for (kind, depth) in walk(stream, from, End::Body) {
        if depth.is_top() && (kind == Kind::ParenOpen || kind.is_string()) {
            hint.children += 1;
        } else if kind == Kind::Colon
            && depth.parens == 0
            && depth.brackets == 0
            && depth.braces == 1
        {
            hint.attributes += 1;
        }
    }
    hint
}
