//! Lexer and parser for teml, a small declarative component markup language.
//!
//! Source bytes are scanned once into a [`TokenStream`], which a
//! recursive-descent parser turns into a [`File`]: a package declaration,
//! imports, usings, and a tree of components or a document made of
//! elements, attributes, and text.
//!
//! Neither stage aborts. Malformed lexemes become [`Kind::Invalid`] tokens,
//! and every grammar mismatch is reported as a [`Diagnostic`] while parsing
//! carries on, so callers always get a best-effort tree and must check
//! whether anything was reported.
//!
//! # Quick start
//!
//! ```
//! use teml::{Kind, Options, parse, scan};
//!
//! let src = br#"(package p "a") (component Foo [a: A] (div))"#;
//! let stream = scan(src, Options::empty());
//! let parsed = parse(&stream, Options::empty());
//! assert!(!parsed.had_error());
//!
//! let foo = &parsed.file.components[0];
//! assert_eq!(stream.text(foo.ident), Some("Foo"));
//! assert_eq!(foo.properties[0].ty.kind, Kind::Ident);
//! ```
//!
//! ## Reporting diagnostics as they happen
//!
//! ```
//! use teml::{Options, StderrSink, parse_with_sink, scan};
//!
//! let stream = scan(b"(package)", Options::empty());
//! let (file, had_error) = parse_with_sink(&stream, Options::empty(), &mut StderrSink);
//! assert!(had_error);
//! assert_eq!(file.package, teml::Package::default());
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod diagnostic;
pub mod lexer;
pub mod options;
pub mod parser;
mod presize;
pub mod stream;
pub mod token;

pub use ast::{
    Attribute, Component, Content, Document, Element, Expr, File, Import, Package, Property, Using,
};
pub use diagnostic::{Diagnostic, DiagnosticSink, StderrSink};
pub use lexer::scan;
pub use options::Options;
pub use parser::{Parsed, parse, parse_with_sink};
pub use stream::{Location, TokenStream};
pub use token::{Kind, Span, Token};

/// Error type of the one-step convenience API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Parsing reported at least one diagnostic.
    #[error("{} syntax error(s)\n{}", diagnostics.len(), first(diagnostics))]
    Syntax { diagnostics: Vec<Diagnostic> },
}

fn first(diagnostics: &[Diagnostic]) -> String {
    diagnostics.first().map(ToString::to_string).unwrap_or_default()
}

/// Scan and parse source bytes in one step.
///
/// Succeeds only if nothing was reported; the token stream is dropped, so
/// use [`scan`] and [`parse`] directly when lexemes are needed.
pub fn parse_source(input: &[u8], options: Options) -> Result<File, Error> {
    let stream = scan(input, options);
    parse(&stream, options).into_result()
}
