//! Structured parser diagnostics and the sinks that receive them.

use crate::stream::Location;
use crate::token::{Kind, Span};

/// A required token kind was missing at a grammar position.
///
/// Displays as the four-line block
///
/// ```text
/// ;error: <title>
/// ;desc: <description>
/// ;expected: <kind>
/// ;got: <kind>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(";error: {title}\n;desc: {description}\n;expected: {expected}\n;got: {got}")]
pub struct Diagnostic {
    pub title: &'static str,
    pub description: &'static str,
    pub expected: Kind,
    pub got: Kind,
    /// Span of the offending token; `None` at end of stream.
    pub span: Option<Span>,
    pub location: Option<Location>,
}

/// Receives diagnostics as the parser reports them.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

impl<F: FnMut(&Diagnostic)> DiagnosticSink for F {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self(diagnostic);
    }
}

/// Writes each diagnostic to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.location {
            Some(loc) => eprintln!("{}:{}\n{diagnostic}", loc.line, loc.column),
            None => eprintln!("{diagnostic}"),
        }
    }
}
