//! Lexer behaviour through the public API.

mod common;

use common::{APP, kinds};
use teml::{Kind, Location, Options, Span, scan};

// -----------------------------------------------------------
// Basic lexer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    let stream = scan(b"", Options::all());
    assert!(stream.is_empty());
    assert_eq!(stream.lines().count(), 0);
    assert_eq!(stream.get(0), None);
}

#[test]
fn lex_only_whitespace() {
    let stream = scan(b" \t\x0b\x0c\r ", Options::all());
    assert!(stream.is_empty());
}

#[test]
fn lex_only_newlines() {
    assert!(kinds("\n\n\t", Options::empty()).is_empty());
    assert_eq!(
        kinds("\n\n\t", Options::PRESERVE_NEWLINE),
        vec![Kind::Newline, Kind::Newline]
    );
}

#[test]
fn lex_lexemes() {
    let stream = scan(br#"package foo "foo" -- foo"#, Options::empty());
    let texts: Vec<_> = stream.texts().map(Option::unwrap).collect();
    assert_eq!(texts, vec!["package", "foo", r#""foo""#, "-- foo"]);
}

#[test]
fn lex_line_string_stops_at_newline() {
    let stream = scan(b"\n\t-- line 1\n\t", Options::empty());
    let toks: Vec<_> = stream.tokens().collect();
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, Kind::StringLine);
    assert_eq!(stream.text(toks[0]), Some("-- line 1"));
}

#[test]
fn lex_line_string_swallows_closing_paren() {
    assert_eq!(
        kinds("(p -- text)", Options::empty()),
        vec![Kind::ParenOpen, Kind::Ident, Kind::StringLine]
    );
}

#[test]
fn lex_template_marker_anywhere_in_body() {
    assert_eq!(
        kinds(r#""a \(b) c \(d)""#, Options::empty()),
        vec![Kind::StringTempl]
    );
    assert_eq!(kinds(r#""\(""#, Options::empty()), vec![Kind::StringTempl]);
    // a lone backslash is just an escape
    assert_eq!(kinds(r#""a \n b""#, Options::empty()), vec![Kind::String]);
}

#[test]
fn lex_hyphenated_identifier_is_not_line_string() {
    let stream = scan(b"foo--bar", Options::empty());
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.get(0).map(|t| t.kind), Some(Kind::Ident));
}

#[test]
fn lex_identifier_cannot_start_with_digit() {
    assert_eq!(
        kinds("1abc", Options::empty()),
        vec![Kind::Number, Kind::Ident]
    );
}

// -----------------------------------------------------------
// Malformed input becomes invalid tokens.
// -----------------------------------------------------------

#[test]
fn lex_errors_are_invalid_tokens() {
    for src in ["\"foo", "\"foo\n\t\t", "-", "1.", "@", "\u{e9}"] {
        let got = kinds(src, Options::empty());
        assert!(
            !got.is_empty() && got.iter().all(|&k| k == Kind::Invalid),
            "{src:?} scanned as {got:?}"
        );
    }
}

#[test]
fn lex_continues_after_invalid() {
    assert_eq!(
        kinds("a @ b \"c", Options::empty()),
        vec![Kind::Ident, Kind::Invalid, Kind::Ident, Kind::Invalid]
    );
}

#[test]
fn lex_non_utf8_invalid_has_no_text() {
    let stream = scan(&[0xff, b' ', b'a'], Options::empty());
    let first = stream.get(0).expect("token");
    assert_eq!(first.kind, Kind::Invalid);
    assert_eq!(stream.bytes(first), Some(&[0xff][..]));
    assert_eq!(stream.text(first), None);
}

// -----------------------------------------------------------
// Positions and lines.
// -----------------------------------------------------------

#[test]
fn lex_newline_offsets_recorded_regardless_of_options() {
    let plain = scan(b"package\nfoo\n", Options::empty());
    let kept = scan(b"package\nfoo\n", Options::PRESERVE_NEWLINE);
    assert_eq!(plain.lines().collect::<Vec<_>>(), vec![7, 11]);
    assert_eq!(kept.lines().collect::<Vec<_>>(), vec![7, 11]);
    assert_eq!(kept.len(), 4);
}

#[test]
fn lex_newline_token_span() {
    let stream = scan(b"a\nb", Options::PRESERVE_NEWLINE);
    let spans: Vec<_> = stream.spans().collect();
    assert_eq!(spans, vec![Span::new(0, 1), Span::new(1, 2), Span::new(2, 3)]);
}

#[test]
fn lex_token_locations() {
    let stream = scan(b"(package\n  p \"a\")", Options::empty());
    let p = stream.get(2).expect("p");
    assert_eq!(
        stream.token_location(p),
        Some(Location { line: 2, column: 3 })
    );
}

#[test]
fn lex_comment_span_runs_to_end_of_line() {
    let stream = scan(b"; howdy\nx", Options::PRESERVE_COMMENT);
    let first = stream.get(0).expect("comment");
    assert_eq!(first.kind, Kind::Comment);
    assert_eq!(stream.text(first), Some("; howdy"));
}

#[test]
fn lex_tokens_from_index() {
    let stream = scan(b"a b c", Options::empty());
    let rest: Vec<_> = stream.tokens_from(1).map(|t| t.pos).collect();
    assert_eq!(rest, vec![1, 2]);
}

// -----------------------------------------------------------
// Allocation presizing.
// -----------------------------------------------------------

#[test]
fn lex_reduce_alloc_presizes_exactly() {
    for extra in [Options::empty(), Options::PRESERVE_NEWLINE, Options::PRESERVE_COMMENT] {
        let stream = scan(APP.as_bytes(), Options::REDUCE_ALLOC | extra);
        assert_eq!(stream.capacity(), (stream.len(), stream.lines().count()));
    }
}

#[test]
fn lex_reduce_alloc_is_observably_identical() {
    for extra in [Options::empty(), Options::PRESERVE_NEWLINE, Options::PRESERVE_COMMENT] {
        let plain = scan(APP.as_bytes(), extra);
        let sized = scan(APP.as_bytes(), Options::REDUCE_ALLOC | extra);
        assert_eq!(plain, sized);
    }
}

#[test]
fn lex_fixture_has_no_invalid_tokens() {
    let stream = scan(APP.as_bytes(), Options::empty());
    let invalid: Vec<_> = stream
        .tokens()
        .filter(|t| t.kind == Kind::Invalid)
        .map(|t| stream.text(t))
        .collect();
    assert!(invalid.is_empty(), "invalid lexemes: {invalid:?}");
}
