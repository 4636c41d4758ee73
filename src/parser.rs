use crate::ast::{
    Attribute, Component, Content, Document, Element, Expr, File, Import, Package, Property,
    Using,
};
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::options::Options;
use crate::presize;
use crate::stream::TokenStream;
use crate::token::{Kind, Token};

/// Parser output: a best-effort file and everything reported while building it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub file: File,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    #[must_use]
    pub fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The file, or every diagnostic if there was at least one.
    pub fn into_result(self) -> Result<File, crate::Error> {
        if self.diagnostics.is_empty() {
            Ok(self.file)
        } else {
            Err(crate::Error::Syntax {
                diagnostics: self.diagnostics,
            })
        }
    }
}

/// Parse a token stream, collecting diagnostics.
///
/// Always returns a file; check [`Parsed::had_error`] before trusting it.
#[tracing::instrument(skip_all, fields(token_count = stream.len()))]
pub fn parse(stream: &TokenStream, options: Options) -> Parsed {
    let mut diagnostics = Vec::new();
    let file = Parser::new(stream, options, &mut diagnostics).parse();
    Parsed { file, diagnostics }
}

/// Parse a token stream, handing each diagnostic to `sink` as it is found.
///
/// Returns the file and whether anything was reported.
#[tracing::instrument(skip_all, fields(token_count = stream.len()))]
pub fn parse_with_sink(
    stream: &TokenStream,
    options: Options,
    sink: &mut dyn DiagnosticSink,
) -> (File, bool) {
    let mut parser = Parser::new(stream, options, sink);
    let file = parser.parse_file();
    (file, parser.had_error)
}

/// Title and description lines of a diagnostic.
#[derive(Debug, Clone, Copy)]
struct Context {
    title: &'static str,
    description: &'static str,
}

const fn ctx(title: &'static str, description: &'static str) -> Context {
    Context { title, description }
}

const PACKAGE: &str = "Package Declaration Error";
const IMPORT: &str = "Import Declaration Error";
const USING: &str = "Using Declaration Error";
const DECLARATION: &str = "Declaration Error";
const COMPONENT: &str = "Component Declaration Error";
const DOCUMENT: &str = "Document Declaration Error";
const PROPERTY: &str = "Property Error";
const ELEMENT: &str = "Element Error";
const ATTRIBUTE: &str = "Attribute Error";

/// Deepest element nesting, and longest qualified name, that is built.
///
/// Anything past it is reported and skipped without recursion.
pub const MAX_DEPTH: usize = 256;

struct Parser<'a> {
    stream: &'a TokenStream,
    pos: usize,
    options: Options,
    sink: &'a mut dyn DiagnosticSink,
    had_error: bool,
    /// Open elements around the cursor.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(stream: &'a TokenStream, options: Options, sink: &'a mut dyn DiagnosticSink) -> Self {
        let mut parser = Self {
            stream,
            pos: 0,
            options,
            sink,
            had_error: false,
            depth: 0,
        };
        parser.skip_trivia();
        parser
    }

    fn parse(mut self) -> File {
        self.parse_file()
    }

    fn parse_file(&mut self) -> File {
        let mut file = File::default();
        if self.options.reduce_alloc() {
            let hint = presize::file(self.stream);
            file.imports = Vec::with_capacity(hint.imports);
            file.usings = Vec::with_capacity(hint.usings);
            file.components = Vec::with_capacity(hint.components);
        }

        file.package = self.parse_package();
        self.parse_imports(&mut file.imports);
        self.parse_usings(&mut file.usings);
        self.parse_declarations(&mut file);
        file
    }

    fn parse_package(&mut self) -> Package {
        self.expect(
            Kind::ParenOpen,
            ctx(PACKAGE, "missing opening parenthesis '('"),
        );
        self.expect(Kind::Package, ctx(PACKAGE, "missing keyword 'package'"));

        let ident = self
            .expect(Kind::Ident, ctx(PACKAGE, "missing identifier"))
            .unwrap_or_default();
        let path = self
            .expect(Kind::String, ctx(PACKAGE, "missing path string"))
            .unwrap_or_default();

        self.expect(
            Kind::ParenClose,
            ctx(PACKAGE, "missing closing parenthesis ')'"),
        );

        Package { ident, path }
    }

    fn parse_imports(&mut self, imports: &mut Vec<Import>) {
        while self.at_declaration(Kind::Import) {
            self.advance();
            self.advance();

            let ident = self
                .expect(Kind::Ident, ctx(IMPORT, "missing identifier"))
                .unwrap_or_default();
            let path = self
                .expect(Kind::String, ctx(IMPORT, "missing path string"))
                .unwrap_or_default();

            self.expect(
                Kind::ParenClose,
                ctx(IMPORT, "missing closing parenthesis ')'"),
            );

            imports.push(Import { ident, path });
        }
    }

    fn parse_usings(&mut self, usings: &mut Vec<Using>) {
        while self.at_declaration(Kind::Using) {
            self.advance();
            self.advance();

            let idents = if self.peek().kind == Kind::BracketOpen {
                self.advance();
                self.parse_using_list()
            } else {
                let ident = self
                    .expect(Kind::Ident, ctx(USING, "missing identifier"))
                    .unwrap_or_default();
                vec![ident]
            };

            let from = self
                .expect(Kind::Ident, ctx(USING, "missing import identifier"))
                .unwrap_or_default();

            self.expect(
                Kind::ParenClose,
                ctx(USING, "missing closing parenthesis ')'"),
            );

            usings.push(Using { idents, from });
        }
    }

    /// Identifiers up to the closing `]`; the `[` is already consumed.
    fn parse_using_list(&mut self) -> Vec<Token> {
        let mut idents = self.with_capacity(presize::using_idents);

        while !self.eof() && self.peek().kind != Kind::BracketClose {
            let ident = self
                .expect(Kind::Ident, ctx(USING, "missing identifier"))
                .unwrap_or_default();
            idents.push(ident);
        }

        if idents.is_empty() {
            self.report(
                Kind::Ident,
                self.peek(),
                ctx(USING, "empty identifier list"),
            );
        }

        self.expect(
            Kind::BracketClose,
            ctx(USING, "missing closing bracket ']'"),
        );
        idents
    }

    fn parse_declarations(&mut self, file: &mut File) {
        while !self.eof() {
            self.expect(
                Kind::ParenOpen,
                ctx(DECLARATION, "missing opening parenthesis '('"),
            );

            match self.peek().kind {
                Kind::Component => {
                    let component = self.parse_component();
                    file.components.push(component);
                }
                Kind::Document => {
                    file.document = Some(self.parse_document());
                }
                other => {
                    tracing::debug!(kind = %other, pos = self.pos, "declarations end");
                    return;
                }
            }

            self.expect(
                Kind::ParenClose,
                ctx(DECLARATION, "missing closing parenthesis ')'"),
            );
        }
    }

    fn parse_component(&mut self) -> Component {
        debug_assert_eq!(self.peek().kind, Kind::Component);
        self.advance();

        let ident = self
            .expect(Kind::Ident, ctx(COMPONENT, "missing component identifier"))
            .unwrap_or_default();
        let properties = self.parse_property_block(COMPONENT);
        let children = self.parse_body(false).children;

        Component {
            ident,
            properties,
            children,
        }
    }

    fn parse_document(&mut self) -> Document {
        debug_assert_eq!(self.peek().kind, Kind::Document);
        self.advance();

        let ident = (self.peek().kind == Kind::Ident).then(|| {
            let tok = self.peek();
            self.advance();
            tok
        });
        let properties = self.parse_property_block(DOCUMENT);
        let children = self.parse_body(false).children;

        Document {
            ident,
            properties,
            children,
        }
    }

    /// `[ Property* ]`.
    fn parse_property_block(&mut self, title: &'static str) -> Vec<Property> {
        self.expect(
            Kind::BracketOpen,
            ctx(title, "missing opening square bracket '['"),
        );

        let mut properties = self.with_capacity(presize::properties);
        while !self.eof() && self.peek().kind != Kind::BracketClose {
            properties.push(self.parse_property());
        }

        self.expect(
            Kind::BracketClose,
            ctx(title, "missing closing square bracket ']'"),
        );
        properties
    }

    fn parse_property(&mut self) -> Property {
        let ident = self
            .expect(Kind::Ident, ctx(PROPERTY, "missing property identifier"))
            .unwrap_or_default();
        self.expect(Kind::Colon, ctx(PROPERTY, "missing type separator ':'"));
        let ty = self
            .expect(Kind::Ident, ctx(PROPERTY, "missing property type"))
            .unwrap_or_default();

        if self.peek().kind == Kind::Comma {
            self.advance();
        }
        Property { ident, ty }
    }

    /// Content items up to the first token that cannot start one.
    ///
    /// With `split`, attribute entries go to their own list (element bodies);
    /// otherwise they stay in `children` as [`Content::Attribute`].
    fn parse_body(&mut self, split: bool) -> Body {
        let mut body = Body::default();
        if self.options.reduce_alloc() {
            let hint = presize::body(self.stream, self.pos);
            if split {
                body.children = Vec::with_capacity(hint.children);
                body.attributes = Vec::with_capacity(hint.attributes);
            } else {
                body.children = Vec::with_capacity(hint.children + hint.attributes);
            }
        }

        loop {
            let tok = self.peek();
            match tok.kind {
                Kind::ParenOpen => {
                    if let Some(element) = self.parse_element() {
                        body.children.push(Content::Element(element));
                    }
                }
                Kind::Hash | Kind::BraceOpen => {
                    let attributes = self.parse_attribute_block();
                    if split {
                        body.attributes.extend(attributes);
                    } else {
                        body.children
                            .extend(attributes.into_iter().map(Content::Attribute));
                    }
                }
                kind if kind.is_string() => {
                    self.advance();
                    body.children.push(Content::Text(tok));
                }
                _ => break,
            }
        }
        body
    }

    /// `None` if the element is nested too deep and was skipped.
    fn parse_element(&mut self) -> Option<Element> {
        if self.depth == MAX_DEPTH {
            self.report(
                Kind::ParenClose,
                self.peek(),
                ctx(ELEMENT, "nesting too deep"),
            );
            self.skip_group();
            return None;
        }

        self.expect(
            Kind::ParenOpen,
            ctx(ELEMENT, "missing opening parenthesis '('"),
        );

        let mut element = Element::new(self.parse_qualified_name(ELEMENT));
        self.depth += 1;
        let body = self.parse_body(true);
        self.depth -= 1;
        element.attributes = body.attributes;
        element.children = body.children;

        self.expect(
            Kind::ParenClose,
            ctx(ELEMENT, "missing closing parenthesis ')'"),
        );
        Some(element)
    }

    /// Consume a parenthesized group through its matching `)`.
    fn skip_group(&mut self) {
        let mut open = 0usize;
        while !self.eof() {
            match self.peek().kind {
                Kind::ParenOpen => open += 1,
                Kind::ParenClose => open = open.saturating_sub(1),
                _ => {}
            }
            self.advance();
            if open == 0 {
                break;
            }
        }
    }

    /// `('#' QualName)? '{' (ident ':' Expr ','?)* '}'`, one entry per key.
    fn parse_attribute_block(&mut self) -> Vec<Attribute> {
        let tag = (self.peek().kind == Kind::Hash).then(|| {
            self.advance();
            self.parse_qualified_name(ATTRIBUTE)
        });

        if self.peek().kind != Kind::BraceOpen {
            self.report(
                Kind::BraceOpen,
                self.peek(),
                ctx(ATTRIBUTE, "missing opening brace '{'"),
            );
            return Vec::new();
        }
        self.advance();

        let mut attributes = Vec::new();
        while !self.eof() && self.peek().kind != Kind::BraceClose {
            let ident = self
                .expect(Kind::Ident, ctx(ATTRIBUTE, "missing attribute key"))
                .unwrap_or_default();
            self.expect(
                Kind::Colon,
                ctx(ATTRIBUTE, "missing attribute value separator ':'"),
            );
            let value = self.parse_expr();

            if self.peek().kind == Kind::Comma {
                self.advance();
            }

            attributes.push(Attribute {
                tag: tag.clone(),
                ident,
                value,
            });
        }

        self.expect(
            Kind::BraceClose,
            ctx(ATTRIBUTE, "missing closing brace '}'"),
        );
        attributes
    }

    /// `ident ('/' ident)*` as a left-associated chain.
    fn parse_qualified_name(&mut self, title: &'static str) -> Expr {
        let head = self
            .expect(Kind::Ident, ctx(title, "missing name"))
            .unwrap_or_default();
        let mut expr = Expr::Primary(head);

        let mut segments = 1;
        while self.peek().kind == Kind::FSlash {
            self.advance();
            let right = self
                .expect(Kind::Ident, ctx(title, "missing name after '/'"))
                .unwrap_or_default();
            segments += 1;
            if segments <= MAX_DEPTH {
                expr = Expr::binary(expr, Expr::Primary(right));
            } else if segments == MAX_DEPTH + 1 {
                self.report(Kind::ParenClose, right, ctx(title, "name too long"));
            }
        }
        expr
    }

    /// Attribute value. A missing value is reported but not consumed.
    fn parse_expr(&mut self) -> Expr {
        let tok = self.peek();
        match tok.kind {
            Kind::String
            | Kind::StringTempl
            | Kind::True
            | Kind::False
            | Kind::Number
            | Kind::Ident => {
                self.advance();
                Expr::Primary(tok)
            }
            _ => {
                self.report(Kind::String, tok, ctx(ATTRIBUTE, "missing attribute value"));
                Expr::Primary(Token::default())
            }
        }
    }

    // -----------------------------------------------------------
    // Cursor.
    // -----------------------------------------------------------

    /// Consume the current token whatever it is. Returns it only if it
    /// has the expected kind; a mismatch is reported.
    fn expect(&mut self, kind: Kind, context: Context) -> Option<Token> {
        let tok = self.peek();
        self.advance();
        if tok.kind == kind {
            Some(tok)
        } else {
            self.report(kind, tok, context);
            None
        }
    }

    fn report(&mut self, expected: Kind, got: Token, context: Context) {
        let span = self.stream.span(got);
        let diagnostic = Diagnostic {
            title: context.title,
            description: context.description,
            expected,
            got: got.kind,
            span,
            location: span.map(|s| self.stream.location(s.start)),
        };
        tracing::debug!(%expected, got = %got.kind, "{}", context.description);
        self.had_error = true;
        self.sink.report(&diagnostic);
    }

    /// `(` followed by `keyword`.
    fn at_declaration(&self, keyword: Kind) -> bool {
        self.peek().kind == Kind::ParenOpen && self.peek_next().kind == keyword
    }

    fn with_capacity<T>(&self, hint: fn(&TokenStream, usize) -> usize) -> Vec<T> {
        if self.options.reduce_alloc() {
            Vec::with_capacity(hint(self.stream, self.pos))
        } else {
            Vec::new()
        }
    }

    fn peek(&self) -> Token {
        self.stream.get(self.pos).unwrap_or(Token::EOF)
    }

    fn peek_next(&self) -> Token {
        self.stream
            .tokens_from(self.pos + 1)
            .find(|t| !t.kind.is_trivia())
            .unwrap_or(Token::EOF)
    }

    fn advance(&mut self) {
        if self.eof() {
            return;
        }
        self.pos += 1;
        self.skip_trivia();
    }

    fn skip_trivia(&mut self) {
        while self.stream.get(self.pos).is_some_and(|t| t.kind.is_trivia()) {
            self.pos += 1;
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.stream.len()
    }
}

#[derive(Debug, Default)]
struct Body {
    children: Vec<Content>,
    attributes: Vec<Attribute>,
}
