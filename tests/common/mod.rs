#![allow(dead_code)]

use teml::{
    Attribute, Content, Diagnostic, Expr, File, Kind, Options, Parsed, Property, Token, TokenStream,
    parse, scan,
};

pub const APP: &str = include_str!("../fixtures/app.teml");

pub fn kinds(input: &str, options: Options) -> Vec<Kind> {
    scan(input.as_bytes(), options)
        .tokens()
        .map(|t| t.kind)
        .collect()
}

pub fn parse_input(input: &str) -> (TokenStream, Parsed) {
    let stream = scan(input.as_bytes(), Options::empty());
    let parsed = parse(&stream, Options::empty());
    (stream, parsed)
}

/// Parse and fail with every diagnostic if anything was reported.
pub fn parse_ok(input: &str) -> (TokenStream, File) {
    let (stream, parsed) = parse_input(input);
    assert!(
        !parsed.had_error(),
        "unexpected diagnostics for {input:?}:\n{}",
        render(&parsed.diagnostics)
    );
    (stream, parsed.file)
}

pub fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Lexeme of a token, panicking if it has none.
pub fn text(stream: &TokenStream, token: Token) -> &str {
    stream
        .text(token)
        .unwrap_or_else(|| panic!("no text for {token:?}"))
}

/// Render a file with lexemes instead of token positions, so trees
/// from streams with different trivia can be compared.
pub fn outline(stream: &TokenStream, file: &File) -> String {
    let mut out = String::new();
    let t = |tok: Token| stream.text(tok).unwrap_or("<missing>").to_string();

    out += &format!("package {} {}\n", t(file.package.ident), t(file.package.path));
    for imp in &file.imports {
        out += &format!("import {} {}\n", t(imp.ident), t(imp.path));
    }
    for using in &file.usings {
        let idents: Vec<_> = using.idents.iter().map(|&i| t(i)).collect();
        out += &format!("using [{}] {}\n", idents.join(" "), t(using.from));
    }
    if let Some(doc) = &file.document {
        let name = doc.ident.map(t).unwrap_or_default();
        out += &format!("document {name}");
        properties(&mut out, stream, &doc.properties);
        contents(&mut out, stream, &doc.children, 1);
    }
    for cmp in &file.components {
        out += &format!("component {}", t(cmp.ident));
        properties(&mut out, stream, &cmp.properties);
        contents(&mut out, stream, &cmp.children, 1);
    }
    out
}

fn properties(out: &mut String, stream: &TokenStream, props: &[Property]) {
    let props: Vec<_> = props
        .iter()
        .map(|p| format!("{}:{}", lexeme(stream, p.ident), lexeme(stream, p.ty)))
        .collect();
    *out += &format!(" [{}]\n", props.join(" "));
}

fn contents(out: &mut String, stream: &TokenStream, children: &[Content], depth: usize) {
    let pad = "  ".repeat(depth);
    for child in children {
        match child {
            Content::Text(tok) => *out += &format!("{pad}text {}\n", lexeme(stream, *tok)),
            Content::Attribute(attr) => *out += &format!("{pad}{}\n", attribute(stream, attr)),
            Content::Element(el) => {
                *out += &format!("{pad}element {}\n", name(stream, &el.name));
                for attr in &el.attributes {
                    *out += &format!("{pad}  {}\n", attribute(stream, attr));
                }
                contents(out, stream, &el.children, depth + 1);
            }
        }
    }
}

fn attribute(stream: &TokenStream, attr: &Attribute) -> String {
    let tag = attr
        .tag
        .as_ref()
        .map(|tag| format!("#{} ", name(stream, tag)))
        .unwrap_or_default();
    format!(
        "attr {tag}{}={}",
        lexeme(stream, attr.ident),
        name(stream, &attr.value)
    )
}

pub fn name(stream: &TokenStream, expr: &Expr) -> String {
    expr.segments()
        .into_iter()
        .map(|tok| lexeme(stream, tok))
        .collect::<Vec<_>>()
        .join("/")
}

fn lexeme(stream: &TokenStream, tok: Token) -> String {
    stream.text(tok).unwrap_or("<missing>").to_string()
}

/// Parse with `REDUCE_ALLOC` and check that every list in the tree was
/// allocated with exactly the room it needed.
pub fn assert_presized(input: &str) {
    let options = Options::REDUCE_ALLOC;
    let stream = scan(input.as_bytes(), options);
    let parsed = parse(&stream, options);
    assert!(
        !parsed.had_error(),
        "unexpected diagnostics for {input:?}:\n{}",
        render(&parsed.diagnostics)
    );

    let file = &parsed.file;
    exact(input, "imports", file.imports.capacity(), file.imports.len());
    exact(input, "usings", file.usings.capacity(), file.usings.len());
    exact(input, "components", file.components.capacity(), file.components.len());
    for using in &file.usings {
        exact(input, "using idents", using.idents.capacity(), using.idents.len());
    }
    for cmp in &file.components {
        exact(input, "properties", cmp.properties.capacity(), cmp.properties.len());
        presized_contents(input, &cmp.children);
    }
    if let Some(doc) = &file.document {
        exact(input, "properties", doc.properties.capacity(), doc.properties.len());
        presized_contents(input, &doc.children);
    }
}

fn presized_contents(input: &str, children: &Vec<Content>) {
    exact(input, "children", children.capacity(), children.len());
    for child in children {
        if let Content::Element(el) = child {
            exact(input, "attributes", el.attributes.capacity(), el.attributes.len());
            presized_contents(input, &el.children);
        }
    }
}

fn exact(input: &str, what: &str, capacity: usize, len: usize) {
    assert_eq!(capacity, len, "{what} of {input:?}");
}
