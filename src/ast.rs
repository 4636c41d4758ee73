use crate::token::Token;

/// Parsed source file: prologue plus declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    pub package: Package,
    pub imports: Vec<Import>,
    pub usings: Vec<Using>,
    pub document: Option<Document>,
    pub components: Vec<Component>,
}

/// `(package name "path")`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Package {
    pub ident: Token,
    pub path: Token,
}

/// `(import alias "path")`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Import {
    pub ident: Token,
    pub path: Token,
}

/// `(using name alias)` or `(using [a b] alias)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Using {
    pub idents: Vec<Token>,
    pub from: Token,
}

/// `(component Name [props] body...)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pub ident: Token,
    pub properties: Vec<Property>,
    pub children: Vec<Content>,
}

/// `(document Name? [props] body...)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub ident: Option<Token>,
    pub properties: Vec<Property>,
    pub children: Vec<Content>,
}

/// Typed field `name: Type` in a property list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Property {
    pub ident: Token,
    pub ty: Token,
}

/// Child of a component, document, or element body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(Token),
    Element(Element),
    Attribute(Attribute),
}

/// `(qualified/name attributes... children...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: Expr,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Content>,
}

/// One `key: value` entry of a `#tag{...}` or `{...}` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub tag: Option<Expr>,
    pub ident: Token,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Literal or identifier.
    Primary(Token),
    /// One `/` qualification step; chains associate to the left.
    Binary(Box<Self>, Box<Self>),
}

impl Expr {
    #[must_use]
    pub fn binary(left: Self, right: Self) -> Self {
        Self::Binary(Box::new(left), Box::new(right))
    }

    /// Leaf tokens from left to right.
    #[must_use]
    pub fn segments(&self) -> Vec<Token> {
        let mut out = Vec::new();
        self.collect_segments(&mut out);
        out
    }

    fn collect_segments(&self, out: &mut Vec<Token>) {
        match self {
            Self::Primary(tok) => out.push(*tok),
            Self::Binary(left, right) => {
                left.collect_segments(out);
                right.collect_segments(out);
            }
        }
    }
}

impl Element {
    #[must_use]
    pub const fn new(name: Expr) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }
}
