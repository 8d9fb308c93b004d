//! Parser output: an untyped surface syntax tree.
//!
//! [`Syntax`] is deliberately thin — it carries no semantic meaning. The
//! elaborator (a different crate) is the only consumer that interprets a
//! node's tag and children as a type, term, rule or tactic.

/// A node produced by the Pratt parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Syntax {
    /// An identifier token (not matched by the trie, not a digit/quote run).
    Ident(String),
    /// A matched separator literal (e.g. the atom `"->"` in a notation).
    Atom(String),
    /// A decoded string literal (quotes stripped, escapes resolved).
    Str(String),
    /// A non-negative integer literal.
    Num(u64),
    /// A node tagged by the nonterminal it was parsed as, with its ordered
    /// children (the arguments consumed by the matching rule's descriptors).
    Node { kind: String, children: Vec<Syntax> },
}

impl Syntax {
    pub fn node(kind: impl Into<String>, children: Vec<Syntax>) -> Self {
        Syntax::Node { kind: kind.into(), children }
    }

    /// The children of a `Node`, or an empty slice for leaves.
    pub fn children(&self) -> &[Syntax] {
        match self {
            Syntax::Node { children, .. } => children,
            _ => &[],
        }
    }

    /// The nonterminal tag of a `Node`, if this is one.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Syntax::Node { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// The raw text of an `Ident`/`Atom`, if this is one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Syntax::Ident(s) | Syntax::Atom(s) => Some(s),
            _ => None,
        }
    }
}
