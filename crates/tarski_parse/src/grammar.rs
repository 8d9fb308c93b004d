//! The runtime-extensible grammar table the Pratt parser is driven by.
//!
//! A [`Grammar`] maps nonterminal names (`"command"`, `"term"`, `"ty"`, …) to
//! an ordered list of [`ParserRule`]s. Order matters: prefix rules are tried
//! in list order and the first match wins (§4.3), so callers that extend the
//! grammar at runtime (notation declarations) must re-sort by descending
//! precedence rather than simply appending.

use std::collections::HashMap;

/// One element of a rule's body.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserDescr {
    /// Recursively parse nonterminal `name` with at least precedence `min_prec`.
    Recurse { name: String, min_prec: i32 },
    /// Consume one identifier token.
    Ident,
    /// Consume one string literal token.
    Str,
    /// Consume one numeric literal token.
    Num,
    /// Consume one token equal to `literal`.
    Symbol(String),
    /// Zero or more repetitions of the inner descriptor.
    Many(Box<ParserDescr>),
    /// One or more repetitions of the inner descriptor.
    Many1(Box<ParserDescr>),
}

impl ParserDescr {
    pub fn recurse(name: impl Into<String>, min_prec: i32) -> Self {
        ParserDescr::Recurse { name: name.into(), min_prec }
    }

    pub fn symbol(lit: impl Into<String>) -> Self {
        ParserDescr::Symbol(lit.into())
    }

    pub fn many(d: ParserDescr) -> Self {
        ParserDescr::Many(Box::new(d))
    }

    pub fn many1(d: ParserDescr) -> Self {
        ParserDescr::Many1(Box::new(d))
    }
}

/// A single production: a precedence and the ordered descriptors of its body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserRule {
    pub prec: i32,
    pub descr: Vec<ParserDescr>,
}

impl ParserRule {
    pub fn new(prec: i32, descr: Vec<ParserDescr>) -> Self {
        Self { prec, descr }
    }

    /// A rule is infix/postfix iff its first descriptor recurses into its
    /// own nonterminal — that's what makes it eligible to consume a `left`.
    pub fn is_infix_for(&self, nonterminal: &str) -> bool {
        matches!(self.descr.first(), Some(ParserDescr::Recurse { name, .. }) if name == nonterminal)
    }
}

/// The grammar table: nonterminal name -> its rules, kept sorted by
/// descending precedence.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: HashMap<String, Vec<ParserRule>>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rules currently registered for `nonterminal`, in selection order.
    pub fn rules_for(&self, nonterminal: &str) -> &[ParserRule] {
        self.rules.get(nonterminal).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Installs `rule` under `nonterminal`, re-sorting the whole list by
    /// descending precedence (stable, so insertion order breaks ties —
    /// this is what keeps parser rule selection deterministic per spec §5).
    pub fn insert(&mut self, nonterminal: impl Into<String>, rule: ParserRule) {
        let entry = self.rules.entry(nonterminal.into()).or_default();
        entry.push(rule);
        entry.sort_by(|a, b| b.prec.cmp(&a.prec));
    }
}
