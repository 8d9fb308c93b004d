//! The Pratt parser: precedence-driven parsing over a runtime [`Grammar`].
//!
//! Rules for a nonterminal split into prefix rules (their first descriptor
//! is *not* a self-recursion) and infix/postfix rules (it is). A prefix rule
//! is chosen by first match; the result then feeds an infix loop that keeps
//! extending `left` as long as a higher-or-equal-precedence infix rule's
//! lookahead matches.
//!
//! Failure carries a `fatal` bit (§4.3, §7.3): once a rule has consumed at
//! least one token relative to where it started, any further failure inside
//! it is promoted to fatal and propagates straight out, instead of being
//! swallowed as "try the next alternative". This is what lets the command
//! driver (a different crate) distinguish "clean end of input" from "genuine
//! syntax error".

use std::fmt;

use crate::grammar::{Grammar, ParserDescr, ParserRule};
use crate::syntax::Syntax;
use crate::token::{TokenKind, TokenStream};
use crate::trie::Trie;

/// A parse failure: a human-readable reason and whether it should abort the
/// whole parse (`fatal`) or merely rule out the alternative that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub reason: String,
    pub fatal: bool,
}

impl ParseFailure {
    pub fn soft(reason: impl Into<String>) -> Self {
        Self { reason: reason.into(), fatal: false }
    }

    pub fn fatal(reason: impl Into<String>) -> Self {
        Self { reason: reason.into(), fatal: true }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for ParseFailure {}

/// The result of a successful (partial) parse: the value and the stream
/// positioned just past it.
pub type ParseResult<'a, T> = Result<(T, TokenStream<'a>), ParseFailure>;

/// Decodes a string token's text (quotes included) per the standard
/// backslash escapes, returning `None` if the literal was never closed.
fn decode_string(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    if chars.next() != Some('"') {
        return None;
    }
    let mut out = String::new();
    let mut closed = false;
    while let Some(c) = chars.next() {
        if c == '"' {
            closed = true;
            break;
        }
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => out.push(other),
                None => return None,
            }
        } else {
            out.push(c);
        }
    }
    if closed {
        Some(out)
    } else {
        None
    }
}

/// True if every character of `text` could appear in an identifier (letters,
/// digits, underscore) and it's nonempty — as opposed to a purely symbolic
/// separator like `->` or `(`.
fn is_identifier_shaped(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn parse_arg<'a>(
    grammar: &Grammar,
    trie: &Trie,
    descr: &ParserDescr,
    stream: TokenStream<'a>,
) -> ParseResult<'a, Syntax> {
    match descr {
        ParserDescr::Symbol(lit) => match stream.peek(trie) {
            Some(tok) if tok.text == lit.as_str() => {
                Ok((Syntax::Atom(lit.clone()), stream.next(trie).unwrap()))
            }
            _ => Err(ParseFailure::soft(format!("expected `{}`", lit))),
        },
        ParserDescr::Ident => match stream.peek(trie) {
            Some(tok) if tok.kind == TokenKind::Ident => {
                Ok((Syntax::Ident(tok.text.to_string()), stream.next(trie).unwrap()))
            }
            // A `notation`-declared atom (e.g. `Prop`, `p`, `T`) lexes as a
            // separator once it's in the trie, but it still spells a name;
            // let it satisfy `ident` too, so it stays usable bare (as a type
            // name, or as a term on its own) and not only inside the
            // notation's own symbol rule. Fixed language keywords (`by`,
            // `axiom`, ...) are never atoms, so they're unaffected — and only
            // identifier-shaped atoms qualify, so a symbolic atom spelling
            // (e.g. an infix operator literal) still can't masquerade as one.
            Some(tok) if tok.kind == TokenKind::Separator && trie.is_atom(tok.text) && is_identifier_shaped(tok.text) => {
                Ok((Syntax::Ident(tok.text.to_string()), stream.next(trie).unwrap()))
            }
            _ => Err(ParseFailure::soft("expected identifier")),
        },
        ParserDescr::Str => match stream.peek(trie) {
            Some(tok) if tok.kind == TokenKind::Str => match decode_string(tok.text) {
                Some(s) => Ok((Syntax::Str(s), stream.next(trie).unwrap())),
                None => Err(ParseFailure::fatal(format!(
                    "unterminated or malformed string literal `{}`",
                    tok.text
                ))),
            },
            _ => Err(ParseFailure::soft("expected string literal")),
        },
        ParserDescr::Num => match stream.peek(trie) {
            Some(tok) if tok.kind == TokenKind::Num => match tok.text.parse::<u64>() {
                Ok(n) => Ok((Syntax::Num(n), stream.next(trie).unwrap())),
                Err(_) => Err(ParseFailure::fatal(format!("invalid numeric literal `{}`", tok.text))),
            },
            _ => Err(ParseFailure::soft("expected number")),
        },
        ParserDescr::Recurse { name, min_prec } => parse(grammar, trie, name, *min_prec, stream),
        ParserDescr::Many(inner) => {
            let mut items = Vec::new();
            let mut cur = stream;
            loop {
                match parse_arg(grammar, trie, inner, cur) {
                    Ok((syn, next)) => {
                        items.push(syn);
                        cur = next;
                    }
                    Err(e) => {
                        if e.fatal {
                            return Err(e);
                        }
                        break;
                    }
                }
            }
            Ok((Syntax::node("many", items), cur))
        }
        ParserDescr::Many1(inner) => {
            let (first, mut cur) = parse_arg(grammar, trie, inner, stream)?;
            let mut items = vec![first];
            loop {
                match parse_arg(grammar, trie, inner, cur) {
                    Ok((syn, next)) => {
                        items.push(syn);
                        cur = next;
                    }
                    Err(e) => {
                        if e.fatal {
                            return Err(e);
                        }
                        break;
                    }
                }
            }
            Ok((Syntax::node("many", items), cur))
        }
    }
}

/// Parses the descriptors of a rule body from `start_at` onward, appending
/// to `children`. `commit_from` is the stream position the *owning rule
/// attempt* began at; once `stream` has advanced past it, any subsequent
/// descriptor failure is promoted to fatal.
fn parse_rule_body<'a>(
    grammar: &Grammar,
    trie: &Trie,
    descr: &[ParserDescr],
    start_at: usize,
    mut stream: TokenStream<'a>,
    mut children: Vec<Syntax>,
    commit_from: usize,
) -> ParseResult<'a, Vec<Syntax>> {
    for d in &descr[start_at..] {
        match parse_arg(grammar, trie, d, stream) {
            Ok((syn, next)) => {
                children.push(syn);
                stream = next;
            }
            Err(mut e) => {
                if stream.index() != commit_from {
                    e.fatal = true;
                }
                return Err(e);
            }
        }
    }
    Ok((children, stream))
}

fn select_infix<'g>(infix: &[&'g ParserRule], min_prec: i32, lookahead: &str) -> Option<&'g ParserRule> {
    for rule in infix {
        if rule.prec < min_prec {
            continue;
        }
        let candidate = match rule.descr.get(1) {
            Some(ParserDescr::Symbol(lit)) => lookahead == lit.as_str(),
            Some(ParserDescr::Ident) | Some(ParserDescr::Recurse { .. }) => true,
            _ => false,
        };
        if candidate {
            return Some(rule);
        }
    }
    None
}

/// Parses one `nonterminal` with minimum precedence `min_prec`, returning
/// the resulting `Syntax::Node` (tagged `nonterminal`) and the stream just
/// past it.
pub fn parse<'a>(
    grammar: &Grammar,
    trie: &Trie,
    nonterminal: &str,
    min_prec: i32,
    stream: TokenStream<'a>,
) -> ParseResult<'a, Syntax> {
    let rules = grammar.rules_for(nonterminal);
    let mut prefix = Vec::new();
    let mut infix = Vec::new();
    for rule in rules {
        if rule.is_infix_for(nonterminal) {
            infix.push(rule);
        } else {
            prefix.push(rule);
        }
    }

    let mut cur = stream;
    let mut left: Option<Syntax> = None;
    let mut soft_err: Option<ParseFailure> = None;
    for rule in &prefix {
        let commit_from = cur.index();
        match parse_rule_body(grammar, trie, &rule.descr, 0, cur, Vec::new(), commit_from) {
            Ok((children, next)) => {
                left = Some(Syntax::node(nonterminal, children));
                cur = next;
                break;
            }
            Err(e) => {
                if e.fatal {
                    return Err(e);
                }
                soft_err = Some(e);
            }
        }
    }
    let mut left = match left {
        Some(l) => l,
        None => {
            return Err(soft_err.unwrap_or_else(|| ParseFailure::soft(format!("no `{}` rule matched", nonterminal))))
        }
    };

    loop {
        let tok = match cur.peek(trie) {
            Some(t) => t,
            None => break,
        };
        let rule = match select_infix(&infix, min_prec, tok.text) {
            Some(r) => r,
            None => break,
        };
        let commit_from = cur.index();
        match parse_rule_body(grammar, trie, &rule.descr, 1, cur, vec![left.clone()], commit_from) {
            Ok((children, next)) => {
                left = Syntax::node(nonterminal, children);
                cur = next;
            }
            Err(e) => {
                if e.fatal {
                    return Err(e);
                }
                break;
            }
        }
    }
    Ok((left, cur))
}
