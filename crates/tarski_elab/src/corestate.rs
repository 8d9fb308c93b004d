//! The global, persistently-threaded environment: the grammar and trie the
//! parser runs against, registered notations, declared constants and
//! axioms.

use std::collections::HashMap;

use tarski_kernel::{Rule, Ty};
use tarski_parse::{Grammar, ParserDescr as D, ParserRule, Trie};

use crate::notation::Notation;

#[derive(Debug, Clone)]
pub struct CoreState {
    pub parsers: Grammar,
    pub trie: Trie,
    pub notations: Vec<Notation>,
    pub constants: HashMap<String, Ty>,
    pub axioms: HashMap<String, Rule>,
}

impl CoreState {
    /// The empty environment seeded with the default surface grammar (§6)
    /// and its initial separator set.
    pub fn new() -> Self {
        CoreState {
            parsers: default_grammar(),
            trie: default_trie(),
            notations: Vec::new(),
            constants: HashMap::new(),
            axioms: HashMap::new(),
        }
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

const INITIAL_SEPARATORS: &[&str] =
    &["(", ")", "->", "\\", ":", ",", "!!", "=>", ":=", "assum", "intro", "apply", "have", "notation", "axiom", "prove", "by"];

fn default_trie() -> Trie {
    let mut trie = Trie::new();
    for sep in INITIAL_SEPARATORS {
        trie = trie.insert(sep);
    }
    trie
}

fn default_grammar() -> Grammar {
    let mut g = Grammar::new();

    // ty := '(' ty ')' | ident | ty@31 '->' ty@30
    g.insert("ty", ParserRule::new(1024, vec![D::Ident]));
    g.insert("ty", ParserRule::new(1024, vec![D::symbol("("), D::recurse("ty", 0), D::symbol(")")]));
    g.insert("ty", ParserRule::new(30, vec![D::recurse("ty", 31), D::symbol("->"), D::recurse("ty", 30)]));

    // term := '(' term ')' | ident | '\' ident ':' ty ',' term | term@0 term@1
    g.insert("term", ParserRule::new(1024, vec![D::Ident]));
    g.insert("term", ParserRule::new(1024, vec![D::symbol("("), D::recurse("term", 0), D::symbol(")")]));
    g.insert(
        "term",
        ParserRule::new(
            1024,
            vec![D::symbol("\\"), D::Ident, D::symbol(":"), D::recurse("ty", 0), D::symbol(","), D::recurse("term", 0)],
        ),
    );
    g.insert("term", ParserRule::new(0, vec![D::recurse("term", 0), D::recurse("term", 1)]));

    // rule := '(' rule ')' | term | '!!' ident+ ':' ty ',' rule | rule@31 '=>' rule@30
    //
    // '(' rule ')' must be tried before bare `term`: on a leading `(`, the
    // bare-term alternative would otherwise enter term's own paren rule,
    // consume the parenthesized subexpression, and then fatally commit when
    // what follows isn't a valid continuation of a term (e.g. `=>`) — never
    // giving this alternative a chance to back out and retry as `( rule )`.
    g.insert("rule", ParserRule::new(1024, vec![D::symbol("("), D::recurse("rule", 0), D::symbol(")")]));
    g.insert("rule", ParserRule::new(1024, vec![D::recurse("term", 0)]));
    g.insert(
        "rule",
        ParserRule::new(
            1024,
            vec![D::symbol("!!"), D::many1(D::Ident), D::symbol(":"), D::recurse("ty", 0), D::symbol(","), D::recurse("rule", 0)],
        ),
    );
    g.insert("rule", ParserRule::new(30, vec![D::recurse("rule", 31), D::symbol("=>"), D::recurse("rule", 30)]));

    // notation := string | ty ':' num
    g.insert("notation", ParserRule::new(1024, vec![D::Str]));
    g.insert("notation", ParserRule::new(1024, vec![D::recurse("ty", 0), D::symbol(":"), D::Num]));

    // applyArg := ident | term@61
    g.insert("applyArg", ParserRule::new(1024, vec![D::Ident]));
    g.insert("applyArg", ParserRule::new(1024, vec![D::recurse("term", 61)]));

    // tactic := 'assum' | 'intro' ident+ | 'apply' ident applyArg* | 'have' ident ':' rule
    g.insert("tactic", ParserRule::new(1024, vec![D::symbol("assum")]));
    g.insert("tactic", ParserRule::new(1024, vec![D::symbol("intro"), D::many1(D::Ident)]));
    g.insert("tactic", ParserRule::new(1024, vec![D::symbol("apply"), D::Ident, D::many(D::recurse("applyArg", 0))]));
    g.insert("tactic", ParserRule::new(1024, vec![D::symbol("have"), D::Ident, D::symbol(":"), D::recurse("rule", 0)]));

    // command := 'notation' ':' num notation+ ':' ty ':=' ident
    //          | 'axiom' ident ':' rule
    //          | 'prove' ident ':' rule 'by' tactic*
    g.insert(
        "command",
        ParserRule::new(
            1024,
            vec![
                D::symbol("notation"),
                D::symbol(":"),
                D::Num,
                D::many1(D::recurse("notation", 0)),
                D::symbol(":"),
                D::recurse("ty", 0),
                D::symbol(":="),
                D::Ident,
            ],
        ),
    );
    g.insert("command", ParserRule::new(1024, vec![D::symbol("axiom"), D::Ident, D::symbol(":"), D::recurse("rule", 0)]));
    g.insert(
        "command",
        ParserRule::new(
            1024,
            vec![D::symbol("prove"), D::Ident, D::symbol(":"), D::recurse("rule", 0), D::symbol("by"), D::many(D::recurse("tactic", 0))],
        ),
    );

    g
}
