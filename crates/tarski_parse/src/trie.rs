//! Separator trie: longest-match recognition of multi-character tokens.
//!
//! The tokenizer needs to decide, at any position in the source text, how
//! many characters of a built-in or user-declared separator (`->`, `=>`,
//! `:=`, `!!`, …) start there. A trie keyed by character, with a sentinel
//! marking word ends, answers that in one left-to-right walk.
//!
//! # Example
//!
//! ```
//! use tarski_parse::Trie;
//!
//! let trie = Trie::new().insert("->").insert("=>").insert(":");
//! assert_eq!(trie.match_longest("-> x", 0), 2);
//! assert_eq!(trie.match_longest(": x", 0), 1);
//! assert_eq!(trie.match_longest("x", 0), 0);
//! assert!(trie.has("->"));
//! assert!(!trie.has("-"));
//! ```

use std::collections::BTreeMap;

/// A node in the separator trie. `is_word` marks that the path from the
/// root to this node spells out a complete separator; `is_atom` additionally
/// marks that the word was declared by a `notation` command rather than
/// being one of the fixed language keywords, meaning it may also stand for
/// an identifier (see [`Trie::insert_atom`]).
#[derive(Debug, Clone, Default)]
pub struct Trie {
    is_word: bool,
    is_atom: bool,
    children: BTreeMap<char, Trie>,
}

impl Trie {
    /// An empty trie that matches nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new trie with `word` inserted, persistently — `self` is
    /// left unchanged. Inserting the empty string is a no-op.
    pub fn insert(&self, word: &str) -> Self {
        if word.is_empty() {
            return self.clone();
        }
        let mut root = self.clone();
        let mut node = &mut root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.is_word = true;
        root
    }

    /// Like [`Trie::insert`], but also marks `word` as a declared atom: a
    /// separator that a user's `notation` command installed, as opposed to a
    /// fixed language keyword. Atom words remain eligible to satisfy the
    /// parser's `ident` descriptor even though they lex as separators (see
    /// [`Trie::is_atom`]); plain keywords inserted via `insert` never are.
    pub fn insert_atom(&self, word: &str) -> Self {
        if word.is_empty() {
            return self.clone();
        }
        let mut root = self.clone();
        let mut node = &mut root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.is_word = true;
        node.is_atom = true;
        root
    }

    /// True iff `word` was previously inserted (exact match, not a prefix).
    pub fn has(&self, word: &str) -> bool {
        let mut node = self;
        for ch in word.chars() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.is_word
    }

    /// True iff `word` was previously inserted via [`Trie::insert_atom`].
    pub fn is_atom(&self, word: &str) -> bool {
        let mut node = self;
        for ch in word.chars() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.is_word && node.is_atom
    }

    /// Length, in bytes, of the longest inserted word that is a prefix of
    /// `text[start..]`. Zero if no inserted word matches.
    pub fn match_longest(&self, text: &str, start: usize) -> usize {
        let mut node = self;
        let mut best = 0usize;
        let mut offset = 0usize;
        for ch in text[start..].chars() {
            match node.children.get(&ch) {
                Some(next) => {
                    node = next;
                    offset += ch.len_utf8();
                    if node.is_word {
                        best = offset;
                    }
                }
                None => break,
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match_wins_over_shorter_prefix() {
        let trie = Trie::new().insert("=").insert("=>");
        assert_eq!(trie.match_longest("=> x", 0), 2);
        assert_eq!(trie.match_longest("= x", 0), 1);
    }

    #[test]
    fn no_match_returns_zero() {
        let trie = Trie::new().insert("->");
        assert_eq!(trie.match_longest("hello", 0), 0);
    }

    #[test]
    fn has_requires_exact_word() {
        let trie = Trie::new().insert("notation");
        assert!(trie.has("notation"));
        assert!(!trie.has("not"));
        assert!(!trie.has("notation2"));
    }

    #[test]
    fn insert_empty_word_is_noop() {
        let trie = Trie::new().insert("");
        assert_eq!(trie.match_longest("anything", 0), 0);
        assert!(!trie.has(""));
    }

    #[test]
    fn insert_atom_is_also_a_word_but_plain_insert_is_not_an_atom() {
        let trie = Trie::new().insert("by").insert_atom("Prop");
        assert!(trie.has("by") && !trie.is_atom("by"));
        assert!(trie.has("Prop") && trie.is_atom("Prop"));
    }

    #[test]
    fn insert_is_persistent_and_order_independent() {
        let a = Trie::new().insert("(").insert(")");
        let b = Trie::new().insert(")").insert("(");
        assert!(a.has("(") && a.has(")"));
        assert!(b.has("(") && b.has(")"));
    }

    #[test]
    fn match_at_nonzero_start() {
        let trie = Trie::new().insert("::=");
        assert_eq!(trie.match_longest("x ::= y", 2), 3);
    }
}
