//! The metavariable context: assignment map, type map, and a fresh-name
//! counter shared with the tactic engine's hole ids (§4.5: "shared counter
//! keeps names globally unique across metas and holes").

use std::collections::HashMap;

use crate::term::Term;
use crate::ty::Ty;

#[derive(Debug, Clone, Default)]
pub struct MCtx {
    assignment: HashMap<String, Term>,
    types: HashMap<String, Ty>,
    counter: u64,
}

impl MCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a fresh metavariable of type `ty`, returning its name and
    /// the updated context. Never reuses a counter value handed out before,
    /// whether to a metavariable or a tactic-engine hole.
    pub fn fresh_meta(&self, ty: Ty) -> (Self, String) {
        let (mut next, id) = self.fresh_id();
        let name = format!("m{id}");
        next.types.insert(name.clone(), ty);
        (next, name)
    }

    /// Hands out a fresh counter value without committing it to a
    /// metavariable; used by the tactic engine to mint hole ids from the
    /// same counter.
    pub fn fresh_id(&self) -> (Self, u64) {
        let mut next = self.clone();
        let id = next.counter;
        next.counter += 1;
        (next, id)
    }

    pub fn type_of(&self, name: &str) -> Option<&Ty> {
        self.types.get(name)
    }

    pub fn assignment_of(&self, name: &str) -> Option<&Term> {
        self.assignment.get(name)
    }

    /// Records `name := term`. A name is assigned at most once; this is a
    /// no-op if `name` already has an assignment (callers' occurs-check
    /// discipline ensures this is never hit in practice).
    pub fn assign(&self, name: &str, term: Term) -> Self {
        let mut next = self.clone();
        next.assignment.entry(name.to_string()).or_insert(term);
        next
    }
}

/// Recursively replaces assigned metavariables with their definitions,
/// following chains of assignment to a fixed point. Cycles cannot occur:
/// assignment always passes the occurs check first.
pub fn inst_m(mctx: &MCtx, t: &Term) -> Term {
    match t {
        Term::MVar(m) => match mctx.assignment_of(m) {
            Some(v) => inst_m(mctx, v),
            None => t.clone(),
        },
        Term::App(f, a) => Term::app(inst_m(mctx, f), inst_m(mctx, a)),
        Term::Lam(name, ty, body) => Term::Lam(name.clone(), ty.clone(), Box::new(inst_m(mctx, body))),
        Term::BVar(_) | Term::FVar(_) | Term::Const(_) => t.clone(),
    }
}

/// True if `m` occurs anywhere in `t`, following already-assigned
/// metavariables transitively.
pub fn occurs_m(mctx: &MCtx, t: &Term, m: &str) -> bool {
    match t {
        Term::MVar(n) => {
            if n == m {
                true
            } else if let Some(v) = mctx.assignment_of(n) {
                occurs_m(mctx, v, m)
            } else {
                false
            }
        }
        Term::App(f, a) => occurs_m(mctx, f, m) || occurs_m(mctx, a, m),
        Term::Lam(_, _, body) => occurs_m(mctx, body, m),
        Term::BVar(_) | Term::FVar(_) | Term::Const(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_meta_names_are_unique() {
        let m0 = MCtx::new();
        let (m1, a) = m0.fresh_meta(Ty::base("A"));
        let (_m2, b) = m1.fresh_meta(Ty::base("A"));
        assert_ne!(a, b);
    }

    #[test]
    fn occurs_check_follows_assignment_chain() {
        let m0 = MCtx::new();
        let m1 = m0.assign("a", Term::MVar("b".into()));
        assert!(occurs_m(&m1, &Term::MVar("a".into()), "b"));
        assert!(!occurs_m(&m0, &Term::MVar("a".into()), "b"));
    }

    #[test]
    fn inst_m_resolves_transitively() {
        let m0 = MCtx::new();
        let m1 = m0.assign("a", Term::MVar("b".into()));
        let m2 = m1.assign("b", Term::Const("c".into()));
        assert_eq!(inst_m(&m2, &Term::MVar("a".into())), Term::Const("c".into()));
    }

    #[test]
    fn assign_is_write_once() {
        let m0 = MCtx::new();
        let m1 = m0.assign("a", Term::Const("c".into()));
        let m2 = m1.assign("a", Term::Const("d".into()));
        assert_eq!(m2.assignment_of("a"), Some(&Term::Const("c".into())));
    }
}
