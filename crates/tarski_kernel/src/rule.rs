//! Rules: the proposition/judgement layer built on top of terms.

use std::collections::HashMap;
use std::fmt;

use crate::error::{KernelError, KernelResult};
use crate::infer::infer_type;
use crate::mctx::{inst_m as inst_m_term, MCtx};
use crate::reduction::is_def_eq as term_def_eq;
use crate::term::{subst_f as term_subst_f, Term};
use crate::ty::Ty;

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// `p` must have a base type; checked by `is_wf`.
    Proves(Term),
    Implies(Box<Rule>, Box<Rule>),
    /// Binds a free variable at `fvar(0)` inside `body`; `name` is a display
    /// hint, `s` the bound variable's type.
    All(String, Ty, Box<Rule>),
}

impl Rule {
    pub fn proves(p: Term) -> Self {
        Rule::Proves(p)
    }

    pub fn implies(p: Rule, q: Rule) -> Self {
        Rule::Implies(Box::new(p), Box::new(q))
    }

    pub fn all(name: impl Into<String>, s: Ty, body: Rule) -> Self {
        Rule::All(name.into(), s, Box::new(body))
    }

    /// A short shape tag used in error messages (`ImpEShapeMismatch`, etc).
    pub fn shape(&self) -> &'static str {
        match self {
            Rule::Proves(_) => "proves",
            Rule::Implies(_, _) => "implies",
            Rule::All(_, _, _) => "all",
        }
    }
}

/// Pushes a free-variable substitution through `all` by incrementing `k` for
/// every binder crossed, mirroring `Term::subst_f`'s de Bruijn convention.
pub fn subst_f(r: &Rule, u: &Term, k: usize) -> Rule {
    match r {
        Rule::Proves(p) => Rule::Proves(term_subst_f(p, u, k)),
        Rule::Implies(p, q) => Rule::implies(subst_f(p, u, k), subst_f(q, u, k)),
        Rule::All(name, s, body) => Rule::All(name.clone(), s.clone(), Box::new(subst_f(body, u, k + 1))),
    }
}

/// Replaces assigned metavariables throughout `r` with their definitions.
pub fn inst_m(mctx: &MCtx, r: &Rule) -> Rule {
    match r {
        Rule::Proves(p) => Rule::Proves(inst_m_term(mctx, p)),
        Rule::Implies(p, q) => Rule::implies(inst_m(mctx, p), inst_m(mctx, q)),
        Rule::All(name, s, body) => Rule::All(name.clone(), s.clone(), Box::new(inst_m(mctx, body))),
    }
}

/// Definitional equality of rules: same shape, `all` requires an equal type
/// annotation and equal bodies, `implies` is threaded componentwise.
pub fn is_def_eq(mctx: &MCtx, r1: &Rule, r2: &Rule) -> (MCtx, bool) {
    match (r1, r2) {
        (Rule::Proves(p1), Rule::Proves(p2)) => term_def_eq(mctx, p1, p2),
        (Rule::Implies(p1, q1), Rule::Implies(p2, q2)) => {
            let (mctx1, ok1) = is_def_eq(mctx, p1, p2);
            if !ok1 {
                return (mctx.clone(), false);
            }
            let (mctx2, ok2) = is_def_eq(&mctx1, q1, q2);
            if ok2 {
                (mctx2, true)
            } else {
                (mctx.clone(), false)
            }
        }
        (Rule::All(_, s1, b1), Rule::All(_, s2, b2)) if s1 == s2 => is_def_eq(mctx, b1, b2),
        _ => (mctx.clone(), false),
    }
}

/// Checks well-formedness: every `proves` term has a base type under the
/// ambient contexts; every `all` extends `fctx` with `(name, s)` at the head
/// before recursing into its body.
pub fn is_wf(mctx: &MCtx, cctx: &HashMap<String, Ty>, fctx: &[Ty], bctx: &[Ty], r: &Rule) -> KernelResult<()> {
    match r {
        Rule::Proves(p) => {
            let ty = infer_type(mctx, cctx, fctx, bctx, p)?;
            match ty {
                Ty::Base(_) => Ok(()),
                other => Err(KernelError::ExpectedBaseType { found: other }),
            }
        }
        Rule::Implies(p, q) => {
            is_wf(mctx, cctx, fctx, bctx, p)?;
            is_wf(mctx, cctx, fctx, bctx, q)
        }
        Rule::All(_, s, body) => {
            let mut fctx2 = Vec::with_capacity(fctx.len() + 1);
            fctx2.push(s.clone());
            fctx2.extend_from_slice(fctx);
            is_wf(mctx, cctx, &fctx2, bctx, body)
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Proves(p) => write!(f, "|- {}", p),
            Rule::Implies(p, q) => write!(f, "({} => {})", p, q),
            Rule::All(name, s, body) => write!(f, "(all {}:{}. {})", name, s, body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cctx() -> HashMap<String, Ty> {
        let mut c = HashMap::new();
        c.insert("p".to_string(), Ty::base("Prop"));
        c
    }

    #[test]
    fn proves_is_wf_with_base_type() {
        let mctx = MCtx::new();
        let r = Rule::proves(Term::Const("p".into()));
        assert!(is_wf(&mctx, &base_cctx(), &[], &[], &r).is_ok());
    }

    #[test]
    fn proves_rejects_arrow_type() {
        let mctx = MCtx::new();
        let mut cctx = HashMap::new();
        cctx.insert("f".to_string(), Ty::arrow(Ty::base("A"), Ty::base("B")));
        let r = Rule::proves(Term::Const("f".into()));
        let err = is_wf(&mctx, &cctx, &[], &[], &r).unwrap_err();
        assert!(matches!(err, KernelError::ExpectedBaseType { .. }));
    }

    #[test]
    fn all_extends_fctx_before_recursing() {
        let mctx = MCtx::new();
        let r = Rule::all("x", Ty::base("A"), Rule::proves(Term::FVar(0)));
        let mut cctx = HashMap::new();
        // FVar(0) under the all binder has type `A`, not a base "Prop" -- so
        // this should fail unless Prop and A are unrelated; just assert the
        // fctx carries `A` at index 0 by checking a matching case succeeds.
        cctx.insert("unused".to_string(), Ty::base("Unused"));
        let err = is_wf(&mctx, &cctx, &[], &[], &r);
        // FVar(0):A is not a base(Prop); but infer_type returns A itself,
        // which *is* a base type, so this should succeed.
        assert!(err.is_ok());
    }

    #[test]
    fn implies_def_eq_is_componentwise() {
        let mctx = MCtx::new();
        let r1 = Rule::implies(Rule::proves(Term::Const("a".into())), Rule::proves(Term::Const("b".into())));
        let r2 = Rule::implies(Rule::proves(Term::Const("a".into())), Rule::proves(Term::Const("b".into())));
        let (_, ok) = is_def_eq(&mctx, &r1, &r2);
        assert!(ok);
    }

    #[test]
    fn implies_def_eq_mismatched_antecedent_fails() {
        let mctx = MCtx::new();
        let r1 = Rule::implies(Rule::proves(Term::Const("a".into())), Rule::proves(Term::Const("b".into())));
        let r2 = Rule::implies(Rule::proves(Term::Const("x".into())), Rule::proves(Term::Const("b".into())));
        let (_, ok) = is_def_eq(&mctx, &r1, &r2);
        assert!(!ok);
    }

    #[test]
    fn all_def_eq_requires_equal_type_annotation() {
        let mctx = MCtx::new();
        let r1 = Rule::all("x", Ty::base("A"), Rule::proves(Term::FVar(0)));
        let r2 = Rule::all("y", Ty::base("B"), Rule::proves(Term::FVar(0)));
        let (_, ok) = is_def_eq(&mctx, &r1, &r2);
        assert!(!ok);
    }

    #[test]
    fn subst_f_increments_k_under_all() {
        // all x:A. proves(fvar(1)) -- substituting k=0 should hit the outer
        // fvar(1), which after crossing one `all` binder is checked at k=1.
        let r = Rule::all("x", Ty::base("A"), Rule::proves(Term::FVar(1)));
        let result = subst_f(&r, &Term::Const("c".into()), 0);
        assert_eq!(result, Rule::all("x", Ty::base("A"), Rule::proves(Term::Const("c".into()))));
    }

    #[test]
    fn inst_m_maps_over_nested_rule() {
        let mctx = MCtx::new().assign("m", Term::Const("c".into()));
        let r = Rule::implies(Rule::proves(Term::MVar("m".into())), Rule::proves(Term::Const("q".into())));
        let result = inst_m(&mctx, &r);
        assert_eq!(result, Rule::implies(Rule::proves(Term::Const("c".into())), Rule::proves(Term::Const("q".into()))));
    }
}
