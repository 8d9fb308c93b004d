//! Weak-head normal form and definitional equality for terms.
//!
//! There is no δ-unfolding of constants and no η — whnf only chases β-redexes
//! and metavariable assignments (spec Non-goals: no full computational
//! reduction). Definitional equality threads the metavariable context
//! through and restores the original on any failure, so a failed attempt
//! never leaks a partial assignment (§4.4).

use crate::mctx::{occurs_m, MCtx};
use crate::term::{subst_b, Term};

/// Reduces `t` to weak-head normal form: its outermost constructor is not a
/// β-redex, after following any metavariable assignment.
pub fn whnf(mctx: &MCtx, t: &Term) -> Term {
    match t {
        Term::App(f, arg) => {
            let f_whnf = whnf(mctx, f);
            if let Term::Lam(_, _, body) = &f_whnf {
                whnf(mctx, &subst_b(body, arg, 0))
            } else {
                Term::app(f_whnf, (**arg).clone())
            }
        }
        Term::MVar(m) => match mctx.assignment_of(m) {
            Some(v) => whnf(mctx, v),
            None => t.clone(),
        },
        _ => t.clone(),
    }
}

/// Definitional equality up to β and metavariable assignment. On failure the
/// returned context is exactly `mctx` — no partial unification is observed
/// by the caller.
pub fn is_def_eq(mctx: &MCtx, t1: &Term, t2: &Term) -> (MCtx, bool) {
    match try_def_eq(mctx, t1, t2) {
        Some(next) => (next, true),
        None => (mctx.clone(), false),
    }
}

fn try_def_eq(mctx: &MCtx, t1: &Term, t2: &Term) -> Option<MCtx> {
    let w1 = whnf(mctx, t1);
    let w2 = whnf(mctx, t2);
    match (&w1, &w2) {
        (Term::BVar(i), Term::BVar(j)) if i == j => Some(mctx.clone()),
        (Term::FVar(i), Term::FVar(j)) if i == j => Some(mctx.clone()),
        (Term::Const(a), Term::Const(b)) if a == b => Some(mctx.clone()),
        (Term::Lam(_, ty1, b1), Term::Lam(_, ty2, b2)) if ty1 == ty2 => try_def_eq(mctx, b1, b2),
        (Term::App(f1, a1), Term::App(f2, a2)) => {
            let after_fn = try_def_eq(mctx, f1, f2)?;
            try_def_eq(&after_fn, a1, a2)
        }
        (Term::MVar(m1), Term::MVar(m2)) if m1 == m2 => Some(mctx.clone()),
        (Term::MVar(m), _) => assign_if_fresh(mctx, m, &w2),
        (_, Term::MVar(m)) => assign_if_fresh(mctx, m, &w1),
        _ => None,
    }
}

fn assign_if_fresh(mctx: &MCtx, m: &str, t: &Term) -> Option<MCtx> {
    if occurs_m(mctx, t, m) {
        None
    } else {
        Some(mctx.assign(m, t.clone()))
    }
}
