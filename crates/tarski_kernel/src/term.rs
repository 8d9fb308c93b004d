//! Terms of the kernel: bound variables, free variables, metavariables,
//! application, abstraction and constants.
//!
//! Bound and free variables get separate de Bruijn counters (§3, §9). A
//! `Lam` binder shifts the bound-variable counter but never the
//! free-variable one — free variables are introduced only at the `Rule`
//! level by `all`, which `Term` itself has no binder for.

use std::fmt;

use crate::ty::Ty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A de Bruijn index into the surrounding `Lam` stack; `0` is innermost.
    BVar(usize),
    /// A de Bruijn index into the goal's free-variable context; `0` is the
    /// most recently introduced (by `intro`/`have`).
    FVar(usize),
    /// A metavariable, resolved through the ambient `MCtx`.
    MVar(String),
    App(Box<Term>, Box<Term>),
    /// `name` is a display hint only; binding is purely positional.
    Lam(String, Ty, Box<Term>),
    Const(String),
}

impl Term {
    pub fn app(f: Term, a: Term) -> Self {
        Term::App(Box::new(f), Box::new(a))
    }

    pub fn lam(name: impl Into<String>, ty: Ty, body: Term) -> Self {
        Term::Lam(name.into(), ty, Box::new(body))
    }

    pub fn apply_spine(f: Term, args: Vec<Term>) -> Self {
        args.into_iter().fold(f, Term::app)
    }
}

/// Adds `n` to every `BVar(i)` with `i >= k`; threads `k + 1` under `Lam`.
pub fn lift_b(t: &Term, n: usize, k: usize) -> Term {
    if n == 0 {
        return t.clone();
    }
    match t {
        Term::BVar(i) => {
            if *i >= k {
                Term::BVar(i + n)
            } else {
                Term::BVar(*i)
            }
        }
        Term::FVar(_) | Term::MVar(_) | Term::Const(_) => t.clone(),
        Term::App(f, a) => Term::app(lift_b(f, n, k), lift_b(a, n, k)),
        Term::Lam(name, ty, body) => Term::Lam(name.clone(), ty.clone(), Box::new(lift_b(body, n, k + 1))),
    }
}

/// Replaces `BVar(k)` with `u` (lifted under the binders already crossed);
/// indices above `k` shift down by one.
pub fn subst_b(t: &Term, u: &Term, k: usize) -> Term {
    match t {
        Term::BVar(i) => {
            if *i == k {
                lift_b(u, k, 0)
            } else if *i > k {
                Term::BVar(i - 1)
            } else {
                Term::BVar(*i)
            }
        }
        Term::FVar(_) | Term::MVar(_) | Term::Const(_) => t.clone(),
        Term::App(f, a) => Term::app(subst_b(f, u, k), subst_b(a, u, k)),
        Term::Lam(name, ty, body) => Term::Lam(name.clone(), ty.clone(), Box::new(subst_b(body, u, k + 1))),
    }
}

/// Adds `n` to every `FVar(i)` with `i >= k`. `Lam` does not shift `k`: free
/// indices are flat across bound binders.
pub fn lift_f(t: &Term, n: usize, k: usize) -> Term {
    if n == 0 {
        return t.clone();
    }
    match t {
        Term::FVar(i) => {
            if *i >= k {
                Term::FVar(i + n)
            } else {
                Term::FVar(*i)
            }
        }
        Term::BVar(_) | Term::MVar(_) | Term::Const(_) => t.clone(),
        Term::App(f, a) => Term::app(lift_f(f, n, k), lift_f(a, n, k)),
        Term::Lam(name, ty, body) => Term::Lam(name.clone(), ty.clone(), Box::new(lift_f(body, n, k))),
    }
}

/// Replaces `FVar(k)` with `u`; indices above `k` shift down by one. `u` is
/// lifted (in its bound-variable indices, not its free ones) by however many
/// `Lam`s are crossed on the way to the substitution site.
pub fn subst_f(t: &Term, u: &Term, k: usize) -> Term {
    subst_f_rec(t, u, k, 0)
}

fn subst_f_rec(t: &Term, u: &Term, k: usize, bdepth: usize) -> Term {
    match t {
        Term::FVar(i) => {
            if *i == k {
                lift_b(u, bdepth, 0)
            } else if *i > k {
                Term::FVar(i - 1)
            } else {
                Term::FVar(*i)
            }
        }
        Term::BVar(_) | Term::MVar(_) | Term::Const(_) => t.clone(),
        Term::App(f, a) => Term::app(subst_f_rec(f, u, k, bdepth), subst_f_rec(a, u, k, bdepth)),
        Term::Lam(name, ty, body) => {
            Term::Lam(name.clone(), ty.clone(), Box::new(subst_f_rec(body, u, k, bdepth + 1)))
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::BVar(i) => write!(f, "#{}", i),
            Term::FVar(i) => write!(f, "x{}", i),
            Term::MVar(m) => write!(f, "?{}", m),
            Term::Const(name) => write!(f, "{}", name),
            Term::App(g, a) => write!(f, "({} {})", g, a),
            Term::Lam(name, ty, body) => write!(f, "(\\{}:{}. {})", name, ty, body),
        }
    }
}
