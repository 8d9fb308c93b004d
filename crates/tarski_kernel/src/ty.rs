//! Simple types: base types and the function arrow.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    Base(String),
    Arrow(Box<Ty>, Box<Ty>),
}

impl Ty {
    pub fn base(name: impl Into<String>) -> Self {
        Ty::Base(name.into())
    }

    pub fn arrow(left: Ty, right: Ty) -> Self {
        Ty::Arrow(Box::new(left), Box::new(right))
    }

    /// Curries `args -> ... -> result`, right-associated, in the order given.
    pub fn curry(args: Vec<Ty>, result: Ty) -> Self {
        args.into_iter().rev().fold(result, |acc, arg| Ty::arrow(arg, acc))
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Base(name) => write!(f, "{}", name),
            Ty::Arrow(l, r) => {
                match l.as_ref() {
                    Ty::Arrow(_, _) => write!(f, "({}) -> {}", l, r),
                    _ => write!(f, "{} -> {}", l, r),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality() {
        assert_eq!(Ty::base("Nat"), Ty::base("Nat"));
        assert_ne!(Ty::base("Nat"), Ty::base("Bool"));
        assert_eq!(
            Ty::arrow(Ty::base("Nat"), Ty::base("Bool")),
            Ty::arrow(Ty::base("Nat"), Ty::base("Bool"))
        );
    }

    #[test]
    fn display_parenthesizes_left_arrow() {
        let t = Ty::arrow(Ty::arrow(Ty::base("A"), Ty::base("B")), Ty::base("C"));
        assert_eq!(t.to_string(), "(A -> B) -> C");
    }

    #[test]
    fn display_right_associates_without_parens() {
        let t = Ty::arrow(Ty::base("A"), Ty::arrow(Ty::base("B"), Ty::base("C")));
        assert_eq!(t.to_string(), "A -> B -> C");
    }

    #[test]
    fn curry_builds_right_associated_arrow() {
        let t = Ty::curry(vec![Ty::base("A"), Ty::base("B")], Ty::base("C"));
        assert_eq!(t, Ty::arrow(Ty::base("A"), Ty::arrow(Ty::base("B"), Ty::base("C"))));
    }
}
