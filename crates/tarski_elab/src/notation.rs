//! User-defined notation: the bridge between a `notation` command and a new
//! parser rule plus a new constant.

use tarski_kernel::Ty;
use tarski_parse::ParserDescr;

/// One descriptor in a notation's surface form: either a literal keyword or
/// a term slot with its expected type and recursion precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum NotationPart {
    Atom(String),
    Term(Ty, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notation {
    pub name: String,
    pub prec: i32,
    pub parts: Vec<NotationPart>,
    pub base_ty: Ty,
}

impl Notation {
    /// The sequence of parser descriptors a rule installed for this
    /// notation would carry: `symbol(lit)` per atom, `recurse(term, k)` per
    /// term slot.
    pub fn parser_descrs(&self) -> Vec<ParserDescr> {
        self.parts
            .iter()
            .map(|part| match part {
                NotationPart::Atom(lit) => ParserDescr::symbol(lit.clone()),
                NotationPart::Term(_, k) => ParserDescr::recurse("term", *k),
            })
            .collect()
    }

    /// The new separator keywords this notation introduces (its atom
    /// literals), in source order.
    pub fn new_keywords(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                NotationPart::Atom(lit) => Some(lit.clone()),
                NotationPart::Term(_, _) => None,
            })
            .collect()
    }

    /// The declared constant's type: term slots curried in source order,
    /// `base_ty` as the final result.
    pub fn constant_ty(&self) -> Ty {
        let slot_tys: Vec<Ty> = self
            .parts
            .iter()
            .filter_map(|part| match part {
                NotationPart::Term(ty, _) => Some(ty.clone()),
                NotationPart::Atom(_) => None,
            })
            .collect();
        Ty::curry(slot_tys, self.base_ty.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_ty_curries_slots_in_source_order() {
        let n = Notation {
            name: "P".into(),
            prec: 1024,
            parts: vec![NotationPart::Atom("P".into()), NotationPart::Term(Ty::base("T"), 0)],
            base_ty: Ty::base("Prop"),
        };
        assert_eq!(n.constant_ty(), Ty::arrow(Ty::base("T"), Ty::base("Prop")));
    }

    #[test]
    fn new_keywords_collects_only_atoms() {
        let n = Notation {
            name: "P".into(),
            prec: 1024,
            parts: vec![NotationPart::Atom("P".into()), NotationPart::Term(Ty::base("T"), 0)],
            base_ty: Ty::base("Prop"),
        };
        assert_eq!(n.new_keywords(), vec!["P".to_string()]);
    }

    #[test]
    fn parser_descrs_maps_parts_in_order() {
        let n = Notation {
            name: "p".into(),
            prec: 1024,
            parts: vec![NotationPart::Atom("p".into())],
            base_ty: Ty::base("Prop"),
        };
        assert_eq!(n.parser_descrs(), vec![ParserDescr::symbol("p")]);
    }
}
