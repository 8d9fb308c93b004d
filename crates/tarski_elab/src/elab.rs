//! Translates `Syntax` parse trees into kernel objects.
//!
//! Elaboration is position-sensitive pattern matching on a node's children,
//! plus a fallback over the registered notation table for `term` nodes that
//! don't match one of the built-in shapes.

use std::collections::HashMap;

use tarski_kernel::{Rule, Term, Ty};
use tarski_parse::Syntax;
use tarski_tactic::{apply, assumption, have, intro, ApplyArg, TacticState};

use crate::error::ElabError;
use crate::notation::{Notation, NotationPart};

pub fn elab_ty(stx: &Syntax) -> Result<Ty, ElabError> {
    let children = node_children(stx, "ty")?;
    match children {
        [Syntax::Ident(name)] => Ok(Ty::base(name.clone())),
        [Syntax::Atom(open), inner, Syntax::Atom(close)] if open == "(" && close == ")" => elab_ty(inner),
        [left, Syntax::Atom(arrow), right] if arrow == "->" => Ok(Ty::arrow(elab_ty(left)?, elab_ty(right)?)),
        _ => Err(ElabError::Malformed("ty")),
    }
}

/// `bdepth`/`fdepth` are the number of bound/free binders enclosing this
/// position; `bv_map`/`fv_map` record the binder depth at which each name
/// was introduced, converted to a de Bruijn index on lookup.
pub fn elab_term(
    bdepth: usize,
    fdepth: usize,
    bv_map: &HashMap<String, usize>,
    fv_map: &HashMap<String, usize>,
    notations: &[Notation],
    stx: &Syntax,
) -> Result<Term, ElabError> {
    let children = node_children(stx, "term")?;
    match children {
        [Syntax::Ident(name)] => Ok(elab_ident_as_term(bdepth, fdepth, bv_map, fv_map, name)),
        [Syntax::Atom(open), inner, Syntax::Atom(close)] if open == "(" && close == ")" => {
            elab_term(bdepth, fdepth, bv_map, fv_map, notations, inner)
        }
        [Syntax::Atom(bs), Syntax::Ident(x), Syntax::Atom(colon), ty_stx, Syntax::Atom(comma), body]
            if bs == "\\" && colon == ":" && comma == "," =>
        {
            let ty = elab_ty(ty_stx)?;
            let mut bv2 = bv_map.clone();
            bv2.insert(x.clone(), bdepth);
            let body_term = elab_term(bdepth + 1, fdepth, &bv2, fv_map, notations, body)?;
            Ok(Term::lam(x.clone(), ty, body_term))
        }
        [left, right] if left.kind() == Some("term") && right.kind() == Some("term") => {
            let f = elab_term(bdepth, fdepth, bv_map, fv_map, notations, left)?;
            let a = elab_term(bdepth, fdepth, bv_map, fv_map, notations, right)?;
            Ok(Term::app(f, a))
        }
        _ => elab_via_notation(bdepth, fdepth, bv_map, fv_map, notations, children),
    }
}

fn elab_ident_as_term(bdepth: usize, fdepth: usize, bv_map: &HashMap<String, usize>, fv_map: &HashMap<String, usize>, name: &str) -> Term {
    if let Some(&i) = bv_map.get(name) {
        return Term::BVar(bdepth - (i + 1));
    }
    if let Some(&j) = fv_map.get(name) {
        return Term::FVar(fdepth - (j + 1));
    }
    Term::Const(name.to_string())
}

fn elab_via_notation(
    bdepth: usize,
    fdepth: usize,
    bv_map: &HashMap<String, usize>,
    fv_map: &HashMap<String, usize>,
    notations: &[Notation],
    children: &[Syntax],
) -> Result<Term, ElabError> {
    for notation in notations {
        if notation.parts.len() != children.len() {
            continue;
        }
        let mut args = Vec::new();
        let mut matched = true;
        for (part, child) in notation.parts.iter().zip(children.iter()) {
            match part {
                NotationPart::Atom(lit) => {
                    if child.text() != Some(lit.as_str()) {
                        matched = false;
                        break;
                    }
                }
                NotationPart::Term(_, _) => match elab_term(bdepth, fdepth, bv_map, fv_map, notations, child) {
                    Ok(t) => args.push(t),
                    Err(_) => {
                        matched = false;
                        break;
                    }
                },
            }
        }
        if matched {
            return Ok(Term::apply_spine(Term::Const(notation.name.clone()), args));
        }
    }
    Err(ElabError::NoMatchingNotation)
}

/// `term` → `proves`; `!! x1 … xn : τ, body` → nested right-associated
/// `all`; `rule => rule` → `implies`; `( rule )` → inner.
pub fn elab_rule(
    bdepth: usize,
    fdepth: usize,
    bv_map: &HashMap<String, usize>,
    fv_map: &HashMap<String, usize>,
    notations: &[Notation],
    stx: &Syntax,
) -> Result<Rule, ElabError> {
    let children = node_children(stx, "rule")?;
    match children {
        [single] if single.kind() == Some("term") => {
            Ok(Rule::proves(elab_term(bdepth, fdepth, bv_map, fv_map, notations, single)?))
        }
        [Syntax::Atom(open), inner, Syntax::Atom(close)] if open == "(" && close == ")" => {
            elab_rule(bdepth, fdepth, bv_map, fv_map, notations, inner)
        }
        [Syntax::Atom(bang), idents_many, Syntax::Atom(colon), ty_stx, Syntax::Atom(comma), body]
            if bang == "!!" && colon == ":" && comma == "," =>
        {
            let names: Vec<String> = idents_many
                .children()
                .iter()
                .map(|s| s.text().map(str::to_string).ok_or(ElabError::Malformed("rule")))
                .collect::<Result<_, _>>()?;
            let ty = elab_ty(ty_stx)?;
            build_nested_all(&names, ty, bdepth, fdepth, bv_map, fv_map, notations, body)
        }
        [left, Syntax::Atom(arrow), right] if arrow == "=>" => {
            Ok(Rule::implies(elab_rule(bdepth, fdepth, bv_map, fv_map, notations, left)?, elab_rule(bdepth, fdepth, bv_map, fv_map, notations, right)?))
        }
        _ => Err(ElabError::Malformed("rule")),
    }
}

fn build_nested_all(
    names: &[String],
    s: Ty,
    bdepth: usize,
    fdepth: usize,
    bv_map: &HashMap<String, usize>,
    fv_map: &HashMap<String, usize>,
    notations: &[Notation],
    body: &Syntax,
) -> Result<Rule, ElabError> {
    match names.split_first() {
        None => elab_rule(bdepth, fdepth, bv_map, fv_map, notations, body),
        Some((first, rest)) => {
            let mut fv2 = fv_map.clone();
            fv2.insert(first.clone(), fdepth);
            let inner = build_nested_all(rest, s.clone(), bdepth, fdepth + 1, bv_map, &fv2, notations, body)?;
            Ok(Rule::all(first.clone(), s, inner))
        }
    }
}

fn node_children<'a>(stx: &'a Syntax, expected_kind: &'static str) -> Result<&'a [Syntax], ElabError> {
    match stx {
        Syntax::Node { kind, children } if kind == expected_kind => Ok(children),
        _ => Err(ElabError::Malformed(expected_kind)),
    }
}

/// Builds the Notation record for a `notation` command, given its parsed
/// descriptor list (`notation+`), declared precedence and result type.
pub fn elab_notation(descrs: &[Syntax], prec: i32, base_ty: Ty, name: String) -> Result<Notation, ElabError> {
    let parts = descrs
        .iter()
        .map(|stx| {
            let children = node_children(stx, "notation")?;
            match children {
                [Syntax::Str(lit)] => Ok(NotationPart::Atom(lit.clone())),
                [ty_stx, Syntax::Atom(colon), Syntax::Num(k)] if colon == ":" => {
                    Ok(NotationPart::Term(elab_ty(ty_stx)?, *k as i32))
                }
                _ => Err(ElabError::Malformed("notation")),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Notation { name, prec, parts, base_ty })
}

/// Maps each free-variable name in a goal's `fctx` (index 0 = innermost) to
/// the binder-introduction index `elab_term`/`elab_rule` expect in `fv_map`.
pub fn fv_map_from_fctx(fctx: &[(String, Ty)]) -> HashMap<String, usize> {
    let n = fctx.len();
    fctx.iter().enumerate().map(|(pos, (name, _))| (name.clone(), n - 1 - pos)).collect()
}

/// Dispatches a `tactic` node's leading atom to the corresponding tactic
/// engine operation.
pub fn elab_tactic(
    ts: &TacticState,
    notations: &[Notation],
    axioms: &HashMap<String, Rule>,
    constants: &HashMap<String, Ty>,
    stx: &Syntax,
) -> Result<TacticState, ElabError> {
    let children = node_children(stx, "tactic")?;
    match children {
        [Syntax::Atom(atom)] if atom == "assum" => Ok(assumption(ts)?),
        [Syntax::Atom(atom), names_many] if atom == "intro" => {
            let names: Vec<String> = names_many
                .children()
                .iter()
                .map(|s| s.text().map(str::to_string).ok_or(ElabError::Malformed("tactic")))
                .collect::<Result<_, _>>()?;
            Ok(intro(ts, &names)?)
        }
        [Syntax::Atom(atom), Syntax::Ident(name), args_many] if atom == "apply" => {
            let goal = ts.head_goal().ok_or(ElabError::Malformed("tactic"))?;
            let fdepth = goal.fctx.len();
            let fv_map = fv_map_from_fctx(&goal.fctx);
            let args = args_many
                .children()
                .iter()
                .map(|arg_stx| elab_apply_arg(fdepth, &fv_map, notations, arg_stx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(apply(ts, name, &args, axioms, constants)?)
        }
        [Syntax::Atom(atom), Syntax::Ident(name), Syntax::Atom(colon), rule_stx] if atom == "have" && colon == ":" => {
            let goal = ts.head_goal().ok_or(ElabError::Malformed("tactic"))?;
            let fdepth = goal.fctx.len();
            let fv_map = fv_map_from_fctx(&goal.fctx);
            let rule = elab_rule(0, fdepth, &HashMap::new(), &fv_map, notations, rule_stx)?;
            Ok(have(ts, name, rule)?)
        }
        _ => Err(ElabError::Malformed("tactic")),
    }
}

fn elab_apply_arg(fdepth: usize, fv_map: &HashMap<String, usize>, notations: &[Notation], stx: &Syntax) -> Result<ApplyArg, ElabError> {
    let children = node_children(stx, "applyArg")?;
    match children {
        [Syntax::Ident(name)] => Ok(ApplyArg::Ident(name.clone())),
        [term_stx] if term_stx.kind() == Some("term") => {
            Ok(ApplyArg::Term(elab_term(0, fdepth, &HashMap::new(), fv_map, notations, term_stx)?))
        }
        _ => Err(ElabError::Malformed("applyArg")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident_ty(name: &str) -> Syntax {
        Syntax::node("ty", vec![Syntax::Ident(name.to_string())])
    }

    fn ident_term(name: &str) -> Syntax {
        Syntax::node("term", vec![Syntax::Ident(name.to_string())])
    }

    #[test]
    fn elab_ty_base_case() {
        assert_eq!(elab_ty(&ident_ty("A")).unwrap(), Ty::base("A"));
    }

    #[test]
    fn elab_ty_arrow() {
        let stx = Syntax::node("ty", vec![ident_ty("A"), Syntax::Atom("->".into()), ident_ty("B")]);
        assert_eq!(elab_ty(&stx).unwrap(), Ty::arrow(Ty::base("A"), Ty::base("B")));
    }

    #[test]
    fn elab_ty_paren_passthrough() {
        let stx = Syntax::node("ty", vec![Syntax::Atom("(".into()), ident_ty("A"), Syntax::Atom(")".into())]);
        assert_eq!(elab_ty(&stx).unwrap(), Ty::base("A"));
    }

    #[test]
    fn elab_term_resolves_const_when_unbound() {
        let t = elab_term(0, 0, &HashMap::new(), &HashMap::new(), &[], &ident_term("p")).unwrap();
        assert_eq!(t, Term::Const("p".into()));
    }

    #[test]
    fn elab_term_resolves_bound_variable() {
        let mut bv = HashMap::new();
        bv.insert("x".to_string(), 0);
        let t = elab_term(1, 0, &bv, &HashMap::new(), &[], &ident_term("x")).unwrap();
        assert_eq!(t, Term::BVar(0));
    }

    #[test]
    fn elab_term_resolves_free_variable() {
        let mut fv = HashMap::new();
        fv.insert("y".to_string(), 0);
        let t = elab_term(0, 1, &HashMap::new(), &fv, &[], &ident_term("y")).unwrap();
        assert_eq!(t, Term::FVar(0));
    }

    #[test]
    fn elab_term_lambda_shifts_bdepth() {
        let body = ident_term("x");
        let lam_stx = Syntax::node(
            "term",
            vec![Syntax::Atom("\\".into()), Syntax::Ident("x".into()), Syntax::Atom(":".into()), ident_ty("A"), Syntax::Atom(",".into()), body],
        );
        let t = elab_term(0, 0, &HashMap::new(), &HashMap::new(), &[], &lam_stx).unwrap();
        assert_eq!(t, Term::lam("x", Ty::base("A"), Term::BVar(0)));
    }

    #[test]
    fn elab_term_application() {
        let stx = Syntax::node("term", vec![ident_term("f"), ident_term("a")]);
        let t = elab_term(0, 0, &HashMap::new(), &HashMap::new(), &[], &stx).unwrap();
        assert_eq!(t, Term::app(Term::Const("f".into()), Term::Const("a".into())));
    }

    #[test]
    fn elab_term_via_notation() {
        let notation = Notation {
            name: "P".into(),
            prec: 1024,
            parts: vec![NotationPart::Atom("P".into()), NotationPart::Term(Ty::base("T"), 0)],
            base_ty: Ty::base("Prop"),
        };
        let stx = Syntax::node("term", vec![Syntax::Atom("P".into()), ident_term("x")]);
        let t = elab_term(0, 0, &HashMap::new(), &HashMap::new(), std::slice::from_ref(&notation), &stx).unwrap();
        assert_eq!(t, Term::app(Term::Const("P".into()), Term::Const("x".into())));
    }

    #[test]
    fn elab_rule_proves() {
        let stx = Syntax::node("rule", vec![ident_term("p")]);
        let r = elab_rule(0, 0, &HashMap::new(), &HashMap::new(), &[], &stx).unwrap();
        assert_eq!(r, Rule::proves(Term::Const("p".into())));
    }

    #[test]
    fn elab_rule_implies() {
        let stx = Syntax::node("rule", vec![Syntax::node("rule", vec![ident_term("p")]), Syntax::Atom("=>".into()), Syntax::node("rule", vec![ident_term("p")])]);
        let r = elab_rule(0, 0, &HashMap::new(), &HashMap::new(), &[], &stx).unwrap();
        assert_eq!(r, Rule::implies(Rule::proves(Term::Const("p".into())), Rule::proves(Term::Const("p".into()))));
    }

    #[test]
    fn elab_rule_nested_all_is_right_associated() {
        let stx = Syntax::node(
            "rule",
            vec![
                Syntax::Atom("!!".into()),
                Syntax::node("many", vec![Syntax::Ident("x".into()), Syntax::Ident("y".into())]),
                Syntax::Atom(":".into()),
                ident_ty("T"),
                Syntax::Atom(",".into()),
                Syntax::node("rule", vec![ident_term("x")]),
            ],
        );
        let r = elab_rule(0, 0, &HashMap::new(), &HashMap::new(), &[], &stx).unwrap();
        let expected = Rule::all("x", Ty::base("T"), Rule::all("y", Ty::base("T"), Rule::proves(Term::FVar(1))));
        assert_eq!(r, expected);
    }
}
