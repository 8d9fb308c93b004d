//! The five tactics: `assumption`, `intro`, `apply` (with its automatic
//! `applyCore` continuation), and `have`.

use std::collections::HashMap;

use tarski_kernel::reduction::is_def_eq;
use tarski_kernel::{infer, rule, Proof, Rule, Term, Ty};

use crate::error::{EngineResult, TacticError};
use crate::state::{assign_proof, mk_hole, replace_goal, Goal, Hypothesis, TacticState};

/// An argument to `apply`: either a bare identifier (a hypothesis name or a
/// global constant) or a fully elaborated term.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyArg {
    Ident(String),
    Term(Term),
}

/// Scans `ctx` from the head for a hypothesis def-equal to `target`,
/// installs its (possibly deferred) proof into the head hole, and closes
/// the goal.
pub fn assumption(ts: &TacticState) -> EngineResult<TacticState> {
    let goal = ts.head_goal().ok_or(TacticError::NoGoals)?.clone();
    for (idx, hyp) in goal.ctx.iter().enumerate() {
        let (mctx2, ok) = is_def_eq(&ts.mctx, &hyp.rule, &goal.target);
        if ok {
            let proof = hyp.deferred.clone().unwrap_or(Proof::Hyp(idx));
            let mut ts2 = ts.clone();
            ts2.mctx = mctx2;
            let ts3 = assign_proof(&ts2, &goal.hole_id, proof);
            return Ok(replace_goal(&ts3, vec![]));
        }
    }
    Err(TacticError::Assumption.into())
}

/// Introduces a single binder: `implies(P, Q)` discharges `P` as a named
/// hypothesis and leaves a hole for `Q`; `all(_, s, P)` binds a fresh free
/// variable and leaves a hole for `P`.
pub fn intro_one(ts: &TacticState, name: &str) -> EngineResult<TacticState> {
    let goal = ts.head_goal().ok_or(TacticError::NoGoals)?.clone();
    match goal.target.clone() {
        Rule::Implies(p, q) => {
            let mut ctx = goal.ctx.clone();
            ctx.insert(0, Hypothesis::new(name, (*p).clone()));
            let (ts2, q_hole, q_goal) = mk_hole(ts, (*q).clone(), ctx, goal.fctx.clone());
            let proof = Proof::imp_i((*p).clone(), q_hole);
            let ts3 = assign_proof(&ts2, &goal.hole_id, proof);
            Ok(replace_goal(&ts3, vec![q_goal]))
        }
        Rule::All(_, s, p) => {
            let mut fctx = goal.fctx.clone();
            fctx.insert(0, (name.to_string(), s.clone()));
            let (ts2, p_hole, p_goal) = mk_hole(ts, (*p).clone(), goal.ctx.clone(), fctx);
            let proof = Proof::all_i(name, s, p_hole);
            let ts3 = assign_proof(&ts2, &goal.hole_id, proof);
            Ok(replace_goal(&ts3, vec![p_goal]))
        }
        Rule::Proves(_) => Err(TacticError::Intro.into()),
    }
}

/// Introduces each name in order.
pub fn intro(ts: &TacticState, names: &[String]) -> EngineResult<TacticState> {
    let mut cur = ts.clone();
    for name in names {
        cur = intro_one(&cur, name)?;
    }
    Ok(cur)
}

/// Resolves `name` against the head goal's hypotheses, then the axiom
/// table, walks `args` against the resulting rule, and finishes with
/// `apply_core`.
pub fn apply(
    ts: &TacticState,
    name: &str,
    args: &[ApplyArg],
    axioms: &HashMap<String, Rule>,
    constants: &HashMap<String, Ty>,
) -> EngineResult<TacticState> {
    let goal = ts.head_goal().ok_or(TacticError::NoGoals)?.clone();

    let (mut proof, mut rule) = resolve_name(&goal, name, axioms)?;
    let mut mctx = ts.mctx.clone();

    for arg in args {
        match (arg, rule.clone()) {
            (ApplyArg::Ident(s), Rule::Implies(p, q)) => {
                let (idx, hyp) = find_hyp(&goal, s)?;
                let (mctx2, ok) = is_def_eq(&mctx, &p, &hyp.rule);
                if !ok {
                    return Err(TacticError::NotDefEq((*p).clone(), hyp.rule.clone()).into());
                }
                mctx = mctx2;
                proof = Proof::imp_e(proof, Proof::Hyp(idx));
                rule = (*q).clone();
            }
            (ApplyArg::Ident(s), Rule::All(_, s_ty, p)) => {
                let term = if let Some(idx) = goal.fctx.iter().position(|(n, _)| n == s) {
                    Term::FVar(idx)
                } else if let Some(ty) = constants.get(s) {
                    if *ty != s_ty {
                        return Err(TacticError::TypeMismatch { term: Term::Const(s.clone()), have: ty.clone(), expected: s_ty }.into());
                    }
                    Term::Const(s.clone())
                } else {
                    return Err(TacticError::UnknownId(s.clone()).into());
                };
                proof = Proof::all_e(proof, term.clone());
                rule = rule::subst_f(&p, &term, 0);
            }
            (ApplyArg::Term(t), Rule::All(_, s_ty, p)) => {
                let t_ty = infer::infer_type(&mctx, constants, &goal.fctx_types(), &[], t)?;
                if t_ty != s_ty {
                    return Err(TacticError::TypeMismatch { term: t.clone(), have: t_ty, expected: s_ty }.into());
                }
                proof = Proof::all_e(proof, t.clone());
                rule = rule::subst_f(&p, t, 0);
            }
            (_, Rule::Proves(_)) => return Err(TacticError::ApplyExcessArgument.into()),
            (ApplyArg::Term(_), Rule::Implies(_, _)) => return Err(TacticError::NotApplicable.into()),
        }
    }

    let mut ts2 = ts.clone();
    ts2.mctx = mctx;
    apply_core(&ts2, proof, rule, vec![])
}

fn resolve_name(goal: &Goal, name: &str, axioms: &HashMap<String, Rule>) -> EngineResult<(Proof, Rule)> {
    if let Some((idx, hyp)) = find_hyp_opt(goal, name) {
        let proof = hyp.deferred.clone().unwrap_or(Proof::Hyp(idx));
        Ok((proof, hyp.rule.clone()))
    } else if let Some(r) = axioms.get(name) {
        Ok((Proof::Ax(name.to_string()), r.clone()))
    } else {
        Err(TacticError::UnknownId(name.to_string()).into())
    }
}

fn find_hyp_opt<'a>(goal: &'a Goal, name: &str) -> Option<(usize, &'a Hypothesis)> {
    goal.ctx.iter().enumerate().find(|(_, h)| h.name == name)
}

fn find_hyp<'a>(goal: &'a Goal, name: &str) -> EngineResult<(usize, &'a Hypothesis)> {
    find_hyp_opt(goal, name).ok_or_else(|| TacticError::UnknownId(name.to_string()).into())
}

/// If `rule` is already def-equal to the head goal's target, installs
/// `proof` and replaces the head goal with `new_goals`. Otherwise opens
/// more meta/hole structure automatically and retries.
pub fn apply_core(ts: &TacticState, proof: Proof, rule: Rule, new_goals: Vec<Goal>) -> EngineResult<TacticState> {
    let goal = ts.head_goal().ok_or(TacticError::NoGoals)?.clone();
    let (mctx2, ok) = is_def_eq(&ts.mctx, &rule, &goal.target);
    if ok {
        let mut ts2 = ts.clone();
        ts2.mctx = mctx2;
        let ts3 = assign_proof(&ts2, &goal.hole_id, proof);
        return Ok(replace_goal(&ts3, new_goals));
    }
    match rule {
        Rule::Implies(p, q) => {
            let (ts2, p_hole, p_goal) = mk_hole(ts, (*p).clone(), goal.ctx.clone(), goal.fctx.clone());
            let mut new_goals2 = new_goals;
            new_goals2.push(p_goal);
            apply_core(&ts2, Proof::imp_e(proof, p_hole), (*q).clone(), new_goals2)
        }
        Rule::All(_, s, p) => {
            let (mctx2, mv) = ts.mctx.fresh_meta(s);
            let mut ts2 = ts.clone();
            ts2.mctx = mctx2;
            let term = Term::MVar(mv);
            let next_rule = rule::subst_f(&p, &term, 0);
            apply_core(&ts2, Proof::all_e(proof, term), next_rule, new_goals)
        }
        Rule::Proves(_) => Err(TacticError::NotDefEq(rule, goal.target.clone()).into()),
    }
}

/// Mints a hole for the lemma `r`, then produces two goals: the lemma goal
/// first, then the original goal with `(name, r, hole)` appended to the tail
/// of `ctx` so existing hypothesis indices are unaffected.
pub fn have(ts: &TacticState, name: &str, r: Rule) -> EngineResult<TacticState> {
    let goal = ts.head_goal().ok_or(TacticError::NoGoals)?.clone();
    let (ts2, h_proof, h_goal) = mk_hole(ts, r.clone(), goal.ctx.clone(), goal.fctx.clone());
    let mut ctx = goal.ctx.clone();
    ctx.push(Hypothesis::with_deferred(name, r, h_proof));
    let original_goal = Goal { hole_id: goal.hole_id.clone(), target: goal.target.clone(), ctx, fctx: goal.fctx.clone() };
    Ok(replace_goal(&ts2, vec![h_goal, original_goal]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarski_kernel::{MCtx, Ty};

    fn prop_p() -> Rule {
        Rule::proves(Term::Const("p".into()))
    }

    fn fresh_state(target: Rule) -> TacticState {
        let goal = Goal { hole_id: "h0".into(), target, ctx: vec![], fctx: vec![] };
        TacticState::new(MCtx::new(), goal)
    }

    #[test]
    fn assumption_finds_matching_hypothesis() {
        let mut ts = fresh_state(prop_p());
        ts.goals[0].ctx.push(Hypothesis::new("h", prop_p()));
        let result = assumption(&ts).unwrap();
        assert!(result.goals.is_empty());
        assert_eq!(result.proofs.get("h0"), Some(&Proof::Hyp(0)));
    }

    #[test]
    fn assumption_fails_with_no_match() {
        let ts = fresh_state(prop_p());
        let err = assumption(&ts).unwrap_err();
        assert_eq!(err, TacticError::Assumption.into());
    }

    #[test]
    fn intro_on_implication_discharges_antecedent() {
        let target = Rule::implies(prop_p(), prop_p());
        let ts = fresh_state(target);
        let ts2 = intro_one(&ts, "h").unwrap();
        assert_eq!(ts2.goals.len(), 1);
        assert_eq!(ts2.goals[0].ctx[0].name, "h");
        assert_eq!(ts2.goals[0].target, prop_p());
    }

    #[test]
    fn intro_on_proves_fails() {
        let ts = fresh_state(prop_p());
        let err = intro_one(&ts, "h").unwrap_err();
        assert_eq!(err, TacticError::Intro.into());
    }

    #[test]
    fn intro_then_assumption_closes_implication_goal() {
        let target = Rule::implies(prop_p(), prop_p());
        let ts = fresh_state(target);
        let ts2 = intro_one(&ts, "h").unwrap();
        let ts3 = assumption(&ts2).unwrap();
        assert!(ts3.goals.is_empty());
    }

    #[test]
    fn apply_on_matching_axiom_closes_goal() {
        let ts = fresh_state(prop_p());
        let mut axioms = HashMap::new();
        axioms.insert("ax1".to_string(), prop_p());
        let constants = HashMap::new();
        let ts2 = apply(&ts, "ax1", &[], &axioms, &constants).unwrap();
        assert!(ts2.goals.is_empty());
        assert_eq!(ts2.proofs.get("h0"), Some(&Proof::Ax("ax1".into())));
    }

    #[test]
    fn apply_with_implication_opens_a_premise_goal() {
        let target = prop_p();
        let ts = fresh_state(target);
        let mut axioms = HashMap::new();
        axioms.insert("pq".to_string(), Rule::implies(Rule::proves(Term::Const("q".into())), prop_p()));
        let constants = HashMap::new();
        let ts2 = apply(&ts, "pq", &[], &axioms, &constants).unwrap();
        assert_eq!(ts2.goals.len(), 1);
        assert_eq!(ts2.goals[0].target, Rule::proves(Term::Const("q".into())));
    }

    #[test]
    fn apply_unknown_name_fails() {
        let ts = fresh_state(prop_p());
        let axioms = HashMap::new();
        let constants = HashMap::new();
        let err = apply(&ts, "nope", &[], &axioms, &constants).unwrap_err();
        assert_eq!(err, TacticError::UnknownId("nope".into()).into());
    }

    #[test]
    fn apply_all_with_term_argument_substitutes() {
        let target = Rule::proves(Term::Const("c".into()));
        let ts = fresh_state(target);
        let mut axioms = HashMap::new();
        axioms.insert("ax".to_string(), Rule::all("x", Ty::base("T"), Rule::proves(Term::FVar(0))));
        let mut constants = HashMap::new();
        constants.insert("c".to_string(), Ty::base("T"));
        let ts2 = apply(&ts, "ax", &[ApplyArg::Term(Term::Const("c".into()))], &axioms, &constants).unwrap();
        assert!(ts2.goals.is_empty());
    }

    #[test]
    fn have_produces_lemma_goal_then_original_with_tail_hypothesis() {
        let ts = fresh_state(prop_p());
        let ts2 = have(&ts, "h3", prop_p()).unwrap();
        assert_eq!(ts2.goals.len(), 2);
        assert_eq!(ts2.goals[0].target, prop_p());
        assert_eq!(ts2.goals[1].ctx.len(), 1);
        assert_eq!(ts2.goals[1].ctx[0].name, "h3");
    }
}
