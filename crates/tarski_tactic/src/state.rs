//! Proof state: an ordered list of open goals threaded functionally through
//! tactic application.

use std::collections::HashMap;

use tarski_kernel::{rule, MCtx, Proof, Rule, Ty};

/// A hypothesis in a goal's context: a name, the rule it proves, and an
/// optional deferred proof (installed by `have` instead of `hyp(idx)`).
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    pub name: String,
    pub rule: Rule,
    pub deferred: Option<Proof>,
}

impl Hypothesis {
    pub fn new(name: impl Into<String>, rule: Rule) -> Self {
        Hypothesis { name: name.into(), rule, deferred: None }
    }

    pub fn with_deferred(name: impl Into<String>, rule: Rule, proof: Proof) -> Self {
        Hypothesis { name: name.into(), rule, deferred: Some(proof) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub hole_id: String,
    pub target: Rule,
    /// Ordered stack of hypotheses; index `0` is innermost.
    pub ctx: Vec<Hypothesis>,
    /// Ordered stack of free-variable bindings; index `0` is innermost.
    pub fctx: Vec<(String, Ty)>,
}

impl Goal {
    pub fn fctx_types(&self) -> Vec<Ty> {
        self.fctx.iter().map(|(_, ty)| ty.clone()).collect()
    }

    pub fn ctx_rules(&self) -> Vec<Rule> {
        self.ctx.iter().map(|h| h.rule.clone()).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TacticState {
    pub mctx: MCtx,
    pub goals: Vec<Goal>,
    pub proofs: HashMap<String, Proof>,
}

impl TacticState {
    pub fn new(mctx: MCtx, goal: Goal) -> Self {
        TacticState { mctx, goals: vec![goal], proofs: HashMap::new() }
    }

    pub fn head_goal(&self) -> Option<&Goal> {
        self.goals.first()
    }
}

/// Mints a fresh hole from the shared mctx counter and returns the updated
/// state, the hole as a `Proof`, and the (not-yet-enqueued) `Goal`.
pub fn mk_hole(ts: &TacticState, target: Rule, ctx: Vec<Hypothesis>, fctx: Vec<(String, Ty)>) -> (TacticState, Proof, Goal) {
    let (mctx2, id) = ts.mctx.fresh_id();
    let hole_id = format!("h{id}");
    let goal = Goal { hole_id: hole_id.clone(), target, ctx, fctx };
    let mut next = ts.clone();
    next.mctx = mctx2;
    (next, Proof::Hole(hole_id), goal)
}

/// Removes the head goal and prepends `new_goals`, then re-instantiates
/// every remaining goal's target and hypothesis rules so metavariable
/// progress from this step is immediately visible.
pub fn replace_goal(ts: &TacticState, new_goals: Vec<Goal>) -> TacticState {
    let mut goals: Vec<Goal> = new_goals;
    if !ts.goals.is_empty() {
        goals.extend(ts.goals[1..].iter().cloned());
    }
    let mctx = ts.mctx.clone();
    let goals = goals
        .into_iter()
        .map(|mut g| {
            g.target = rule::inst_m(&mctx, &g.target);
            g.ctx = g
                .ctx
                .into_iter()
                .map(|mut h| {
                    h.rule = rule::inst_m(&mctx, &h.rule);
                    h
                })
                .collect();
            g
        })
        .collect();
    TacticState { mctx, goals, proofs: ts.proofs.clone() }
}

/// Records `hole_id -> p` in the solved-proofs table.
pub fn assign_proof(ts: &TacticState, hole_id: &str, p: Proof) -> TacticState {
    let mut next = ts.clone();
    next.proofs.insert(hole_id.to_string(), p);
    next
}
