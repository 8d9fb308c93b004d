//! `elabCommand`: interprets one parsed `command` node against a `CoreState`,
//! producing the next `CoreState`.

use std::collections::HashMap;

use tarski_kernel::rule::is_wf;
use tarski_kernel::MCtx;
use tarski_parse::Syntax;
use tarski_tactic::{Goal, TacticState};

use crate::corestate::CoreState;
use crate::elab::{elab_notation, elab_rule, elab_tactic, elab_ty};
use crate::error::{ElabError, ElabResult};

pub fn elab_command(core: &CoreState, stx: &Syntax) -> ElabResult<CoreState> {
    let children = match stx {
        Syntax::Node { kind, children } if kind == "command" => children,
        _ => return Err(ElabError::Malformed("command")),
    };
    match children.as_slice() {
        [Syntax::Atom(atom), Syntax::Atom(colon1), Syntax::Num(prec), descrs_many, Syntax::Atom(colon2), ty_stx, Syntax::Atom(assign), Syntax::Ident(name)]
            if atom == "notation" && colon1 == ":" && colon2 == ":" && assign == ":=" =>
        {
            elab_notation_command(core, descrs_many.children(), *prec as i32, ty_stx, name)
        }
        [Syntax::Atom(atom), Syntax::Ident(name), Syntax::Atom(colon), rule_stx] if atom == "axiom" && colon == ":" => {
            elab_axiom_command(core, name, rule_stx)
        }
        [Syntax::Atom(atom), Syntax::Ident(name), Syntax::Atom(colon), rule_stx, Syntax::Atom(by), tactics_many]
            if atom == "prove" && colon == ":" && by == "by" =>
        {
            elab_prove_command(core, name, rule_stx, tactics_many.children())
        }
        _ => Err(ElabError::Malformed("command")),
    }
}

fn elab_notation_command(core: &CoreState, descrs: &[Syntax], prec: i32, ty_stx: &Syntax, name: &str) -> ElabResult<CoreState> {
    if core.constants.contains_key(name) {
        return Err(ElabError::ConstantAlreadyDeclared(name.to_string()));
    }
    let base_ty = elab_ty(ty_stx)?;
    let notation = elab_notation(descrs, prec, base_ty, name.to_string())?;

    let mut next = core.clone();
    next.parsers.insert("term", tarski_parse::ParserRule::new(prec, notation.parser_descrs()));
    for kw in notation.new_keywords() {
        next.trie = next.trie.insert_atom(&kw);
    }
    next.constants.insert(name.to_string(), notation.constant_ty());
    next.notations.push(notation);
    Ok(next)
}

fn elab_axiom_command(core: &CoreState, name: &str, rule_stx: &Syntax) -> ElabResult<CoreState> {
    if core.axioms.contains_key(name) {
        return Err(ElabError::AxiomAlreadyDeclared(name.to_string()));
    }
    let rule = elab_rule(0, 0, &HashMap::new(), &HashMap::new(), &core.notations, rule_stx)?;
    let mctx = MCtx::new();
    is_wf(&mctx, &core.constants, &[], &[], &rule)?;

    let mut next = core.clone();
    next.axioms.insert(name.to_string(), rule);
    Ok(next)
}

fn elab_prove_command(core: &CoreState, name: &str, rule_stx: &Syntax, tactics: &[Syntax]) -> ElabResult<CoreState> {
    if core.axioms.contains_key(name) {
        return Err(ElabError::AxiomAlreadyDeclared(name.to_string()));
    }
    let rule = elab_rule(0, 0, &HashMap::new(), &HashMap::new(), &core.notations, rule_stx)?;
    let mctx = MCtx::new();
    is_wf(&mctx, &core.constants, &[], &[], &rule)?;

    let goal = Goal { hole_id: "root".to_string(), target: rule.clone(), ctx: vec![], fctx: vec![] };
    let mut ts = TacticState::new(mctx, goal);
    for tactic_stx in tactics {
        ts = elab_tactic(&ts, &core.notations, &core.axioms, &core.constants, tactic_stx)?;
    }
    if !ts.goals.is_empty() {
        return Err(ElabError::UnsolvedGoals(describe_goals(&ts.goals)));
    }

    let mut next = core.clone();
    next.axioms.insert(name.to_string(), rule);
    Ok(next)
}

fn describe_goals(goals: &[Goal]) -> String {
    goals
        .iter()
        .map(|g| {
            let hyps: Vec<String> = g.ctx.iter().map(|h| format!("{}: {}", h.name, h.rule)).collect();
            let vars: Vec<String> = g.fctx.iter().map(|(n, t)| format!("{}: {}", n, t)).collect();
            format!("goal `{}`: target = {}, hypotheses = [{}], variables = [{}]", g.hole_id, g.target, hyps.join(", "), vars.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
