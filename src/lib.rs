//! Interactive proof assistant for a minimal higher-order logic over
//! simply-typed lambda calculus.
//!
//! This crate is a thin facade over the layered workspace:
//! [`tarski_parse`] (tokenizer and grammar), [`tarski_kernel`] (types,
//! terms, rules, proofs), [`tarski_tactic`] (the tactic engine) and
//! [`tarski_elab`] (elaboration, `CoreState`, and the command driver).

pub mod cli;

pub use tarski_elab::{process_text, run, CoreState, Outcome};
