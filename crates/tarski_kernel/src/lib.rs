//! Simply-typed lambda calculus kernel: types, terms, metavariable context,
//! weak-head reduction, rules and proofs. No IO, no logging: this crate is
//! pure logic, callable from the tactic engine and the elaborator alike.

pub mod error;
pub mod infer;
pub mod mctx;
pub mod proof;
pub mod reduction;
pub mod rule;
pub mod term;
pub mod ty;

pub use error::{KernelError, KernelResult};
pub use mctx::MCtx;
pub use proof::Proof;
pub use rule::Rule;
pub use term::Term;
pub use ty::Ty;
