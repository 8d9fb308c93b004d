//! The tactic engine: goals, hypothesis and free-variable contexts, and the
//! five tactics that manipulate them. Built on `tarski-kernel`; still no IO.

pub mod error;
pub mod state;
pub mod tactics;

pub use error::{EngineError, EngineResult, TacticError};
pub use state::{assign_proof, mk_hole, replace_goal, Goal, Hypothesis, TacticState};
pub use tactics::{apply, apply_core, assumption, have, intro, intro_one, ApplyArg};
