//! Tactic errors (§7.2): typed, recoverable at the level of a single tactic
//! invocation. Tactics never catch each other's errors; they surface to the
//! command driver as-is. Kernel errors threaded through `apply`'s type
//! inference calls are wrapped alongside them in `EngineError` so a single
//! `Result` type can flow out of the tactic engine to the driver.

use std::fmt;

use tarski_kernel::{KernelError, Rule, Term, Ty};

#[derive(Debug, Clone, PartialEq)]
pub enum TacticError {
    /// A tactic was run with no open goals.
    NoGoals,
    /// `assumption` found no hypothesis def-equal to the target.
    Assumption,
    /// `intro` was run against a target that is neither `implies` nor `all`.
    Intro,
    /// `apply`/`have` referenced a name with no matching hypothesis or axiom.
    UnknownId(String),
    /// Two rules required to be def-equal were not.
    NotDefEq(Rule, Rule),
    /// A term argument's inferred type did not match the expected type.
    TypeMismatch { term: Term, have: Ty, expected: Ty },
    /// `apply` was given more arguments than the target rule has components.
    ApplyExcessArgument,
    /// A term argument was given against a target that isn't `all`.
    NotApplicable,
}

impl TacticError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TacticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TacticError::NoGoals => write!(f, "no open goals"),
            TacticError::Assumption => write!(f, "no hypothesis matches the goal"),
            TacticError::Intro => write!(f, "intro requires an implication or universal goal"),
            TacticError::UnknownId(name) => write!(f, "unknown identifier: `{}`", name),
            TacticError::NotDefEq(lhs, rhs) => {
                write!(f, "not definitionally equal: `{}` vs `{}`", lhs, rhs)
            }
            TacticError::TypeMismatch { term, have, expected } => {
                write!(f, "term `{}` has type `{}`, expected `{}`", term, have, expected)
            }
            TacticError::ApplyExcessArgument => write!(f, "apply given more arguments than the goal expects"),
            TacticError::NotApplicable => write!(f, "term argument given against a non-universal goal"),
        }
    }
}

impl std::error::Error for TacticError {}

/// Either a typed tactic failure or a kernel failure surfaced while the
/// tactic engine was inferring a term argument's type.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Tactic(TacticError),
    Kernel(KernelError),
}

impl From<TacticError> for EngineError {
    fn from(e: TacticError) -> Self {
        EngineError::Tactic(e)
    }
}

impl From<KernelError> for EngineError {
    fn from(e: KernelError) -> Self {
        EngineError::Kernel(e)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Tactic(e) => write!(f, "{}", e),
            EngineError::Kernel(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;
