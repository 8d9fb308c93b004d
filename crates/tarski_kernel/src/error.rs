//! Kernel errors (§7.1): unconditional failures. These indicate a malformed
//! term, rule or proof — a bug in the elaborator or the tactic script, not a
//! recoverable condition. They propagate straight to the command driver.

use std::fmt;

use crate::ty::Ty;

#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// A `BVar`/`FVar`/hypothesis index has no binding at that depth.
    InvalidIndex { kind: &'static str, index: usize },
    /// An application's argument type did not match the function's domain.
    TypeMismatch { expected: Ty, found: Ty },
    /// An application's function side did not have an arrow type.
    ArrowExpected { found: Ty },
    /// A `proves(p)` rule whose `p` does not have a base type.
    ExpectedBaseType { found: Ty },
    /// Reference to a constant not present in the constants table.
    UnknownConst(String),
    /// Reference to a metavariable with no recorded type.
    UnknownMeta(String),
    /// `ax(name)` referenced an axiom that does not exist.
    InvalidAxiomLookup(String),
    /// A proof being checked still contains an unfilled hole.
    ProofHasHole(String),
    /// `impE`'s first proof did not check against an `implies` rule.
    ImpEShapeMismatch { found: String },
    /// `allE`'s proof did not check against an `all` rule.
    AllEShapeMismatch { found: String },
    /// `allE`'s term argument did not have the bound variable's type.
    AllETypeMismatch { expected: Ty, found: Ty },
    /// `impE`'s argument proof was not definitionally equal to the premise.
    NotDefEqAtImpE { premise: String, argument: String },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidIndex { kind, index } => {
                write!(f, "invalid {} index: {}", kind, index)
            }
            KernelError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected `{}`, found `{}`", expected, found)
            }
            KernelError::ArrowExpected { found } => {
                write!(f, "arrow type expected, found `{}`", found)
            }
            KernelError::ExpectedBaseType { found } => {
                write!(f, "expected a base type, found `{}`", found)
            }
            KernelError::UnknownConst(name) => write!(f, "unknown const: `{}`", name),
            KernelError::UnknownMeta(name) => write!(f, "unknown metavariable: `{}`", name),
            KernelError::InvalidAxiomLookup(name) => write!(f, "unknown axiom: `{}`", name),
            KernelError::ProofHasHole(name) => {
                write!(f, "proof contains unfilled hole `{}`", name)
            }
            KernelError::ImpEShapeMismatch { found } => {
                write!(f, "impE expected an implication, found `{}`", found)
            }
            KernelError::AllEShapeMismatch { found } => {
                write!(f, "allE expected a universal, found `{}`", found)
            }
            KernelError::AllETypeMismatch { expected, found } => {
                write!(f, "allE argument has type `{}`, expected `{}`", found, expected)
            }
            KernelError::NotDefEqAtImpE { premise, argument } => {
                write!(f, "impE argument `{}` is not definitionally equal to premise `{}`", argument, premise)
            }
        }
    }
}

impl std::error::Error for KernelError {}

pub type KernelResult<T> = Result<T, KernelError>;
