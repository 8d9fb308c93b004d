//! Elaboration and command-level errors: parser diagnostics, kernel/tactic
//! failures threaded up from lower layers, and a few elaborator-specific
//! conditions (duplicate declarations, unsolved goals at `prove`).

use std::fmt;

use tarski_kernel::KernelError;
use tarski_parse::ParseFailure;
use tarski_tactic::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub enum ElabError {
    Parse(ParseFailure),
    Kernel(KernelError),
    Tactic(EngineError),
    /// A syntax node didn't match any expected shape for `expected_kind`.
    Malformed(&'static str),
    /// A `term` node matched none of the built-in forms and no registered
    /// notation either.
    NoMatchingNotation,
    ConstantAlreadyDeclared(String),
    AxiomAlreadyDeclared(String),
    /// `prove` ran out of tactics with goals still open; the message lists
    /// the remaining goal count and the head goal's target.
    UnsolvedGoals(String),
}

impl From<ParseFailure> for ElabError {
    fn from(e: ParseFailure) -> Self {
        ElabError::Parse(e)
    }
}

impl From<KernelError> for ElabError {
    fn from(e: KernelError) -> Self {
        ElabError::Kernel(e)
    }
}

impl From<EngineError> for ElabError {
    fn from(e: EngineError) -> Self {
        ElabError::Tactic(e)
    }
}

impl fmt::Display for ElabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElabError::Parse(e) => write!(f, "{}", e),
            ElabError::Kernel(e) => write!(f, "{}", e),
            ElabError::Tactic(e) => write!(f, "{}", e),
            ElabError::Malformed(kind) => write!(f, "malformed `{}` syntax", kind),
            ElabError::NoMatchingNotation => write!(f, "no notation matches this term"),
            ElabError::ConstantAlreadyDeclared(name) => write!(f, "constant already declared: `{}`", name),
            ElabError::AxiomAlreadyDeclared(name) => write!(f, "axiom already declared: `{}`", name),
            ElabError::UnsolvedGoals(report) => write!(f, "unsolved goals remain: {}", report),
        }
    }
}

impl std::error::Error for ElabError {}

pub type ElabResult<T> = Result<T, ElabError>;
