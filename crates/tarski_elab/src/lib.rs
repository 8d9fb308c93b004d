//! Elaborator, `CoreState`, notations, and the command driver: the layer
//! that turns surface syntax into kernel objects and tactic-engine steps.

pub mod command;
pub mod corestate;
pub mod driver;
pub mod elab;
pub mod error;
pub mod notation;

pub use command::elab_command;
pub use corestate::CoreState;
pub use driver::{process_text, run, run_from, Outcome};
pub use error::{ElabError, ElabResult};
pub use notation::{Notation, NotationPart};
