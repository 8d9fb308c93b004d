//! The command driver: tokenizes and elaborates a whole script, command by
//! command, folding the result into a running `CoreState`.

use tarski_parse::{parse, TokenStream};

use crate::corestate::CoreState;
use crate::error::ElabError;

/// The result of running a script to completion.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Every command parsed and elaborated; this is the resulting state.
    Ok(CoreState),
    /// A parse or elaboration failure, reported as a single message.
    Failed(String),
}

/// Parses and elaborates `text` one `command` at a time, starting from the
/// default environment. Stops cleanly at end of input; any leftover tokens
/// after a failed parse attempt are reported as a syntax error.
pub fn run(text: &str) -> Outcome {
    run_from(CoreState::new(), text)
}

/// Processes `text` against a fresh environment and reduces the outcome to
/// a single status message: `"all good"` on success, or the first failure
/// reason on error.
pub fn process_text(text: &str) -> String {
    match run(text) {
        Outcome::Ok(_) => "all good".to_string(),
        Outcome::Failed(reason) => reason,
    }
}

/// Same as [`run`], but starting from a caller-supplied `CoreState` (useful
/// for running a script against declarations from an earlier one).
pub fn run_from(initial: CoreState, text: &str) -> Outcome {
    let mut core = initial;
    let mut stream = TokenStream::new(text);
    loop {
        if stream.at_end() {
            log::debug!("command driver: clean end of input");
            return Outcome::Ok(core);
        }
        log::trace!("command driver: parsing next command at byte {}", stream.index());
        let (stx, next_stream) = match parse(&core.parsers, &core.trie, "command", 0, stream) {
            Ok(pair) => pair,
            Err(failure) => {
                log::debug!("command driver: parse failure: {}", failure.reason);
                return Outcome::Failed(failure.reason);
            }
        };
        core = match crate::command::elab_command(&core, &stx) {
            Ok(next) => {
                log::debug!("command driver: elaborated one command successfully");
                next
            }
            Err(e) => {
                log::debug!("command driver: elaboration failure: {}", e);
                return Outcome::Failed(e.to_string());
            }
        };
        stream = next_stream;
    }
}
