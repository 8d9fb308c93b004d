//! Command-line interface for the `tarski` binary.

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use tarski_elab::Outcome;

/// Command-line interface for the `tarski` proof assistant.
///
/// Runs a script: a sequence of `notation`/`axiom`/`prove` commands over the
/// default surface grammar (§6). Reads from a file path, or from stdin when
/// `path` is omitted or `-`.
#[derive(Parser)]
#[command(name = "tarski")]
#[command(about = "Interactive proof assistant for a minimal higher-order logic", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the script to run. Omit, or pass `-`, to read from stdin.
    pub path: Option<PathBuf>,

    /// Enable debug-level logging of the command driver.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses CLI arguments, reads the script, and runs it to completion.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let text = read_source(cli.path.as_deref())?;
    match tarski_elab::run(&text) {
        Outcome::Ok(core) => {
            println!("all good");
            println!("{} axiom(s) declared", core.axioms.len());
            Ok(())
        }
        Outcome::Failed(reason) => Err(reason.into()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn read_source(path: Option<&std::path::Path>) -> io::Result<String> {
    match path {
        None => read_stdin(),
        Some(p) if p == std::path::Path::new("-") => read_stdin(),
        Some(p) => std::fs::read_to_string(p),
    }
}

fn read_stdin() -> io::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
