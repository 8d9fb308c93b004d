//! `tarski` - standalone binary entry point.
//!
//! A thin wrapper around [`tarski::cli::run_cli`], handling error display
//! and exit codes. All command logic lives in the library crate.

fn main() {
    if let Err(e) = tarski::cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
