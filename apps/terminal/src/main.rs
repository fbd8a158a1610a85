//! # Wireline Terminal Entry Point
//!
//! Thin binary wrapper: the actual setup lives in lib.rs for testability.
//! Errors print one line to stderr and exit with status 1.

fn main() {
    if let Err(err) = wireline_terminal::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
