//! LALR(1) Parser Generator
//!
//! Reads a context-free grammar and token streams from stdin, compiles the
//! grammar into an LALR(1) parsing table, and prints the parse tree for
//! each input line.
//!
//! Set `RUST_LOG=debug` to watch the generator pipeline work.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools"
//! (2nd Edition). Addison-Wesley, 2006.

use lalr_parser::cli;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
