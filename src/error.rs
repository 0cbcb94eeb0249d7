//! Error types for the parser generator and driver.

use crate::token::Token;
use thiserror::Error;

/// Errors raised while constructing grammars, automata, or parsing tables.
///
/// All of these are fatal: the grammar is static input, so nothing is
/// recoverable once construction has failed.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("production for {0} has no derivations")]
    EmptyProduction(String),

    #[error("duplicate derivation in production {0}")]
    DuplicateDerivation(String),

    #[error("two productions share the left-hand side {0}")]
    DuplicateProduction(String),

    #[error("nonterminal {0} has no production")]
    UndefinedNonterminal(String),

    #[error("grammar is not augmented: {0}")]
    NonAugmentedGrammar(String),

    #[error("dot position {dot} outside derivation of length {len}")]
    InvalidStackPosition { dot: usize, len: usize },

    #[error("conflict in state {state} on symbol {symbol}:\n  {existing}\n  {incoming}")]
    Conflict {
        state: usize,
        symbol: String,
        existing: String,
        incoming: String,
    },

    #[error("empty grammar input")]
    EmptyInput,

    #[error("invalid production line: {0}")]
    InvalidProduction(String),

    #[error("not enough production lines: expected {expected}, got {actual}")]
    NotEnoughProductions { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the table-driven parser while consuming a token stream.
///
/// A failing parse leaves the parser ready for the next call; no state is
/// carried between invocations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token {token} at position {position}")]
    UnexpectedToken { token: Token, position: usize },

    #[error("token stream ended without the end-of-input token")]
    NoEndOfInputToken,
}

/// Type alias for generator-side Results in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
