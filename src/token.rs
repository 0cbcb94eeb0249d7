//! Tokens consumed by the parser driver.

use crate::symbol::Terminal;
use std::fmt;

/// A token: the terminal it matches plus an optional payload such as the
/// lexeme. The last token of every stream must carry the end-of-input
/// terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    terminal: Terminal,
    value: Option<String>,
}

impl Token {
    pub fn new(terminal: Terminal) -> Self {
        Self {
            terminal,
            value: None,
        }
    }

    pub fn with_value(terminal: Terminal, value: impl Into<String>) -> Self {
        Self {
            terminal,
            value: Some(value.into()),
        }
    }

    /// The token closing every stream: `$` with no payload.
    pub fn end_of_input() -> Self {
        Self::new(Terminal::end_of_input())
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}({})", self.terminal, value),
            None => write!(f, "{}", self.terminal),
        }
    }
}
