//! Symbol types for context-free grammars.
//!
//! Terminals and nonterminals are immutable, value-equal tokens carrying a
//! string tag; their disjoint union is [`Symbol`].

use std::fmt;

/// Tag of the distinguished end-of-input terminal.
pub const END_OF_INPUT: &str = "$";

/// A terminal symbol, i.e. one that maps directly to a token class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(String);

impl Terminal {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The end-of-input terminal `$`.
    ///
    /// Injected into lookaheads and expected as the last token of every
    /// parse. The tag is fixed, so user grammars must not use `$` as a
    /// terminal of their own.
    pub fn end_of_input() -> Self {
        Self(END_OF_INPUT.to_string())
    }

    pub fn tag(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A nonterminal symbol, always the left-hand side of some production.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nonterminal(String);

impl Nonterminal {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn tag(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A symbol in a context-free grammar: either a terminal or a nonterminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(Terminal),
    Nonterminal(Nonterminal),
}

impl Symbol {
    /// Checks if this symbol is a terminal.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Checks if this symbol is a nonterminal.
    #[inline]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::Nonterminal(_) => None,
        }
    }

    pub fn as_nonterminal(&self) -> Option<&Nonterminal> {
        match self {
            Symbol::Terminal(_) => None,
            Symbol::Nonterminal(n) => Some(n),
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(terminal: Terminal) -> Self {
        Symbol::Terminal(terminal)
    }
}

impl From<Nonterminal> for Symbol {
    fn from(nonterminal: Nonterminal) -> Self {
        Symbol::Nonterminal(nonterminal)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::Nonterminal(n) => write!(f, "{}", n),
        }
    }
}
