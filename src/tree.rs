//! The concrete parse tree emitted by the driver.

use crate::symbol::{Nonterminal, Symbol, Terminal};
use std::fmt;

/// A node of the parse tree.
///
/// Terminal leaves wrap the shifted token's terminal and payload;
/// nonterminal nodes hold their children in the grammar's left-to-right
/// order. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    Terminal {
        symbol: Terminal,
        value: String,
    },
    Nonterminal {
        symbol: Nonterminal,
        children: Vec<ParseNode>,
    },
}

impl ParseNode {
    pub fn leaf(symbol: Terminal, value: impl Into<String>) -> Self {
        ParseNode::Terminal {
            symbol,
            value: value.into(),
        }
    }

    pub fn node(symbol: Nonterminal, children: Vec<ParseNode>) -> Self {
        ParseNode::Nonterminal { symbol, children }
    }

    pub fn symbol(&self) -> Symbol {
        match self {
            ParseNode::Terminal { symbol, .. } => Symbol::Terminal(symbol.clone()),
            ParseNode::Nonterminal { symbol, .. } => Symbol::Nonterminal(symbol.clone()),
        }
    }

    /// Children in left-to-right order; leaves have none.
    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Terminal { .. } => &[],
            ParseNode::Nonterminal { children, .. } => children,
        }
    }

    /// The left-to-right sequence of terminal leaves under this node.
    ///
    /// For an accepted parse this equals the input terminal sequence minus
    /// the final end-of-input token.
    pub fn terminal_fringe(&self) -> Vec<&Terminal> {
        let mut fringe = Vec::new();
        self.collect_fringe(&mut fringe);
        fringe
    }

    fn collect_fringe<'a>(&'a self, fringe: &mut Vec<&'a Terminal>) {
        match self {
            ParseNode::Terminal { symbol, .. } => fringe.push(symbol),
            ParseNode::Nonterminal { children, .. } => {
                for child in children {
                    child.collect_fringe(fringe);
                }
            }
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            ParseNode::Terminal { symbol, value } if value.is_empty() => {
                writeln!(f, "{}{}", indent, symbol)
            }
            ParseNode::Terminal { symbol, value } => {
                writeln!(f, "{}{} \"{}\"", indent, symbol, value)
            }
            ParseNode::Nonterminal { symbol, children } => {
                writeln!(f, "{}{}", indent, symbol)?;
                for child in children {
                    child.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
