//! LR items: productions with a dot marking parse progress.

use crate::error::{GrammarError, Result};
use crate::grammar::ProductionLine;
use crate::symbol::{Symbol, Terminal};
use std::fmt;

/// An LR(0) item: a production line plus a dot position inside it.
///
/// The dot ranges from 0 (nothing recognized) to the derivation length
/// (the whole right-hand side recognized, a reduce item).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LRItem {
    production: ProductionLine,
    dot: usize,
}

impl LRItem {
    /// An item with the dot at the leftmost position.
    pub fn start(production: ProductionLine) -> Self {
        Self { production, dot: 0 }
    }

    /// An item with the dot at an arbitrary position, validated against the
    /// derivation length.
    pub fn new(production: ProductionLine, dot: usize) -> Result<Self> {
        if dot > production.derivation().len() {
            return Err(GrammarError::InvalidStackPosition {
                dot,
                len: production.derivation().len(),
            });
        }
        Ok(Self { production, dot })
    }

    pub fn production(&self) -> &ProductionLine {
        &self.production
    }

    pub fn dot(&self) -> usize {
        self.dot
    }

    /// Whether the dot sits at the end of the derivation.
    pub fn complete(&self) -> bool {
        self.dot == self.production.derivation().len()
    }

    /// The symbol immediately after the dot, if any.
    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.production.derivation().get(self.dot)
    }

    /// The symbols from the dot onward.
    pub fn tail(&self) -> &[Symbol] {
        &self.production.derivation()[self.dot..]
    }

    /// The item with the dot moved one symbol to the right.
    ///
    /// # Panics
    /// Panics if the item is already complete.
    pub fn advance(&self) -> Self {
        assert!(!self.complete(), "cannot advance a complete item");
        Self {
            production: self.production.clone(),
            dot: self.dot + 1,
        }
    }

    pub fn with_lookahead(&self, lookahead: Terminal) -> LR1Item {
        LR1Item {
            core: self.clone(),
            lookahead,
        }
    }
}

impl fmt::Display for LRItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = self.production.derivation()[..self.dot]
            .iter()
            .map(|symbol| symbol.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let tail = self
            .tail()
            .iter()
            .map(|symbol| symbol.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} -> {} ⋅ {}", self.production.nonterminal(), head, tail)
    }
}

/// An LR(1) item: an LR(0) item plus a lookahead terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LR1Item {
    core: LRItem,
    lookahead: Terminal,
}

impl LR1Item {
    pub fn new(production: ProductionLine, dot: usize, lookahead: Terminal) -> Result<Self> {
        Ok(LRItem::new(production, dot)?.with_lookahead(lookahead))
    }

    pub fn lookahead(&self) -> &Terminal {
        &self.lookahead
    }

    pub fn production(&self) -> &ProductionLine {
        self.core.production()
    }

    pub fn dot(&self) -> usize {
        self.core.dot()
    }

    pub fn complete(&self) -> bool {
        self.core.complete()
    }

    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.core.next_symbol()
    }

    pub fn tail(&self) -> &[Symbol] {
        self.core.tail()
    }

    /// The item with the dot advanced, keeping the lookahead.
    pub fn advance(&self) -> Self {
        Self {
            core: self.core.advance(),
            lookahead: self.lookahead.clone(),
        }
    }

    /// Drops the lookahead, yielding the underlying LR(0) item.
    pub fn to_lr0(&self) -> LRItem {
        self.core.clone()
    }
}

impl fmt::Display for LR1Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} , {}", self.core, self.lookahead)
    }
}
