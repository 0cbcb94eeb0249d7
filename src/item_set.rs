//! Item sets partitioned into kernel and nonkernel items.
//!
//! The kernel is the identity of a set: two sets with the same kernel are
//! the same state, because under a fixed grammar the nonkernel is a derived
//! consequence of the kernel. Equality and hashing therefore look at the
//! kernel only.

use crate::grammar::Grammar;
use crate::item::{LR1Item, LRItem};
use crate::symbol::Symbol;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A set of LR items split into kernel and nonkernel parts.
///
/// Kernel items are those whose dot is not at the leftmost position, plus
/// the start item; nonkernel items only ever arise from closure.
#[derive(Debug, Clone)]
pub struct LRSet<I> {
    kernel: BTreeSet<I>,
    nonkernel: BTreeSet<I>,
}

/// A set of LR(0) items.
pub type LR0Set = LRSet<LRItem>;

/// A set of LR(1) items.
pub type LR1Set = LRSet<LR1Item>;

impl<I: Ord> LRSet<I> {
    pub fn new(kernel: impl IntoIterator<Item = I>) -> Self {
        Self {
            kernel: kernel.into_iter().collect(),
            nonkernel: BTreeSet::new(),
        }
    }

    pub fn kernel(&self) -> &BTreeSet<I> {
        &self.kernel
    }

    pub fn nonkernel(&self) -> &BTreeSet<I> {
        &self.nonkernel
    }

    /// Iterates the kernel items first, then the nonkernel items.
    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.kernel.iter().chain(self.nonkernel.iter())
    }

    pub fn contains(&self, item: &I) -> bool {
        self.kernel.contains(item) || self.nonkernel.contains(item)
    }

    pub fn len(&self) -> usize {
        self.kernel.len() + self.nonkernel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernel.is_empty() && self.nonkernel.is_empty()
    }
}

impl<I: Ord> PartialEq for LRSet<I> {
    fn eq(&self, other: &Self) -> bool {
        self.kernel == other.kernel
    }
}

impl<I: Ord> Eq for LRSet<I> {}

impl<I: Ord + Hash> Hash for LRSet<I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kernel.hash(state);
    }
}

impl<I: Ord + fmt::Display> fmt::Display for LRSet<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .kernel
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", lines)
    }
}

impl LR0Set {
    /// The least superset closed under adding `B -> ⋅ γ` for every
    /// nonterminal `B` just past a dot.
    ///
    /// The kernel is preserved; everything added lands in the nonkernel.
    /// Closing an already closed set is a no-op.
    pub fn closure(&self, grammar: &Grammar) -> LR0Set {
        let mut nonkernel = self.nonkernel.clone();

        let mut changed = true;
        while changed {
            changed = false;
            let current: Vec<LRItem> =
                self.kernel.iter().chain(nonkernel.iter()).cloned().collect();

            for item in current {
                let Some(Symbol::Nonterminal(nonterminal)) = item.next_symbol() else {
                    continue;
                };
                for line in grammar.production(nonterminal).lines() {
                    let implied = LRItem::start(line.clone());
                    if !self.kernel.contains(&implied) && nonkernel.insert(implied) {
                        changed = true;
                    }
                }
            }
        }

        LRSet {
            kernel: self.kernel.clone(),
            nonkernel,
        }
    }

    /// The successor set under `symbol`: the dot-advance of every matching
    /// item becomes the new kernel, which is then closed.
    ///
    /// Assumes `self` has already been closed.
    pub fn goto(&self, symbol: &Symbol, grammar: &Grammar) -> LR0Set {
        let kernel = self
            .iter()
            .filter(|item| item.next_symbol() == Some(symbol))
            .map(|item| item.advance());
        LRSet::new(kernel).closure(grammar)
    }
}

impl LR1Set {
    /// LR(1) closure: for each item `A -> α ⋅ B β , a` the implied items
    /// `B -> ⋅ γ` carry every terminal of FIRST(β), plus `a` itself when β
    /// is fully nullable.
    pub fn closure(&self, grammar: &Grammar) -> LR1Set {
        let mut nonkernel = self.nonkernel.clone();

        let mut changed = true;
        while changed {
            changed = false;
            let current: Vec<LR1Item> =
                self.kernel.iter().chain(nonkernel.iter()).cloned().collect();

            for item in current {
                let Some(Symbol::Nonterminal(nonterminal)) = item.next_symbol() else {
                    continue;
                };

                let first_beta = grammar.first_of_chain(&item.tail()[1..]);
                let mut lookaheads: Vec<_> = first_beta.iter().cloned().collect();
                if first_beta.nullable() {
                    lookaheads.push(item.lookahead().clone());
                }

                for line in grammar.production(nonterminal).lines() {
                    for lookahead in &lookaheads {
                        let implied =
                            LRItem::start(line.clone()).with_lookahead(lookahead.clone());
                        if !self.kernel.contains(&implied) && nonkernel.insert(implied) {
                            changed = true;
                        }
                    }
                }
            }
        }

        LRSet {
            kernel: self.kernel.clone(),
            nonkernel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ProductionLine;
    use crate::symbol::{Nonterminal, Terminal};
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(set: &LR0Set) -> u64 {
        let mut hasher = DefaultHasher::new();
        set.hash(&mut hasher);
        hasher.finish()
    }

    fn item(dot: usize) -> LRItem {
        let line = ProductionLine::new(
            Nonterminal::new("A"),
            vec![
                Symbol::Terminal(Terminal::new("a")),
                Symbol::Terminal(Terminal::new("b")),
            ],
        );
        LRItem::new(line, dot).unwrap()
    }

    #[test]
    fn test_identity_ignores_nonkernel() {
        let bare = LRSet::new([item(1)]);
        let mut padded = LRSet::new([item(1)]);
        padded.nonkernel.insert(item(0));

        assert_eq!(bare, padded);
        assert_eq!(hash_of(&bare), hash_of(&padded));
    }

    #[test]
    fn test_different_kernels_differ() {
        let one = LRSet::new([item(1)]);
        let other = LRSet::new([item(2)]);
        assert_ne!(one, other);
    }

    #[test]
    fn test_iteration_covers_both_partitions() {
        let mut set = LRSet::new([item(1)]);
        set.nonkernel.insert(item(0));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().count(), 2);
        assert!(set.contains(&item(0)));
        assert!(set.contains(&item(1)));
    }
}
