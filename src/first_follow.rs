//! FIRST and FOLLOW set computation.
//!
//! Both sets are values with a boolean rider: FIRST carries `nullable`
//! (the symbol derives the empty chain), FOLLOW carries `ends_chain` (the
//! end-of-input marker can follow the nonterminal). Unions propagate the
//! flag monotonically, which is what makes the fixed-point loops converge.

use crate::grammar::Production;
use crate::symbol::{Nonterminal, Symbol, Terminal};
use std::collections::{HashMap, HashSet};

/// The set of terminals that can begin derivations of a symbol or chain,
/// plus a flag recording whether the whole thing can derive ε.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSet {
    terminals: HashSet<Terminal>,
    nullable: bool,
}

impl FirstSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_terminals(terminals: impl IntoIterator<Item = Terminal>, nullable: bool) -> Self {
        Self {
            terminals: terminals.into_iter().collect(),
            nullable,
        }
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn contains(&self, terminal: &Terminal) -> bool {
        self.terminals.contains(terminal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Terminal> {
        self.terminals.iter()
    }

    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    pub fn insert(&mut self, terminal: Terminal) -> bool {
        self.terminals.insert(terminal)
    }

    pub fn mark_nullable(&mut self) -> bool {
        let changed = !self.nullable;
        self.nullable = true;
        changed
    }

    /// Monotone union: terminals plus the nullable flag.
    /// Returns whether this set grew.
    pub fn extend(&mut self, other: &FirstSet) -> bool {
        let before = self.terminals.len();
        self.terminals.extend(other.terminals.iter().cloned());
        let mut changed = self.terminals.len() > before;
        if other.nullable {
            changed |= self.mark_nullable();
        }
        changed
    }
}

/// The set of terminals that can appear immediately after a nonterminal in
/// some sentential form; `ends_chain` records that `$` is in the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowSet {
    terminals: HashSet<Terminal>,
    ends_chain: bool,
}

impl FollowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_terminals(terminals: impl IntoIterator<Item = Terminal>, ends_chain: bool) -> Self {
        Self {
            terminals: terminals.into_iter().collect(),
            ends_chain,
        }
    }

    pub fn ends_chain(&self) -> bool {
        self.ends_chain
    }

    pub fn contains(&self, terminal: &Terminal) -> bool {
        self.terminals.contains(terminal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Terminal> {
        self.terminals.iter()
    }

    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    pub fn insert(&mut self, terminal: Terminal) -> bool {
        self.terminals.insert(terminal)
    }

    pub fn mark_ends_chain(&mut self) -> bool {
        let changed = !self.ends_chain;
        self.ends_chain = true;
        changed
    }

    /// Monotone union: terminals plus the ends_chain flag.
    /// Returns whether this set grew.
    pub fn extend(&mut self, other: &FollowSet) -> bool {
        let before = self.terminals.len();
        self.terminals.extend(other.terminals.iter().cloned());
        let mut changed = self.terminals.len() > before;
        if other.ends_chain {
            changed |= self.mark_ends_chain();
        }
        changed
    }
}

/// Computes the FIRST sets for all nonterminals by fixed-point iteration.
///
/// Each round unions FIRST of every alternative's chain into the left-hand
/// side; the loop stops once a full round adds nothing. Termination follows
/// from the finite lattice and the monotone unions.
pub(crate) fn compute_first_sets(
    productions: &HashMap<Nonterminal, Production>,
) -> HashMap<Nonterminal, FirstSet> {
    let mut first_sets: HashMap<Nonterminal, FirstSet> = productions
        .keys()
        .map(|nonterminal| (nonterminal.clone(), FirstSet::new()))
        .collect();

    let mut changed = true;
    while changed {
        changed = false;

        for production in productions.values() {
            for line in production.lines() {
                let rhs_first = first_of_chain(line.derivation(), &first_sets);
                let entry = first_sets
                    .get_mut(production.nonterminal())
                    .expect("every production keyed in first_sets");
                changed |= entry.extend(&rhs_first);
            }
        }
    }

    first_sets
}

/// FIRST of a chain of symbols, walked left to right.
///
/// A terminal contributes itself and stops the walk; a nonterminal
/// contributes its FIRST terminals and stops unless it is nullable. Walking
/// off the end means every symbol was nullable, so the chain is too.
pub(crate) fn first_of_chain(
    chain: &[Symbol],
    first_sets: &HashMap<Nonterminal, FirstSet>,
) -> FirstSet {
    let mut first = FirstSet::new();

    for symbol in chain {
        match symbol {
            Symbol::Terminal(terminal) => {
                first.insert(terminal.clone());
                return first;
            }
            Symbol::Nonterminal(nonterminal) => {
                let symbol_first = &first_sets[nonterminal];
                for terminal in symbol_first.iter() {
                    first.insert(terminal.clone());
                }
                if !symbol_first.nullable() {
                    return first;
                }
            }
        }
    }

    first.mark_nullable();
    first
}

/// Computes the FOLLOW sets for all nonterminals by fixed-point iteration.
///
/// For every production `A -> α B β`: FIRST(β) goes into FOLLOW(B), and if
/// β is fully nullable (or empty) FOLLOW(A) goes into FOLLOW(B) as well,
/// ends_chain flag included.
pub(crate) fn compute_follow_sets(
    productions: &HashMap<Nonterminal, Production>,
    start: &Nonterminal,
    first_sets: &HashMap<Nonterminal, FirstSet>,
) -> HashMap<Nonterminal, FollowSet> {
    let mut follow_sets: HashMap<Nonterminal, FollowSet> = productions
        .keys()
        .map(|nonterminal| (nonterminal.clone(), FollowSet::new()))
        .collect();

    follow_sets
        .get_mut(start)
        .expect("start symbol has a production")
        .mark_ends_chain();

    let mut changed = true;
    while changed {
        changed = false;

        for production in productions.values() {
            for line in production.lines() {
                for (position, symbol) in line.derivation().iter().enumerate() {
                    let Symbol::Nonterminal(nonterminal) = symbol else {
                        continue;
                    };

                    let beta = &line.derivation()[position + 1..];
                    let first_beta = first_of_chain(beta, first_sets);

                    let lhs_follow = if first_beta.nullable() {
                        Some(follow_sets[production.nonterminal()].clone())
                    } else {
                        None
                    };

                    let entry = follow_sets
                        .get_mut(nonterminal)
                        .expect("every RHS nonterminal keyed in follow_sets");
                    for terminal in first_beta.iter() {
                        changed |= entry.insert(terminal.clone());
                    }
                    if let Some(lhs_follow) = lhs_follow {
                        changed |= entry.extend(&lhs_follow);
                    }
                }
            }
        }
    }

    follow_sets
}
