//! LR(0) automaton: the canonical collection of item sets and its
//! transition graph.

use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::item::LRItem;
use crate::item_set::LR0Set;
use crate::symbol::Symbol;
use log::debug;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Checks whether a grammar has the augmented shape the automaton builder
/// requires: the start production has exactly one derivation and the start
/// symbol appears on no right-hand side.
pub fn is_augmented(grammar: &Grammar) -> bool {
    let start = grammar.start_symbol();
    if grammar.production(start).lines().len() != 1 {
        return false;
    }
    let start_symbol = Symbol::Nonterminal(start.clone());
    grammar
        .lines()
        .all(|line| !line.derivation().contains(&start_symbol))
}

/// The canonical LR(0) collection: states keyed by discovery order, a start
/// state, and the functional transition relation.
#[derive(Debug)]
pub struct LRAutomaton {
    states: Vec<LR0Set>,
    start: usize,
    transitions: HashMap<(usize, Symbol), usize>,
}

impl LRAutomaton {
    /// Builds the canonical collection by worklist exploration from the
    /// start item.
    ///
    /// States are stored closed; identity is kernel-based, so a goto that
    /// reaches a known kernel reuses the existing state. Grouping symbols
    /// through a `BTreeSet` keeps state numbering reproducible.
    pub fn build(grammar: &Grammar) -> Result<Self> {
        if !is_augmented(grammar) {
            return Err(GrammarError::NonAugmentedGrammar(format!(
                "start symbol {} must have a single derivation and appear on no right-hand side",
                grammar.start_symbol()
            )));
        }

        let start_line = grammar.production(grammar.start_symbol()).lines()[0].clone();
        let start_state = LR0Set::new([LRItem::start(start_line)]).closure(grammar);

        let mut states = vec![start_state];
        let mut transitions: HashMap<(usize, Symbol), usize> = HashMap::new();
        let mut work: VecDeque<usize> = VecDeque::new();
        work.push_back(0);

        while let Some(state_id) = work.pop_front() {
            let state = states[state_id].clone();

            let symbols: BTreeSet<Symbol> = state
                .iter()
                .filter_map(|item| item.next_symbol())
                .cloned()
                .collect();

            for symbol in symbols {
                let next_state = state.goto(&symbol, grammar);

                let next_id = match states.iter().position(|known| known == &next_state) {
                    Some(existing) => existing,
                    None => {
                        let new_id = states.len();
                        states.push(next_state);
                        work.push_back(new_id);
                        new_id
                    }
                };
                transitions.insert((state_id, symbol), next_id);
            }
        }

        debug!(
            "LR(0) automaton: {} states, {} transitions",
            states.len(),
            transitions.len()
        );

        Ok(Self {
            states,
            start: 0,
            transitions,
        })
    }

    pub fn states(&self) -> &[LR0Set] {
        &self.states
    }

    pub fn state(&self, id: usize) -> &LR0Set {
        &self.states[id]
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn transition(&self, state: usize, symbol: &Symbol) -> Option<usize> {
        self.transitions.get(&(state, symbol.clone())).copied()
    }

    pub fn transitions(&self) -> impl Iterator<Item = (usize, &Symbol, usize)> {
        self.transitions
            .iter()
            .map(|((from, symbol), to)| (*from, symbol, *to))
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}
