//! LALR(1) automaton: LR(0) states annotated with lookahead sets computed
//! by the DeRemer–Pennello generate/propagate algorithm.
//!
//! No canonical LR(1) collection is ever built and no states are merged
//! after the fact; the LR(0) kernel identity already is the merge.

use crate::error::Result;
use crate::grammar::Grammar;
use crate::item::LRItem;
use crate::item_set::{LR1Set, LRSet};
use crate::symbol::{Symbol, Terminal};
use crate::table::{Action, ParsingTable};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Lookahead of an item during relationship discovery.
///
/// `Sentinel` is the "not a grammar symbol" marker: closure items that still
/// carry it receive their lookaheads by propagation from the kernel item the
/// closure started from, while items that traded it for a real terminal had
/// that terminal generated spontaneously.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Lookahead {
    Terminal(Terminal),
    Sentinel,
}

/// A kernel item addressed by the state it lives in.
type ItemAddress = (usize, LRItem);

/// The LALR(1) automaton: one LR(1) state per LR(0) state, with the LR(0)
/// transition graph carried over verbatim.
#[derive(Debug)]
pub struct LALRAutomaton {
    grammar: Grammar,
    states: Vec<LR1Set>,
    start: usize,
    transitions: HashMap<(usize, Symbol), usize>,
}

impl LALRAutomaton {
    /// Builds the LALR(1) automaton for an augmented grammar.
    ///
    /// Pipeline: LR(0) canonical collection, then per-kernel-item discovery
    /// of generated and propagated lookaheads, then the propagation fixed
    /// point, and finally LR(1) closure of every annotated kernel.
    pub fn build(grammar: &Grammar) -> Result<Self> {
        let lr0 = crate::automaton::LRAutomaton::build(grammar)?;

        let mut generated: HashMap<ItemAddress, HashSet<Terminal>> = HashMap::new();
        let mut propagations: HashMap<ItemAddress, HashSet<ItemAddress>> = HashMap::new();

        for (state_id, state) in lr0.states().iter().enumerate() {
            for kernel_item in state.kernel() {
                for (item, lookahead) in sentinel_closure(grammar, kernel_item) {
                    let Some(next_symbol) = item.next_symbol() else {
                        continue;
                    };
                    let target_state = lr0
                        .transition(state_id, next_symbol)
                        .expect("closure items always have a recorded transition");
                    let target_item = item.advance();

                    match lookahead {
                        Lookahead::Sentinel => {
                            propagations
                                .entry((state_id, kernel_item.clone()))
                                .or_default()
                                .insert((target_state, target_item));
                        }
                        Lookahead::Terminal(terminal) => {
                            generated
                                .entry((target_state, target_item))
                                .or_default()
                                .insert(terminal);
                        }
                    }
                }
            }
        }

        debug!(
            "lookahead discovery: {} generation sites, {} propagation sources",
            generated.len(),
            propagations.len()
        );

        // The spontaneously generated lookaheads seed the per-item sets; the
        // start item additionally receives the end-of-input terminal.
        let mut lookaheads = generated;
        let start_item = lr0
            .state(lr0.start())
            .kernel()
            .iter()
            .next()
            .expect("start state has the start item as its kernel")
            .clone();
        lookaheads
            .entry((lr0.start(), start_item))
            .or_default()
            .insert(Terminal::end_of_input());

        let mut rounds = 0;
        let mut changed = true;
        while changed {
            changed = false;
            rounds += 1;

            for (source, targets) in &propagations {
                let Some(source_lookaheads) = lookaheads.get(source).cloned() else {
                    continue;
                };
                for target in targets {
                    let entry = lookaheads.entry(target.clone()).or_default();
                    let before = entry.len();
                    entry.extend(source_lookaheads.iter().cloned());
                    changed |= entry.len() > before;
                }
            }
        }

        debug!("lookahead propagation reached a fixed point after {} rounds", rounds);

        let states: Vec<LR1Set> = lr0
            .states()
            .iter()
            .enumerate()
            .map(|(state_id, state)| {
                let kernel = state.kernel().iter().flat_map(|item| {
                    lookaheads
                        .get(&(state_id, item.clone()))
                        .into_iter()
                        .flatten()
                        .map(|terminal| item.with_lookahead(terminal.clone()))
                });
                LRSet::new(kernel).closure(grammar)
            })
            .collect();

        let transitions = lr0
            .transitions()
            .map(|(from, symbol, to)| ((from, symbol.clone()), to))
            .collect();

        Ok(Self {
            grammar: grammar.clone(),
            states,
            start: lr0.start(),
            transitions,
        })
    }

    pub fn states(&self) -> &[LR1Set] {
        &self.states
    }

    pub fn state(&self, id: usize) -> &LR1Set {
        &self.states[id]
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn transition(&self, state: usize, symbol: &Symbol) -> Option<usize> {
        self.transitions.get(&(state, symbol.clone())).copied()
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Assembles the SHIFT/REDUCE/ACCEPT/GOTO table.
    ///
    /// Complete items become reductions keyed by their lookahead, except the
    /// start production's item, which accepts. Transitions become shifts on
    /// terminals and gotos on nonterminals. Any cell written twice with
    /// differing actions aborts construction.
    pub fn parsing_table(&self) -> Result<ParsingTable> {
        let mut table = ParsingTable::new();

        for (state_id, state) in self.states.iter().enumerate() {
            for item in state.iter() {
                if !item.complete() {
                    continue;
                }
                if item.production().nonterminal() == self.grammar.start_symbol() {
                    table.set_action(state_id, item.lookahead().clone(), Action::Accept)?;
                } else {
                    table.set_action(
                        state_id,
                        item.lookahead().clone(),
                        Action::Reduce(item.production().clone()),
                    )?;
                }
            }
        }

        for ((from, symbol), to) in &self.transitions {
            match symbol {
                Symbol::Terminal(terminal) => {
                    table.set_action(*from, terminal.clone(), Action::Shift(*to))?;
                }
                Symbol::Nonterminal(nonterminal) => {
                    table.set_goto(*from, nonterminal.clone(), *to);
                }
            }
        }

        debug!(
            "parsing table: {} action cells, {} goto cells",
            table.action_count(),
            table.goto_count()
        );

        Ok(table)
    }
}

/// LR(1) closure of `[kernel_item, Sentinel]`.
///
/// Same traversal as [`LR1Set::closure`], but lookaheads range over the
/// sentinel-extended alphabet: when the tail past the dot is nullable the
/// parent's lookahead is inherited, sentinel included.
fn sentinel_closure(
    grammar: &Grammar,
    kernel_item: &LRItem,
) -> HashSet<(LRItem, Lookahead)> {
    let mut items: HashSet<(LRItem, Lookahead)> = HashSet::new();
    items.insert((kernel_item.clone(), Lookahead::Sentinel));

    let mut changed = true;
    while changed {
        changed = false;
        let current: Vec<_> = items.iter().cloned().collect();

        for (item, lookahead) in current {
            let Some(Symbol::Nonterminal(nonterminal)) = item.next_symbol() else {
                continue;
            };

            let first_beta = grammar.first_of_chain(&item.tail()[1..]);
            let mut lookaheads: Vec<Lookahead> = first_beta
                .iter()
                .cloned()
                .map(Lookahead::Terminal)
                .collect();
            if first_beta.nullable() {
                lookaheads.push(lookahead.clone());
            }

            for line in grammar.production(nonterminal).lines() {
                for lookahead in &lookaheads {
                    let implied = (LRItem::start(line.clone()), lookahead.clone());
                    if items.insert(implied) {
                        changed = true;
                    }
                }
            }
        }
    }

    items
}
