//! The LALR(1) parsing table: ACTION entries over terminals and GOTO
//! entries over nonterminals.

use crate::error::{GrammarError, Result};
use crate::grammar::ProductionLine;
use crate::symbol::{Nonterminal, Terminal};
use std::collections::HashMap;
use std::fmt;

/// A productive table entry for a terminal.
///
/// Unrecorded terminal cells mean "error"; the table never stores that
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Consume the token and enter the target state.
    Shift(usize),
    /// Pop the production's right-hand side and re-enter via GOTO.
    Reduce(ProductionLine),
    /// The input is a sentence of the grammar.
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(target) => write!(f, "shift to state {}", target),
            Action::Reduce(production) => write!(f, "reduce by {}", production),
            Action::Accept => write!(f, "accept"),
        }
    }
}

/// Parsing table keyed by `(state, symbol)`.
///
/// ACTION and GOTO live in separate maps because their failure modes
/// differ: a missing terminal entry is a malformed input, a missing
/// nonterminal entry is a malformed table.
#[derive(Debug, Default)]
pub struct ParsingTable {
    actions: HashMap<(usize, Terminal), Action>,
    gotos: HashMap<(usize, Nonterminal), usize>,
}

impl ParsingTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records an action, failing on a differing existing entry.
    ///
    /// Writing the identical action twice is permitted and idempotent.
    pub(crate) fn set_action(
        &mut self,
        state: usize,
        terminal: Terminal,
        action: Action,
    ) -> Result<()> {
        match self.actions.get(&(state, terminal.clone())) {
            Some(existing) if *existing == action => Ok(()),
            Some(existing) => Err(GrammarError::Conflict {
                state,
                symbol: terminal.to_string(),
                existing: existing.to_string(),
                incoming: action.to_string(),
            }),
            None => {
                self.actions.insert((state, terminal), action);
                Ok(())
            }
        }
    }

    pub(crate) fn set_goto(&mut self, state: usize, nonterminal: Nonterminal, target: usize) {
        self.gotos.insert((state, nonterminal), target);
    }

    /// The action for a terminal, or `None` for an error cell.
    pub fn action(&self, state: usize, terminal: &Terminal) -> Option<&Action> {
        self.actions.get(&(state, terminal.clone()))
    }

    /// The GOTO target for a nonterminal.
    ///
    /// Every reduction's left-hand side has a recorded GOTO from the state
    /// uncovered by the pops; asking for anything else is a programmer error
    /// and panics.
    pub fn goto(&self, state: usize, nonterminal: &Nonterminal) -> usize {
        self.gotos[&(state, nonterminal.clone())]
    }

    pub fn actions(&self) -> impl Iterator<Item = (usize, &Terminal, &Action)> {
        self.actions
            .iter()
            .map(|((state, terminal), action)| (*state, terminal, action))
    }

    pub fn gotos(&self) -> impl Iterator<Item = (usize, &Nonterminal, usize)> {
        self.gotos
            .iter()
            .map(|((state, nonterminal), target)| (*state, nonterminal, *target))
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn goto_count(&self) -> usize {
        self.gotos.len()
    }
}
