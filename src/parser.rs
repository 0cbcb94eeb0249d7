//! The table-driven LALR(1) parser.
//!
//! A deterministic stack machine over two parallel stacks: automaton states
//! and parse-tree nodes. Each step consults the table with the top state
//! and the current token's terminal and either shifts, reduces, accepts, or
//! fails.

use crate::error::{ParseError, Result};
use crate::grammar::Grammar;
use crate::lalr::LALRAutomaton;
use crate::table::{Action, ParsingTable};
use crate::token::Token;
use crate::tree::ParseNode;

/// An LALR(1) parser compiled from a grammar.
///
/// Construction runs the whole generator pipeline; a built parser is
/// immutable and may be used for any number of parses.
#[derive(Debug)]
pub struct LALRParser {
    table: ParsingTable,
    start: usize,
}

impl LALRParser {
    /// Compiles a parser for an augmented grammar.
    ///
    /// Fails if the grammar is not augmented or if table construction hits
    /// a shift/reduce or reduce/reduce conflict. Grammars whose start symbol
    /// does not yet have the required shape can be wrapped with
    /// [`crate::grammar::augment_grammar`] first.
    pub fn new(grammar: &Grammar) -> Result<Self> {
        let automaton = LALRAutomaton::build(grammar)?;
        let table = automaton.parsing_table()?;
        Ok(Self {
            table,
            start: automaton.start(),
        })
    }

    /// Parses a token stream into a concrete parse tree.
    ///
    /// The stream must end with the end-of-input token. On success the
    /// returned tree's root is the node reduced for the start production's
    /// right-hand side; tokens without a payload become leaves with an
    /// empty-string value.
    pub fn parse(
        &self,
        tokens: impl IntoIterator<Item = Token>,
    ) -> std::result::Result<ParseNode, ParseError> {
        let mut tokens = tokens.into_iter();
        let mut states = vec![self.start];
        let mut nodes: Vec<ParseNode> = Vec::new();
        let mut position = 0;

        let mut token = tokens.next().ok_or(ParseError::NoEndOfInputToken)?;
        loop {
            let state = *states.last().unwrap();

            match self.table.action(state, token.terminal()) {
                Some(Action::Shift(target)) => {
                    states.push(*target);
                    nodes.push(ParseNode::leaf(
                        token.terminal().clone(),
                        token.value().unwrap_or_default(),
                    ));
                    token = tokens.next().ok_or(ParseError::NoEndOfInputToken)?;
                    position += 1;
                }
                Some(Action::Reduce(production)) => {
                    let production = production.clone();
                    let count = production.derivation().len();
                    let children = nodes.split_off(nodes.len() - count);
                    states.truncate(states.len() - count);

                    let uncovered = *states.last().unwrap();
                    let target = self.table.goto(uncovered, production.nonterminal());
                    states.push(target);
                    nodes.push(ParseNode::node(production.nonterminal().clone(), children));
                }
                Some(Action::Accept) => {
                    return Ok(nodes.pop().unwrap());
                }
                None => {
                    return Err(ParseError::UnexpectedToken { token, position });
                }
            }
        }
    }
}
