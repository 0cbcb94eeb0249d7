//! Line-oriented front end for the parser generator.
//!
//! Input format: a first line with the number of productions, then one line
//! per production (`E -> E + T | T`, symbols separated by whitespace, `ε`
//! for the empty alternative). Symbols that occur as a left-hand side are
//! nonterminals, everything else is a terminal, and the first left-hand
//! side is the start symbol. Every following non-empty line is parsed as a
//! whitespace-separated terminal stream; the end-of-input token is appended
//! automatically.

use crate::automaton::is_augmented;
use crate::error::{GrammarError, Result};
use crate::grammar::{augment_grammar, Chain, Grammar, Production};
use crate::parser::LALRParser;
use crate::symbol::{Nonterminal, Symbol, Terminal};
use crate::token::Token;
use std::collections::HashSet;
use std::io::{self, BufRead};

/// Main CLI runner: compile the grammar from stdin, then parse token lines.
pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let grammar_lines = read_grammar(&mut lines)?;
    let grammar = parse_grammar(&grammar_lines)?;

    let grammar = if is_augmented(&grammar) {
        grammar
    } else {
        augment_grammar(&grammar)?
    };
    let parser = LALRParser::new(&grammar)?;

    while let Some(line) = lines.next() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }

        let tokens = tokenize(trimmed);
        match parser.parse(tokens) {
            Ok(tree) => print!("{}", tree),
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}

/// Reads the production count line and that many production lines.
fn read_grammar<R: BufRead>(lines: &mut io::Lines<R>) -> Result<Vec<String>> {
    let count_line = lines.next().ok_or(GrammarError::EmptyInput)??;
    let count = count_line
        .trim()
        .parse::<usize>()
        .map_err(|_| GrammarError::InvalidProduction(count_line.clone()))?;

    let mut grammar_lines = Vec::with_capacity(count);
    for read in 0..count {
        let line = lines.next().ok_or(GrammarError::NotEnoughProductions {
            expected: count,
            actual: read,
        })??;
        grammar_lines.push(line);
    }

    Ok(grammar_lines)
}

/// Builds a [`Grammar`] from production lines.
fn parse_grammar(lines: &[String]) -> Result<Grammar> {
    if lines.is_empty() {
        return Err(GrammarError::EmptyInput);
    }

    let mut raw: Vec<(String, Vec<Vec<String>>)> = Vec::new();
    for line in lines {
        let Some((lhs, rhs)) = line.split_once("->") else {
            return Err(GrammarError::InvalidProduction(line.clone()));
        };
        let lhs = lhs.trim();
        if lhs.is_empty() || lhs.split_whitespace().count() != 1 {
            return Err(GrammarError::InvalidProduction(line.clone()));
        }

        let alternatives = rhs
            .split('|')
            .map(|alternative| {
                alternative
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        raw.push((lhs.to_string(), alternatives));
    }

    let nonterminals: HashSet<&str> = raw.iter().map(|(lhs, _)| lhs.as_str()).collect();
    let start = Nonterminal::new(raw[0].0.clone());

    let mut productions = Vec::with_capacity(raw.len());
    for (lhs, alternatives) in &raw {
        let derivations: Vec<Chain> = alternatives
            .iter()
            .map(|alternative| {
                alternative
                    .iter()
                    .filter(|word| word.as_str() != "ε")
                    .map(|word| {
                        if nonterminals.contains(word.as_str()) {
                            Symbol::Nonterminal(Nonterminal::new(word.clone()))
                        } else {
                            Symbol::Terminal(Terminal::new(word.clone()))
                        }
                    })
                    .collect()
            })
            .collect();
        productions.push(Production::new(Nonterminal::new(lhs.clone()), derivations)?);
    }

    Grammar::new(productions, start)
}

/// Splits a line into terminal tokens and appends the end-of-input token.
fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = line
        .split_whitespace()
        .map(|word| Token::new(Terminal::new(word)))
        .collect();
    tokens.push(Token::end_of_input());
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grammar_classifies_symbols() {
        let lines = vec![
            "S -> E".to_string(),
            "E -> E + T | T".to_string(),
            "T -> num".to_string(),
        ];

        let grammar = parse_grammar(&lines).unwrap();
        assert_eq!(grammar.start_symbol(), &Nonterminal::new("S"));

        let e_production = grammar.production(&Nonterminal::new("E"));
        let first_line = &e_production.lines()[0];
        assert!(first_line.derivation()[0].is_nonterminal());
        assert!(first_line.derivation()[1].is_terminal());
    }

    #[test]
    fn test_parse_grammar_reads_epsilon_alternative() {
        let lines = vec!["S -> A".to_string(), "A -> a | ε".to_string()];

        let grammar = parse_grammar(&lines).unwrap();
        assert!(grammar.production(&Nonterminal::new("A")).nullable());
    }

    #[test]
    fn test_parse_grammar_rejects_missing_arrow() {
        let lines = vec!["S E".to_string()];
        assert!(matches!(
            parse_grammar(&lines),
            Err(GrammarError::InvalidProduction(_))
        ));
    }

    #[test]
    fn test_tokenize_appends_end_of_input() {
        let tokens = tokenize("num + num");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens.last().unwrap(), &Token::end_of_input());
    }
}
