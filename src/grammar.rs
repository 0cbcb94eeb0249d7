//! Grammar data model: production lines, productions, and the grammar itself.
//!
//! A [`Grammar`] validates its productions and runs the FIRST/FOLLOW
//! analysis eagerly at construction, so everything downstream reads
//! immutable sets.

use crate::error::{GrammarError, Result};
use crate::first_follow::{
    compute_first_sets, compute_follow_sets, first_of_chain, FirstSet, FollowSet,
};
use crate::symbol::{Nonterminal, Symbol};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An ordered, possibly empty sequence of symbols: one right-hand side.
pub type Chain = Vec<Symbol>;

/// A single production rule `A -> α`: one nonterminal paired with one chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductionLine {
    nonterminal: Nonterminal,
    derivation: Chain,
}

impl ProductionLine {
    pub fn new(nonterminal: Nonterminal, derivation: Chain) -> Self {
        Self {
            nonterminal,
            derivation,
        }
    }

    pub fn nonterminal(&self) -> &Nonterminal {
        &self.nonterminal
    }

    pub fn derivation(&self) -> &[Symbol] {
        &self.derivation
    }
}

impl fmt::Display for ProductionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.nonterminal, format_chain(&self.derivation))
    }
}

fn format_chain(chain: &[Symbol]) -> String {
    if chain.is_empty() {
        return "ε".to_string();
    }
    chain
        .iter()
        .map(|symbol| symbol.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// All alternative derivations for one nonterminal.
///
/// Duplicate derivations are rejected, and at least one must exist. The
/// production is `nullable` when some derivation is the empty chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    nonterminal: Nonterminal,
    lines: Vec<ProductionLine>,
    nullable: bool,
}

impl Production {
    pub fn new(
        nonterminal: Nonterminal,
        derivations: impl IntoIterator<Item = Chain>,
    ) -> Result<Self> {
        let mut lines = Vec::new();
        let mut seen: HashSet<Chain> = HashSet::new();

        for derivation in derivations {
            if !seen.insert(derivation.clone()) {
                return Err(GrammarError::DuplicateDerivation(format!(
                    "{} -> {}",
                    nonterminal,
                    format_chain(&derivation)
                )));
            }
            lines.push(ProductionLine::new(nonterminal.clone(), derivation));
        }

        if lines.is_empty() {
            return Err(GrammarError::EmptyProduction(nonterminal.to_string()));
        }

        let nullable = lines.iter().any(|line| line.derivation().is_empty());

        Ok(Self {
            nonterminal,
            lines,
            nullable,
        })
    }

    pub fn nonterminal(&self) -> &Nonterminal {
        &self.nonterminal
    }

    pub fn lines(&self) -> &[ProductionLine] {
        &self.lines
    }

    /// Whether some derivation of this production is the empty chain.
    pub fn nullable(&self) -> bool {
        self.nullable
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let derivations = self
            .lines
            .iter()
            .map(|line| format_chain(line.derivation()))
            .collect::<Vec<_>>()
            .join(" | ");
        write!(f, "{} -> {}", self.nonterminal, derivations)
    }
}

/// A context-free grammar: productions uniquely keyed by their nonterminal,
/// plus a distinguished start symbol.
///
/// Construction validates that every referenced nonterminal has a production
/// and computes the FIRST and FOLLOW sets to their fixed points.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: HashMap<Nonterminal, Production>,
    start: Nonterminal,
    first_sets: HashMap<Nonterminal, FirstSet>,
    follow_sets: HashMap<Nonterminal, FollowSet>,
}

impl Grammar {
    pub fn new(
        productions: impl IntoIterator<Item = Production>,
        start: Nonterminal,
    ) -> Result<Self> {
        let mut keyed: HashMap<Nonterminal, Production> = HashMap::new();
        for production in productions {
            let nonterminal = production.nonterminal().clone();
            if keyed.insert(nonterminal.clone(), production).is_some() {
                return Err(GrammarError::DuplicateProduction(nonterminal.to_string()));
            }
        }

        for production in keyed.values() {
            for line in production.lines() {
                for symbol in line.derivation() {
                    if let Symbol::Nonterminal(nonterminal) = symbol {
                        if !keyed.contains_key(nonterminal) {
                            return Err(GrammarError::UndefinedNonterminal(
                                nonterminal.to_string(),
                            ));
                        }
                    }
                }
            }
        }

        if !keyed.contains_key(&start) {
            return Err(GrammarError::UndefinedNonterminal(start.to_string()));
        }

        let first_sets = compute_first_sets(&keyed);
        let follow_sets = compute_follow_sets(&keyed, &start, &first_sets);

        Ok(Self {
            productions: keyed,
            start,
            first_sets,
            follow_sets,
        })
    }

    pub fn start_symbol(&self) -> &Nonterminal {
        &self.start
    }

    /// The production for a nonterminal of this grammar.
    ///
    /// Every nonterminal of a constructed grammar has one; asking for a
    /// foreign nonterminal is a programmer error and panics.
    pub fn production(&self, nonterminal: &Nonterminal) -> &Production {
        &self.productions[nonterminal]
    }

    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        self.productions.values()
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &Nonterminal> {
        self.productions.keys()
    }

    /// All production lines of the grammar, across every production.
    pub fn lines(&self) -> impl Iterator<Item = &ProductionLine> {
        self.productions.values().flat_map(|production| production.lines().iter())
    }

    pub fn first(&self, nonterminal: &Nonterminal) -> &FirstSet {
        &self.first_sets[nonterminal]
    }

    /// FIRST of an arbitrary chain over this grammar's symbols.
    pub fn first_of_chain(&self, chain: &[Symbol]) -> FirstSet {
        first_of_chain(chain, &self.first_sets)
    }

    pub fn follow(&self, nonterminal: &Nonterminal) -> &FollowSet {
        &self.follow_sets[nonterminal]
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut productions: Vec<_> = self.productions.values().collect();
        productions.sort_by(|a, b| a.nonterminal().cmp(b.nonterminal()));
        for production in productions {
            writeln!(f, "{}", production)?;
        }
        Ok(())
    }
}

/// Wraps a grammar with a fresh start production `S' -> S`.
///
/// The new start symbol reuses the old tag with a `__` prefix and appears on
/// no right-hand side, which is exactly the shape the automaton builder
/// requires.
pub fn augment_grammar(grammar: &Grammar) -> Result<Grammar> {
    let start = grammar.start_symbol().clone();
    let augmented_start = Nonterminal::new(format!("__{}", start.tag()));
    let start_production = Production::new(
        augmented_start.clone(),
        [vec![Symbol::Nonterminal(start)]],
    )?;

    let productions = grammar
        .productions()
        .cloned()
        .chain(std::iter::once(start_production));
    Grammar::new(productions, augmented_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Terminal;

    fn nt(tag: &str) -> Nonterminal {
        Nonterminal::new(tag)
    }

    fn t(tag: &str) -> Symbol {
        Symbol::Terminal(Terminal::new(tag))
    }

    #[test]
    fn test_production_nullable_with_empty_derivation() {
        let production = Production::new(nt("A"), [vec![t("a")], vec![]]).unwrap();
        assert!(production.nullable());
    }

    #[test]
    fn test_production_without_empty_derivation_is_not_nullable() {
        let production = Production::new(nt("A"), [vec![t("a")]]).unwrap();
        assert!(!production.nullable());
    }

    #[test]
    fn test_production_rejects_duplicate_derivations() {
        let result = Production::new(nt("A"), [vec![t("a")], vec![t("a")]]);
        assert!(matches!(result, Err(GrammarError::DuplicateDerivation(_))));
    }

    #[test]
    fn test_production_rejects_zero_derivations() {
        let result = Production::new(nt("A"), []);
        assert!(matches!(result, Err(GrammarError::EmptyProduction(_))));
    }

    #[test]
    fn test_grammar_rejects_undefined_nonterminal() {
        let production =
            Production::new(nt("S"), [vec![Symbol::Nonterminal(nt("A"))]]).unwrap();
        let result = Grammar::new([production], nt("S"));
        assert!(matches!(result, Err(GrammarError::UndefinedNonterminal(_))));
    }

    #[test]
    fn test_grammar_rejects_duplicate_productions() {
        let first = Production::new(nt("S"), [vec![t("a")]]).unwrap();
        let second = Production::new(nt("S"), [vec![t("b")]]).unwrap();
        let result = Grammar::new([first, second], nt("S"));
        assert!(matches!(result, Err(GrammarError::DuplicateProduction(_))));
    }

    #[test]
    fn test_augmented_start_is_fresh() {
        let production = Production::new(nt("S"), [vec![t("a")]]).unwrap();
        let grammar = Grammar::new([production], nt("S")).unwrap();
        let augmented = augment_grammar(&grammar).unwrap();

        assert_eq!(augmented.start_symbol(), &nt("__S"));
        let start_production = augmented.production(augmented.start_symbol());
        assert_eq!(start_production.lines().len(), 1);
    }
}
