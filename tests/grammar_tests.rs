//! Tests for the grammar data model

use lalr_parser::{
    augment_grammar, Grammar, GrammarError, Nonterminal, Production, Symbol, Terminal,
};

fn nt(tag: &str) -> Nonterminal {
    Nonterminal::new(tag)
}

fn ts(tag: &str) -> Symbol {
    Symbol::Terminal(Terminal::new(tag))
}

fn nts(tag: &str) -> Symbol {
    Symbol::Nonterminal(Nonterminal::new(tag))
}

#[test]
fn test_grammar_keys_productions_by_nonterminal() {
    let s = Production::new(nt("S"), [vec![nts("A")]]).unwrap();
    let a = Production::new(nt("A"), [vec![ts("a")], vec![ts("b")]]).unwrap();
    let grammar = Grammar::new([s, a], nt("S")).unwrap();

    assert_eq!(grammar.production(&nt("A")).lines().len(), 2);
    assert_eq!(grammar.productions().count(), 2);
    assert_eq!(grammar.lines().count(), 3);
}

#[test]
fn test_grammar_rejects_right_hand_side_without_production() {
    let s = Production::new(nt("S"), [vec![nts("Missing")]]).unwrap();
    let result = Grammar::new([s], nt("S"));

    assert!(matches!(
        result,
        Err(GrammarError::UndefinedNonterminal(tag)) if tag == "Missing"
    ));
}

#[test]
fn test_grammar_rejects_start_symbol_without_production() {
    let a = Production::new(nt("A"), [vec![ts("a")]]).unwrap();
    let result = Grammar::new([a], nt("S"));

    assert!(matches!(result, Err(GrammarError::UndefinedNonterminal(_))));
}

#[test]
fn test_nullability_is_per_production() {
    let s = Production::new(nt("S"), [vec![nts("A"), nts("B")]]).unwrap();
    let a = Production::new(nt("A"), [vec![ts("a")], vec![]]).unwrap();
    let b = Production::new(nt("B"), [vec![ts("b")]]).unwrap();
    let grammar = Grammar::new([s, a, b], nt("S")).unwrap();

    assert!(grammar.production(&nt("A")).nullable());
    assert!(!grammar.production(&nt("B")).nullable());
    assert!(!grammar.production(&nt("S")).nullable());
}

#[test]
fn test_analysis_is_available_after_construction() {
    let s = Production::new(nt("S"), [vec![nts("A")]]).unwrap();
    let a = Production::new(nt("A"), [vec![ts("a")]]).unwrap();
    let grammar = Grammar::new([s, a], nt("S")).unwrap();

    // Both analyses run eagerly in the constructor.
    assert!(grammar.first(&nt("S")).contains(&Terminal::new("a")));
    assert!(grammar.follow(&nt("S")).ends_chain());
    assert!(grammar.follow(&nt("A")).ends_chain());
}

#[test]
fn test_augmenting_adds_a_single_start_production() {
    let e = Production::new(nt("E"), [vec![nts("E"), ts("+"), ts("n")], vec![ts("n")]]).unwrap();
    let grammar = Grammar::new([e], nt("E")).unwrap();
    let augmented = augment_grammar(&grammar).unwrap();

    assert_eq!(augmented.start_symbol(), &nt("__E"));
    assert_eq!(augmented.productions().count(), 2);

    let start_production = augmented.production(&nt("__E"));
    assert_eq!(start_production.lines().len(), 1);
    assert_eq!(start_production.lines()[0].derivation(), &[nts("E")]);
}

#[test]
fn test_production_line_display_uses_epsilon_for_empty_chains() {
    let a = Production::new(nt("A"), [vec![], vec![ts("a")]]).unwrap();
    let rendered = a.to_string();

    assert!(rendered.starts_with("A -> "));
    assert!(rendered.contains("ε"));
}
