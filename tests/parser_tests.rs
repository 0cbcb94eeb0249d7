//! End-to-end tests for the table-driven parser

use lalr_parser::{
    augment_grammar, Grammar, LALRParser, Nonterminal, ParseError, ParseNode, Production, Symbol,
    Terminal, Token,
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

fn tok(tag: &str) -> Token {
    Token::new(Terminal::new(tag))
}

fn end() -> Token {
    Token::end_of_input()
}

fn leaf(tag: &str) -> ParseNode {
    ParseNode::leaf(Terminal::new(tag), "")
}

fn node(tag: &str, children: Vec<ParseNode>) -> ParseNode {
    ParseNode::node(Nonterminal::new(tag), children)
}

/// S -> E, E -> E + T | T, T -> T * F | F, F -> ( E ) | num
fn expression_grammar() -> Grammar {
    let s = Production::new(nt("S"), [vec![nts("E")]]).unwrap();
    let e = Production::new(
        nt("E"),
        [vec![nts("E"), ts("+"), nts("T")], vec![nts("T")]],
    )
    .unwrap();
    let t = Production::new(
        nt("T"),
        [vec![nts("T"), ts("*"), nts("F")], vec![nts("F")]],
    )
    .unwrap();
    let f = Production::new(
        nt("F"),
        [vec![ts("("), nts("E"), ts(")")], vec![ts("num")]],
    )
    .unwrap();
    Grammar::new([s, e, t, f], nt("S")).unwrap()
}

fn count_nodes_with_symbol(tree: &ParseNode, symbol: &Symbol) -> usize {
    let own = usize::from(&tree.symbol() == symbol);
    own + tree
        .children()
        .iter()
        .map(|child| count_nodes_with_symbol(child, symbol))
        .sum::<usize>()
}

#[test]
fn test_parses_a_single_terminal_to_a_leaf() {
    let s = Production::new(nt("S"), [vec![ts("a")]]).unwrap();
    let grammar = Grammar::new([s], nt("S")).unwrap();
    let parser = LALRParser::new(&grammar).unwrap();

    let tree = parser
        .parse([Token::with_value(Terminal::new("a"), "a"), end()])
        .unwrap();

    assert_eq!(tree, ParseNode::leaf(Terminal::new("a"), "a"));
}

#[test]
fn test_children_keep_left_to_right_order() {
    // S -> A, A -> a b
    let s = Production::new(nt("S"), [vec![nts("A")]]).unwrap();
    let a = Production::new(nt("A"), [vec![ts("a"), ts("b")]]).unwrap();
    let grammar = Grammar::new([s, a], nt("S")).unwrap();
    let parser = LALRParser::new(&grammar).unwrap();

    let tree = parser.parse([tok("a"), tok("b"), end()]).unwrap();
    assert_eq!(tree, node("A", vec![leaf("a"), leaf("b")]));
}

/// Scenario: number-list arithmetic with left recursion.
#[test]
fn test_parses_arithmetic_expression_into_the_expected_tree() {
    env_logger::try_init().ok();

    let parser = LALRParser::new(&expression_grammar()).unwrap();

    // ( num + num ) * num
    let tree = parser
        .parse([
            tok("("),
            tok("num"),
            tok("+"),
            tok("num"),
            tok(")"),
            tok("*"),
            tok("num"),
            end(),
        ])
        .unwrap();

    let inner_sum = node(
        "E",
        vec![
            node("E", vec![node("T", vec![node("F", vec![leaf("num")])])]),
            leaf("+"),
            node("T", vec![node("F", vec![leaf("num")])]),
        ],
    );
    let expected = node(
        "E",
        vec![node(
            "T",
            vec![
                node(
                    "T",
                    vec![node("F", vec![leaf("("), inner_sum, leaf(")")])],
                ),
                leaf("*"),
                node("F", vec![leaf("num")]),
            ],
        )],
    );

    assert_eq!(tree, expected);
}

#[test]
fn test_fringe_of_accepted_tree_equals_the_input() {
    let parser = LALRParser::new(&expression_grammar()).unwrap();
    let input = ["(", "num", "+", "num", ")", "*", "num"];

    let tree = parser
        .parse(input.iter().map(|tag| tok(tag)).chain([end()]))
        .unwrap();

    let fringe: Vec<&str> = tree
        .terminal_fringe()
        .iter()
        .map(|terminal| terminal.tag())
        .collect();
    assert_eq!(fringe, input);
}

/// Scenario: nullable production.
#[test]
fn test_parses_the_empty_input_through_a_nullable_production() {
    // S -> A, A -> a | ε
    let s = Production::new(nt("S"), [vec![nts("A")]]).unwrap();
    let a = Production::new(nt("A"), [vec![ts("a")], vec![]]).unwrap();
    let grammar = Grammar::new([s, a], nt("S")).unwrap();
    let parser = LALRParser::new(&grammar).unwrap();

    let empty = parser.parse([end()]).unwrap();
    assert_eq!(empty, node("A", vec![]));

    let nonempty = parser.parse([tok("a"), end()]).unwrap();
    assert_eq!(nonempty, node("A", vec![leaf("a")]));
}

/// Scenario: balanced parentheses.
#[test]
fn test_parses_balanced_parentheses() {
    // S -> L, L -> L P | P, P -> ( L ) | ( )
    let s = Production::new(nt("S"), [vec![nts("L")]]).unwrap();
    let l = Production::new(nt("L"), [vec![nts("L"), nts("P")], vec![nts("P")]]).unwrap();
    let p = Production::new(
        nt("P"),
        [vec![ts("("), nts("L"), ts(")")], vec![ts("("), ts(")")]],
    )
    .unwrap();
    let grammar = Grammar::new([s, l, p], nt("S")).unwrap();
    let parser = LALRParser::new(&grammar).unwrap();

    let input = ["(", "(", ")", "(", ")", ")"];
    let tree = parser
        .parse(input.iter().map(|tag| tok(tag)).chain([end()]))
        .unwrap();

    assert_eq!(count_nodes_with_symbol(&tree, &nts("P")), 3);
    let fringe: Vec<&str> = tree
        .terminal_fringe()
        .iter()
        .map(|terminal| terminal.tag())
        .collect();
    assert_eq!(fringe, input);
}

/// Scenario: rejecting an input with a missing operand.
#[test]
fn test_rejects_a_truncated_expression() {
    let parser = LALRParser::new(&expression_grammar()).unwrap();

    let result = parser.parse([tok("num"), tok("+"), end()]);
    assert_eq!(
        result,
        Err(ParseError::UnexpectedToken {
            token: end(),
            position: 2,
        })
    );
}

/// Scenario: the c/d grammar.
#[test]
fn test_cd_grammar_accepts_and_rejects() {
    let sp = Production::new(nt("S'"), [vec![nts("S")]]).unwrap();
    let s = Production::new(nt("S"), [vec![nts("C"), nts("C")]]).unwrap();
    let c = Production::new(nt("C"), [vec![ts("c"), nts("C")], vec![ts("d")]]).unwrap();
    let grammar = Grammar::new([sp, s, c], nt("S'")).unwrap();
    let parser = LALRParser::new(&grammar).unwrap();

    let tree = parser.parse([tok("c"), tok("d"), tok("d"), end()]).unwrap();
    let expected = node(
        "S",
        vec![
            node("C", vec![leaf("c"), node("C", vec![leaf("d")])]),
            node("C", vec![leaf("d")]),
        ],
    );
    assert_eq!(tree, expected);

    let rejected = parser.parse([tok("c"), tok("c"), end()]);
    assert_eq!(
        rejected,
        Err(ParseError::UnexpectedToken {
            token: end(),
            position: 2,
        })
    );
}

#[test]
fn test_missing_end_of_input_token_fails() {
    let parser = LALRParser::new(&expression_grammar()).unwrap();

    assert_eq!(
        parser.parse([tok("num")]),
        Err(ParseError::NoEndOfInputToken)
    );
    assert_eq!(parser.parse([]), Err(ParseError::NoEndOfInputToken));
}

#[test]
fn test_token_payloads_survive_into_the_leaves() {
    let parser = LALRParser::new(&expression_grammar()).unwrap();

    let tree = parser
        .parse([Token::with_value(Terminal::new("num"), "42"), end()])
        .unwrap();

    let expected = node(
        "E",
        vec![node(
            "T",
            vec![node("F", vec![ParseNode::leaf(Terminal::new("num"), "42")])],
        )],
    );
    assert_eq!(tree, expected);
}

#[test]
fn test_a_parser_can_be_reused_across_parses() {
    let parser = LALRParser::new(&expression_grammar()).unwrap();

    // A failing parse must not poison the next one.
    assert!(parser.parse([tok("+"), end()]).is_err());

    let tree = parser.parse([tok("num"), end()]).unwrap();
    assert_eq!(
        tree,
        node(
            "E",
            vec![node("T", vec![node("F", vec![leaf("num")])])]
        )
    );
}

#[test]
fn test_augmented_wrapper_grammar_parses_like_the_explicit_one() {
    // E -> E + T | T, T -> num with start E is not augmented; wrapping it
    // yields the same trees the hand-written S -> E version produces.
    let e = Production::new(
        nt("E"),
        [vec![nts("E"), ts("+"), nts("T")], vec![nts("T")]],
    )
    .unwrap();
    let t = Production::new(nt("T"), [vec![ts("num")]]).unwrap();
    let grammar = Grammar::new([e, t], nt("E")).unwrap();

    let parser = LALRParser::new(&augment_grammar(&grammar).unwrap()).unwrap();
    let tree = parser
        .parse([tok("num"), tok("+"), tok("num"), end()])
        .unwrap();

    let expected = node(
        "E",
        vec![
            node("E", vec![node("T", vec![leaf("num")])]),
            leaf("+"),
            node("T", vec![leaf("num")]),
        ],
    );
    assert_eq!(tree, expected);
}

#[test]
fn test_unexpected_token_reports_the_offending_position() {
    let parser = LALRParser::new(&expression_grammar()).unwrap();

    let result = parser.parse([tok("num"), tok("num"), end()]);
    assert_eq!(
        result,
        Err(ParseError::UnexpectedToken {
            token: tok("num"),
            position: 1,
        })
    );
}
