use cyk::cyk::{build_chart, parse, ParseTree};
use cyk::grammar::Grammar;

fn swap_grammar() -> Grammar {
    Grammar::from_rules([
        ("S", vec!["AB", "BA"]),
        ("A", vec!["a"]),
        ("B", vec!["b"]),
    ])
}

#[test]
fn chart_answers_span_queries() {
    let grammar = swap_grammar();
    let chart = build_chart("ab", &grammar);

    assert_eq!(chart.len(), 2);
    assert_eq!(chart.symbols_at(0, 0), vec!["A"]);
    assert_eq!(chart.symbols_at(0, 1), vec!["S"]);
    assert!(chart.derives("S"));
    assert!(!chart.derives("A"));
}

#[test]
fn tree_spells_its_input() {
    let tree = parse("ba", &swap_grammar()).unwrap();

    assert_eq!(tree.symbol(), Some("S"));
    assert_eq!(tree.leaves().collect::<Vec<_>>(), vec!['b', 'a']);
    assert_eq!(tree.yield_string(), "ba");
    assert_eq!(tree, ParseTree::binary("S", ParseTree::unary("B", 'b'), ParseTree::unary("A", 'a')));
}
