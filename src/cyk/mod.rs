/*
    This module recognizes strings with the CYK algorithm and rebuilds
    their parse trees
*/

mod chart;
mod tree;

pub use chart::Chart;
pub use tree::ParseTree;

use crate::grammar::Grammar;

/// Fills the table for `input` without committing to a start symbol.
pub fn build_chart<'g>(input: &str, grammar: &'g Grammar) -> Chart<'g> {
    Chart::build(input, grammar)
}

/// A parse tree of `input` rooted at the grammar's start symbol, or `None`
/// when the input isn't in the language. The empty string is never derivable.
///
/// When the input is ambiguous the tree returned is the first one found:
/// rules are tried in grammar order and split points from left to right.
pub fn parse(input: &str, grammar: &Grammar) -> Option<ParseTree> {
    build_chart(input, grammar).tree_for(&grammar.start_symbol)
}
