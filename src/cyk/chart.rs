use crate::grammar::Grammar;

use super::tree::ParseTree;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Derivation {
    // A -> a over a single character
    Terminal(char),
    // A -> BC split after position k. `left` is a slot of cell (i, k) and
    // `right` a slot of cell (k + 1, j)
    Split { k: usize, left: usize, right: usize },
}

// Every derivation of one symbol over one span
#[derive(Debug)]
struct Slot {
    symbol: usize,
    // Never empty, a slot is created along with its first derivation
    derivations: Vec<Derivation>,
}

#[derive(Debug, Default)]
struct Cell {
    // In the order symbols were first derived
    slots: Vec<Slot>,
}

impl Cell {
    fn slot_of(&self, symbol: usize) -> Option<usize> {
        self.slots.iter().position(|slot| slot.symbol == symbol)
    }

    fn add(&mut self, symbol: usize, derivation: Derivation) {
        match self.slot_of(symbol) {
            Some(index) => self.slots[index].derivations.push(derivation),
            None => self.slots.push(Slot {
                symbol,
                derivations: vec![derivation],
            }),
        }
    }
}

// Rules with symbol names resolved to their position in the grammar
struct Rules {
    terminals: Vec<(usize, char)>,
    binaries: Vec<(usize, usize, usize)>,
}

fn symbol_index(grammar: &Grammar, symbol: char) -> Option<usize> {
    let mut buffer = [0; 4];
    let name: &str = symbol.encode_utf8(&mut buffer);
    grammar.rules.get_index_of(name)
}

impl Rules {
    fn compile(grammar: &Grammar) -> Self {
        let mut terminals = Vec::new();
        let mut binaries = Vec::new();

        for (lhs, symbol) in grammar.rules.keys().enumerate() {
            terminals.extend(grammar.terminal_alternatives(symbol).map(|a| (lhs, a)));
            // Pairs naming an undefined symbol can never match
            for (b, c) in grammar.binary_alternatives(symbol) {
                if let (Some(left), Some(right)) = (symbol_index(grammar, b), symbol_index(grammar, c)) {
                    binaries.push((lhs, left, right));
                }
            }
        }

        Rules { terminals, binaries }
    }
}

/// The filled CYK table for one input. Cells are stored flat, `(i, j)` at
/// `i * len + j`, and only `i <= j` is ever populated.
///
/// Each cell keeps every derivation of every symbol over its span, pointing
/// into the cells of the two shorter spans it was built from rather than
/// owning copies of them.
pub struct Chart<'g> {
    symbols: Vec<&'g str>,
    len: usize,
    cells: Vec<Cell>,
}

impl<'g> Chart<'g> {
    pub fn build(input: &str, grammar: &'g Grammar) -> Self {
        let input = input.chars().collect::<Vec<_>>();
        let n = input.len();
        let rules = Rules::compile(grammar);
        let at = |i: usize, j: usize| i * n + j;

        let mut cells = Vec::with_capacity(n * n);
        cells.resize_with(n * n, Cell::default);

        for (i, &c) in input.iter().enumerate() {
            let cell = &mut cells[at(i, i)];
            for &(lhs, a) in &rules.terminals {
                if a == c {
                    cell.add(lhs, Derivation::Terminal(c));
                }
            }
        }

        // Spans strictly by increasing length, each one only reads shorter spans
        for length in 2..=n {
            for i in 0..=n - length {
                let j = i + length - 1;
                let mut cell = Cell::default();

                for k in i..j {
                    let left_cell = &cells[at(i, k)];
                    let right_cell = &cells[at(k + 1, j)];
                    for &(lhs, b, c) in &rules.binaries {
                        if let (Some(left), Some(right)) = (left_cell.slot_of(b), right_cell.slot_of(c)) {
                            cell.add(lhs, Derivation::Split { k, left, right });
                        }
                    }
                }

                cells[at(i, j)] = cell;
            }
        }

        Chart {
            symbols: grammar.rules.keys().map(String::as_str).collect(),
            len: n,
            cells,
        }
    }

    /// Length of the input in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn cell(&self, i: usize, j: usize) -> &Cell {
        &self.cells[i * self.len + j]
    }

    fn symbol_id(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| *s == symbol)
    }

    // Slot of `symbol` in the cell spanning the whole input
    fn root_slot(&self, symbol: &str) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let id = self.symbol_id(symbol)?;
        self.cell(0, self.len - 1).slot_of(id)
    }

    /// Nonterminals deriving the characters `i..=j`, in the order they were
    /// found. Empty for spans outside the input.
    pub fn symbols_at(&self, i: usize, j: usize) -> Vec<&'g str> {
        if i > j || j >= self.len {
            return vec![];
        }
        self.cell(i, j)
            .slots
            .iter()
            .map(|slot| self.symbols[slot.symbol])
            .collect()
    }

    pub fn derives(&self, symbol: &str) -> bool {
        self.root_slot(symbol).is_some()
    }

    /// The first derivation of the whole input from `symbol`, if any.
    pub fn tree_for(&self, symbol: &str) -> Option<ParseTree> {
        let slot = self.root_slot(symbol)?;
        Some(self.tree_at(0, self.len - 1, slot))
    }

    fn tree_at(&self, i: usize, j: usize, slot: usize) -> ParseTree {
        let slot = &self.cell(i, j).slots[slot];
        let symbol = self.symbols[slot.symbol];
        match slot.derivations[0] {
            Derivation::Terminal(c) => ParseTree::unary(symbol, c),
            Derivation::Split { k, left, right } => ParseTree::binary(
                symbol,
                self.tree_at(i, k, left),
                self.tree_at(k + 1, j, right),
            ),
        }
    }

    /// Number of distinct parse trees of the whole input rooted at `symbol`.
    /// Saturates at `u128::MAX` for wildly ambiguous grammars.
    pub fn count_derivations(&self, symbol: &str) -> u128 {
        let Some(root) = self.root_slot(symbol) else {
            return 0;
        };

        let n = self.len;
        let mut counts: Vec<Vec<u128>> = vec![Vec::new(); n * n];
        for length in 1..=n {
            for i in 0..=n - length {
                let j = i + length - 1;
                let row: Vec<u128> = self.cell(i, j)
                    .slots
                    .iter()
                    .map(|slot| {
                        slot.derivations.iter().fold(0u128, |total, derivation| {
                            let ways = match *derivation {
                                Derivation::Terminal(_) => 1,
                                Derivation::Split { k, left, right } => counts[i * n + k][left]
                                    .saturating_mul(counts[(k + 1) * n + j][right]),
                            };
                            total.saturating_add(ways)
                        })
                    })
                    .collect();
                counts[i * n + j] = row;
            }
        }

        counts[n - 1][root]
    }
}
