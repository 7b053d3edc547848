/*
    This module is for storing and inspecting CNF grammars
*/

use std::fmt::Display;

use indexmap::IndexMap;

pub const DEFAULT_START: &str = "S";

// A single right hand side of a rule
#[derive(Debug, PartialEq, Clone)]
pub enum Alternative {
    // A -> a
    Terminal(char),
    // A -> BC
    Pair(char, char),
    // Anything that isn't CNF. Kept so the grammar reads back as written, but
    // never matched by the parser
    Unsupported(String),
}

impl Alternative {
    pub fn from_text(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), None, None) => Alternative::Terminal(a),
            (Some(b), Some(c), None) => Alternative::Pair(b, c),
            _ => Alternative::Unsupported(text.to_string()),
        }
    }
}

impl Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alternative::Terminal(a) => write!(f, "{}", a),
            Alternative::Pair(b, c) => write!(f, "{}{}", b, c),
            Alternative::Unsupported(text) => write!(f, "{}", text),
        }
    }
}

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    pub start_symbol: String,
    // Insertion order is the order the parser tries rules in
    pub rules: IndexMap<String, Rewrite>,
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar {
            start_symbol: DEFAULT_START.to_string(),
            rules: IndexMap::new(),
        }
    }
}

impl Grammar {
    /// Builds a grammar out of `(lhs, alternatives)` pairs written the way
    /// they would appear in a grammar file.
    pub fn from_rules<'a>(rules: impl IntoIterator<Item = (&'a str, Vec<&'a str>)>) -> Self {
        let mut grammar = Grammar::default();
        for (symbol, alternatives) in rules {
            grammar.add_rule(symbol, alternatives.into_iter().map(Alternative::from_text));
        }
        grammar
    }

    pub fn with_start(mut self, start_symbol: &str) -> Self {
        self.start_symbol = start_symbol.to_string();
        self
    }

    /// Appends alternatives to `symbol`, creating the rule if needed.
    pub fn add_rule(&mut self, symbol: &str, alternatives: impl IntoIterator<Item = Alternative>) {
        self.rules
            .entry(symbol.to_string())
            .or_default()
            .extend(alternatives);
    }

    /// Alternatives of `symbol`, empty if it is undefined.
    pub fn lookup(&self, symbol: &str) -> &[Alternative] {
        self.rules.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn terminal_alternatives<'a>(&'a self, symbol: &str) -> impl Iterator<Item = char> + 'a {
        self.lookup(symbol).iter().filter_map(|alternative| match alternative {
            Alternative::Terminal(a) => Some(*a),
            _ => None,
        })
    }

    pub fn binary_alternatives<'a>(&'a self, symbol: &str) -> impl Iterator<Item = (char, char)> + 'a {
        self.lookup(symbol).iter().filter_map(|alternative| match alternative {
            Alternative::Pair(b, c) => Some((*b, *c)),
            _ => None,
        })
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grammar:")?;
        for (symbol, rewrite) in &self.rules {
            for alternative in rewrite {
                writeln!(f, "{} -> {}", symbol, alternative)?;
            }
        }
        Ok(())
    }
}
