/*
    This module generates random strings a grammar derives
*/

use rand::prelude::*;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

use crate::grammar::*;
use crate::error_handling::*;

// Past this depth only the alternatives closest to terminals are picked
const SOFT_DEPTH: usize = 12;
// Past this depth generation gives up
const MAX_DEPTH: usize = 128;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // A nonterminal has no CNF alternative to pick
    NoAlternatives(String),
    // The derivation kept growing without reaching terminals
    DepthExceeded(String),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::NoAlternatives(nonterminal) => write!(f, "Nonterminal `{}` has no alternative in Chomsky normal form", nonterminal),
            GenerateErrorType::DepthExceeded(nonterminal) => write!(f, "Gave up expanding `{}` after {} nested rules", nonterminal, MAX_DEPTH),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<String, GenerateError>;

// Fewest nested rules it takes each nonterminal to reach a terminal string.
// Nonterminals that never get there are missing
type Heights<'g> = HashMap<&'g str, usize>;

fn alternative_height(alternative: &Alternative, heights: &Heights) -> Option<usize> {
    match alternative {
        Alternative::Terminal(_) => Some(1),
        Alternative::Pair(b, c) => {
            let left = heights.get(b.to_string().as_str())?;
            let right = heights.get(c.to_string().as_str())?;
            Some(left.max(right) + 1)
        }
        Alternative::Unsupported(_) => None,
    }
}

fn min_heights(grammar: &Grammar) -> Heights<'_> {
    let mut heights = Heights::new();
    let mut changed = true;

    while changed {
        changed = false;
        for (symbol, rewrite) in &grammar.rules {
            let best = rewrite.iter()
                .filter_map(|alternative| alternative_height(alternative, &heights))
                .min();
            if let Some(best) = best {
                if heights.get(symbol.as_str()).map_or(true, |&current| best < current) {
                    heights.insert(symbol.as_str(), best);
                    changed = true;
                }
            }
        }
    }

    return heights;
}

struct Generator<'g, R: Rng + ?Sized> {
    grammar: &'g Grammar,
    heights: Heights<'g>,
    rng: &'g mut R,
}

impl<'g, R: Rng + ?Sized> Generator<'g, R> {
    fn generate_nonterminal(&mut self, nonterminal: &str, depth: usize, result: &mut String) -> Result<(), GenerateErrorType> {
        if depth > MAX_DEPTH {
            return Err(GenerateErrorType::DepthExceeded(nonterminal.to_string()));
        }

        let grammar = self.grammar;
        let rewrite = grammar.rules
            .get(nonterminal)
            .ok_or_else(|| GenerateErrorType::UndefinedNonterminal(nonterminal.to_string()))?;

        let mut candidates = rewrite.iter()
            .filter(|alternative| !matches!(alternative, Alternative::Unsupported(_)))
            .collect::<Vec<_>>();

        // Deep down, steer towards terminals so generation always finishes
        if depth >= SOFT_DEPTH {
            let shortest = candidates.iter()
                .filter_map(|alternative| alternative_height(alternative, &self.heights))
                .min();
            if shortest.is_some() {
                candidates.retain(|alternative| alternative_height(alternative, &self.heights) == shortest);
            }
        }

        let alternative = *candidates
            .choose(&mut *self.rng)
            .ok_or_else(|| GenerateErrorType::NoAlternatives(nonterminal.to_string()))?;

        match alternative {
            Alternative::Terminal(a) => result.push(*a),
            Alternative::Pair(b, c) => {
                self.generate_nonterminal(&b.to_string(), depth + 1, result)?;
                self.generate_nonterminal(&c.to_string(), depth + 1, result)?;
            }
            Alternative::Unsupported(_) => unreachable!("unsupported alternatives are filtered out"),
        }

        return Ok(());
    }
}

// Generates a string from the grammar's start symbol
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, file: &Path) -> GenResult {
    generate_with_override(grammar, &grammar.start_symbol, rng, file)
}

// Generates a string starting with the given symbol
pub fn generate_with_override<R: Rng + ?Sized>(grammar: &Grammar, start: &str, rng: &mut R, file: &Path) -> GenResult {
    let mut generator = Generator {
        grammar,
        heights: min_heights(grammar),
        rng,
    };

    let mut result = String::new();
    generator.generate_nonterminal(start, 0, &mut result)
        .map_err(|error| GenerateError {
            location: Location::whole_file(file),
            error
        })?;
    return Ok(result);
}
