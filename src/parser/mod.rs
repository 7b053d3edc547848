/*
    This module parses CNF grammar files
*/

mod lexer;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;

#[derive(Debug)]
pub enum CompileErrorType {
    // A rule line doesn't start with the symbol being defined
    MissingNonterminal,
    // A line which should contain a rule has no `->`
    MissingArrow,
    // A rule has more than one `->`
    UnexpectedArrow,
    // Nothing between two `|`, or nothing after `->`
    EmptyAlternative,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let CompileErrorType::FileError(a) = self {
            if let CompileErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingNonterminal => write!(f, "Expected a nonterminal before `{}`", ARROW),
            CompileErrorType::MissingArrow => write!(f, "Expected `{}` after nonterminal", ARROW),
            CompileErrorType::UnexpectedArrow => write!(f, "Unexpected `{}` encountered", ARROW),
            CompileErrorType::EmptyAlternative => write!(f, "Empty alternative"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: &Path) -> CompileError {
    CompileError {
        location: Location::whole_file(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    rewrite: Rewrite
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    match tokens {
        [Token::Text(text)] => Ok(Alternative::from_text(text)),
        [] => Err(CompileErrorType::EmptyAlternative),
        // A text token runs up to the next delimiter, so anything longer
        // must contain an arrow
        _ => Err(CompileErrorType::UnexpectedArrow),
    }
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token]) -> Result<Rule> {
    let symbol = match tokens.get(0) {
        Some(Token::Text(s)) => Ok(s.clone()),
        _ => Err(CompileErrorType::MissingNonterminal)
    }?;

    if tokens.get(1) != Some(&Token::Arrow) {
        return Err(CompileErrorType::MissingArrow)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    return Ok(Rule {
        symbol,
        rewrite
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(&lexer::lex_line(line))
        .map_err(|error| CompileError { location, error })
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with(';')
}

// Returns an iterator over the lines of a reader, with the io errors wrapped
// in CompileError and enumerated from 1
fn reader_line_nums<'a>(reader: impl BufRead + 'a, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path)))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn grammar_from_rules(rules: Vec<Rule>) -> Grammar {
    let mut grammar = Grammar::default();
    for rule in rules {
        grammar.add_rule(&rule.symbol, rule.rewrite);
    }
    return grammar;
}

/// Reads a grammar from any line source. `path` is only used to locate errors.
pub fn parse_reader(reader: impl BufRead, path: &Path) -> FileResult<Grammar> {
    let parsed_lines = reader_line_nums(reader, path).map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location::at_line(path, num)))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if errors.len() > 0 {
        return Err(errors);
    }

    return Ok(grammar_from_rules(rules));
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path)])?;
    parse_reader(std::io::BufReader::new(file), path)
}
