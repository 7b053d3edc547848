/*
    This module reads strings to parse, one per line, until told to stop
*/

use std::io::{BufRead, Write};

use rustyline::error::ReadlineError;

use crate::cyk;
use crate::grammar::Grammar;

pub const PROMPT: &str = "Enter the string to parse (or type 'exit' to quit): ";
pub const EXIT_COMMAND: &str = "exit";

/// Somewhere lines of input come from.
pub trait LineSource {
    /// The next line without its line ending, `None` once input is over.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReadlineError>;
}

impl LineSource for rustyline::DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReadlineError> {
        match self.readline(prompt) {
            Ok(line) => {
                // Losing a history entry doesn't stop the session
                if let Err(e) = self.add_history_entry(&line) {
                    eprintln!("History error: {}", e);
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Lines from any reader, with prompts written to `prompts`. Used when input
/// is piped in rather than typed.
pub struct Piped<R: BufRead, W: Write> {
    pub reader: R,
    pub prompts: W,
}

impl<R: BufRead, W: Write> LineSource for Piped<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReadlineError> {
        write!(self.prompts, "{}", prompt)?;
        self.prompts.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

/// Parses `input` and writes either its tree or a failure message. Returns
/// whether the input was derivable.
pub fn write_outcome(out: &mut impl Write, grammar: &Grammar, input: &str, show_derivations: bool) -> std::io::Result<bool> {
    let chart = cyk::build_chart(input, grammar);

    match chart.tree_for(&grammar.start_symbol) {
        Some(tree) => {
            writeln!(out, "The string can be parsed by the grammar. \nParse Tree:")?;
            write!(out, "{}", tree)?;
            if show_derivations {
                writeln!(out, "Derivations: {}", chart.count_derivations(&grammar.start_symbol))?;
            }
            Ok(true)
        }
        None => {
            writeln!(out, "The string cannot be parsed by the grammar.")?;
            Ok(false)
        }
    }
}

/// Prompts for strings and reports on each until `exit` or end of input.
pub fn run(grammar: &Grammar, source: &mut impl LineSource, out: &mut impl Write, show_derivations: bool) -> Result<(), ReadlineError> {
    while let Some(line) = source.read_line(PROMPT)? {
        if is_exit(&line) {
            writeln!(out, "Exiting the program.")?;
            break;
        }
        write_outcome(out, grammar, &line, show_derivations)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn ab_grammar() -> Grammar {
        Grammar::from_rules([
            ("S", vec!["AB", "BA"]),
            ("A", vec!["a"]),
            ("B", vec!["b"]),
        ])
    }

    fn session(input: &str, show_derivations: bool) -> (String, String) {
        let mut source = Piped {
            reader: Cursor::new(input.to_string()),
            prompts: Vec::new(),
        };
        let mut out: Vec<u8> = Vec::new();
        run(&ab_grammar(), &mut source, &mut out, show_derivations).unwrap();
        (
            String::from_utf8(source.prompts).unwrap(),
            String::from_utf8(out).unwrap(),
        )
    }

    #[test]
    fn exit_command() {
        for word in ["exit", "EXIT", "Exit", "  exit  "] {
            assert!(is_exit(word));
        }
        assert!(!is_exit("exits"));
        assert!(!is_exit(""));
    }

    #[test]
    fn piped_strips_line_endings() {
        let mut source = Piped {
            reader: Cursor::new("ab\r\nba\nlast".to_string()),
            prompts: Vec::new(),
        };
        assert_eq!(source.read_line(">").unwrap(), Some("ab".to_string()));
        assert_eq!(source.read_line(">").unwrap(), Some("ba".to_string()));
        assert_eq!(source.read_line(">").unwrap(), Some("last".to_string()));
        assert_eq!(source.read_line(">").unwrap(), None);
        assert_eq!(source.prompts, b">>>>".to_vec());
    }

    #[test]
    fn session_until_exit() {
        let (prompts, out) = session("ab\naa\nExit\nba\n", false);

        assert_eq!(prompts, PROMPT.repeat(3));
        assert_eq!(out, [
            "The string can be parsed by the grammar. ",
            "Parse Tree:",
            "└── S",
            "    ├── A",
            "    │   └── a",
            "    └── B",
            "        └── b",
            "The string cannot be parsed by the grammar.",
            "Exiting the program.",
            "",
        ].join("\n"));
    }

    #[test]
    fn session_until_end_of_input() {
        let (prompts, out) = session("\nba", false);

        assert_eq!(prompts, PROMPT.repeat(3));
        assert!(out.starts_with("The string cannot be parsed by the grammar.\n"));
        assert!(out.contains("    ├── B\n"));
        assert!(!out.contains("Exiting"));
    }

    #[test]
    fn session_with_derivations() {
        let (_, out) = session("ab\n", true);
        assert!(out.ends_with("Derivations: 1\n"));
    }

    #[test]
    fn session_counts_ambiguous_derivations() {
        let grammar = Grammar::from_rules([("S", vec!["SS", "a"])]);
        let mut source = Piped {
            reader: Cursor::new("aaaa\n".to_string()),
            prompts: Vec::new(),
        };
        let mut out: Vec<u8> = Vec::new();
        run(&grammar, &mut source, &mut out, true).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("The string can be parsed by the grammar. \nParse Tree:\n└── S\n"));
        assert!(out.ends_with("Derivations: 5\n"));
    }

    #[test]
    fn outcome_reports_success() {
        let mut out: Vec<u8> = Vec::new();
        assert!(write_outcome(&mut out, &ab_grammar(), "ba", false).unwrap());
        assert!(!write_outcome(&mut out, &ab_grammar(), "abc", false).unwrap());
    }
}
