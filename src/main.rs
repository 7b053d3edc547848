use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cyk::cli::Cli;
use cyk::error_handling::report;
use cyk::grammar::Grammar;
use cyk::{generator, parser, repl};

fn generate_strings(grammar: &Grammar, cli: &Cli, amount: u32) -> ExitCode {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..amount {
        match generator::generate(grammar, &mut rng, &cli.file) {
            Ok(generated) => println!("{}", generated),
            Err(error) => {
                report(&[error]);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

// Parses every string given on the command line, failing if any is rejected
fn parse_inputs(grammar: &Grammar, cli: &Cli) -> std::io::Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    let mut all_derivable = true;
    for input in &cli.inputs {
        all_derivable &= repl::write_outcome(&mut stdout, grammar, input, cli.derivations)?;
    }
    Ok(if all_derivable { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn interactive(grammar: &Grammar, cli: &Cli) -> Result<(), rustyline::error::ReadlineError> {
    let mut stdout = std::io::stdout();
    if std::io::stdin().is_terminal() {
        let mut editor = rustyline::DefaultEditor::new()?;
        repl::run(grammar, &mut editor, &mut stdout, cli.derivations)
    } else {
        let mut source = repl::Piped {
            reader: std::io::stdin().lock(),
            prompts: std::io::stdout(),
        };
        repl::run(grammar, &mut source, &mut stdout, cli.derivations)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut grammar = match parser::parse_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            report(&errors);
            return ExitCode::FAILURE;
        }
    };
    if let Some(start) = &cli.start {
        grammar = grammar.with_start(start);
    }

    if let Some(amount) = cli.generate {
        return generate_strings(&grammar, &cli, amount);
    }

    if !cli.quiet {
        print!("{}", grammar);
    }

    if !cli.inputs.is_empty() {
        return match parse_inputs(&grammar, &cli) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Output error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    match interactive(&grammar, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Readline error: {}", e);
            ExitCode::FAILURE
        }
    }
}
