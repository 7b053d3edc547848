use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Parses strings against a grammar in Chomsky normal form")]
pub struct Cli {
    /// File containing the grammar
    #[arg(default_value = "input.txt")]
    pub file: PathBuf,

    /// Start symbol (default: S)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// String to parse, may be repeated (default: read strings interactively)
    #[arg(short, long = "input", value_name = "STRING")]
    pub inputs: Vec<String>,

    /// Amount of random strings to generate instead of parsing
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub generate: Option<u32>,

    /// Seed for generating strings
    #[arg(long, value_name = "SEED", requires = "generate")]
    pub seed: Option<u64>,

    /// Don't print the grammar before parsing
    #[arg(short, long)]
    pub quiet: bool,

    /// Also report how many parse trees each string has
    #[arg(short, long)]
    pub derivations: bool
}
