/*
    Parses strings against grammars in Chomsky normal form with the CYK
    algorithm
*/

pub mod cli;
pub mod cyk;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
pub mod repl;
