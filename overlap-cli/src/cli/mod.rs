//! Command-line interface orchestration for sorted intersection counting.
//!
//! `count` compares two inline sets; `batch` compares one inline query
//! against a file of candidate sets, one per line.

mod commands;
mod input;

pub use commands::{
    BatchCommand, Cli, CliError, Command, CountCommand, ExecutionSummary, OrderArgs, StrategyArg,
    render_summary, run_cli,
};
pub use input::{KeySet, ParseSetError};

#[cfg(test)]
mod tests;
