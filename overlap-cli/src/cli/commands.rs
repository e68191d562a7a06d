//! Command implementations and argument parsing for the overlap CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use overlap_core::{
    BatchCounterBuilder, DEFAULT_PARALLEL_THRESHOLD, ExecutionStrategy, OverlapError, SliceKind,
    SortedInputError, SortedSlice, sorted_intersection_count,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::input::{KeySet, ParseSetError};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "overlap",
    about = "Count shared elements between ascending-sorted integer sets."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Count the elements shared by two sets.
    Count(CountCommand),
    /// Count the elements a query shares with every set in a file.
    Batch(BatchCommand),
}

/// Ordering options shared by every command.
#[derive(Debug, Args, Clone, Copy, Default)]
pub struct OrderArgs {
    /// Sort every set before counting.
    #[arg(long)]
    pub sort: bool,

    /// Reject sets that are not ascending instead of trusting them.
    #[arg(long = "verify-order")]
    pub verify_order: bool,
}

/// Options accepted by the `count` command.
#[derive(Debug, Args, Clone)]
pub struct CountCommand {
    /// Comma-separated integers, e.g. `1,2,3`.
    #[arg(allow_hyphen_values = true)]
    pub left: KeySet,

    /// Comma-separated integers, e.g. `2,3,4`.
    #[arg(allow_hyphen_values = true)]
    pub right: KeySet,

    /// Ordering options.
    #[command(flatten)]
    pub order: OrderArgs,
}

/// Options accepted by the `batch` command.
#[derive(Debug, Args, Clone)]
pub struct BatchCommand {
    /// Comma-separated query integers.
    #[arg(allow_hyphen_values = true)]
    pub query: KeySet,

    /// File holding one comma-separated candidate set per line.
    pub candidates: PathBuf,

    /// How candidates are spread across threads.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Candidate count at which `auto` switches to parallel execution.
    #[arg(
        long = "parallel-threshold",
        default_value_t = DEFAULT_PARALLEL_THRESHOLD,
        value_parser = clap::value_parser!(usize),
    )]
    pub parallel_threshold: usize,

    /// Ordering options.
    #[command(flatten)]
    pub order: OrderArgs,
}

/// Execution strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel for large batches, sequential otherwise.
    Auto,
    /// Always score on the calling thread.
    Sequential,
    /// Always score on the thread pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading candidates.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A candidate line did not parse as an integer set.
    #[error("`{path}` line {line}: {source}")]
    Parse {
        /// File containing the malformed line.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Underlying parse failure.
        #[source]
        source: ParseSetError,
    },
    /// An inline set failed the ordering check.
    #[error(transparent)]
    Order(#[from] SortedInputError),
    /// A candidate set failed the ordering check.
    #[error("candidate {index}: {source}")]
    UnsortedCandidate {
        /// Zero-based candidate index.
        index: usize,
        /// Underlying ordering failure.
        #[source]
        source: SortedInputError,
    },
    /// Batch configuration or execution failed.
    #[error(transparent)]
    Core(#[from] OverlapError),
}

impl CliError {
    /// Returns the stable library error code behind this failure, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Order(err) | Self::UnsortedCandidate { source: err, .. } => {
                Some(err.code().as_str())
            }
            Self::Core(err) => Some(err.code().as_str()),
            Self::Io { .. } | Self::Parse { .. } => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionSummary {
    /// Result of `count`.
    Count {
        /// Number of shared elements.
        intersection: usize,
    },
    /// Result of `batch`, one count per candidate in file order.
    Batch {
        /// Shared element counts.
        counts: Vec<usize>,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, validation, or execution fails.
///
/// # Examples
/// ```
/// use overlap_cli::cli::{Cli, Command, CountCommand, ExecutionSummary, OrderArgs, run_cli};
///
/// let cli = Cli {
///     command: Command::Count(CountCommand {
///         left: "1,2,3".parse()?,
///         right: "2,3,4".parse()?,
///         order: OrderArgs::default(),
///     }),
/// };
/// assert_eq!(run_cli(cli)?, ExecutionSummary::Count { intersection: 2 });
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Count(count) => {
            Span::current().record("command", field::display("count"));
            run_count(count)
        }
        Command::Batch(batch) => {
            Span::current().record("command", field::display("batch"));
            run_batch(batch)
        }
    }
}

#[instrument(
    name = "cli.count",
    err,
    skip(command),
    fields(
        left_len = command.left.as_slice().len(),
        right_len = command.right.as_slice().len(),
        sort = command.order.sort,
        verify_order = command.order.verify_order,
    ),
)]
pub(super) fn run_count(command: CountCommand) -> Result<ExecutionSummary, CliError> {
    let CountCommand { left, right, order } = command;
    let xs = prepare(left, order, SliceKind::Left)?;
    let ys = prepare(right, order, SliceKind::Right)?;

    let intersection = sorted_intersection_count(&xs, &ys);
    info!(intersection, "count completed");
    Ok(ExecutionSummary::Count { intersection })
}

#[instrument(
    name = "cli.batch",
    err,
    skip(command),
    fields(
        query_len = command.query.as_slice().len(),
        candidates = field::Empty,
        strategy = ?command.strategy,
    ),
)]
pub(super) fn run_batch(command: BatchCommand) -> Result<ExecutionSummary, CliError> {
    let BatchCommand {
        query,
        candidates: path,
        strategy,
        parallel_threshold,
        order,
    } = command;

    let counter = BatchCounterBuilder::new()
        .with_execution_strategy(strategy.into())
        .with_parallel_threshold(parallel_threshold)
        .build()?;

    let query_keys = prepare(query, order, SliceKind::Left)?;
    let candidate_sets = read_candidates(&path)?
        .into_iter()
        .enumerate()
        .map(|(index, set)| {
            prepare(set, order, SliceKind::Right).map_err(|err| match err {
                CliError::Order(source) => CliError::UnsortedCandidate { index, source },
                other => other,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Span::current().record("candidates", candidate_sets.len());

    let counts = counter.count_all(&query_keys, &candidate_sets)?;
    info!(candidates = counts.len(), "batch completed");
    Ok(ExecutionSummary::Batch { counts })
}

/// Applies the requested ordering options to one set.
fn prepare(set: KeySet, order: OrderArgs, which: SliceKind) -> Result<Vec<i64>, CliError> {
    let mut values = set.into_inner();
    if order.sort {
        values.sort_unstable();
    }
    if order.verify_order {
        SortedSlice::new(&values, which)?;
    }
    Ok(values)
}

#[instrument(name = "cli.read_candidates", err, fields(path = %path.display()))]
pub(super) fn read_candidates(path: &Path) -> Result<Vec<KeySet>, CliError> {
    let io_error = |source: io::Error| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);

    reader
        .lines()
        .enumerate()
        .map(|(index, line)| {
            line.map_err(io_error)?
                .parse::<KeySet>()
                .map_err(|source| CliError::Parse {
                    path: path.to_path_buf(),
                    line: index + 1,
                    source,
                })
        })
        .collect()
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// `count` prints `intersection: <n>`; `batch` prints the candidate total
/// followed by one `<index>\t<count>` line per candidate.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use overlap_cli::cli::{ExecutionSummary, render_summary};
///
/// let mut buffer = Vec::new();
/// render_summary(&ExecutionSummary::Batch { counts: vec![2, 0] }, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "candidates: 2\n0\t2\n1\t0\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Count { intersection } => {
            writeln!(writer, "intersection: {intersection}")?;
        }
        ExecutionSummary::Batch { counts } => {
            writeln!(writer, "candidates: {}", counts.len())?;
            for (index, count) in counts.iter().enumerate() {
                writeln!(writer, "{index}\t{count}")?;
            }
        }
    }
    Ok(())
}
