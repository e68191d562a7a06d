//! Unit tests for the CLI commands and set parsing.

use super::commands::{read_candidates, run_batch, run_count};
use super::{
    BatchCommand, Cli, CliError, Command, CountCommand, ExecutionSummary, KeySet, OrderArgs,
    ParseSetError, StrategyArg, render_summary, run_cli,
};

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use overlap_core::{DEFAULT_PARALLEL_THRESHOLD, SliceKind, SortedInputError};
use rstest::rstest;
use tempfile::TempDir;
use tracing_subscriber::layer::SubscriberExt;

use overlap_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn set(raw: &str) -> KeySet {
    raw.parse().expect("test sets are well formed")
}

fn write_candidates(dir: &TempDir, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.path().join("candidates.txt");
    fs::write(&path, contents)?;
    Ok(path)
}

fn count(left: &str, right: &str, order: OrderArgs) -> CountCommand {
    CountCommand {
        left: set(left),
        right: set(right),
        order,
    }
}

fn batch(query: &str, path: &Path, strategy: StrategyArg, order: OrderArgs) -> BatchCommand {
    BatchCommand {
        query: set(query),
        candidates: path.to_path_buf(),
        strategy,
        parallel_threshold: 2,
        order,
    }
}

#[rstest]
#[case("", &[])]
#[case("  ", &[])]
#[case("7", &[7])]
#[case("1,2,3", &[1, 2, 3])]
#[case(" -4 , 0,9 ", &[-4, 0, 9])]
fn key_set_parses_comma_separated_integers(#[case] raw: &str, #[case] expected: &[i64]) {
    assert_eq!(set(raw).as_slice(), expected);
}

#[rstest]
#[case("1,x,3", 1, "x")]
#[case("1,,3", 1, "")]
#[case("99999999999999999999", 0, "99999999999999999999")]
fn key_set_rejects_invalid_tokens(
    #[case] raw: &str,
    #[case] position: usize,
    #[case] token: &str,
) {
    let err = raw.parse::<KeySet>().expect_err("token must fail");
    let ParseSetError::InvalidInteger {
        position: got_position,
        token: got_token,
        ..
    } = err;
    assert_eq!(got_position, position);
    assert_eq!(got_token, token);
}

#[rstest]
#[case("1,2,3", "2,3,4", 2)]
#[case("1,1,2", "1,2,2", 2)]
#[case("", "1,2", 0)]
#[case("-5,-1,3", "-1,3,8", 2)]
fn count_reports_intersection(#[case] left: &str, #[case] right: &str, #[case] expected: usize) {
    let summary = run_count(count(left, right, OrderArgs::default())).expect("count succeeds");
    assert_eq!(summary, ExecutionSummary::Count { intersection: expected });
}

#[test]
fn count_sorts_when_requested() {
    let order = OrderArgs {
        sort: true,
        verify_order: true,
    };
    let summary = run_count(count("3,1,2", "4,3,2", order)).expect("sorted input is valid");
    assert_eq!(summary, ExecutionSummary::Count { intersection: 2 });
}

#[test]
fn count_verifies_order_when_requested() {
    let order = OrderArgs {
        sort: false,
        verify_order: true,
    };
    let err = run_count(count("1,2", "5,4", order)).expect_err("right side is unsorted");
    assert!(matches!(
        err,
        CliError::Order(SortedInputError::NotAscending {
            which: SliceKind::Right,
            index: 1,
        })
    ));
    assert_eq!(err.code(), Some("SORTED_INPUT_NOT_ASCENDING"));
}

#[rstest]
#[case(StrategyArg::Sequential)]
#[case(StrategyArg::Auto)]
#[case(StrategyArg::Parallel)]
fn batch_counts_each_line(#[case] strategy: StrategyArg) -> TestResult {
    let dir = TempDir::new()?;
    let path = write_candidates(&dir, "1,2,3\n\n2,3,9\n-1,4\n")?;
    let summary = run_batch(batch("2,3,4", &path, strategy, OrderArgs::default()))?;
    assert_eq!(
        summary,
        ExecutionSummary::Batch {
            counts: vec![2, 0, 2, 1],
        }
    );
    Ok(())
}

#[test]
fn batch_reports_unsorted_candidate_index() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_candidates(&dir, "1,2\n3,2\n")?;
    let order = OrderArgs {
        sort: false,
        verify_order: true,
    };
    let err = run_batch(batch("1,2", &path, StrategyArg::Sequential, order))
        .expect_err("second candidate is unsorted");
    assert!(matches!(err, CliError::UnsortedCandidate { index: 1, .. }));
    Ok(())
}

#[test]
fn batch_rejects_zero_threshold() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_candidates(&dir, "1\n")?;
    let mut command = batch("1", &path, StrategyArg::Auto, OrderArgs::default());
    command.parallel_threshold = 0;
    let err = run_batch(command).expect_err("zero threshold is invalid");
    assert_eq!(err.code(), Some("OVERLAP_INVALID_PARALLEL_THRESHOLD"));
    Ok(())
}

#[test]
fn read_candidates_reports_line_numbers() -> TestResult {
    let dir = TempDir::new()?;
    let path = write_candidates(&dir, "1,2\n3,oops\n")?;
    let err = read_candidates(&path).expect_err("second line is malformed");
    match err {
        CliError::Parse { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn read_candidates_reports_missing_files() {
    let err = read_candidates(Path::new("/definitely/not/here.txt"))
        .expect_err("missing file must fail");
    assert!(matches!(err, CliError::Io { .. }));
    assert_eq!(err.code(), None);
}

#[test]
fn cli_parses_count_arguments() {
    let cli = Cli::try_parse_from(["overlap", "count", "-3,1", "1,2", "--verify-order"])
        .expect("arguments are valid");
    let Command::Count(command) = cli.command else {
        panic!("expected count command");
    };
    assert_eq!(command.left.as_slice(), &[-3, 1]);
    assert_eq!(command.right.as_slice(), &[1, 2]);
    assert!(command.order.verify_order);
    assert!(!command.order.sort);
}

#[test]
fn cli_parses_batch_defaults() {
    let cli = Cli::try_parse_from(["overlap", "batch", "1,2", "sets.txt"])
        .expect("arguments are valid");
    let Command::Batch(command) = cli.command else {
        panic!("expected batch command");
    };
    assert_eq!(command.strategy, StrategyArg::Auto);
    assert_eq!(command.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    assert_eq!(command.candidates, PathBuf::from("sets.txt"));
}

#[test]
fn cli_rejects_malformed_sets() {
    let err = Cli::try_parse_from(["overlap", "count", "1,a", "2"]).expect_err("`a` is invalid");
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn run_cli_records_command_span() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let cli = Cli {
        command: Command::Count(count("1,2", "2", OrderArgs::default())),
    };

    let summary = tracing::subscriber::with_default(subscriber, || run_cli(cli))
        .expect("count succeeds");
    assert_eq!(summary, ExecutionSummary::Count { intersection: 1 });

    let run_span = layer.span_named("cli.run").expect("cli.run span must exist");
    assert_eq!(run_span.fields.get("command"), Some(&"count".to_owned()));
    let count_span = layer
        .span_named("cli.count")
        .expect("cli.count span must exist");
    assert_eq!(count_span.fields.get("left_len"), Some(&"2".to_owned()));
    assert_eq!(count_span.fields.get("right_len"), Some(&"1".to_owned()));
}

#[rstest]
#[case(ExecutionSummary::Count { intersection: 3 }, "intersection: 3\n")]
#[case(ExecutionSummary::Batch { counts: vec![] }, "candidates: 0\n")]
#[case(ExecutionSummary::Batch { counts: vec![4, 1] }, "candidates: 2\n0\t4\n1\t1\n")]
fn render_summary_formats_output(#[case] summary: ExecutionSummary, #[case] expected: &str) {
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer).expect("writing to a vec succeeds");
    assert_eq!(String::from_utf8(buffer).expect("output is utf-8"), expected);
}
