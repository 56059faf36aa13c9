//! Integration tests for the problem-set runner.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use algolab_fixture::{
    FixtureError, ParseOptions, ProblemSet, WriteOptions, add_default_problem_columns_for_output,
};
use common::{EXAMPLE, Intervals, interval_columns};
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("write fixture");
    path
}

fn load(path: &Path, expected_id: i32) -> algolab_fixture::Result<ProblemSet<Intervals>> {
    ProblemSet::load(path, expected_id, &ParseOptions::new().strict(), interval_columns)
}

/// Greedy earliest-finish schedule, good enough to grade the fixture.
fn schedule(problem: &Intervals) -> i32 {
    let mut jobs: Vec<(i32, i32)> = problem
        .left
        .iter()
        .copied()
        .zip(problem.right.iter().copied())
        .collect();
    jobs.sort_by_key(|&(_, finish)| finish);
    let mut last_finish = 0;
    let mut count = 0;
    for (start, finish) in jobs {
        if start >= last_finish {
            count += 1;
            last_finish = finish;
        }
    }
    count
}

#[test]
fn test_load_solve_and_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_fixture(&dir, "intervals.in", EXAMPLE);

    let mut set = load(&path, 1005230).expect("load");
    assert_eq!(set.problems().len(), 3);
    assert_eq!(set.header().problem_count, 3);
    assert!(set.report().is_none());

    let report = set.solve(schedule);
    assert_eq!(report.problems, 3);
    assert_eq!(report.problem_set, 1005230);
    assert!(report.is_perfect(), "unexpected mistakes: {:?}", report.mistakes);
    assert!(report.elapsed_ms >= 0);
    assert!(report.started_at.is_some());

    assert_eq!(set.header().test_mistakes, 0);
    assert_eq!(set.problems()[0].basic.student_answer, 4);
}

#[test]
fn test_mistakes_are_reported_with_message() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_fixture(&dir, "intervals.in", EXAMPLE);

    let mut set = load(&path, 1005230).expect("load");
    let report = set.solve(|problem| schedule(problem) + i32::from(problem.basic.id == 3));
    assert_eq!(report.mistake_count(), 1);
    let mistake = &report.mistakes[0];
    assert_eq!(mistake.problem, 3);
    assert_eq!(mistake.expected, 0);
    assert_eq!(mistake.actual, 1);
    assert_eq!(mistake.msg, "no jobs at all");

    let json = serde_json::to_value(set.report().expect("report")).expect("json");
    assert_eq!(json["mistakes"][0]["problem"], 3);
    assert_eq!(json["problems"], 3);
}

#[test]
fn test_try_solve_stops_on_first_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_fixture(&dir, "intervals.in", EXAMPLE);

    let mut set = load(&path, 1005230).expect("load");
    let result = set.try_solve(|problem| {
        if problem.basic.id == 2 {
            Err("bad input")
        } else {
            Ok(schedule(problem))
        }
    });
    assert_eq!(result.err(), Some("bad input"));
    assert!(set.report().is_none());
    assert_eq!(set.problems()[0].basic.student_answer, 4);
    assert_eq!(set.problems()[1].basic.student_answer, -1);
}

#[test]
fn test_wrong_problem_set_number() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_fixture(&dir, "intervals.in", EXAMPLE);

    let err = load(&path, 42).expect_err("wrong set");
    assert!(matches!(
        err,
        FixtureError::WrongProblemSet {
            expected: 42,
            found: 1005230
        }
    ));
}

#[test]
fn test_corrupted_counts_are_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let text = EXAMPLE.replace("problems: 3", "problems: 4");
    let path = write_fixture(&dir, "intervals.in", &text);
    let err = load(&path, 1005230).expect_err("count mismatch");
    assert!(matches!(err, FixtureError::CorruptedInput { .. }));

    let text = EXAMPLE.replace(" - problem: 2", " - problem: 5");
    let path = write_fixture(&dir, "ids.in", &text);
    let err = load(&path, 1005230).expect_err("id mismatch");
    assert!(err.to_string().contains("position 2"));
}

#[test]
fn test_lenient_failure_still_aborts_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_fixture(&dir, "bad.in", "problems: 1\ndata:\n - problem: 1\n   foo: 3\n");

    let err = ProblemSet::<Intervals>::load(&path, -1, &ParseOptions::new(), interval_columns)
        .expect_err("lenient failure");
    match err {
        FixtureError::Parse(parse) => assert_eq!(parse.line, 4),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_write_results() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_fixture(&dir, "intervals.in", EXAMPLE);
    let output = dir.path().join("intervals.out");

    let mut set = load(&input, 1005230).expect("load");
    set.solve(schedule);
    set.write_results(&output, &WriteOptions::new())
        .expect("write results");

    let text = fs::read_to_string(&output).expect("read results");
    assert!(text.starts_with("problem_set_number: 1005230\nproblems: 3\ntime: "));
    assert!(text.contains("test_mistakes: 0\n"));
    assert!(text.contains(" - problem: 1\n   student_answer: 4\n"));
    assert!(!text.contains("left:"));

    // The results file parses back with the output columns.
    let mut header = algolab_fixture::ProblemSetHeader::default();
    let mut rows: Vec<Intervals> = Vec::new();
    {
        let mut header_table = common::header_table(&mut header);
        let mut row_table = algolab_fixture::TableAdapter::new(&mut rows);
        add_default_problem_columns_for_output(&mut row_table).expect("columns");
        algolab_fixture::FixtureParser::new(&mut header_table, &mut row_table)
            .parse_file(&output, ParseOptions::new().strict())
            .expect("parse results");
    }
    assert_eq!(header.test_mistakes, 0);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].basic.student_answer, 0);
}
