//! Load, solve and check problem sets for each [`ProblemKind`].

use std::path::Path;

use algolab_fixture::{
    FixtureParser, ParseOptions, ProblemRecord, ProblemSet, ProblemSetHeader, RecordAdapter,
    Table, TableAdapter, WriteOptions, add_default_problem_columns,
    add_default_problem_set_columns, ensure_framework_version,
};
use anyhow::{Context, Result, anyhow};
use tracing::info_span;

use crate::problems::{
    GradedProblem, IndependentSetProblem, IntervalSchedulingProblem, PrizeCollectorProblem,
    ProblemKind, REQUIRED_FRAMEWORK_VERSION,
};
use crate::types::{CheckResult, RunRequest, RunResult};

/// Grade the algorithm for `request.kind` against the fixture at
/// `request.input`.
///
/// Mistakes are part of the result, not an error. Errors are reserved for
/// fixtures that cannot be graded: unreadable, malformed or inconsistent
/// input, and problems the algorithm rejects.
pub fn run_problem_set(request: &RunRequest) -> Result<RunResult> {
    ensure_framework_version(REQUIRED_FRAMEWORK_VERSION)
        .context("fixture framework version check")?;
    let problem_set = request
        .problem_set
        .or_else(|| request.kind.default_problem_set())
        .ok_or_else(|| {
            anyhow!(
                "{} has no built-in problem set number, pass --problem-set",
                request.kind
            )
        })?;

    let span = info_span!("run", kind = %request.kind, input = %request.input.display());
    let _guard = span.enter();
    match request.kind {
        ProblemKind::IntervalScheduling => {
            grade::<IntervalSchedulingProblem>(request, problem_set)
        }
        ProblemKind::IndependentSet => grade::<IndependentSetProblem>(request, problem_set),
        ProblemKind::PrizeCollector => grade::<PrizeCollectorProblem>(request, problem_set),
    }
}

fn grade<P: GradedProblem>(request: &RunRequest, problem_set: i32) -> Result<RunResult> {
    let input = &request.input;
    let mut set = ProblemSet::<P>::load(
        input,
        problem_set,
        &ParseOptions::new().strict(),
        P::add_columns,
    )
    .with_context(|| format!("load {}", input.display()))?;

    let report = set
        .try_solve(|problem| {
            problem
                .solve()
                .with_context(|| format!("problem #{} has invalid input", problem.basic().id))
        })?
        .clone();

    if let Some(path) = &request.results {
        let options = WriteOptions::new().with_default_values(request.full_output);
        set.write_results(path, &options)
            .with_context(|| format!("write results to {}", path.display()))?;
    }

    Ok(RunResult {
        kind: P::KIND,
        input: input.clone(),
        report,
        results: request.results.clone(),
    })
}

/// Parse the fixture leniently and summarize what was read.
///
/// A parse failure is reported in [`CheckResult::error`]; only column setup
/// problems are returned as errors.
pub fn check_fixture(kind: ProblemKind, input: &Path) -> Result<CheckResult> {
    match kind {
        ProblemKind::IntervalScheduling => check::<IntervalSchedulingProblem>(input),
        ProblemKind::IndependentSet => check::<IndependentSetProblem>(input),
        ProblemKind::PrizeCollector => check::<PrizeCollectorProblem>(input),
    }
}

fn check<P: GradedProblem>(input: &Path) -> Result<CheckResult> {
    let mut header = ProblemSetHeader::default();
    let mut problems: Vec<P> = Vec::new();
    let outcome = {
        let mut header_table = RecordAdapter::new(&mut header);
        add_default_problem_set_columns(&mut header_table)?;
        header_table.set_default_values(0);

        let mut problem_table = TableAdapter::new(&mut problems);
        add_default_problem_columns(&mut problem_table)?;
        P::add_columns(&mut problem_table)?;

        FixtureParser::new(&mut header_table, &mut problem_table)
            .parse_file(input, ParseOptions::new())?
    };

    Ok(CheckResult {
        kind: P::KIND,
        input: input.to_path_buf(),
        problem_set: header.id,
        declared_problems: header.problem_count,
        rows: problems.len(),
        lines: outcome.lines,
        error: outcome.last_error().map(ToString::to_string),
    })
}
