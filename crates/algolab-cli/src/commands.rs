use algolab_cli::grading::{check_fixture, run_problem_set};
use algolab_cli::types::{CheckResult, RunRequest, RunResult};
use anyhow::Result;

use crate::cli::{CheckArgs, RunArgs};

pub fn run_grading(args: &RunArgs) -> Result<RunResult> {
    let request = RunRequest {
        kind: args.kind.into(),
        input: args.input.clone(),
        problem_set: args.problem_set,
        results: args.results.clone(),
        full_output: args.full_output,
    };
    run_problem_set(&request)
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    check_fixture(args.kind.into(), &args.input)
}
