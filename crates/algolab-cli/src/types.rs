use std::path::PathBuf;

use algolab_fixture::ProblemSetReport;
use serde::Serialize;

use crate::problems::ProblemKind;

/// What to grade and where to put the results.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub kind: ProblemKind,
    pub input: PathBuf,
    /// Overrides the kind's built-in problem-set number.
    pub problem_set: Option<i32>,
    pub results: Option<PathBuf>,
    /// Write default-valued columns to the results file.
    pub full_output: bool,
}

#[derive(Debug, Serialize)]
pub struct RunResult {
    pub kind: ProblemKind,
    pub input: PathBuf,
    pub report: ProblemSetReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub kind: ProblemKind,
    pub input: PathBuf,
    pub problem_set: i32,
    pub declared_problems: i32,
    pub rows: usize,
    pub lines: usize,
    /// Error captured by the lenient parse, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        self.error.is_some()
    }
}
