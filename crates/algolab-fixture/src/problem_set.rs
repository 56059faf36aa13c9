//! Problem-set runner.
//!
//! Glue between a fixture file, a list of problem records and the function
//! under test: load and validate the fixture, run the solver on every
//! problem, collect the mistakes and write the results back.

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ColumnError, FixtureError, Result};
use crate::field::FieldAdapter;
use crate::options::{ParseOptions, WriteOptions};
use crate::parser::FixtureParser;
use crate::table::{RecordAdapter, Table, TableAdapter};
use crate::writer::write_table_to_file;

/// Sentinel used for unset integer columns.
pub const UNSET: i32 = -1;

/// Header record of a problem-set fixture.
#[derive(Debug, Clone)]
pub struct ProblemSetHeader {
    /// `problem_set_number`
    pub id: i32,
    /// `problems`
    pub problem_count: i32,
    /// `test_mistakes`
    pub test_mistakes: i32,
    /// `time`, elapsed milliseconds of the last run.
    pub time: i32,
    /// Wall-clock start of the last run.
    pub started_at: Option<DateTime<Utc>>,
    started: Option<Instant>,
}

impl Default for ProblemSetHeader {
    fn default() -> Self {
        Self {
            id: UNSET,
            problem_count: UNSET,
            test_mistakes: UNSET,
            time: UNSET,
            started_at: None,
            started: None,
        }
    }
}

impl ProblemSetHeader {
    /// Stamp the start of a run.
    pub fn start_clock(&mut self) {
        self.started_at = Some(Utc::now());
        self.started = Some(Instant::now());
    }

    /// Milliseconds since [`Self::start_clock`], rounded. Zero if never started.
    pub fn elapsed_ms(&self) -> i32 {
        self.started.map_or(0, |started| {
            let ms = (started.elapsed().as_secs_f64() * 1000.0).round();
            ms.min(f64::from(i32::MAX)) as i32
        })
    }
}

/// Columns shared by every problem record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicProblem {
    /// `problem`, the 1-based position in the fixture.
    pub id: i32,
    /// `correct_answer`
    pub correct_answer: i32,
    /// `student_answer`
    pub student_answer: i32,
    /// `msg`, an optional hint shown with a mistake.
    pub msg: String,
}

impl Default for BasicProblem {
    fn default() -> Self {
        Self {
            id: UNSET,
            correct_answer: UNSET,
            student_answer: UNSET,
            msg: String::new(),
        }
    }
}

/// A problem record: the shared columns plus algorithm-specific input.
pub trait ProblemRecord: Default {
    fn basic(&self) -> &BasicProblem;
    fn basic_mut(&mut self) -> &mut BasicProblem;
}

impl ProblemRecord for BasicProblem {
    fn basic(&self) -> &BasicProblem {
        self
    }

    fn basic_mut(&mut self) -> &mut BasicProblem {
        self
    }
}

/// Register `problem_set_number`, `problems`, `time` and `test_mistakes`.
pub fn add_default_problem_set_columns(
    header: &mut RecordAdapter<'_, ProblemSetHeader>,
) -> std::result::Result<(), ColumnError> {
    header.add_named_column(
        "problem_set_number",
        FieldAdapter::bind_with_default(
            |h: &ProblemSetHeader| &h.id,
            |h: &mut ProblemSetHeader| &mut h.id,
            UNSET,
        ),
    )?;
    header.add_named_column(
        "problems",
        FieldAdapter::bind_with_default(
            |h: &ProblemSetHeader| &h.problem_count,
            |h: &mut ProblemSetHeader| &mut h.problem_count,
            UNSET,
        ),
    )?;
    header.add_named_column(
        "time",
        FieldAdapter::bind_with_default(
            |h: &ProblemSetHeader| &h.time,
            |h: &mut ProblemSetHeader| &mut h.time,
            UNSET,
        ),
    )?;
    header.add_named_column(
        "test_mistakes",
        FieldAdapter::bind_with_default(
            |h: &ProblemSetHeader| &h.test_mistakes,
            |h: &mut ProblemSetHeader| &mut h.test_mistakes,
            UNSET,
        ),
    )
}

fn add_problem_id_column<T: ProblemRecord>(
    table: &mut TableAdapter<'_, T>,
) -> std::result::Result<(), ColumnError> {
    table.add_named_column(
        "problem",
        FieldAdapter::bind_with_default(
            |p: &T| &p.basic().id,
            |p: &mut T| &mut p.basic_mut().id,
            UNSET,
        ),
    )
}

/// Register the input columns `problem`, `correct_answer` and `msg`.
pub fn add_default_problem_columns<T: ProblemRecord>(
    table: &mut TableAdapter<'_, T>,
) -> std::result::Result<(), ColumnError> {
    add_problem_id_column(table)?;
    table.add_named_column(
        "correct_answer",
        FieldAdapter::bind_with_default(
            |p: &T| &p.basic().correct_answer,
            |p: &mut T| &mut p.basic_mut().correct_answer,
            UNSET,
        ),
    )?;
    table.add_named_column(
        "msg",
        FieldAdapter::bind(|p: &T| &p.basic().msg, |p: &mut T| &mut p.basic_mut().msg),
    )
}

/// Register the output columns `problem` and `student_answer`.
pub fn add_default_problem_columns_for_output<T: ProblemRecord>(
    table: &mut TableAdapter<'_, T>,
) -> std::result::Result<(), ColumnError> {
    add_problem_id_column(table)?;
    table.add_named_column(
        "student_answer",
        FieldAdapter::bind_with_default(
            |p: &T| &p.basic().student_answer,
            |p: &mut T| &mut p.basic_mut().student_answer,
            UNSET,
        ),
    )
}

/// Check that the fixture is the expected problem set and that header and
/// rows agree, then stamp the start time.
pub fn preprocess_problem_set<T: ProblemRecord>(
    expected_id: i32,
    problems: &[T],
    header: &mut ProblemSetHeader,
) -> Result<()> {
    if header.id != expected_id {
        return Err(FixtureError::WrongProblemSet {
            expected: expected_id,
            found: header.id,
        });
    }
    if usize::try_from(header.problem_count).ok() != Some(problems.len()) {
        return Err(FixtureError::corrupted(format!(
            "header declares {} problems but {} were read",
            header.problem_count,
            problems.len()
        )));
    }
    for (position, problem) in (1..).zip(problems) {
        let id = problem.basic().id;
        if id != position {
            return Err(FixtureError::corrupted(format!(
                "problem at position {position} has id {id}"
            )));
        }
    }

    header.start_clock();
    Ok(())
}

/// A problem whose produced answer differs from the expected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mistake {
    pub problem: i32,
    pub expected: i32,
    pub actual: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub msg: String,
}

/// Outcome of grading one problem set.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemSetReport {
    pub problem_set: i32,
    pub problems: usize,
    pub elapsed_ms: i32,
    pub started_at: Option<DateTime<Utc>>,
    pub mistakes: Vec<Mistake>,
}

impl ProblemSetReport {
    /// Number of mistakes.
    pub fn mistake_count(&self) -> usize {
        self.mistakes.len()
    }

    /// Whether every problem was answered correctly.
    pub fn is_perfect(&self) -> bool {
        self.mistakes.is_empty()
    }
}

/// Stop the clock, collect the mistakes, and store both in the header.
pub fn process_results<T: ProblemRecord>(
    problems: &[T],
    header: &mut ProblemSetHeader,
) -> ProblemSetReport {
    header.time = header.elapsed_ms();

    let mistakes: Vec<Mistake> = problems
        .iter()
        .map(T::basic)
        .filter(|p| p.student_answer != p.correct_answer)
        .map(|p| Mistake {
            problem: p.id,
            expected: p.correct_answer,
            actual: p.student_answer,
            msg: p.msg.clone(),
        })
        .collect();
    header.test_mistakes = i32::try_from(mistakes.len()).unwrap_or(i32::MAX);

    ProblemSetReport {
        problem_set: header.id,
        problems: problems.len(),
        elapsed_ms: header.time,
        started_at: header.started_at,
        mistakes,
    }
}

/// A loaded, validated problem set ready to be solved.
#[derive(Debug)]
pub struct ProblemSet<T> {
    source: PathBuf,
    header: ProblemSetHeader,
    problems: Vec<T>,
    report: Option<ProblemSetReport>,
}

impl<T: ProblemRecord> ProblemSet<T> {
    /// Parse the fixture at `path` and validate it against `expected_id`.
    ///
    /// `extra_columns` registers the algorithm-specific input columns on top
    /// of the defaults. A failure captured by a lenient parse is returned as
    /// an error too: a problem set is never graded on partial input.
    pub fn load<F>(
        path: &Path,
        expected_id: i32,
        options: &ParseOptions,
        extra_columns: F,
    ) -> Result<Self>
    where
        F: FnOnce(&mut TableAdapter<'_, T>) -> std::result::Result<(), ColumnError>,
    {
        let mut header = ProblemSetHeader::default();
        let mut problems = Vec::new();
        {
            let mut header_table = RecordAdapter::new(&mut header);
            add_default_problem_set_columns(&mut header_table)?;
            header_table.set_default_values(0);

            let mut problem_table = TableAdapter::new(&mut problems);
            add_default_problem_columns(&mut problem_table)?;
            extra_columns(&mut problem_table)?;

            let outcome = FixtureParser::new(&mut header_table, &mut problem_table)
                .parse_file(path, options.clone())?;
            if let Some(error) = outcome.error {
                return Err(error.into());
            }
        }

        preprocess_problem_set(expected_id, &problems, &mut header)?;
        info!(
            path = %path.display(),
            problem_set = header.id,
            problems = problems.len(),
            "problem set loaded"
        );

        Ok(Self {
            source: path.to_path_buf(),
            header,
            problems,
            report: None,
        })
    }

    /// Run `solver` on every problem, store the answers and grade them.
    pub fn solve<F>(&mut self, mut solver: F) -> &ProblemSetReport
    where
        F: FnMut(&T) -> i32,
    {
        match self.try_solve(|problem| Ok::<_, Infallible>(solver(problem))) {
            Ok(report) => report,
            Err(never) => match never {},
        }
    }

    /// Like [`Self::solve`], for solvers that can reject a problem.
    ///
    /// The first error stops the run; answers stored so far are kept.
    pub fn try_solve<F, E>(&mut self, mut solver: F) -> std::result::Result<&ProblemSetReport, E>
    where
        F: FnMut(&T) -> std::result::Result<i32, E>,
    {
        self.header.start_clock();
        for problem in &mut self.problems {
            let answer = solver(&*problem)?;
            problem.basic_mut().student_answer = answer;
        }

        let report = process_results(&self.problems, &mut self.header);
        info!(
            problem_set = report.problem_set,
            mistakes = report.mistake_count(),
            duration_ms = report.elapsed_ms,
            "problem set solved"
        );
        Ok(&*self.report.insert(report))
    }

    /// The grading report of the last run, if any.
    pub fn report(&self) -> Option<&ProblemSetReport> {
        self.report.as_ref()
    }

    /// Write the header and the `problem`/`student_answer` columns to `path`.
    pub fn write_results(&mut self, path: &Path, options: &WriteOptions) -> Result<()> {
        let mut header_table = RecordAdapter::new(&mut self.header);
        add_default_problem_set_columns(&mut header_table)?;
        let mut problem_table = TableAdapter::new(&mut self.problems);
        add_default_problem_columns_for_output(&mut problem_table)?;

        write_table_to_file(path, Some(&header_table), &problem_table, options)?;
        debug!(path = %path.display(), "results written");
        Ok(())
    }

    /// Path of the fixture the set was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn header(&self) -> &ProblemSetHeader {
        &self.header
    }

    pub fn problems(&self) -> &[T] {
        &self.problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problems(ids: &[i32]) -> Vec<BasicProblem> {
        ids.iter()
            .map(|&id| BasicProblem {
                id,
                correct_answer: id * 10,
                ..BasicProblem::default()
            })
            .collect()
    }

    fn make_header(id: i32, count: i32) -> ProblemSetHeader {
        ProblemSetHeader {
            id,
            problem_count: count,
            ..ProblemSetHeader::default()
        }
    }

    #[test]
    fn test_preprocess_accepts_consistent_input() {
        let mut header = make_header(42, 3);
        preprocess_problem_set(42, &problems(&[1, 2, 3]), &mut header).unwrap();
        assert!(header.started_at.is_some());
    }

    #[test]
    fn test_preprocess_rejects_wrong_set() {
        let mut header = make_header(41, 1);
        let err = preprocess_problem_set(42, &problems(&[1]), &mut header).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::WrongProblemSet {
                expected: 42,
                found: 41
            }
        ));
    }

    #[test]
    fn test_preprocess_rejects_count_mismatch() {
        let mut header = make_header(1, 2);
        let err = preprocess_problem_set(1, &problems(&[1, 2, 3]), &mut header).unwrap_err();
        assert!(matches!(err, FixtureError::CorruptedInput { .. }));

        let mut header = make_header(1, -1);
        assert!(preprocess_problem_set(1, &problems(&[]), &mut header).is_err());
    }

    #[test]
    fn test_preprocess_rejects_out_of_order_ids() {
        let mut header = make_header(1, 3);
        let err = preprocess_problem_set(1, &problems(&[1, 3, 2]), &mut header).unwrap_err();
        assert_eq!(
            err.to_string(),
            "input file is corrupted: problem at position 2 has id 3"
        );
    }

    #[test]
    fn test_process_results_counts_mistakes() {
        let mut rows = problems(&[1, 2, 3]);
        rows[0].student_answer = 10;
        rows[1].student_answer = 7;
        rows[1].msg = "off by one?".to_string();
        rows[2].student_answer = 30;

        let mut header = make_header(5, 3);
        header.start_clock();
        let report = process_results(&rows, &mut header);

        assert_eq!(report.mistake_count(), 1);
        assert_eq!(
            report.mistakes[0],
            Mistake {
                problem: 2,
                expected: 20,
                actual: 7,
                msg: "off by one?".to_string(),
            }
        );
        assert_eq!(header.test_mistakes, 1);
        assert!(header.time >= 0);
        assert_eq!(report.elapsed_ms, header.time);
    }

    #[test]
    fn test_elapsed_without_start_is_zero() {
        assert_eq!(ProblemSetHeader::default().elapsed_ms(), 0);
    }
}
