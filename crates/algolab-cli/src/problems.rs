//! Problem kinds the grader knows: their record types, fixture columns and
//! the algorithm each one runs.

use std::fmt;

use algolab_algorithms::{independent_set, interval, prize_collector};
use algolab_fixture::{BasicProblem, ColumnError, ProblemRecord, TableAdapter, field};
use serde::Serialize;

/// Fixture framework version this grader is written against.
pub const REQUIRED_FRAMEWORK_VERSION: u32 = 110;

const _: () = assert!(
    REQUIRED_FRAMEWORK_VERSION == algolab_fixture::FRAMEWORK_VERSION,
    "algolab-fixture framework version does not match the grader"
);

/// Problem-set number of the bundled interval scheduling fixture.
pub const INTERVAL_SCHEDULING_SET: i32 = 1005230;

/// The supported problem kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    IntervalScheduling,
    IndependentSet,
    PrizeCollector,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 3] = [
        ProblemKind::IntervalScheduling,
        ProblemKind::IndependentSet,
        ProblemKind::PrizeCollector,
    ];

    /// Name used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IntervalScheduling => "interval-scheduling",
            Self::IndependentSet => "independent-set",
            Self::PrizeCollector => "prize-collector",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::IntervalScheduling => "Maximum number of compatible jobs on one machine",
            Self::IndependentSet => "Maximum-weight independent set on a line",
            Self::PrizeCollector => "Best right/down prize path across a square board",
        }
    }

    /// Problem-set number used when none is given.
    pub const fn default_problem_set(self) -> Option<i32> {
        match self {
            Self::IntervalScheduling => Some(INTERVAL_SCHEDULING_SET),
            Self::IndependentSet | Self::PrizeCollector => None,
        }
    }

    /// Algorithm-specific input columns, on top of `problem`,
    /// `correct_answer` and `msg`.
    pub const fn input_columns(self) -> &'static [&'static str] {
        match self {
            Self::IntervalScheduling => &["left", "right"],
            Self::IndependentSet => &["weights"],
            Self::PrizeCollector => &["prizes"],
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem record the grader can load and solve.
pub trait GradedProblem: ProblemRecord {
    const KIND: ProblemKind;

    /// Register the algorithm-specific input columns.
    fn add_columns(table: &mut TableAdapter<'_, Self>) -> Result<(), ColumnError>;

    /// Run the algorithm under test.
    fn solve(&self) -> algolab_algorithms::Result<i32>;
}

macro_rules! impl_problem_record {
    ($record:ty) => {
        impl ProblemRecord for $record {
            fn basic(&self) -> &BasicProblem {
                &self.basic
            }

            fn basic_mut(&mut self) -> &mut BasicProblem {
                &mut self.basic
            }
        }
    };
}

/// Jobs given as parallel start (`left`) and finish (`right`) arrays.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IntervalSchedulingProblem {
    pub basic: BasicProblem,
    pub left: Vec<i32>,
    pub right: Vec<i32>,
}

impl_problem_record!(IntervalSchedulingProblem);

impl GradedProblem for IntervalSchedulingProblem {
    const KIND: ProblemKind = ProblemKind::IntervalScheduling;

    fn add_columns(table: &mut TableAdapter<'_, Self>) -> Result<(), ColumnError> {
        table.add_named_column("left", field!(IntervalSchedulingProblem, left))?;
        table.add_named_column("right", field!(IntervalSchedulingProblem, right))
    }

    fn solve(&self) -> algolab_algorithms::Result<i32> {
        let jobs = interval::jobs_from_endpoints(&self.left, &self.right)?;
        Ok(interval::find_max_schedule(&jobs))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndependentSetProblem {
    pub basic: BasicProblem,
    pub weights: Vec<i32>,
}

impl_problem_record!(IndependentSetProblem);

impl GradedProblem for IndependentSetProblem {
    const KIND: ProblemKind = ProblemKind::IndependentSet;

    fn add_columns(table: &mut TableAdapter<'_, Self>) -> Result<(), ColumnError> {
        table.add_named_column("weights", field!(IndependentSetProblem, weights))
    }

    fn solve(&self) -> algolab_algorithms::Result<i32> {
        independent_set::bottom_up(&self.weights)
    }
}

/// A square board flattened row by row into `prizes`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PrizeCollectorProblem {
    pub basic: BasicProblem,
    pub prizes: Vec<i32>,
}

impl_problem_record!(PrizeCollectorProblem);

impl GradedProblem for PrizeCollectorProblem {
    const KIND: ProblemKind = ProblemKind::PrizeCollector;

    fn add_columns(table: &mut TableAdapter<'_, Self>) -> Result<(), ColumnError> {
        table.add_named_column("prizes", field!(PrizeCollectorProblem, prizes))
    }

    fn solve(&self) -> algolab_algorithms::Result<i32> {
        let board = prize_collector::board_from_flat(&self.prizes)?;
        prize_collector::bottom_up(&board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_names<P: GradedProblem>() -> Vec<String> {
        let mut rows: Vec<P> = Vec::new();
        let mut table = TableAdapter::new(&mut rows);
        P::add_columns(&mut table).unwrap();
        table.columns().names().map(str::to_string).collect()
    }

    #[test]
    fn test_input_columns_match_registration() {
        assert_eq!(
            column_names::<IntervalSchedulingProblem>(),
            ProblemKind::IntervalScheduling.input_columns()
        );
        assert_eq!(
            column_names::<IndependentSetProblem>(),
            ProblemKind::IndependentSet.input_columns()
        );
        assert_eq!(
            column_names::<PrizeCollectorProblem>(),
            ProblemKind::PrizeCollector.input_columns()
        );
    }

    #[test]
    fn test_solvers() {
        let problem = IntervalSchedulingProblem {
            left: vec![1, 3, 0, 5, 3, 5, 6, 8],
            right: vec![2, 4, 6, 7, 9, 10, 11, 12],
            ..Default::default()
        };
        assert_eq!(problem.solve(), Ok(4));

        let problem = IndependentSetProblem {
            weights: vec![100, 120, 21],
            ..Default::default()
        };
        assert_eq!(problem.solve(), Ok(121));

        let problem = PrizeCollectorProblem {
            prizes: vec![1, 3, 1, 1, 5, 1, 4, 2, 1],
            ..Default::default()
        };
        assert_eq!(problem.solve(), Ok(12));
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        let problem = PrizeCollectorProblem {
            prizes: vec![1, 2],
            ..Default::default()
        };
        assert!(problem.solve().is_err());

        let problem = IntervalSchedulingProblem {
            left: vec![1],
            ..Default::default()
        };
        assert!(problem.solve().is_err());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ProblemKind::PrizeCollector.to_string(), "prize-collector");
        assert_eq!(ProblemKind::IntervalScheduling.default_problem_set(), Some(1005230));
        assert_eq!(ProblemKind::IndependentSet.default_problem_set(), None);
    }
}
