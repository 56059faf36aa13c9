//! Shared record types for the integration tests.

#![allow(dead_code)]

use algolab_fixture::{
    BasicProblem, ColumnError, ProblemRecord, ProblemSetHeader, RecordAdapter, TableAdapter,
    add_default_problem_columns, add_default_problem_set_columns, field,
};

pub const EXAMPLE: &str = "\
problem_set_number: 1005230
problems: 3
data:
 - problem: 1
   left: [1,3,0,5,3,5,6,8]
   right: [2,4,6,7,9,10,11,12]
   correct_answer: 4
 - problem: 2
   left: [0,2,1]
   right: [2,4,3]
   correct_answer: 2
 - problem: 3
   left: []
   right: []
   correct_answer: 0
   msg: \"no jobs at all\"
";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Intervals {
    pub basic: BasicProblem,
    pub left: Vec<i32>,
    pub right: Vec<i32>,
}

impl ProblemRecord for Intervals {
    fn basic(&self) -> &BasicProblem {
        &self.basic
    }

    fn basic_mut(&mut self) -> &mut BasicProblem {
        &mut self.basic
    }
}

pub fn interval_columns(table: &mut TableAdapter<'_, Intervals>) -> Result<(), ColumnError> {
    table.add_named_column("left", field!(Intervals, left))?;
    table.add_named_column("right", field!(Intervals, right))
}

pub fn header_table(header: &mut ProblemSetHeader) -> RecordAdapter<'_, ProblemSetHeader> {
    let mut table = RecordAdapter::new(header);
    add_default_problem_set_columns(&mut table).expect("header columns");
    table
}

pub fn problem_table(rows: &mut Vec<Intervals>) -> TableAdapter<'_, Intervals> {
    let mut table = TableAdapter::new(rows);
    add_default_problem_columns(&mut table).expect("problem columns");
    interval_columns(&mut table).expect("interval columns");
    table
}
