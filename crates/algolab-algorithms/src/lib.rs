//! Textbook algorithms graded against algolab fixtures.
//!
//! - [`interval`]: greedy interval scheduling on one machine
//! - [`independent_set`]: maximum-weight independent set on a line, bottom-up
//!   and top-down dynamic programming
//! - [`prize_collector`]: best right/down path through a square prize board,
//!   bottom-up and top-down dynamic programming
//!
//! Every algorithm returns a single `i32` answer, the unit the grader
//! compares against a fixture's `correct_answer`.

mod error;
pub mod independent_set;
pub mod interval;
pub mod prize_collector;

pub use error::{AlgorithmError, Result};
pub use interval::Job;
