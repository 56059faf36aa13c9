//! Grading components for the `algolab` command-line tool.

#![allow(missing_docs)]

pub mod grading;
pub mod logging;
pub mod problems;
pub mod types;
