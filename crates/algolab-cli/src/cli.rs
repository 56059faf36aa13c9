//! CLI argument definitions for the algolab grader.

use std::path::PathBuf;

use algolab_cli::problems::ProblemKind;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "algolab",
    version,
    about = "Grade algorithm solutions against problem-set fixtures",
    long_about = "Grade algorithm solutions against problem-set fixtures.\n\n\
                  Reads a fixture, runs the built-in algorithm on every problem,\n\
                  and reports each answer that differs from the expected one."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Grade a problem-set fixture.
    Run(RunArgs),

    /// Parse a fixture leniently and report what was read.
    Check(CheckArgs),

    /// List the supported problem kinds.
    Problems,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Problem kind to grade.
    #[arg(value_enum, value_name = "KIND")]
    pub kind: ProblemKindArg,

    /// Fixture file with the problems.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Expected problem-set number (default: the kind's built-in number).
    #[arg(long = "problem-set", value_name = "N", allow_negative_numbers = true)]
    pub problem_set: Option<i32>,

    /// Write the header and the produced answers to this file.
    #[arg(long = "results", value_name = "PATH")]
    pub results: Option<PathBuf>,

    /// Include default-valued columns in the results file.
    #[arg(long = "full-output", requires = "results")]
    pub full_output: bool,

    /// Print the report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Problem kind whose columns the fixture uses.
    #[arg(value_enum, value_name = "KIND")]
    pub kind: ProblemKindArg,

    /// Fixture file to check.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProblemKindArg {
    IntervalScheduling,
    IndependentSet,
    PrizeCollector,
}

impl From<ProblemKindArg> for ProblemKind {
    fn from(arg: ProblemKindArg) -> Self {
        match arg {
            ProblemKindArg::IntervalScheduling => ProblemKind::IntervalScheduling,
            ProblemKindArg::IndependentSet => ProblemKind::IndependentSet,
            ProblemKindArg::PrizeCollector => ProblemKind::PrizeCollector,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "algolab",
            "run",
            "independent-set",
            "weights.in",
            "--problem-set",
            "7",
            "--results",
            "weights.out",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(ProblemKind::from(args.kind), ProblemKind::IndependentSet);
        assert_eq!(args.problem_set, Some(7));
        assert!(!args.full_output);
    }

    #[test]
    fn test_full_output_requires_results() {
        let result = Cli::try_parse_from([
            "algolab",
            "run",
            "interval-scheduling",
            "jobs.in",
            "--full-output",
        ]);
        assert!(result.is_err());
    }
}
