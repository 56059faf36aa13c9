use algolab_cli::problems::ProblemKind;
use algolab_cli::types::{CheckResult, RunResult};
use algolab_fixture::Mistake;
use algolab_fixture::problem_set::UNSET;
use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use serde::Serialize;

pub fn print_run_summary(result: &RunResult) {
    let report = &result.report;
    println!("Problem set: {} ({})", report.problem_set, result.kind);
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.results {
        println!("Results: {}", path.display());
    }

    if report.is_perfect() {
        println!(
            "Your algorithm solved all {} test problems correctly. Congratulations!",
            report.problems
        );
    } else {
        println!("{}", mistake_table(&report.mistakes));
        let count = report.mistake_count();
        let noun = if count == 1 { "mistake" } else { "mistakes" };
        println!(
            "Your algorithm made {count} {noun} out of {} problems.",
            report.problems
        );
    }

    println!("Running time: {} ms", report.elapsed_ms);
    if let Some(started_at) = report.started_at {
        let local = started_at.with_timezone(&Local);
        println!("Started: {}", local.format("%Y-%m-%d %H:%M:%S"));
    }
}

pub fn print_check_summary(result: &CheckResult) {
    println!("Input: {} ({})", result.input.display(), result.kind);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Problem set"), value_cell(result.problem_set)]);
    table.add_row(vec![
        Cell::new("Declared problems"),
        value_cell(result.declared_problems),
    ]);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(result.rows)]);
    table.add_row(vec![Cell::new("Lines read"), Cell::new(result.lines)]);
    println!("{table}");
    if let Some(error) = &result.error {
        eprintln!("Errors:");
        eprintln!("- {error}");
    }
}

pub fn print_problem_kinds() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Problem set"),
        header_cell("Columns"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for kind in ProblemKind::ALL {
        let problem_set = match kind.default_problem_set() {
            Some(id) => Cell::new(id),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(kind.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            problem_set,
            Cell::new(kind.input_columns().join(", ")),
            Cell::new(kind.description()),
        ]);
    }
    println!("{table}");
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{json}");
    Ok(())
}

fn mistake_table(mistakes: &[Mistake]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Problem"),
        header_cell("Expected"),
        header_cell("Actual"),
        header_cell("Message"),
    ]);
    apply_mistake_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for mistake in mistakes {
        let message = if mistake.msg.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&mistake.msg)
        };
        table.add_row(vec![
            Cell::new(mistake.problem).add_attribute(Attribute::Bold),
            Cell::new(mistake.expected).fg(Color::Green),
            Cell::new(mistake.actual)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            message,
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_mistake_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::UpperBoundary(Width::Percentage(60)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: i32) -> Cell {
    if value == UNSET {
        dim_cell("unset")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
