use chrono::{DateTime, Utc};

use crate::models::{ProblemDetail, ProblemSummary, SolvedStatus};
use crate::view_model::Page;

const NAME_WIDTH: usize = 40;
const SHOWN_TEST_CASES: usize = 3;
const EXPIRED_SUFFIX: &str = " (expired)";

pub fn format_acceptance(rate: Option<f64>) -> String {
    match rate {
        Some(r) if r.fract() == 0.0 => format!("{:.0}%", r),
        Some(r) => format!("{:.1}%", r),
        None => "N/A".to_string(),
    }
}

fn status_marker(status: SolvedStatus) -> &'static str {
    match status {
        SolvedStatus::Solved => "✓",
        SolvedStatus::NotSolved => " ",
    }
}

fn fit(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

fn format_row(index: usize, problem: &ProblemSummary, now: DateTime<Utc>) -> String {
    let name = if problem.is_expired(now) {
        let mut name = fit(&problem.name, NAME_WIDTH - EXPIRED_SUFFIX.len());
        name.push_str(EXPIRED_SUFFIX);
        name
    } else {
        fit(&problem.name, NAME_WIDTH)
    };

    format!(
        "{:>2}  {:^6}  {:<width$}  {:<10}  {:>10}",
        index,
        status_marker(problem.status),
        name,
        problem.difficulty.display_name(),
        format_acceptance(problem.acceptance_rate),
        width = NAME_WIDTH
    )
}

pub fn render_rows(items: &[&ProblemSummary], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return "No problems found.\n".to_string();
    }

    let mut out = format!(
        "{:>2}  {:^6}  {:<width$}  {:<10}  {:>10}\n",
        "#",
        "Status",
        "Problem",
        "Difficulty",
        "Acceptance",
        width = NAME_WIDTH
    );
    out.push_str(&"-".repeat(NAME_WIDTH + 36));
    out.push('\n');
    for (i, problem) in items.iter().enumerate() {
        out.push_str(&format_row(i + 1, problem, now));
        out.push('\n');
    }
    out
}

/// Renders the table, or a "no results" line, followed by the paging footer.
pub fn render_page(page: &Page, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str(&render_rows(&page.items, now));
    out.push('\n');
    out.push_str(&format!(
        "{}  (page {} of {})",
        page.summary(),
        page.number,
        page.total_pages
    ));
    out
}

pub fn display_page(page: &Page) {
    println!("{}", render_page(page, Utc::now()));
}

pub fn display_all(items: &[&ProblemSummary]) {
    println!("{}", render_rows(items, Utc::now()));
    println!("{} problems", items.len());
}

fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".to_string())
}

pub fn display_problem(problem: &ProblemDetail) {
    println!("\n{}", "=".repeat(60));
    println!("  {}  [{}]", problem.title, problem.id);
    println!("{}\n", "=".repeat(60));

    println!("Difficulty: {}", problem.difficulty.display_name());
    println!("Acceptance: {}", format_acceptance(problem.acceptance_rate));
    if let Some(created) = problem.created_at() {
        println!("Created:    {}", created.format("%Y-%m-%d"));
    }
    println!("Expires:    {}\n", format_date(problem.expires_at()));

    println!("{}", "-".repeat(60));
    println!("{}", problem.description);
    println!("{}", "-".repeat(60));

    if !problem.input_format.is_empty() {
        println!("\nInput format:\n  {}", problem.input_format);
    }
    if !problem.output_format.is_empty() {
        println!("\nOutput format:\n  {}", problem.output_format);
    }
    if !problem.sample_input.is_empty() || !problem.sample_output.is_empty() {
        println!("\nSample input:\n{}", problem.sample_input);
        println!("\nSample output:\n{}", problem.sample_output);
    }

    println!("\nTest Cases: {} total", problem.testcases.len());
    for case in problem.testcases.iter().take(SHOWN_TEST_CASES) {
        println!("  #{}: {} => {}", case.id, case.input.trim(), case.output.trim());
    }
    println!("{}\n", "=".repeat(60));
}
