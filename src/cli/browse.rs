use std::io::{self, BufRead, Write};

use super::show::DetailNavigator;
use super::{Filters, connect, load_view_model};
use crate::display::display_page;
use crate::models::{Difficulty, SolvedStatus};
use crate::view_model::{Navigator, ProblemListViewModel};

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Next,
    Previous,
    GoTo(usize),
    Search(String),
    Status(Option<SolvedStatus>),
    Difficulty(Option<Difficulty>),
    /// A 1-based row on the current page.
    OpenRow(usize),
    Open(String),
    Help,
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum Flow {
    Redraw,
    Stay,
    Quit,
}

pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    if let Ok(row) = head.parse::<usize>() {
        if rest.is_empty() {
            return Ok(BrowseCommand::OpenRow(row));
        }
    }

    match head {
        "n" | "next" => Ok(BrowseCommand::Next),
        "p" | "prev" | "previous" => Ok(BrowseCommand::Previous),
        "g" | "goto" => rest
            .parse()
            .map(BrowseCommand::GoTo)
            .map_err(|_| format!("Not a page number: '{}'", rest)),
        "s" | "search" => Ok(BrowseCommand::Search(rest.to_string())),
        "st" | "status" => match rest {
            "" | "all" => Ok(BrowseCommand::Status(None)),
            other => SolvedStatus::parse(other)
                .map(|s| BrowseCommand::Status(Some(s)))
                .ok_or_else(|| format!("Unknown status: '{}'", other)),
        },
        "d" | "difficulty" => match rest {
            "" | "all" => Ok(BrowseCommand::Difficulty(None)),
            other => Difficulty::parse(other)
                .map(|d| BrowseCommand::Difficulty(Some(d)))
                .ok_or_else(|| format!("Unknown difficulty: '{}'", other)),
        },
        "o" | "open" if !rest.is_empty() => Ok(BrowseCommand::Open(rest.to_string())),
        "o" | "open" => Err("Usage: o <problem id>".to_string()),
        "h" | "help" | "?" => Ok(BrowseCommand::Help),
        "q" | "quit" | "exit" => Ok(BrowseCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("Unknown command: '{}' (h for help)", other)),
    }
}

pub fn apply(
    view_model: &mut ProblemListViewModel,
    command: BrowseCommand,
    navigator: &mut dyn Navigator,
) -> Flow {
    match command {
        BrowseCommand::Next => view_model.next_page(),
        BrowseCommand::Previous => view_model.previous_page(),
        BrowseCommand::GoTo(n) => view_model.go_to_page(n),
        BrowseCommand::Search(text) => view_model.set_search_text(text),
        BrowseCommand::Status(status) => view_model.set_status_filter(status),
        BrowseCommand::Difficulty(difficulty) => view_model.set_difficulty_filter(difficulty),
        BrowseCommand::OpenRow(row) => {
            let id = row
                .checked_sub(1)
                .and_then(|i| view_model.current().items.get(i).map(|p| p.id.clone()));
            match id {
                Some(id) => view_model.select_problem(&id, navigator),
                None => println!("No row {} on this page", row),
            }
            return Flow::Stay;
        }
        BrowseCommand::Open(id) => {
            view_model.select_problem(&id, navigator);
            return Flow::Stay;
        }
        BrowseCommand::Help => {
            print_help();
            return Flow::Stay;
        }
        BrowseCommand::Quit => return Flow::Quit,
    }
    Flow::Redraw
}

fn print_help() {
    println!("Commands:");
    println!("  n / p              next / previous page");
    println!("  g <page>           go to page");
    println!("  s [text]           search by name (empty clears)");
    println!("  st <status|all>    solved, not_solved or all");
    println!("  d <level|all>      easy, medium, hard or all");
    println!("  <row>              open a row on this page");
    println!("  o <id>             open a problem by id");
    println!("  q                  quit");
}

fn prompt(view_model: &ProblemListViewModel) -> String {
    let mut parts = vec![format!(
        "page {}/{}",
        view_model.current_page(),
        view_model.total_pages()
    )];
    if !view_model.search_text().is_empty() {
        parts.push(format!("search \"{}\"", view_model.search_text()));
    }
    if let Some(status) = view_model.status_filter() {
        parts.push(status.display_name().to_string());
    }
    if let Some(difficulty) = view_model.difficulty_filter() {
        parts.push(difficulty.display_name().to_string());
    }
    parts.push(format!("{} match", view_model.derived_len()));

    let mut keys = Vec::new();
    if view_model.has_previous() {
        keys.push("p");
    }
    if view_model.has_next() {
        keys.push("n");
    }
    keys.push("h");

    format!("[{}] ({}) > ", parts.join(" | "), keys.join("/"))
}

pub fn browse(filters: &Filters) {
    let client = connect();
    let mut view_model = load_view_model(&client, filters);
    let mut navigator = DetailNavigator::new(&client);

    display_page(&view_model.current());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", prompt(&view_model));
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
            None => break,
        };

        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(e) => {
                if !e.is_empty() {
                    println!("{}", e);
                }
                continue;
            }
        };

        match apply(&mut view_model, command, &mut navigator) {
            Flow::Redraw => display_page(&view_model.current()),
            Flow::Stay => {}
            Flow::Quit => break,
        }
    }
}
