mod browse;
mod config_cmd;
mod list;
mod show;

use clap::{Args, Parser, Subcommand};

use crate::api::{self, ApiClient};
use crate::models::{Difficulty, SolvedStatus, config};
use crate::view_model::ProblemListViewModel;

#[derive(Parser)]
#[command(name = "problist")]
#[command(about = "Browse the coding challenge problem list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of the problem list
    List {
        #[command(flatten)]
        filters: Filters,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Print every match instead of a single page
        #[arg(long, conflicts_with = "page")]
        all: bool,
    },
    /// Page through the list interactively
    Browse {
        #[command(flatten)]
        filters: Filters,
    },
    /// Show a single problem
    Show { id: String },
    /// Show or change the backend URL
    Config { url: Option<String> },
}

#[derive(Args, Debug, Clone, Default)]
pub struct Filters {
    /// Case-insensitive text the problem name must contain
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<SolvedStatus>,
    #[arg(short, long, value_enum)]
    pub difficulty: Option<Difficulty>,
}

pub fn run(cli: Cli) {
    match cli.command {
        None => list::list_problems(&Filters::default(), 1),
        Some(Commands::List { filters, all: true, .. }) => list::list_all(&filters),
        Some(Commands::List { filters, page, .. }) => list::list_problems(&filters, page),
        Some(Commands::Browse { filters }) => browse::browse(&filters),
        Some(Commands::Show { id }) => show::show_problem(&id),
        Some(Commands::Config { url }) => config_cmd::handle_config(url),
    }
}

fn connect() -> ApiClient {
    let user_config = config::load_config();
    let url = user_config.resolved_backend_url();

    match ApiClient::new(&url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to set up HTTP client: {}", e);
            std::process::exit(1);
        }
    }
}

/// Fetches the list once and applies the requested filters.
fn load_view_model(client: &ApiClient, filters: &Filters) -> ProblemListViewModel {
    let mut view_model = ProblemListViewModel::new(api::load_problems(client));
    apply_filters(&mut view_model, filters);
    view_model
}

fn apply_filters(view_model: &mut ProblemListViewModel, filters: &Filters) {
    if let Some(ref search) = filters.search {
        view_model.set_search_text(search.as_str());
    }
    if filters.status.is_some() {
        view_model.set_status_filter(filters.status);
    }
    if filters.difficulty.is_some() {
        view_model.set_difficulty_filter(filters.difficulty);
    }
}
