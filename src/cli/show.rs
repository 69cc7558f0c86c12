use super::connect;
use crate::api::ApiClient;
use crate::display::display_problem;
use crate::view_model::Navigator;

/// Opens problems by fetching and printing their detail page.
pub struct DetailNavigator<'a> {
    client: &'a ApiClient,
}

impl<'a> DetailNavigator<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl Navigator for DetailNavigator<'_> {
    fn open_problem(&mut self, id: &str) {
        match self.client.fetch_problem(id) {
            Ok(problem) => display_problem(&problem),
            Err(e) => {
                tracing::warn!(id, "failed to fetch problem: {}", e);
                eprintln!("Could not load problem {}: {}", id, e);
            }
        }
    }
}

pub fn show_problem(id: &str) {
    let client = connect();
    DetailNavigator::new(&client).open_problem(id);
}
