use super::{Filters, connect, load_view_model};
use crate::display::{display_all, display_page};

pub fn list_problems(filters: &Filters, page: usize) {
    let client = connect();
    let mut view_model = load_view_model(&client, filters);

    view_model.go_to_page(page);
    if view_model.current_page() != page {
        tracing::debug!(requested = page, shown = view_model.current_page(), "page clamped");
    }

    display_page(&view_model.current());
}

pub fn list_all(filters: &Filters) {
    let client = connect();
    let view_model = load_view_model(&client, filters);
    display_all(&view_model.derived());
}
