//! Problem list view-model.
//!
//! Holds the fetched problems together with the search text, the status and
//! difficulty filters and the current page, and derives the rows to show.
//! Nothing in here renders or talks to the network.

use crate::models::{Difficulty, ProblemSummary, SolvedStatus};

pub const PAGE_SIZE: usize = 5;

/// Receives "open this problem" requests. Fire-and-forget.
pub trait Navigator {
    fn open_problem(&mut self, id: &str);
}

/// One page of the derived list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<&'a ProblemSummary>,
    start: usize,
}

impl Page<'_> {
    /// 1-based position of the first row, 0 when the page is empty.
    pub fn showing_from(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start + 1
        }
    }

    pub fn showing_to(&self) -> usize {
        self.start + self.items.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} problems",
            self.showing_from(),
            self.showing_to(),
            self.total_items
        )
    }
}

#[derive(Debug, Clone)]
pub struct ProblemListViewModel {
    source: Vec<ProblemSummary>,
    search_text: String,
    status_filter: Option<SolvedStatus>,
    difficulty_filter: Option<Difficulty>,
    current_page: usize,
    // Indices into `source`, in source order.
    derived: Vec<usize>,
}

impl Default for ProblemListViewModel {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ProblemListViewModel {
    pub fn new(source: Vec<ProblemSummary>) -> Self {
        let derived = (0..source.len()).collect();
        Self {
            source,
            search_text: String::new(),
            status_filter: None,
            difficulty_filter: None,
            current_page: 1,
            derived,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn status_filter(&self) -> Option<SolvedStatus> {
        self.status_filter
    }

    pub fn difficulty_filter(&self) -> Option<Difficulty> {
        self.difficulty_filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.refilter();
    }

    pub fn set_status_filter(&mut self, status: Option<SolvedStatus>) {
        self.status_filter = status;
        self.refilter();
    }

    pub fn set_difficulty_filter(&mut self, difficulty: Option<Difficulty>) {
        self.difficulty_filter = difficulty;
        self.refilter();
    }

    /// Problems passing every active filter, in source order.
    pub fn derived(&self) -> Vec<&ProblemSummary> {
        self.derived.iter().map(|&i| &self.source[i]).collect()
    }

    pub fn derived_len(&self) -> usize {
        self.derived.len()
    }

    /// Never less than 1, even for an empty list.
    pub fn total_pages(&self) -> usize {
        self.derived.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Page `n` (1-based) of the derived list. `0` is read as `1`; a page
    /// past the end comes back empty.
    pub fn get_page(&self, n: usize) -> Page<'_> {
        let number = n.max(1);
        let len = self.derived.len();
        let start = (number - 1).saturating_mul(PAGE_SIZE).min(len);
        let end = number.saturating_mul(PAGE_SIZE).min(len);

        Page {
            number,
            total_pages: self.total_pages(),
            total_items: len,
            items: self.derived[start..end].iter().map(|&i| &self.source[i]).collect(),
            start,
        }
    }

    pub fn current(&self) -> Page<'_> {
        self.get_page(self.current_page)
    }

    pub fn go_to_page(&mut self, n: usize) {
        let page = n.clamp(1, self.total_pages());
        if page != self.current_page {
            tracing::debug!(from = self.current_page, to = page, "changing page");
        }
        self.current_page = page;
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    /// Hands `id` to the navigator. The view-model itself is left untouched.
    pub fn select_problem(&self, id: &str, navigator: &mut dyn Navigator) {
        tracing::debug!(id, "opening problem");
        navigator.open_problem(id);
    }

    fn matches(&self, problem: &ProblemSummary, needle: &str) -> bool {
        (needle.is_empty() || problem.name.to_lowercase().contains(needle))
            && self.status_filter.is_none_or(|s| problem.status == s)
            && self.difficulty_filter.is_none_or(|d| problem.difficulty == d)
    }

    // Always starts again from the full source list, never from the
    // previously filtered one.
    fn refilter(&mut self) {
        let needle = self.search_text.to_lowercase();
        self.derived = self
            .source
            .iter()
            .enumerate()
            .filter(|(_, p)| self.matches(p, &needle))
            .map(|(i, _)| i)
            .collect();
        self.current_page = 1;

        tracing::debug!(
            search = %self.search_text,
            status = ?self.status_filter,
            difficulty = ?self.difficulty_filter,
            matched = self.derived.len(),
            "filters applied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(i: usize, difficulty: Difficulty) -> ProblemSummary {
        ProblemSummary::new(i.to_string(), format!("Problem {}", i), difficulty)
    }

    fn twenty() -> Vec<ProblemSummary> {
        (1..=20)
            .map(|i| {
                let difficulty = match i {
                    4 | 9 | 17 => Difficulty::Hard,
                    _ if i % 2 == 0 => Difficulty::Medium,
                    _ => Difficulty::Easy,
                };
                let status = if i % 3 == 0 {
                    SolvedStatus::Solved
                } else {
                    SolvedStatus::NotSolved
                };
                problem(i, difficulty).with_status(status)
            })
            .collect()
    }

    fn ids(items: &[&ProblemSummary]) -> Vec<String> {
        items.iter().map(|p| p.id.clone()).collect()
    }

    #[derive(Default)]
    struct RecordingNavigator {
        opened: Vec<String>,
    }

    impl Navigator for RecordingNavigator {
        fn open_problem(&mut self, id: &str) {
            self.opened.push(id.to_string());
        }
    }

    #[test]
    fn test_empty_source() {
        let vm = ProblemListViewModel::default();
        assert!(vm.derived().is_empty());
        assert_eq!(vm.total_pages(), 1);

        let page = vm.get_page(1);
        assert!(page.items.is_empty());
        assert_eq!(page.summary(), "Showing 0 to 0 of 0 problems");
    }

    #[test]
    fn test_twenty_problems_unfiltered() {
        let vm = ProblemListViewModel::new(twenty());
        assert_eq!(vm.total_pages(), 4);

        let first = vm.get_page(1);
        assert_eq!(ids(&first.items), ["1", "2", "3", "4", "5"]);
        assert_eq!(first.summary(), "Showing 1 to 5 of 20 problems");

        let last = vm.get_page(4);
        assert_eq!(ids(&last.items), ["16", "17", "18", "19", "20"]);
        assert_eq!(last.summary(), "Showing 16 to 20 of 20 problems");
    }

    #[test]
    fn test_hard_filter_collapses_to_one_page() {
        let mut vm = ProblemListViewModel::new(twenty());
        vm.go_to_page(3);
        vm.set_difficulty_filter(Some(Difficulty::Hard));

        assert_eq!(vm.total_pages(), 1);
        assert_eq!(vm.current_page(), 1);
        let page = vm.current();
        assert_eq!(ids(&page.items), ["4", "9", "17"]);
        assert_eq!(page.summary(), "Showing 1 to 3 of 3 problems");
    }

    #[test]
    fn test_seventeen_items_split_five_five_five_two() {
        let vm = ProblemListViewModel::new((1..=17).map(|i| problem(i, Difficulty::Easy)).collect());
        assert_eq!(vm.total_pages(), 4);
        let sizes: Vec<usize> = (1..=4).map(|n| vm.get_page(n).items.len()).collect();
        assert_eq!(sizes, [5, 5, 5, 2]);
    }

    #[test]
    fn test_page_never_exceeds_page_size() {
        let vm = ProblemListViewModel::new(twenty());
        for n in 0..=6 {
            assert!(vm.get_page(n).items.len() <= PAGE_SIZE);
        }
        assert!(vm.get_page(5).items.is_empty());
        assert_eq!(vm.get_page(0).number, 1);
    }

    #[test]
    fn test_get_page_far_past_the_end() {
        let vm = ProblemListViewModel::new(twenty());
        let page = vm.get_page(usize::MAX);

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_items, 20);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut vm = ProblemListViewModel::new(vec![
            ProblemSummary::new("a", "Two Sum", Difficulty::Easy),
            ProblemSummary::new("b", "Three Sum", Difficulty::Medium),
            ProblemSummary::new("c", "Graph Coloring", Difficulty::Hard),
        ]);

        vm.set_search_text("two");
        assert_eq!(ids(&vm.derived()), ["a"]);

        vm.set_search_text("SUM");
        assert_eq!(ids(&vm.derived()), ["a", "b"]);

        vm.set_search_text("");
        assert_eq!(vm.derived_len(), 3);
    }

    #[test]
    fn test_filters_combine() {
        let mut vm = ProblemListViewModel::new(twenty());
        vm.set_status_filter(Some(SolvedStatus::Solved));
        assert_eq!(ids(&vm.derived()), ["3", "6", "9", "12", "15", "18"]);

        vm.set_difficulty_filter(Some(Difficulty::Medium));
        assert_eq!(ids(&vm.derived()), ["6", "12", "18"]);

        vm.set_search_text("problem 1");
        assert_eq!(ids(&vm.derived()), ["12", "18"]);
    }

    #[test]
    fn test_filter_recomputes_from_full_source() {
        let mut vm = ProblemListViewModel::new(twenty());
        vm.set_difficulty_filter(Some(Difficulty::Hard));
        assert_eq!(vm.derived_len(), 3);

        vm.set_difficulty_filter(Some(Difficulty::Easy));
        assert_eq!(vm.derived_len(), 8);

        vm.set_difficulty_filter(None);
        assert_eq!(vm.derived_len(), 20);
    }

    #[test]
    fn test_derived_is_ordered_subsequence() {
        let source = twenty();
        let mut vm = ProblemListViewModel::new(source.clone());
        vm.set_search_text("1");
        vm.set_status_filter(Some(SolvedStatus::NotSolved));

        let positions: Vec<usize> = vm
            .derived()
            .iter()
            .map(|p| source.iter().position(|s| s.id == p.id).unwrap())
            .collect();
        assert!(!positions.is_empty());
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_every_setter_resets_page() {
        let mut vm = ProblemListViewModel::new(twenty());

        vm.go_to_page(4);
        vm.set_search_text("problem");
        assert_eq!(vm.current_page(), 1);

        vm.go_to_page(4);
        vm.set_status_filter(None);
        assert_eq!(vm.current_page(), 1);

        vm.go_to_page(4);
        vm.set_difficulty_filter(None);
        assert_eq!(vm.current_page(), 1);
    }

    #[test]
    fn test_no_match_behaves_like_empty() {
        let mut vm = ProblemListViewModel::new(twenty());
        vm.set_search_text("zzz");
        assert_eq!(vm.total_pages(), 1);
        assert_eq!(vm.current().summary(), "Showing 0 to 0 of 0 problems");
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut vm = ProblemListViewModel::new(twenty());
        vm.go_to_page(99);
        assert_eq!(vm.current_page(), 4);
        assert!(!vm.has_next());

        vm.go_to_page(0);
        assert_eq!(vm.current_page(), 1);
        assert!(!vm.has_previous());
    }

    #[test]
    fn test_next_and_previous() {
        let mut vm = ProblemListViewModel::new(twenty());
        vm.previous_page();
        assert_eq!(vm.current_page(), 1);

        vm.next_page();
        vm.next_page();
        assert_eq!(vm.current_page(), 3);
        assert!(vm.has_previous() && vm.has_next());

        vm.next_page();
        vm.next_page();
        assert_eq!(vm.current_page(), 4);
    }

    #[test]
    fn test_select_problem_hands_off_once() {
        let mut vm = ProblemListViewModel::new(twenty());
        vm.set_difficulty_filter(Some(Difficulty::Medium));
        vm.go_to_page(2);
        let before = (vm.current_page(), ids(&vm.derived()));

        let mut nav = RecordingNavigator::default();
        vm.select_problem("12", &mut nav);

        assert_eq!(nav.opened, ["12"]);
        assert_eq!((vm.current_page(), ids(&vm.derived())), before);
    }
}
