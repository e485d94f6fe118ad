use serde::Serialize;
use tabula_query::{SortDirection, WindowItem, compute_window};

use crate::config::PAGE_SIZES;
use crate::state::{ActiveSort, QueryState};

/// Everything a presentation layer needs to draw the grid chrome: page
/// buttons, sort indicators and the search box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub page_index: usize,
    pub page_size: usize,
    pub page_sizes: Vec<usize>,
    pub total_count: Option<u64>,
    pub total_pages: Option<usize>,
    pub window: Vec<WindowItem>,
    pub sort: Option<ActiveSort>,
    pub search_term: String,
    /// What the search box shows: the pending input while a commit is
    /// scheduled, the committed term otherwise.
    pub search_input: String,
}

impl TableView {
    pub(crate) fn new(state: &QueryState, pending_search: Option<&str>) -> Self {
        let total_pages = state.total_pages();
        Self {
            page_index: state.page_index(),
            page_size: state.page_size(),
            page_sizes: PAGE_SIZES.to_vec(),
            total_count: state.total_count(),
            total_pages,
            window: compute_window(total_pages.unwrap_or(0), state.page_index()),
            sort: state.active_sort().cloned(),
            search_term: state.search_term().to_string(),
            search_input: pending_search
                .unwrap_or(state.search_term())
                .to_string(),
        }
    }

    /// Sort indicator for a column header.
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|s| s.column == column_id)
            .map(|s| s.direction)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.total_pages
            .is_some_and(|pages| self.page_index + 1 < pages)
    }
}

#[cfg(test)]
mod tests {
    use tabula_query::ColumnDescriptor;

    use super::*;

    #[test]
    fn view_before_first_response() {
        let view = TableView::new(&QueryState::new(10), None);
        assert_eq!(view.total_pages, None);
        assert!(view.window.is_empty());
        assert!(!view.has_previous());
        assert!(!view.has_next());
        assert_eq!(view.page_sizes, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn view_reflects_state() {
        let mut state = QueryState::new(10);
        state.record_count(120);
        state.apply_sort(&[ColumnDescriptor::direct("name", "Name")], "name").unwrap();
        state.apply_page(11);

        let view = TableView::new(&state, Some("ac"));
        assert_eq!(view.total_pages, Some(12));
        assert_eq!(view.window.last(), Some(&WindowItem::Page(11)));
        assert_eq!(view.sort_direction("name"), Some(SortDirection::Asc));
        assert_eq!(view.sort_direction("other"), None);
        assert!(view.has_previous());
        assert!(!view.has_next());
        assert_eq!(view.search_term, "");
        assert_eq!(view.search_input, "ac");
    }
}
