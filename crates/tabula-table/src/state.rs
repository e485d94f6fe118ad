use serde::Serialize;
use serde_json::{Map, Value};
use tabula_query::{
    ColumnDescriptor, Period, QueryError, SortDirection, SortSpec, resolve, total_pages,
};

use crate::config::PAGE_SIZES;
use crate::error::TableError;

/// Highest index a page can take before any total is known, so that its
/// 1-based form still fits in a `usize`.
const MAX_PAGE_INDEX: usize = usize::MAX - 1;

/// The column the grid is currently sorted by, for the sort indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSort {
    pub column: String,
    pub direction: SortDirection,
}

/// Query state of one table instance.
///
/// Every transition leaves the state committed and consistent: `page_index`
/// is within the last known total, sorting and filtering start over at the
/// first page, and a resize keeps the closest valid page.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    page_size: usize,
    page_index: usize,
    sort: SortSpec,
    active_sort: Option<ActiveSort>,
    search_term: String,
    filters: Map<String, Value>,
    period: Option<Period>,
    total_count: Option<u64>,
}

impl QueryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            page_index: 0,
            sort: SortSpec::new(),
            active_sort: None,
            search_term: String::new(),
            filters: Map::new(),
            period: None,
            total_count: None,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn active_sort(&self) -> Option<&ActiveSort> {
        self.active_sort.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> &Map<String, Value> {
        &self.filters
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Page count for the last known total, `None` before the first response.
    pub fn total_pages(&self) -> Option<usize> {
        self.total_count
            .map(|count| total_pages(count, self.page_size))
    }

    /// Highest valid page index for the last known total. An empty result
    /// still has page 0.
    fn last_page_index(&self) -> Option<usize> {
        self.total_pages().map(|pages| pages.saturating_sub(1))
    }

    fn clamp(&self, page_index: usize) -> usize {
        match self.last_page_index() {
            Some(last) => page_index.min(last),
            None => page_index.min(MAX_PAGE_INDEX),
        }
    }

    /// Sort by `column_id`. Clicking the active column flips its direction,
    /// any other column replaces the sort with a fresh ascending entry.
    pub fn apply_sort(
        &mut self,
        columns: &[ColumnDescriptor],
        column_id: &str,
    ) -> Result<(), QueryError> {
        let direction = match &self.active_sort {
            Some(active) if active.column == column_id => active.direction.toggled(),
            _ => SortDirection::Asc,
        };
        let sort = resolve(columns, column_id, direction)?;

        self.sort = sort;
        self.active_sort = Some(ActiveSort {
            column: column_id.to_string(),
            direction,
        });
        self.page_index = 0;
        Ok(())
    }

    /// Move to `page_index`, clamped to the last known page. Returns whether
    /// the requested index had to be clamped.
    pub fn apply_page(&mut self, page_index: usize) -> bool {
        let clamped = self.clamp(page_index);
        self.page_index = clamped;
        clamped != page_index
    }

    /// Switch to another allowed page size, keeping the current page when it
    /// still exists and otherwise moving to the new last page. Without a known
    /// total the position is ambiguous and resets to the first page.
    pub fn apply_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(TableError::InvalidPageSize(page_size));
        }
        if page_size == self.page_size {
            return Ok(());
        }

        self.page_size = page_size;
        self.page_index = match self.last_page_index() {
            Some(last) => self.page_index.min(last),
            None => 0,
        };
        Ok(())
    }

    pub fn apply_search(&mut self, term: String) {
        self.search_term = term;
        self.page_index = 0;
    }

    pub fn apply_filters(&mut self, filters: Map<String, Value>) {
        self.filters = filters;
        self.page_index = 0;
    }

    pub fn apply_period(&mut self, period: Option<Period>) {
        self.period = period;
        self.page_index = 0;
    }

    /// Record the total row count from a response. Returns `true` when the
    /// current page no longer exists and was clamped.
    pub fn record_count(&mut self, count: u64) -> bool {
        self.total_count = Some(count);
        let clamped = self.clamp(self.page_index);
        let changed = clamped != self.page_index;
        self.page_index = clamped;
        changed
    }
}
