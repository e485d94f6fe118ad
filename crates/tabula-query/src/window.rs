use serde::Serialize;

/// Below this many pages every page gets its own button.
const COLLAPSE_THRESHOLD: usize = 9;

/// Contiguous pages shown at an edge when the current page is near it.
const EDGE_RUN: usize = 5;

/// Current pages at or below this index use the leading edge run.
const LEADING_EDGE: usize = 3;

/// Current pages this close to the last page use the trailing edge run.
const TRAILING_EDGE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowItem {
    Page(usize),
    Ellipsis,
}

/// Number of pages needed for `total_count` rows at `page_size` per page.
pub fn total_pages(total_count: u64, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size as u64) as usize
}

/// Page-selector buttons for a grid with `total_pages` pages showing
/// `current_page` (zero-based).
///
/// The first and last page are always present, along with the neighbours of
/// the current page. Gaps collapse into at most one ellipsis per side; a gap
/// of a single page shows that page instead.
pub fn compute_window(total_pages: usize, current_page: usize) -> Vec<WindowItem> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages < COLLAPSE_THRESHOLD {
        return (0..total_pages).map(WindowItem::Page).collect();
    }

    let last = total_pages - 1;
    let current = current_page.min(last);

    let (run_start, run_end) = if current <= LEADING_EDGE {
        (0, (current + 1).max(EDGE_RUN - 1))
    } else if current + TRAILING_EDGE >= last {
        ((current - 1).min(last + 1 - EDGE_RUN), last)
    } else {
        (current - 1, current + 1)
    };

    let mut pages = Vec::with_capacity(run_end - run_start + 3);
    pages.push(0);
    pages.extend(run_start..=run_end);
    pages.push(last);
    pages.dedup();

    let mut window = Vec::with_capacity(pages.len() + 2);
    let mut prev: Option<usize> = None;
    for page in pages {
        if let Some(p) = prev {
            match page - p {
                1 => {}
                2 => window.push(WindowItem::Page(p + 1)),
                _ => window.push(WindowItem::Ellipsis),
            }
        }
        window.push(WindowItem::Page(page));
        prev = Some(page);
    }
    window
}
