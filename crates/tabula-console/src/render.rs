use std::fmt::Write;

use tabula_query::{SortDirection, WindowItem};
use tabula_table::TableView;

/// One status line for the grid chrome, page numbers 1-based.
pub fn status_line(view: &TableView) -> String {
    let mut out = String::new();

    match view.total_pages {
        Some(pages) => {
            let _ = write!(out, "page {}/{}", view.page_index + 1, pages.max(1));
        }
        None => {
            let _ = write!(out, "page {}/?", view.page_index + 1);
        }
    }

    let buttons = page_buttons(&view.window, view.page_index);
    if !buttons.is_empty() {
        let _ = write!(out, "  {buttons}");
    }

    let _ = write!(out, "  | size {}", view.page_size);
    if let Some(total) = view.total_count {
        let _ = write!(out, " | {total} rows");
    }
    if let Some(sort) = &view.sort {
        let arrow = match sort.direction {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        };
        let _ = write!(out, " | sort {} {arrow}", sort.column);
    }
    if !view.search_input.is_empty() || !view.search_term.is_empty() {
        let _ = write!(out, " | search \"{}\"", view.search_input);
        if view.search_input != view.search_term {
            out.push_str(" (pending)");
        }
    }
    out
}

fn page_buttons(window: &[WindowItem], current: usize) -> String {
    window
        .iter()
        .map(|item| match item {
            WindowItem::Page(p) if *p == current => format!("[{}]", p + 1),
            WindowItem::Page(p) => (p + 1).to_string(),
            WindowItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
