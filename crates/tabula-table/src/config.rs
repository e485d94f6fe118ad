use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tabula_query::{ColumnDescriptor, SortMapping};

use crate::error::TableError;

/// Page sizes offered by every grid. Not user-extensible.
pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

pub const DEFAULT_SEARCH_FIELD: &str = "search";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Entity list endpoint the payloads are posted to, e.g. `/branches/list`.
    pub endpoint: String,
    /// Filter key that carries the committed free-text search term.
    #[serde(default = "default_search_field")]
    pub search_field: String,
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_search_field() -> String {
    DEFAULT_SEARCH_FIELD.to_string()
}

fn default_page_size() -> usize {
    PAGE_SIZES[0]
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl TableConfig {
    pub fn new(id: &str, endpoint: &str, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            endpoint: endpoint.into(),
            search_field: default_search_field(),
            columns,
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
        }
    }

    /// Parse and validate a JSON table config.
    pub fn from_json(content: &str) -> Result<Self, TableError> {
        let config: TableConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Reject column sets and settings that could produce a malformed query.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.id.as_str()) {
                return Err(TableError::DuplicateColumn(column.id.clone()));
            }
            if !column.sortable {
                continue;
            }
            match &column.sort {
                SortMapping::Unsupported => {
                    return Err(TableError::UnmappedColumn(column.id.clone()));
                }
                SortMapping::Nested { relation, leaf } => {
                    let empty_segment = relation.split('.').any(str::is_empty);
                    let empty_leaf = leaf.as_deref().is_some_and(str::is_empty);
                    if empty_segment || empty_leaf {
                        return Err(TableError::EmptyMapping(column.id.clone()));
                    }
                }
                SortMapping::Direct => {}
            }
        }

        if !PAGE_SIZES.contains(&self.page_size) {
            return Err(TableError::InvalidPageSize(self.page_size));
        }
        if self.debounce_ms == 0 {
            return Err(TableError::InvalidDebounce);
        }
        Ok(())
    }
}
