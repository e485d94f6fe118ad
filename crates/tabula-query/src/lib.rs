mod column;
mod error;
mod payload;
mod resolve;
mod sort;
mod window;

pub use column::{ColumnDescriptor, SortMapping};
pub use error::QueryError;
pub use payload::{ListResponse, Offset, Period, QueryPayload};
pub use resolve::{resolve, resolve_mapping};
pub use sort::{SortDirection, SortNode, SortSpec};
pub use window::{WindowItem, compute_window, total_pages};
