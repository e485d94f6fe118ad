mod catalog;
mod config;
mod controller;
mod debounce;
mod emitter;
mod error;
mod fetch;
mod state;
mod view;

pub use catalog::{ENTITIES, entity_config};
pub use config::{DEFAULT_DEBOUNCE_MS, DEFAULT_SEARCH_FIELD, PAGE_SIZES, TableConfig};
pub use controller::TableController;
pub use debounce::Debouncer;
pub use emitter::{ChannelEmitter, Emitter, assemble};
pub use error::TableError;
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use state::{ActiveSort, QueryState};
pub use view::TableView;
