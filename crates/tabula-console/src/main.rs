mod command;
mod render;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Map;
use tabula_query::{ListResponse, QueryPayload};
use tabula_table::{
    ChannelEmitter, ENTITIES, FetchError, Fetcher, HttpFetcher, TableConfig, TableController,
    TableError, entity_config,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use command::{Command, HELP};

type Table = TableController<ChannelEmitter>;

fn load_config() -> TableConfig {
    if let Ok(path) = std::env::var("TABULA_TABLE_CONFIG") {
        let content = std::fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("failed to read table config from {path}: {e}");
            std::process::exit(1);
        });
        return TableConfig::from_json(&content).unwrap_or_else(|e| {
            eprintln!("failed to load table config from {path}: {e}");
            std::process::exit(1);
        });
    }

    let entity = std::env::var("TABULA_ENTITY").unwrap_or_else(|_| "branch".into());
    entity_config(&entity).unwrap_or_else(|| {
        eprintln!("unknown entity {entity}, expected one of: {}", ENTITIES.join(", "));
        std::process::exit(1);
    })
}

/// `None` runs the console dry: payloads are printed but never sent.
fn load_fetcher() -> Option<Arc<HttpFetcher>> {
    let base_url = std::env::var("TABULA_API_URL").ok()?;
    let timeout_secs: u64 = std::env::var("TABULA_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let mut fetcher = HttpFetcher::new(&base_url, Duration::from_secs(timeout_secs));
    if let Ok(token) = std::env::var("TABULA_API_TOKEN") {
        fetcher = fetcher.with_token(token);
    }
    Some(Arc::new(fetcher))
}

/// Local copy of the structured filters, since the table replaces the whole
/// map on every change.
struct Session {
    filters: Map<String, serde_json::Value>,
}

impl Session {
    fn apply(&mut self, table: &mut Table, command: Command) -> Result<(), TableError> {
        match command {
            Command::Sort(column) => table.set_sort(&column),
            Command::Page(n) => table.set_page(n - 1),
            Command::Next => {
                let view = table.view();
                if view.has_next() {
                    table.set_page(view.page_index + 1)
                } else {
                    Ok(())
                }
            }
            Command::Previous => {
                let view = table.view();
                if view.has_previous() {
                    table.set_page(view.page_index - 1)
                } else {
                    Ok(())
                }
            }
            Command::Size(size) => table.set_page_size(size),
            Command::Search(term) => table.set_search(term),
            Command::Enter => table.flush_search(),
            Command::Filter(key, value) => {
                self.filters.insert(key, value);
                table.set_filters(self.filters.clone())
            }
            Command::Unfilter(key) => {
                if self.filters.remove(&key).is_none() {
                    return Ok(());
                }
                table.set_filters(self.filters.clone())
            }
            Command::Period(period) => table.set_period(period),
            Command::Count(rows) => table.record_count(rows),
            Command::Refresh => table.refresh(),
            Command::View => {
                println!("{}", render::status_line(&table.view()));
                Ok(())
            }
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }
}

fn dispatch(
    fetcher: &Option<Arc<HttpFetcher>>,
    endpoint: &str,
    query: QueryPayload,
    responses: &UnboundedSender<Result<ListResponse, FetchError>>,
) {
    match serde_json::to_string(&query) {
        Ok(json) => println!("> {json}"),
        Err(e) => warn!(error = %e, "failed to encode query"),
    }

    let Some(fetcher) = fetcher else {
        return;
    };
    let fetcher = Arc::clone(fetcher);
    let endpoint = endpoint.to_string();
    let responses = responses.clone();
    tokio::task::spawn_blocking(move || {
        let _ = responses.send(fetcher.fetch(&endpoint, &query));
    });
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config();
    let fetcher = load_fetcher();
    info!(
        table = %config.id,
        endpoint = %config.endpoint,
        dry_run = fetcher.is_none(),
        "starting tabula-console"
    );

    let (query_tx, mut queries) = mpsc::unbounded_channel();
    let (response_tx, mut responses) = mpsc::unbounded_channel();

    let mut table = TableController::new(config, ChannelEmitter::new(query_tx))
        .unwrap_or_else(|e| {
            eprintln!("invalid table config: {e}");
            std::process::exit(1);
        });
    let endpoint = table.endpoint();
    let mut session = Session {
        filters: Map::new(),
    };

    if let Err(e) = table.refresh() {
        eprintln!("failed to load table: {e}");
        std::process::exit(1);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "failed to read stdin");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = session.apply(&mut table, command) {
                            eprintln!("{e}");
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            Some(query) = queries.recv() => {
                dispatch(&fetcher, &endpoint, query, &response_tx);
                if fetcher.is_none() {
                    println!("{}", render::status_line(&table.view()));
                }
            }
            Some(result) = responses.recv() => match result {
                Ok(response) => {
                    if let Err(e) = table.apply_response(&response) {
                        warn!(error = %e, "response ignored");
                    }
                    println!("< {} of {} rows", response.data.len(), response.count);
                    println!("{}", render::status_line(&table.view()));
                }
                Err(e) => eprintln!("fetch failed: {e} (type `refresh` to retry)"),
            },
        }
    }

    table.teardown();
    info!("shutdown complete");
}
