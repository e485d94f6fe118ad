use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde_json::{Map, Value};
use tabula_query::{ListResponse, Period};
use tracing::{debug, warn};

use crate::config::TableConfig;
use crate::debounce::Debouncer;
use crate::emitter::{Emitter, assemble};
use crate::error::TableError;
use crate::state::QueryState;
use crate::view::TableView;

struct TableCore<E: Emitter> {
    config: TableConfig,
    state: QueryState,
    emitter: E,
    pending_search: Option<String>,
    /// Bumped on every scheduled search; a debounce task only commits when
    /// it still holds the latest generation.
    search_generation: u64,
    torn_down: bool,
}

impl<E: Emitter> TableCore<E> {
    fn emit(&self) {
        let payload = assemble(&self.state, &self.config.search_field);
        debug!(
            table = %self.config.id,
            page = payload.offset.page,
            count = payload.offset.count,
            "emitting query"
        );
        self.emitter.emit(payload);
    }

    fn commit_search(&mut self) {
        if let Some(term) = self.pending_search.take() {
            debug!(table = %self.config.id, term = %term, "committing search");
            self.state.apply_search(term);
            self.emit();
        }
    }
}

fn lock<E: Emitter>(core: &Mutex<TableCore<E>>) -> MutexGuard<'_, TableCore<E>> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Body of a debounce task. A task that woke up after a newer search was
/// scheduled leaves the newer term to its own quiet window.
fn fire_search<E: Emitter>(core: &Weak<Mutex<TableCore<E>>>, generation: u64) {
    let Some(core) = core.upgrade() else {
        return;
    };
    let mut core = lock(&core);
    if core.torn_down {
        return;
    }
    if core.search_generation != generation {
        debug!(table = %core.config.id, generation, "superseded search skipped");
        return;
    }
    core.commit_search();
}

/// Query controller for one grid instance.
///
/// Owns the table's `QueryState` and turns grid interactions into committed
/// queries. Every successful interaction hands exactly one payload to the
/// emitter; rejected interactions leave the state as it was and emit nothing.
/// Dropping the controller tears it down.
pub struct TableController<E: Emitter> {
    core: Arc<Mutex<TableCore<E>>>,
    debouncer: Debouncer,
}

impl<E: Emitter> TableController<E> {
    /// Build a controller from a column set. Invalid configurations are
    /// rejected here so no interaction can produce a malformed query.
    pub fn new(config: TableConfig, emitter: E) -> Result<Self, TableError> {
        config.validate()?;
        let debouncer = Debouncer::new(config.debounce());
        let state = QueryState::new(config.page_size);
        Ok(Self {
            core: Arc::new(Mutex::new(TableCore {
                config,
                state,
                emitter,
                pending_search: None,
                search_generation: 0,
                torn_down: false,
            })),
            debouncer,
        })
    }

    fn live(&self) -> Result<MutexGuard<'_, TableCore<E>>, TableError> {
        let core = lock(&self.core);
        if core.torn_down {
            return Err(TableError::TornDown);
        }
        Ok(core)
    }

    pub fn id(&self) -> String {
        lock(&self.core).config.id.clone()
    }

    pub fn endpoint(&self) -> String {
        lock(&self.core).config.endpoint.clone()
    }

    /// Copy of the committed query state.
    pub fn state(&self) -> QueryState {
        lock(&self.core).state.clone()
    }

    pub fn view(&self) -> TableView {
        let core = lock(&self.core);
        TableView::new(&core.state, core.pending_search.as_deref())
    }

    pub fn is_torn_down(&self) -> bool {
        lock(&self.core).torn_down
    }

    /// Emit the current state unchanged, for the initial load or a retry
    /// after a failed fetch.
    pub fn refresh(&self) -> Result<(), TableError> {
        self.live()?.emit();
        Ok(())
    }

    pub fn set_sort(&self, column_id: &str) -> Result<(), TableError> {
        let mut guard = self.live()?;
        let core = &mut *guard;
        if let Err(e) = core.state.apply_sort(&core.config.columns, column_id) {
            warn!(table = %core.config.id, column = column_id, error = %e, "sort rejected");
            return Err(e.into());
        }
        core.emit();
        Ok(())
    }

    pub fn set_page(&self, page_index: usize) -> Result<(), TableError> {
        let mut core = self.live()?;
        if core.state.apply_page(page_index) {
            warn!(
                table = %core.config.id,
                requested = page_index,
                page = core.state.page_index(),
                "page out of range, clamped"
            );
        }
        core.emit();
        Ok(())
    }

    pub fn set_page_size(&self, page_size: usize) -> Result<(), TableError> {
        let mut core = self.live()?;
        if let Err(e) = core.state.apply_page_size(page_size) {
            warn!(table = %core.config.id, page_size, "page size rejected");
            return Err(e);
        }
        core.emit();
        Ok(())
    }

    /// Queue a search term. It is committed once input has been quiet for the
    /// configured interval; earlier terms of the same burst are dropped.
    /// Must be called from within a tokio runtime.
    pub fn set_search(&mut self, term: impl Into<String>) -> Result<(), TableError> {
        let term = term.into();
        let generation = {
            let mut core = self.live()?;
            core.search_generation += 1;
            debug!(
                table = %core.config.id,
                term = %term,
                generation = core.search_generation,
                "search scheduled"
            );
            core.pending_search = Some(term);
            core.search_generation
        };

        let core = Arc::downgrade(&self.core);
        self.debouncer.submit(move || fire_search(&core, generation));
        Ok(())
    }

    /// Commit a pending search right away. Nothing happens when no search is
    /// pending.
    pub fn flush_search(&mut self) -> Result<(), TableError> {
        self.debouncer.cancel();
        self.live()?.commit_search();
        Ok(())
    }

    pub fn set_filters(&self, filters: Map<String, Value>) -> Result<(), TableError> {
        let mut core = self.live()?;
        core.state.apply_filters(filters);
        core.emit();
        Ok(())
    }

    pub fn set_period(&self, period: Option<Period>) -> Result<(), TableError> {
        let mut core = self.live()?;
        core.state.apply_period(period);
        core.emit();
        Ok(())
    }

    /// Record the total row count reported by the backend. When the data
    /// shrank below the current page, the page is clamped and the corrected
    /// query is emitted.
    pub fn record_count(&self, count: u64) -> Result<(), TableError> {
        let mut core = self.live()?;
        if core.state.record_count(count) {
            warn!(
                table = %core.config.id,
                count,
                page = core.state.page_index(),
                "result shrank, page clamped"
            );
            core.emit();
        }
        Ok(())
    }

    pub fn apply_response<R>(&self, response: &ListResponse<R>) -> Result<(), TableError> {
        self.record_count(response.count)
    }

    /// Cancel any pending search and stop accepting interactions.
    pub fn teardown(&mut self) {
        {
            let mut core = lock(&self.core);
            if core.torn_down {
                return;
            }
            core.torn_down = true;
            core.pending_search = None;
            debug!(table = %core.config.id, "table torn down");
        }
        self.debouncer.cancel();
    }
}

impl<E: Emitter> Drop for TableController<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
