use serde_json::Value;
use tabula_query::{Offset, QueryPayload};
use tokio::sync::mpsc::UnboundedSender;

use crate::state::QueryState;

/// Receives every committed query of a table, in commit order.
///
/// Implementations hand the payload to whatever fetches the data; they must
/// not call back into the table synchronously.
pub trait Emitter: Send + 'static {
    fn emit(&self, payload: QueryPayload);
}

impl<F> Emitter for F
where
    F: Fn(QueryPayload) + Send + 'static,
{
    fn emit(&self, payload: QueryPayload) {
        self(payload)
    }
}

/// Forwards payloads to an async consumer. Sends after the receiver is
/// dropped are discarded.
pub struct ChannelEmitter {
    sender: UnboundedSender<QueryPayload>,
}

impl ChannelEmitter {
    pub fn new(sender: UnboundedSender<QueryPayload>) -> Self {
        Self { sender }
    }
}

impl Emitter for ChannelEmitter {
    fn emit(&self, payload: QueryPayload) {
        if self.sender.send(payload).is_err() {
            tracing::debug!("query receiver closed, dropping payload");
        }
    }
}

/// Build the request body for `state`.
///
/// The page goes out 1-based. The search term is written after the
/// structured filters under `search_field`, so it wins a key collision.
pub fn assemble(state: &QueryState, search_field: &str) -> QueryPayload {
    let mut filter = state.filters().clone();
    filter.insert(
        search_field.to_string(),
        Value::String(state.search_term().to_string()),
    );

    QueryPayload {
        offset: Offset {
            count: state.page_size(),
            page: state.page_index() + 1,
        },
        sorts: state.sort().clone(),
        filter,
        period: state.period().cloned(),
    }
}
