use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sort::SortSpec;

/// Offset pagination block. `page` is 1-based on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub count: usize,
    pub page: usize,
}

/// Date-range block sent alongside the filter by entities that support it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: String,
    pub to: String,
}

/// Request body posted to an entity's list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPayload {
    pub offset: Offset,
    pub sorts: SortSpec,
    pub filter: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// Response body of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<R = Value> {
    pub count: u64,
    #[serde(default = "Vec::new")]
    pub data: Vec<R>,
}
