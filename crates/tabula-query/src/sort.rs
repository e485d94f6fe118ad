use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    /// The direction a second click on the same column switches to.
    /// There is no "unsorted" step in the cycle.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// One value in a backend sort object: either a direction on a leaf field,
/// or another level of nesting through a joined relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortNode {
    Direction(SortDirection),
    Nested(SortSpec),
}

/// Backend-shaped sort object, e.g. `{ "branch": { "branch_name": "ASC" } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec(BTreeMap<String, SortNode>);

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, node: SortNode) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(field.into(), node);
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&SortNode> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SortNode)> {
        self.0.iter()
    }

    /// Fold another fragment into this one. Fragments that share a relation
    /// are merged level by level, so two leaves under `organization` end up
    /// side by side instead of one replacing the other.
    pub fn merge(&mut self, other: SortSpec) {
        for (field, node) in other.0 {
            match (self.0.get_mut(&field), node) {
                (Some(SortNode::Nested(existing)), SortNode::Nested(incoming)) => {
                    existing.merge(incoming);
                }
                (_, node) => {
                    self.0.insert(field, node);
                }
            }
        }
    }
}
