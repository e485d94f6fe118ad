use serde::{Deserialize, Serialize};

/// How a UI column translates into a backend sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SortMapping {
    /// The backend field name is the column id.
    Direct,
    /// The sortable value lives on a joined entity. `relation` may be a
    /// dotted path; `leaf` falls back to the column id.
    Nested {
        relation: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        leaf: Option<String>,
    },
    #[default]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub id: String,
    #[serde(default)]
    pub header: String,
    /// Path into the row's display shape. Only the presentation layer reads it.
    #[serde(default)]
    pub accessor: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub sort: SortMapping,
}

impl ColumnDescriptor {
    /// A display-only column that never enters the sort state.
    pub fn plain(id: &str, header: &str) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: id.into(),
            sortable: false,
            sort: SortMapping::Unsupported,
        }
    }

    pub fn direct(id: &str, header: &str) -> Self {
        Self {
            sortable: true,
            sort: SortMapping::Direct,
            ..Self::plain(id, header)
        }
    }

    pub fn nested(id: &str, header: &str, relation: &str, leaf: &str) -> Self {
        Self {
            sortable: true,
            sort: SortMapping::Nested {
                relation: relation.into(),
                leaf: Some(leaf.into()),
            },
            ..Self::plain(id, header)
        }
    }

    pub fn with_accessor(mut self, accessor: &str) -> Self {
        self.accessor = accessor.into();
        self
    }
}
