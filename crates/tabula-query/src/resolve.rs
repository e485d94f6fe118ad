use crate::column::{ColumnDescriptor, SortMapping};
use crate::error::QueryError;
use crate::sort::{SortDirection, SortNode, SortSpec};

/// Translate a UI column into the backend sort fragment for `direction`.
///
/// Unknown, unsortable and unmapped columns are errors. A table built from a
/// validated column set never hits them at runtime.
pub fn resolve(
    columns: &[ColumnDescriptor],
    column_id: &str,
    direction: SortDirection,
) -> Result<SortSpec, QueryError> {
    let column = columns
        .iter()
        .find(|c| c.id == column_id)
        .ok_or_else(|| QueryError::UnknownColumn(column_id.to_string()))?;

    if !column.sortable {
        return Err(QueryError::NotSortable(column_id.to_string()));
    }

    resolve_mapping(&column.id, &column.sort, direction)
}

/// Apply one mapping rule. `{ id: dir }` for direct columns,
/// `{ r1: { r2: { leaf: dir } } }` for a nested column on relation `r1.r2`.
pub fn resolve_mapping(
    column_id: &str,
    mapping: &SortMapping,
    direction: SortDirection,
) -> Result<SortSpec, QueryError> {
    match mapping {
        SortMapping::Direct => Ok(SortSpec::single(column_id, SortNode::Direction(direction))),
        SortMapping::Nested { relation, leaf } => {
            let leaf = leaf.as_deref().unwrap_or(column_id);
            let mut spec = SortSpec::single(leaf, SortNode::Direction(direction));
            for segment in relation.rsplit('.') {
                spec = SortSpec::single(segment, SortNode::Nested(spec));
            }
            Ok(spec)
        }
        SortMapping::Unsupported => Err(QueryError::UnsupportedColumn(column_id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::direct("name", "Name"),
            ColumnDescriptor::nested("branch_name", "Branch", "branch", "branch_name"),
            ColumnDescriptor::nested("organization_name", "Organization", "organization", "name"),
            ColumnDescriptor::nested("organization_id", "Org ID", "organization", "id"),
            ColumnDescriptor::plain("notes", "Notes"),
            ColumnDescriptor {
                sortable: true,
                ..ColumnDescriptor::plain("phone", "Phone")
            },
        ]
    }

    fn to_json(spec: &SortSpec) -> serde_json::Value {
        serde_json::to_value(spec).unwrap()
    }

    #[test]
    fn direct_uses_column_id() {
        let spec = resolve(&columns(), "name", SortDirection::Asc).unwrap();
        assert_eq!(to_json(&spec), json!({ "name": "ASC" }));
    }

    #[test]
    fn nested_produces_exactly_one_relation_and_leaf() {
        let spec = resolve(&columns(), "branch_name", SortDirection::Desc).unwrap();
        assert_eq!(to_json(&spec), json!({ "branch": { "branch_name": "DESC" } }));
    }

    #[test]
    fn leaf_may_differ_from_column_id() {
        let name = resolve(&columns(), "organization_name", SortDirection::Asc).unwrap();
        let id = resolve(&columns(), "organization_id", SortDirection::Asc).unwrap();
        assert_eq!(to_json(&name), json!({ "organization": { "name": "ASC" } }));
        assert_eq!(to_json(&id), json!({ "organization": { "id": "ASC" } }));
    }

    #[test]
    fn missing_leaf_falls_back_to_column_id() {
        let mapping = SortMapping::Nested {
            relation: "role".into(),
            leaf: None,
        };
        let spec = resolve_mapping("title", &mapping, SortDirection::Asc).unwrap();
        assert_eq!(to_json(&spec), json!({ "role": { "title": "ASC" } }));
    }

    #[test]
    fn dotted_relation_nests_per_segment() {
        let mapping = SortMapping::Nested {
            relation: "order.branch".into(),
            leaf: Some("branch_name".into()),
        };
        let spec = resolve_mapping("branch", &mapping, SortDirection::Desc).unwrap();
        assert_eq!(
            to_json(&spec),
            json!({ "order": { "branch": { "branch_name": "DESC" } } })
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        for col in columns().iter().filter(|c| c.sortable && c.sort != SortMapping::Unsupported) {
            for dir in [SortDirection::Asc, SortDirection::Desc] {
                assert_eq!(
                    resolve(&columns(), &col.id, dir),
                    resolve(&columns(), &col.id, dir)
                );
            }
        }
    }

    #[test]
    fn unsupported_mapping_is_an_error() {
        assert_eq!(
            resolve(&columns(), "phone", SortDirection::Asc),
            Err(QueryError::UnsupportedColumn("phone".into()))
        );
    }

    #[test]
    fn unsortable_column_is_an_error() {
        assert_eq!(
            resolve(&columns(), "notes", SortDirection::Asc),
            Err(QueryError::NotSortable("notes".into()))
        );
    }

    #[test]
    fn unknown_column_is_an_error() {
        assert_eq!(
            resolve(&columns(), "missing", SortDirection::Asc),
            Err(QueryError::UnknownColumn("missing".into()))
        );
    }
}
