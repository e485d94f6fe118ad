#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("column has no backend sort mapping: {0}")]
    UnsupportedColumn(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("column is not sortable: {0}")]
    NotSortable(String),
}
