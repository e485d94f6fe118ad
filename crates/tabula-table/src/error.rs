use tabula_query::QueryError;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),

    #[error("sortable column has no backend sort mapping: {0}")]
    UnmappedColumn(String),

    #[error("column has an empty sort mapping: {0}")]
    EmptyMapping(String),

    #[error("page size {0} is not one of the allowed sizes")]
    InvalidPageSize(usize),

    #[error("debounce interval must be positive")]
    InvalidDebounce,

    #[error("invalid table config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("table has been torn down")]
    TornDown,
}

impl TableError {
    /// Configuration errors are programmer mistakes that must be fixed in the
    /// column set; everything else is a rejected interaction.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            TableError::DuplicateColumn(_)
                | TableError::UnmappedColumn(_)
                | TableError::EmptyMapping(_)
                | TableError::InvalidDebounce
                | TableError::Config(_)
        )
    }
}
