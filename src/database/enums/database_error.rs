use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// No open handle, or the table backing this operation is missing.
    #[error("not configured: {0}")]
    NotConfigured(String),

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("no rows returned")]
    NoRows,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
