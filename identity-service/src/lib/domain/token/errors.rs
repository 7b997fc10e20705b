use thiserror::Error;

/// Error for refresh-token store operations.
///
/// A missing token is not an error at this level; lookups return `Option`
/// and revocation reports whether a row matched.
#[derive(Debug, Clone, Error)]
pub enum TokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
