use thiserror::Error;

/// Failure of an underlying store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced record does not exist.
    #[error("not found")]
    NotFound,

    /// The backend rejected or failed the operation.
    #[error("store backend failure: {0}")]
    Backend(String),

    /// A stored value could not be (de)serialized.
    #[error("store serialization failure: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}
