use sea_orm::{DbErr, SqlErr, TransactionError};
use std::fmt::Display;
use thiserror::Error;

/// Result type alias for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Everything a record operation can report back to its caller
#[derive(Debug, Error)]
pub enum RecordError {
    /// The referenced row is absent, or soft deleted where that matters
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// A uniqueness rule is violated by a still-active row
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store itself rejected the write (unique key or foreign key)
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The caller tried to change something that is immutable
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl RecordError {
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// HTTP status the calling layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Conflict(_) | Self::ConstraintViolation(_) => 409,
            Self::BadRequest(_) => 400,
            Self::Database(_) => 500,
        }
    }
}

impl From<DbErr> for RecordError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::ConstraintViolation(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                Self::ConstraintViolation(detail)
            }
            _ => Self::Database(err),
        }
    }
}

impl From<TransactionError<RecordError>> for RecordError {
    fn from(err: TransactionError<RecordError>) -> Self {
        match err {
            TransactionError::Connection(db_err) => db_err.into(),
            TransactionError::Transaction(record_err) => record_err,
        }
    }
}
