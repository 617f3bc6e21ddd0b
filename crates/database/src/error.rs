use core_types::EntityKind;
use thiserror::Error;

/// The driver error wrapped by `DbError::QueryError`.
pub use sqlx::Error as SqlxError;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database query failed: {0}")]
    QueryError(sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("The requested data was not found in the database.")]
    NotFound,

    /// A write referenced a row that does not exist; the storage layer's
    /// foreign key rejected it.
    #[error("Referenced {0} does not exist.")]
    MissingReference(EntityKind),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                match db_err.constraint().and_then(crate::repository::postgres::referenced_entity) {
                    Some(kind) => DbError::MissingReference(kind),
                    None => DbError::QueryError(err),
                }
            }
            _ => DbError::QueryError(err),
        }
    }
}
