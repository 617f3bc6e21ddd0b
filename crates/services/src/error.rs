use core_types::EntityKind;
use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("Database error: {0}")]
    Database(DbError),
}

impl ServiceError {
    /// Maps a repository error raised while working on `kind`.
    ///
    /// A missing row becomes `NotFound(kind)`; a rejected foreign key names
    /// the entity it pointed at instead.
    pub fn from_db(err: DbError, kind: EntityKind) -> Self {
        match err {
            DbError::NotFound => ServiceError::NotFound(kind),
            DbError::MissingReference(missing) => ServiceError::NotFound(missing),
            other => ServiceError::Database(other),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}
