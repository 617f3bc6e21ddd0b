//! # Campus Services Crate
//!
//! One service per entity. Services turn request DTOs into entities, drive the
//! repositories and map what comes back into response DTOs. They are the only
//! place that decides whether a storage outcome means "not found".

pub mod course;
pub mod department;
pub mod error;
pub mod student;
pub mod teacher;

pub use course::CourseService;
pub use department::DepartmentService;
pub use error::ServiceError;
pub use student::StudentService;
pub use teacher::TeacherService;

use core_types::{EntityKind, Id};
use std::future::Future;

/// Confirms a row exists before a relationship write.
///
/// A failed lookup is reported the same way as a missing row.
pub(crate) async fn ensure_exists<F>(check: F, kind: EntityKind, id: Id) -> Result<(), ServiceError>
where
    F: Future<Output = Result<bool, database::DbError>>,
{
    match check.await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ServiceError::NotFound(kind)),
        Err(err) => {
            tracing::warn!(entity = %kind, id, error = %err, "Existence check failed.");
            Err(ServiceError::NotFound(kind))
        }
    }
}
