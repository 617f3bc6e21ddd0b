pub mod enums;
pub mod error;
pub mod pagination;
pub mod request;
pub mod response;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::EntityKind;
pub use error::CoreError;
pub use pagination::{PageQuery, Pages};
pub use request::{CourseRequest, DepartmentRequest, StudentRequest, TeacherRequest, Validate};
pub use response::{
    CourseResponse, CourseSummary, DepartmentResponse, DepartmentSummary, StudentResponse,
    StudentSummary, TeacherResponse, TeacherSummary,
};
pub use structs::{Course, Department, Id, Student, Teacher};
